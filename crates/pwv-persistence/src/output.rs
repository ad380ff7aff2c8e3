//! Per-run output artifacts.
//!
//! Candidates are streamed into `temp_<id>_run<N>.txt` and only renamed to
//! their final name once the run succeeded. Final names default to
//! `<written>_passwords_<id>_run<N>.txt`.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use pwv_core::CandidateSink;
use pwv_model::SessionId;
use regex::Regex;

use crate::error::{PersistenceError, Result};

/// Directory below the data directory that receives run artifacts.
pub const OUTPUT_DIR_NAME: &str = "output";

static RUN_FILE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)_passwords_(.+)_run(\d+)\.txt$").expect("Invalid regex pattern")
});

/// Next run number for `session_id`: one past the highest existing artifact,
/// or 1 when the session has none.
pub fn next_run_index(dir: &Path, session_id: &SessionId) -> Result<u32> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(1),
        Err(e) => return Err(PersistenceError::io("read", dir, e)),
    };

    let mut highest = 0u32;
    for entry in entries {
        let entry = entry.map_err(|e| PersistenceError::io("read", dir, e))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if let Some(run) = run_of(name, session_id) {
            highest = highest.max(run);
        }
    }
    Ok(highest.saturating_add(1))
}

/// Run number encoded in a published artifact name belonging to `session_id`.
fn run_of(file_name: &str, session_id: &SessionId) -> Option<u32> {
    let caps = RUN_FILE_REGEX.captures(file_name)?;
    if caps.get(2)?.as_str() != session_id.as_str() {
        return None;
    }
    caps.get(3)?.as_str().parse().ok()
}

/// Default artifact name for a finished run.
pub fn default_file_name(written: usize, session_id: &SessionId, run: u32) -> String {
    format!("{written}_passwords_{session_id}_run{run}.txt")
}

/// Final artifact name: a non-blank custom name (with `.txt` appended when it
/// has no extension) or the default name.
pub fn final_file_name(
    custom: Option<&str>,
    written: usize,
    session_id: &SessionId,
    run: u32,
) -> String {
    match custom.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) if Path::new(name).extension().is_some() => name.to_string(),
        Some(name) => format!("{name}.txt"),
        None => default_file_name(written, session_id, run),
    }
}

/// A published run artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedArtifact {
    pub path: PathBuf,
    pub file_name: String,
    pub written: usize,
}

/// Output file for one run, written to a temp path until published.
#[derive(Debug)]
pub struct RunArtifact {
    dir: PathBuf,
    session_id: SessionId,
    run: u32,
    temp_path: PathBuf,
    writer: Option<BufWriter<File>>,
    written: usize,
    published: bool,
}

impl RunArtifact {
    pub fn create(dir: &Path, session_id: &SessionId, run: u32) -> Result<Self> {
        fs::create_dir_all(dir).map_err(|e| PersistenceError::io("create directory", dir, e))?;
        let temp_path = dir.join(format!("temp_{session_id}_run{run}.txt"));
        let file =
            File::create(&temp_path).map_err(|e| PersistenceError::io("create", &temp_path, e))?;
        tracing::debug!(path = %temp_path.display(), "opened run artifact");
        Ok(Self {
            dir: dir.to_path_buf(),
            session_id: session_id.clone(),
            run,
            temp_path,
            writer: Some(BufWriter::new(file)),
            written: 0,
            published: false,
        })
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Flush, sync and rename the temp file to its final name.
    pub fn publish(mut self, custom_name: Option<&str>) -> Result<PublishedArtifact> {
        let file_name = final_file_name(custom_name, self.written, &self.session_id, self.run);
        let target = self.dir.join(&file_name);

        if let Some(writer) = self.writer.take() {
            let file = writer
                .into_inner()
                .map_err(|e| PersistenceError::io("write", &self.temp_path, e.into_error()))?;
            file.sync_all()
                .map_err(|e| PersistenceError::io("sync", &self.temp_path, e))?;
        }

        fs::rename(&self.temp_path, &target).map_err(|source| {
            PersistenceError::AtomicWriteFailed {
                temp_path: self.temp_path.clone(),
                target_path: target.clone(),
                source,
            }
        })?;
        self.published = true;

        tracing::info!(
            path = %target.display(),
            written = self.written,
            run = self.run,
            "published run artifact"
        );
        Ok(PublishedArtifact {
            path: target,
            file_name,
            written: self.written,
        })
    }
}

impl CandidateSink for RunArtifact {
    fn accept(&mut self, candidate: &str) -> io::Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| io::Error::other("run artifact already published"))?;
        writeln!(writer, "{candidate}")?;
        self.written += 1;
        Ok(())
    }
}

impl Drop for RunArtifact {
    fn drop(&mut self) {
        if self.published {
            return;
        }
        drop(self.writer.take());
        if let Err(error) = fs::remove_file(&self.temp_path) {
            tracing::warn!(
                path = %self.temp_path.display(),
                %error,
                "failed to remove unpublished run artifact"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: &str) -> SessionId {
        SessionId::new(value).unwrap()
    }

    #[test]
    fn default_name_layout() {
        assert_eq!(
            default_file_name(42, &id("abc123"), 3),
            "42_passwords_abc123_run3.txt"
        );
    }

    #[test]
    fn custom_names_get_txt_only_without_extension() {
        let session = id("abc");
        assert_eq!(final_file_name(Some("mine"), 5, &session, 1), "mine.txt");
        assert_eq!(final_file_name(Some("mine.lst"), 5, &session, 1), "mine.lst");
        assert_eq!(final_file_name(Some(" mine "), 5, &session, 1), "mine.txt");
        assert_eq!(
            final_file_name(Some("   "), 5, &session, 1),
            "5_passwords_abc_run1.txt"
        );
        assert_eq!(final_file_name(None, 0, &session, 2), "0_passwords_abc_run2.txt");
    }

    #[test]
    fn run_numbers_match_only_the_exact_id() {
        let session = id("a_b");
        assert_eq!(run_of("3_passwords_a_b_run12.txt", &session), Some(12));
        assert_eq!(run_of("3_passwords_xa_b_run1.txt", &session), None);
        assert_eq!(run_of("3_passwords_a_b_run1.txt.bak", &session), None);
        assert_eq!(run_of("temp_a_b_run4.txt", &session), None);
    }
}
