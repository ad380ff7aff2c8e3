//! Session lifecycle shared by the `new` and `resume` commands.
//!
//! A run scans the output directory for the next run number, streams the
//! session's candidates into a temp artifact, publishes it, and only then
//! writes the advanced cursor back to the session store.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use tracing::{info, info_span, trace};

use pwv_core::{CandidateSink, ExpansionConfig, GenerationSession, Rule, load_rules};
use pwv_model::{Constraints, Cursor, InputProfile, SessionId, SessionRecord, SessionState};
use pwv_persistence::{
    JsonSessionStore, OUTPUT_DIR_NAME, RunArtifact, SessionStore, next_run_index, select_session,
    sessions_by_recency,
};

use crate::logging::redact_value;
use crate::types::{ResumeOutcome, RunResult};

/// Default number of candidates written per run.
pub const DEFAULT_RUN_LIMIT: usize = 1_000_000;

/// Locations of the rule library and the data directory.
#[derive(Debug, Clone)]
pub struct Workspace {
    data_dir: PathBuf,
    rules_path: PathBuf,
}

impl Workspace {
    pub fn new(data_dir: impl Into<PathBuf>, rules_path: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            rules_path: rules_path.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn rules_path(&self) -> &Path {
        &self.rules_path
    }

    pub fn output_dir(&self) -> PathBuf {
        self.data_dir.join(OUTPUT_DIR_NAME)
    }

    pub fn store(&self) -> JsonSessionStore {
        JsonSessionStore::in_dir(&self.data_dir)
    }

    pub fn rules(&self) -> Result<Vec<Rule>> {
        load_rules(&self.rules_path).context("load rules")
    }

    /// All stored sessions, most recently updated first.
    pub fn sessions(&self) -> Vec<SessionRecord> {
        sessions_by_recency(self.store().load())
    }

    /// Look a session up by 1-based recency position or id.
    pub fn find_session(&self, selector: &str) -> Result<SessionRecord> {
        Ok(select_session(&self.sessions(), selector)?)
    }
}

/// Per-run options common to `new` and `resume`.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub limit: usize,
    pub output_name: Option<String>,
    pub max_per_rule: Option<usize>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RUN_LIMIT,
            output_name: None,
            max_per_rule: None,
        }
    }
}

/// Create a session from `profile` and run it once.
///
/// Ephemeral sessions get an `ephemeral_` id and never reach the store.
pub fn start_new_session(
    workspace: &Workspace,
    profile: InputProfile,
    constraints: Constraints,
    ephemeral: bool,
    options: &RunOptions,
    progress: &ProgressBar,
) -> Result<RunResult> {
    let rules = workspace.rules()?;
    let session_id = if ephemeral {
        SessionId::ephemeral()
    } else {
        SessionId::generate()
    };
    let record = SessionRecord::new(session_id, profile, constraints);
    let store = workspace.store();
    if !ephemeral {
        store.append(record.clone()).context("save new session")?;
        info!(session_id = %record.session_id, "session created");
    }
    execute_run(
        &store,
        &workspace.output_dir(),
        &rules,
        record,
        options,
        progress,
    )
}

/// Continue a stored session from its cursor.
///
/// A completed session only runs again when `restart` is set, which moves
/// its cursor back to the first rule.
pub fn resume_session(
    workspace: &Workspace,
    selector: &str,
    restart: bool,
    options: &RunOptions,
    progress: &ProgressBar,
) -> Result<ResumeOutcome> {
    let store = workspace.store();
    let record = select_session(&sessions_by_recency(store.load()), selector)?;
    let rules = workspace.rules()?;

    let record = if record.state(rules.len()) == SessionState::Completed {
        if !restart {
            let record = if record.is_completed {
                record
            } else {
                store
                    .update(record.session_id.as_str(), &mut |stored| {
                        stored.is_completed = true;
                    })
                    .context("mark session completed")?
            };
            info!(session_id = %record.session_id, "session already completed");
            return Ok(ResumeOutcome::AlreadyCompleted(record));
        }
        info!(session_id = %record.session_id, "restarting completed session");
        store
            .update(record.session_id.as_str(), &mut |stored| {
                stored.cursor = Cursor::default();
                stored.is_completed = false;
            })
            .context("reset session cursor")?
    } else {
        record
    };

    let result = execute_run(
        &store,
        &workspace.output_dir(),
        &rules,
        record,
        options,
        progress,
    )?;
    Ok(ResumeOutcome::Ran(result))
}

/// Run `record` once against `rules`, publish the artifact, and persist the
/// advanced session unless it is ephemeral.
///
/// If generation fails the temp artifact is discarded and the stored session
/// keeps its previous cursor.
pub fn execute_run(
    store: &dyn SessionStore,
    output_dir: &Path,
    rules: &[Rule],
    record: SessionRecord,
    options: &RunOptions,
    progress: &ProgressBar,
) -> Result<RunResult> {
    let started = Instant::now();
    let session_id = record.session_id.clone();
    let started_at = record.cursor;
    let span = info_span!("session_run", session_id = %session_id);
    let _guard = span.enter();

    let run_index = next_run_index(output_dir, &session_id).context("scan output directory")?;
    let mut artifact =
        RunArtifact::create(output_dir, &session_id, run_index).context("create run output")?;
    let config = ExpansionConfig::default().with_max_candidates_per_rule(options.max_per_rule);

    let mut session = GenerationSession::new(record);
    let outcome = {
        let mut sink = ProgressSink {
            inner: &mut artifact,
            progress,
        };
        session
            .start_run(rules, options.limit, &config, &mut sink)
            .context("generate candidates")?
    };
    progress.finish_and_clear();

    let published = artifact
        .publish(options.output_name.as_deref())
        .context("publish run output")?;

    let mut record = session.into_record();
    record.last_run_files.push(published.file_name.clone());
    let session = if record.is_ephemeral() {
        record.touch();
        record
    } else {
        store
            .update(session_id.as_str(), &mut |stored| *stored = record.clone())
            .context("save session progress")?
    };

    info!(
        run = run_index,
        written = outcome.written,
        output = %published.path.display(),
        "run complete"
    );
    Ok(RunResult {
        session,
        total_rules: rules.len(),
        run_index,
        started_at,
        written: outcome.written,
        output_file: published.path,
        preview: outcome.preview,
        elapsed: started.elapsed(),
    })
}

/// Forwards candidates to the artifact and ticks the progress bar.
struct ProgressSink<'a, S: CandidateSink> {
    inner: &'a mut S,
    progress: &'a ProgressBar,
}

impl<S: CandidateSink> CandidateSink for ProgressSink<'_, S> {
    fn accept(&mut self, candidate: &str) -> io::Result<()> {
        self.inner.accept(candidate)?;
        trace!(candidate = redact_value(candidate), "candidate written");
        self.progress.inc(1);
        Ok(())
    }
}
