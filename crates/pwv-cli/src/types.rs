use std::path::PathBuf;
use std::time::Duration;

use pwv_model::{Cursor, SessionRecord};

/// Everything the CLI reports about one finished run.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// The session after the run, as persisted (or as discarded when ephemeral).
    pub session: SessionRecord,
    pub total_rules: usize,
    pub run_index: u32,
    pub started_at: Cursor,
    pub written: usize,
    pub output_file: PathBuf,
    pub preview: Vec<String>,
    pub elapsed: Duration,
}

impl RunResult {
    pub fn completed(&self) -> bool {
        self.session.cursor.rule_index >= self.total_rules
    }
}

/// Result of `pwv resume`.
#[derive(Debug, Clone)]
pub enum ResumeOutcome {
    /// The session had already walked every rule; nothing was written.
    AlreadyCompleted(SessionRecord),
    Ran(RunResult),
}
