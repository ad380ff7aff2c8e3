//! Resumable generation sessions.
//!
//! A session walks the rule list in order. Each run recomputes a rule's
//! filtered candidate list from scratch, skips what earlier runs already
//! wrote (tracked by the cursor), and writes until the per-run limit is hit.
//! Because expansion is deterministic, the skipped prefix is exactly what
//! was written before, even across process restarts.

use std::io;

use pwv_model::{Cursor, PwvError, Result, SessionRecord, SessionState};
use tracing::{debug, info, info_span};

use crate::expander::{ExpansionConfig, Expander};
use crate::filter::filter_candidates;
use crate::rule::Rule;

/// Maximum number of candidates kept for the post-run preview.
pub const PREVIEW_LIMIT: usize = 100;

/// Destination for candidates produced by a run.
pub trait CandidateSink {
    fn accept(&mut self, candidate: &str) -> io::Result<()>;
}

impl CandidateSink for Vec<String> {
    fn accept(&mut self, candidate: &str) -> io::Result<()> {
        self.push(candidate.to_string());
        Ok(())
    }
}

impl<S: CandidateSink + ?Sized> CandidateSink for &mut S {
    fn accept(&mut self, candidate: &str) -> io::Result<()> {
        (**self).accept(candidate)
    }
}

/// Result of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub written: usize,
    /// The first candidates written, at most [`PREVIEW_LIMIT`].
    pub preview: Vec<String>,
    /// Cursor after the run.
    pub cursor: Cursor,
    pub completed: bool,
}

/// State machine driving a [`SessionRecord`] through the rule list.
#[derive(Debug, Clone)]
pub struct GenerationSession {
    record: SessionRecord,
}

impl GenerationSession {
    pub fn new(record: SessionRecord) -> Self {
        Self { record }
    }

    pub fn record(&self) -> &SessionRecord {
        &self.record
    }

    pub fn into_record(self) -> SessionRecord {
        self.record
    }

    pub fn state(&self, total_rules: usize) -> SessionState {
        self.record.state(total_rules)
    }

    /// Move the cursor back to the first rule. Totals and history are kept.
    pub fn reset(&mut self) {
        self.record.cursor = Cursor::default();
        self.record.is_completed = false;
    }

    /// The filtered candidate list for `rule`, exactly as a run would see it.
    pub fn candidates_for(&self, expander: &Expander, rule: &Rule) -> Vec<String> {
        filter_candidates(expander.expand(rule), &self.record.constraints)
    }

    /// Write up to `limit` candidates to `sink`, continuing from the cursor.
    ///
    /// A completed session writes nothing until [`reset`](Self::reset) is
    /// called. On a sink error the record is left untouched.
    pub fn start_run<S>(
        &mut self,
        rules: &[Rule],
        limit: usize,
        config: &ExpansionConfig,
        sink: &mut S,
    ) -> Result<RunOutcome>
    where
        S: CandidateSink + ?Sized,
    {
        let total_rules = rules.len();
        let start = self.record.cursor;
        let span = info_span!(
            "run",
            session_id = %self.record.session_id,
            start_rule = start.rule_index,
            skip = start.count_within_rule,
            limit
        );
        let _guard = span.enter();

        if self.state(total_rules) == SessionState::Completed {
            info!(total_rules, "session already completed; nothing to generate");
            self.record.is_completed = true;
            return Ok(RunOutcome {
                written: 0,
                preview: Vec::new(),
                cursor: start,
                completed: true,
            });
        }

        let expander = Expander::new(&self.record.profile, config.clone());
        let mut written = 0usize;
        let mut preview = Vec::new();
        let mut rule_index = start.rule_index;
        let mut count = start.count_within_rule;

        while written < limit && rule_index < total_rules {
            let rule = &rules[rule_index];
            let candidates = self.candidates_for(&expander, rule);
            let skip = if rule_index == start.rule_index {
                start.count_within_rule
            } else {
                0
            };
            debug!(
                rule_index,
                rule = %rule.source,
                candidates = candidates.len(),
                skip,
                "processing rule"
            );
            for candidate in candidates.iter().skip(skip) {
                if written >= limit {
                    break;
                }
                sink.accept(candidate).map_err(PwvError::Sink)?;
                if preview.len() < PREVIEW_LIMIT {
                    preview.push(candidate.clone());
                }
                written += 1;
                count += 1;
            }
            if count >= candidates.len() {
                rule_index += 1;
                count = 0;
            } else {
                break;
            }
        }

        let cursor = Cursor::new(rule_index, count);
        let completed = rule_index >= total_rules;
        self.record.cursor = cursor;
        self.record.is_completed = completed;
        self.record.total_generated += written as u64;
        info!(
            written,
            rule_index,
            count_within_rule = count,
            completed,
            total_generated = self.record.total_generated,
            "run finished"
        );
        Ok(RunOutcome {
            written,
            preview,
            cursor,
            completed,
        })
    }
}
