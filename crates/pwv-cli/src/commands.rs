use std::io::{self, IsTerminal};

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use pwv_cli::types::{ResumeOutcome, RunResult};
use pwv_cli::workflow::{RunOptions, Workspace, resume_session, start_new_session};
use pwv_model::{Constraints, InputProfile};

use crate::cli::{NewArgs, ResumeArgs, RunArgs, ShowArgs};
use crate::summary::{
    print_already_completed, print_run_summary, print_session_detail, print_sessions,
};

pub fn run_new(workspace: &Workspace, args: &NewArgs) -> Result<RunResult> {
    let profile = InputProfile::new(
        clean_values(&args.strings),
        clean_values(&args.dates),
        clean_values(&args.numbers),
    );
    let constraints = Constraints::default()
        .with_min_length(Some(args.constraints.min_length))
        .with_max_length(args.constraints.max_length)
        .with_uppercase(args.constraints.require_uppercase)
        .with_symbol(args.constraints.require_symbol);
    let options = run_options(&args.run);
    let progress = progress_bar(options.limit);
    let result = start_new_session(
        workspace,
        profile,
        constraints,
        args.ephemeral,
        &options,
        &progress,
    )?;
    print_run_summary(&result, !args.run.no_preview);
    Ok(result)
}

pub fn run_resume(workspace: &Workspace, args: &ResumeArgs) -> Result<()> {
    let options = run_options(&args.run);
    let progress = progress_bar(options.limit);
    match resume_session(workspace, &args.selector, args.restart, &options, &progress)? {
        ResumeOutcome::AlreadyCompleted(record) => {
            progress.finish_and_clear();
            print_already_completed(&record);
        }
        ResumeOutcome::Ran(result) => print_run_summary(&result, !args.run.no_preview),
    }
    Ok(())
}

pub fn run_sessions(workspace: &Workspace) -> Result<()> {
    let sessions = workspace.sessions();
    print_sessions(&sessions, total_rules(workspace));
    Ok(())
}

pub fn run_show(workspace: &Workspace, args: &ShowArgs) -> Result<()> {
    let record = workspace.find_session(&args.selector)?;
    print_session_detail(&record, total_rules(workspace));
    Ok(())
}

/// Rule count for status display; listing still works without a rule file.
fn total_rules(workspace: &Workspace) -> Option<usize> {
    match workspace.rules() {
        Ok(rules) => Some(rules.len()),
        Err(error) => {
            warn!("{error:#}; session status falls back to the stored flag");
            None
        }
    }
}

fn run_options(args: &RunArgs) -> RunOptions {
    RunOptions {
        limit: args.limit,
        output_name: args.output.clone(),
        max_per_rule: args.max_per_rule,
    }
}

/// Trimmed, non-empty values.
fn clean_values(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|value| value.as_str().trim())
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn progress_bar(limit: usize) -> ProgressBar {
    if !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(limit as u64);
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] {wide_bar:.cyan/blue} {pos}/{len} ({per_sec})",
    ) {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}
