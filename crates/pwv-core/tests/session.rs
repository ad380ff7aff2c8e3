//! Resume protocol tests for GenerationSession.

use pwv_core::{ExpansionConfig, GenerationSession, Rule, parse_rules};
use pwv_model::{Constraints, Cursor, InputProfile, SessionId, SessionRecord, SessionState};

fn record(strings: &[&str], numbers: &[&str]) -> SessionRecord {
    let owned = |values: &[&str]| values.iter().map(ToString::to_string).collect();
    SessionRecord::new(
        SessionId::new("resume-test").unwrap(),
        InputProfile::new(owned(strings), vec![], owned(numbers)),
        Constraints::unrestricted(),
    )
}

fn library() -> Vec<Rule> {
    parse_rules("string\nnumber\nstring + symbol\n")
}

fn run(session: &mut GenerationSession, rules: &[Rule], limit: usize) -> Vec<String> {
    let mut sink = Vec::new();
    session
        .start_run(rules, limit, &ExpansionConfig::default(), &mut sink)
        .expect("run succeeds");
    sink
}

#[test]
fn resumes_mid_rule_and_continues_into_next() {
    let rules = library();
    let mut record = record(&["ann"], &["1", "2", "3", "4", "5", "6", "7", "8"]);
    record.cursor = Cursor::new(1, 4);
    let mut session = GenerationSession::new(record);
    assert_eq!(session.state(rules.len()), SessionState::InProgress);

    let mut sink = Vec::new();
    let outcome = session
        .start_run(&rules, 10, &ExpansionConfig::default(), &mut sink)
        .unwrap();

    assert_eq!(outcome.written, 10);
    assert_eq!(&sink[..4], &["5", "6", "7", "8"]);
    assert_eq!(&sink[4..], &["ann@", "ann#", "ann$", "ann%", "ann!", "ann&"]);
    assert_eq!(outcome.cursor, Cursor::new(2, 6));
    assert!(!outcome.completed);
    assert_eq!(session.record().total_generated, 10);
}

#[test]
fn runs_until_completion_across_calls() {
    let rules = library();
    let mut session = GenerationSession::new(record(&["ann"], &["1", "2"]));
    let mut all = Vec::new();
    for _ in 0..10 {
        all.extend(run(&mut session, &rules, 3));
        if session.state(rules.len()) == SessionState::Completed {
            break;
        }
    }
    assert_eq!(all.len(), 1 + 2 + 9);
    assert_eq!(all[0], "ann");
    assert_eq!(all.last().map(String::as_str), Some("ann_"));
    assert!(session.record().is_completed);
    assert_eq!(session.record().cursor, Cursor::new(3, 0));
}

#[test]
fn split_runs_match_a_single_run() {
    let rules = library();
    let mut single = GenerationSession::new(record(&["ann", "Bo"], &["42", "7"]));
    let whole = run(&mut single, &rules, 9);

    let mut split = GenerationSession::new(record(&["ann", "Bo"], &["42", "7"]));
    let mut parts = run(&mut split, &rules, 4);
    parts.extend(run(&mut split, &rules, 5));

    assert_eq!(parts, whole);
    assert_eq!(split.record().cursor, single.record().cursor);
}

#[test]
fn session_survives_serialization_between_runs() {
    let rules = library();
    let mut first = GenerationSession::new(record(&["ann", "Bo"], &["42"]));
    let mut written = run(&mut first, &rules, 5);

    let json = serde_json_round_trip(first.into_record());
    let mut second = GenerationSession::new(json);
    written.extend(run(&mut second, &rules, 100));

    let mut fresh = GenerationSession::new(record(&["ann", "Bo"], &["42"]));
    assert_eq!(written, run(&mut fresh, &rules, 100));
}

fn serde_json_round_trip(record: SessionRecord) -> SessionRecord {
    let text = serde_json::to_string(&record).unwrap();
    serde_json::from_str(&text).unwrap()
}
