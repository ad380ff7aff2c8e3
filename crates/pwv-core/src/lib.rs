//! Rule-driven candidate expansion and resumable generation sessions.
//!
//! The pipeline for one rule is:
//!
//! ```text
//! rule text -> parse_rule -> Expander::expand -> filter_candidates -> session
//! ```
//!
//! [`Expander`] uses the case, leet and date helpers while binding tokens.
//! [`GenerationSession`] consumes a bounded prefix of each rule's filtered
//! list and records where the next run has to continue.

pub mod case;
pub mod date;
pub mod expander;
pub mod filter;
pub mod leet;
pub mod rule;
pub mod rules;
pub mod session;

pub use case::{CasePattern, CasePosition, apply_case_pattern};
pub use date::{
    DERIVED_NUMBER_COUNT, DateComponents, DateDerivation, derive_numbers, parse_components,
};
pub use expander::{DEFAULT_COMMON_NUMBERS, DEFAULT_SYMBOLS, ExpansionConfig, Expander};
pub use filter::{filter_candidates, is_valid};
pub use leet::leet_variants;
pub use rule::{Rule, Token, parse_rule};
pub use rules::{load_rules, parse_rules};
pub use session::{CandidateSink, GenerationSession, PREVIEW_LIMIT, RunOutcome};
