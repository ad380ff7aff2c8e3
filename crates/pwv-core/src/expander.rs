//! Combinatorial binder turning a rule plus a profile into candidates.
//!
//! Expansion is breadth-first over partial configurations: one slot per
//! token, filled left to right. Every token maps each partial configuration to
//! zero or more successors; a non-literal token that yields none leaves the
//! configuration unchanged with an empty slot.
//!
//! Output order is fully determined by the rule, the profile and the
//! configuration. Resumed sessions skip a prefix of this list by count, so the
//! order must be identical in every process. De-duplication goes through a
//! side set that never influences order.

use std::collections::{BTreeSet, HashSet};

use pwv_model::InputProfile;
use tracing::{debug, warn};

use crate::date::DateDerivation;
use crate::leet::leet_variants;
use crate::rule::{Rule, Token};

pub const DEFAULT_SYMBOLS: &[&str] = &["@", "#", "$", "%", "!", "&", "*", "-", "_"];

pub const DEFAULT_COMMON_NUMBERS: &[&str] = &[
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "123", "1234", "12345", "123456", "321",
    "4321", "54321", "123321", "12344321", "1234554321", "2020", "2021", "2022", "2023", "2024",
    "2025", "2026",
];

/// Value tables and limits used while expanding rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionConfig {
    /// Values bound by `symbol` tokens.
    pub symbols: Vec<String>,
    /// Values bound by `common_number` tokens.
    pub common_numbers: Vec<String>,
    /// Stop a rule after at most this many distinct candidates.
    ///
    /// The capped list is always a prefix of the uncapped one.
    pub max_candidates_per_rule: Option<usize>,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(ToString::to_string).collect(),
            common_numbers: DEFAULT_COMMON_NUMBERS
                .iter()
                .map(ToString::to_string)
                .collect(),
            max_candidates_per_rule: None,
        }
    }
}

impl ExpansionConfig {
    #[must_use]
    pub fn with_symbols(mut self, symbols: Vec<String>) -> Self {
        self.symbols = symbols;
        self
    }

    #[must_use]
    pub fn with_common_numbers(mut self, common_numbers: Vec<String>) -> Self {
        self.common_numbers = common_numbers;
        self
    }

    #[must_use]
    pub fn with_max_candidates_per_rule(mut self, limit: Option<usize>) -> Self {
        self.max_candidates_per_rule = limit;
        self
    }
}

#[derive(Debug, Clone)]
struct Partial {
    slots: Vec<Option<String>>,
    /// Lowercased input strings already bound in this configuration.
    used: BTreeSet<String>,
}

impl Partial {
    fn seed(rule: &Rule) -> Self {
        let slots = rule
            .tokens
            .iter()
            .map(|token| match token {
                Token::Literal(value) => Some(value.clone()),
                _ => None,
            })
            .collect();
        Self {
            slots,
            used: BTreeSet::new(),
        }
    }

    fn fill(&self, index: usize, value: String) -> Self {
        let mut next = self.clone();
        next.slots[index] = Some(value);
        next
    }

    fn bind(&self, index: usize, value: String, source: &str) -> Self {
        let mut next = self.fill(index, value);
        next.used.insert(source.to_lowercase());
        next
    }

    fn render(&self, space_joined: bool) -> String {
        let separator = if space_joined { " " } else { "" };
        self.slots
            .iter()
            .map(|slot| slot.as_deref().unwrap_or(""))
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// Expands rules against one profile.
#[derive(Debug, Clone)]
pub struct Expander {
    strings: Vec<String>,
    numbers: Vec<String>,
    dates: Vec<DateDerivation>,
    config: ExpansionConfig,
}

impl Expander {
    pub fn new(profile: &InputProfile, config: ExpansionConfig) -> Self {
        Self {
            strings: profile
                .usable_strings()
                .into_iter()
                .map(str::to_string)
                .collect(),
            numbers: profile.numbers.clone(),
            dates: profile
                .dates
                .iter()
                .map(|date| DateDerivation::derive(date))
                .collect(),
            config,
        }
    }

    /// Every distinct candidate for `rule`, in deterministic order.
    ///
    /// Rules containing date tokens expand once per profile date, so a
    /// profile without dates produces nothing for them.
    pub fn expand(&self, rule: &Rule) -> Vec<String> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        if rule.has_date_tokens() {
            for date in &self.dates {
                if self.is_capped(&out) {
                    break;
                }
                self.expand_family(rule, Some(date), &mut out, &mut seen);
            }
        } else {
            self.expand_family(rule, None, &mut out, &mut seen);
        }
        if self.is_capped(&out) {
            warn!(
                rule = %rule.source,
                limit = out.len(),
                "rule expansion stopped at candidate limit"
            );
        }
        debug!(
            rule = %rule.source,
            tokens = rule.tokens.len(),
            candidates = out.len(),
            "rule expanded"
        );
        out
    }

    fn remaining(&self, out: &[String]) -> Option<usize> {
        self.config
            .max_candidates_per_rule
            .map(|limit| limit.saturating_sub(out.len()))
    }

    fn is_capped(&self, out: &[String]) -> bool {
        self.remaining(out) == Some(0)
    }

    fn expand_family(
        &self,
        rule: &Rule,
        date: Option<&DateDerivation>,
        out: &mut Vec<String>,
        seen: &mut HashSet<String>,
    ) {
        let mut partials = vec![Partial::seed(rule)];
        for (index, token) in rule.tokens.iter().enumerate() {
            let mut next = Vec::with_capacity(partials.len());
            for partial in partials {
                let before = next.len();
                self.successors(token, index, &partial, date, &mut next);
                if next.len() == before {
                    next.push(partial);
                }
            }
            partials = next;
        }
        // Duplicate and empty renders do not count towards the cap.
        for partial in partials {
            if self.is_capped(out) {
                break;
            }
            let rendered = partial.render(rule.space_joined);
            if rendered.is_empty() {
                continue;
            }
            if seen.insert(rendered.clone()) {
                out.push(rendered);
            }
        }
    }

    /// Input strings not yet used by `partial`, or the first string when all
    /// of them are.
    fn sources(&self, partial: &Partial) -> Vec<&str> {
        let fresh: Vec<&str> = self
            .strings
            .iter()
            .filter(|value| !partial.used.contains(&value.to_lowercase()))
            .map(String::as_str)
            .collect();
        if fresh.is_empty() {
            self.strings.first().map(String::as_str).into_iter().collect()
        } else {
            fresh
        }
    }

    fn successors(
        &self,
        token: &Token,
        index: usize,
        partial: &Partial,
        date: Option<&DateDerivation>,
        next: &mut Vec<Partial>,
    ) {
        let components = date.map(|date| &date.components);
        match token {
            Token::String { case, .. } => {
                for source in self.sources(partial) {
                    next.push(partial.bind(index, case.apply(source), source));
                }
            }
            Token::StringLeet { case, .. } => {
                for source in self.sources(partial) {
                    for variant in leet_variants(&case.apply(source)) {
                        next.push(partial.bind(index, variant, source));
                    }
                }
            }
            Token::Character { case, .. } => {
                for source in self.sources(partial) {
                    if let Some(first) = source.chars().next() {
                        next.push(partial.bind(index, case.apply(&first.to_string()), source));
                    }
                }
            }
            Token::Day => {
                push_present(next, partial, index, components.and_then(|c| c.day.as_ref()));
            }
            Token::Month => {
                push_present(next, partial, index, components.and_then(|c| c.month.as_ref()));
            }
            Token::Year => {
                push_present(next, partial, index, components.and_then(|c| c.full_year.as_ref()));
            }
            Token::ShortYear => {
                push_present(next, partial, index, components.and_then(|c| c.short_year.as_ref()));
            }
            Token::FullDate => {
                if let Some(date) = date {
                    push_each(next, partial, index, &date.numbers);
                }
            }
            Token::Symbol => push_each(next, partial, index, &self.config.symbols),
            Token::CommonNumber => push_each(next, partial, index, &self.config.common_numbers),
            Token::Number => push_each(next, partial, index, &self.numbers),
            Token::Literal(_) => {}
        }
    }
}

fn push_present(next: &mut Vec<Partial>, partial: &Partial, index: usize, value: Option<&String>) {
    if let Some(value) = value {
        next.push(partial.fill(index, value.clone()));
    }
}

fn push_each(next: &mut Vec<Partial>, partial: &Partial, index: usize, values: &[String]) {
    for value in values {
        next.push(partial.fill(index, value.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::parse_rule;

    fn profile(strings: &[&str], dates: &[&str], numbers: &[&str]) -> InputProfile {
        let owned = |values: &[&str]| values.iter().map(ToString::to_string).collect();
        InputProfile::new(owned(strings), owned(dates), owned(numbers))
    }

    fn expand(rule: &str, profile: &InputProfile) -> Vec<String> {
        Expander::new(profile, ExpansionConfig::default()).expand(&parse_rule(rule))
    }

    #[test]
    fn strings_are_not_reused_within_a_candidate() {
        let out = expand("string + string", &profile(&["ann", "bob"], &[], &[]));
        assert_eq!(out, vec!["annbob", "bobann"]);
    }

    #[test]
    fn single_string_falls_back_to_reuse() {
        let out = expand("string + literal:_ + string", &profile(&["ann"], &[], &[]));
        assert_eq!(out, vec!["ann_ann"]);
    }

    #[test]
    fn reuse_check_ignores_case() {
        let out = expand("string + string", &profile(&["Ann", "ANN", "bo"], &[], &[]));
        assert_eq!(out, vec!["annbo", "boann"]);
    }

    #[test]
    fn character_takes_first_letter_then_case() {
        let out = expand(
            "character:u:A + string",
            &profile(&["maria", "jose"], &[], &[]),
        );
        assert_eq!(out, vec!["Mjose", "Jmaria"]);
    }

    #[test]
    fn missing_data_leaves_slot_empty() {
        let out = expand("string + number", &profile(&["ann"], &[], &[]));
        assert_eq!(out, vec!["ann"]);
        let out = expand("literal:x + string", &profile(&[], &[], &[]));
        assert_eq!(out, vec!["x"]);
    }

    #[test]
    fn empty_renders_are_dropped() {
        assert!(expand("string + number", &profile(&[], &[], &[])).is_empty());
    }

    #[test]
    fn date_rules_expand_per_date_without_crossing() {
        let out = expand(
            "day + month",
            &profile(&["x"], &["1/2/2000", "3/4/2001"], &[]),
        );
        assert_eq!(out, vec!["12", "34"]);
    }

    #[test]
    fn date_rules_without_dates_yield_nothing() {
        assert!(expand("string + year", &profile(&["ann"], &[], &[])).is_empty());
    }

    #[test]
    fn malformed_date_contributes_only_other_tokens() {
        let out = expand("string + year", &profile(&["ann"], &["2003"], &[]));
        assert_eq!(out, vec!["ann"]);
    }

    #[test]
    fn space_joined_rendering() {
        let out = expand(
            "string + literal: loves + string",
            &profile(&["ann", "bob"], &[], &[]),
        );
        assert_eq!(out, vec!["ann  loves bob", "bob  loves ann"]);
    }

    #[test]
    fn duplicates_collapse_in_first_seen_order() {
        let out = expand("number", &profile(&[], &[], &["7", "3", "7"]));
        assert_eq!(out, vec!["7", "3"]);
    }

    #[test]
    fn cap_keeps_a_prefix() {
        let profile = profile(&["anna", "tom"], &[], &[]);
        let rule = parse_rule("string_leet + common_number");
        let full = Expander::new(&profile, ExpansionConfig::default()).expand(&rule);
        let capped = Expander::new(
            &profile,
            ExpansionConfig::default().with_max_candidates_per_rule(Some(10)),
        )
        .expand(&rule);
        assert_eq!(capped.len(), 10);
        assert_eq!(&full[..10], capped.as_slice());
    }

    fn capped(rule: &str, profile: &InputProfile, limit: usize) -> Vec<String> {
        let config = ExpansionConfig::default().with_max_candidates_per_rule(Some(limit));
        Expander::new(profile, config).expand(&parse_rule(rule))
    }

    #[test]
    fn cap_skips_duplicate_renders() {
        let profile = profile(&["a", "A", "b"], &[], &[]);
        let full = expand("string", &profile);
        assert_eq!(full, vec!["a", "b"]);
        assert_eq!(capped("string", &profile, 2), full);
    }

    #[test]
    fn cap_finishes_first_date_before_the_next() {
        let profile = profile(&["a", "A", "b"], &["1/1/2000", "2/2/2000"], &[]);
        let full = expand("string + day", &profile);
        assert_eq!(full, vec!["a1", "b1", "a2", "b2"]);
        for limit in 0..=full.len() {
            assert_eq!(capped("string + day", &profile, limit), full[..limit]);
        }
    }

    #[test]
    fn cap_ignores_empty_renders() {
        let profile = profile(&[], &[], &["", "7"]);
        assert_eq!(capped("number", &profile, 1), vec!["7"]);
    }

    #[test]
    fn custom_tables_replace_defaults() {
        let config = ExpansionConfig::default()
            .with_symbols(vec!["!".into()])
            .with_common_numbers(vec!["9".into()]);
        let out = Expander::new(&profile(&["ann"], &[], &[]), config)
            .expand(&parse_rule("string + symbol + common_number"));
        assert_eq!(out, vec!["ann!9"]);
    }
}
