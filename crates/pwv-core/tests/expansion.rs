//! End-to-end expansion scenarios: parse, expand, filter.

use pwv_core::{
    ExpansionConfig, Expander, derive_numbers, filter_candidates, parse_components, parse_rule,
};
use pwv_model::{Constraints, InputProfile};

fn profile(strings: &[&str], dates: &[&str], numbers: &[&str]) -> InputProfile {
    let owned = |values: &[&str]| values.iter().map(ToString::to_string).collect();
    InputProfile::new(owned(strings), owned(dates), owned(numbers))
}

fn generate(rule: &str, profile: &InputProfile, constraints: &Constraints) -> Vec<String> {
    let expander = Expander::new(profile, ExpansionConfig::default());
    filter_candidates(expander.expand(&parse_rule(rule)), constraints)
}

#[test]
fn name_with_common_numbers_respects_min_length() {
    let out = generate(
        "string + common_number",
        &profile(&["Anna"], &[], &[]),
        &Constraints::unrestricted().with_min_length(Some(6)),
    );
    insta::assert_snapshot!(out.join("\n"), @r"
    anna123
    anna1234
    anna12345
    anna123456
    anna321
    anna4321
    anna54321
    anna123321
    anna12344321
    anna1234554321
    anna2020
    anna2021
    anna2022
    anna2023
    anna2024
    anna2025
    anna2026
    ");
}

#[test]
fn leet_expansion_of_single_name() {
    let out = generate(
        "string_leet",
        &profile(&["Eli"], &[], &[]),
        &Constraints::unrestricted(),
    );
    assert_eq!(out.len(), 4);
    for expected in ["eli", "3li", "el1", "3l1"] {
        assert!(out.iter().any(|candidate| candidate == expected), "{expected}");
    }
}

#[test]
fn date_components_and_numbers() {
    let components = parse_components("5/7/2003");
    assert_eq!(components.day.as_deref(), Some("5"));
    assert_eq!(components.month.as_deref(), Some("7"));
    assert_eq!(components.full_year.as_deref(), Some("2003"));
    assert_eq!(components.short_year.as_deref(), Some("03"));
    let numbers = derive_numbers("5/7/2003");
    assert_eq!(&numbers[..2], &["2003", "03"]);
}

#[test]
fn capitalised_name_with_birth_year_and_symbol() {
    let out = generate(
        "string:u:1 + year + symbol",
        &profile(&["maria"], &["11/2/1990"], &[]),
        &Constraints::default().with_symbol(true),
    );
    insta::assert_snapshot!(out.join("\n"), @r"
    Maria1990@
    Maria1990#
    Maria1990$
    Maria1990%
    Maria1990!
    Maria1990&
    Maria1990*
    Maria1990-
    Maria1990_
    ");
}

#[test]
fn full_date_branches_over_derived_numbers() {
    let out = generate(
        "string + full_date",
        &profile(&["leo"], &["1/12/1999"], &[]),
        &Constraints::unrestricted(),
    );
    assert_eq!(
        out,
        vec![
            "leo1999",
            "leo99",
            "leo112",
            "leo1121999",
            "leo11299",
            "leo121",
            "leo1211999",
            "leo12199",
            "leo1999121",
            "leo99121",
            "leo1999112",
            "leo99112",
        ]
    );
}

#[test]
fn two_names_and_initial() {
    let out = generate(
        "string:u:1 + character:u:A + number",
        &profile(&["ana", "luis"], &[], &["7"]),
        &Constraints::unrestricted(),
    );
    assert_eq!(out, vec!["AnaL7", "LuisA7"]);
}

#[test]
fn multiple_dates_produce_independent_families() {
    let out = generate(
        "string + short_year",
        &profile(&["kai"], &["1/1/2001", "2/2/1985", "bad"], &[]),
        &Constraints::unrestricted(),
    );
    assert_eq!(out, vec!["kai01", "kai85", "kai"]);
}

#[test]
fn expansion_is_repeatable() {
    let profile = profile(&["Sam", "Tess"], &["3/9/1994"], &["12"]);
    let rule = parse_rule("string_leet:u:1 + day + month + symbol + number");
    let first = Expander::new(&profile, ExpansionConfig::default()).expand(&rule);
    let second = Expander::new(&profile, ExpansionConfig::default()).expand(&rule);
    assert!(!first.is_empty());
    assert_eq!(first, second);
}
