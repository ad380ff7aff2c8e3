//! Candidate policy filtering.

use pwv_model::Constraints;

/// Whether `candidate` satisfies every constraint that is set.
///
/// Lengths count characters. A "symbol" is any character that is neither a
/// letter nor a digit, independent of the configured symbol table.
pub fn is_valid(candidate: &str, constraints: &Constraints) -> bool {
    let length = candidate.chars().count();
    if constraints.min_length.is_some_and(|min| length < min) {
        return false;
    }
    if constraints.max_length.is_some_and(|max| length > max) {
        return false;
    }
    if constraints.must_include_uppercase && !candidate.chars().any(char::is_uppercase) {
        return false;
    }
    if constraints.must_include_symbol && candidate.chars().all(char::is_alphanumeric) {
        return false;
    }
    true
}

/// Keep the candidates that pass [`is_valid`], preserving order.
pub fn filter_candidates(candidates: Vec<String>, constraints: &Constraints) -> Vec<String> {
    candidates
        .into_iter()
        .filter(|candidate| is_valid(candidate, constraints))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn length_bounds_are_inclusive() {
        let constraints = Constraints::unrestricted()
            .with_min_length(Some(3))
            .with_max_length(Some(4));
        assert_eq!(
            filter_candidates(owned(&["ab", "abc", "abcd", "abcde"]), &constraints),
            owned(&["abc", "abcd"])
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let constraints = Constraints::unrestricted().with_max_length(Some(4));
        assert!(is_valid("jörg", &constraints));
    }

    #[test]
    fn uppercase_and_symbol_requirements() {
        let constraints = Constraints::unrestricted()
            .with_uppercase(true)
            .with_symbol(true);
        assert!(!is_valid("anna123", &constraints));
        assert!(!is_valid("Anna123", &constraints));
        assert!(!is_valid("anna_123", &constraints));
        assert!(is_valid("Anna 123", &constraints));
        assert!(is_valid("Anna~1", &constraints));
    }

    #[test]
    fn order_is_preserved() {
        let constraints = Constraints::unrestricted();
        let input = owned(&["zeta", "alpha", "mid"]);
        assert_eq!(filter_candidates(input.clone(), &constraints), input);
    }
}
