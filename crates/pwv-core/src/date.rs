//! Date components and date-derived numbers.
//!
//! Dates are raw `D/M/YYYY` strings. They are split on `/` and never checked
//! against a calendar; a string without exactly three parts simply yields
//! nothing.

/// Number of strings [`derive_numbers`] returns for a well-formed date.
pub const DERIVED_NUMBER_COUNT: usize = 12;

/// Raw components of a `D/M/YYYY` string. Empty parts are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateComponents {
    pub day: Option<String>,
    pub month: Option<String>,
    pub full_year: Option<String>,
    /// Last two characters of the year part, not checked to be numeric.
    pub short_year: Option<String>,
}

/// Components and derived numbers for one profile date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateDerivation {
    pub components: DateComponents,
    pub numbers: Vec<String>,
}

impl DateDerivation {
    pub fn derive(date: &str) -> Self {
        Self {
            components: parse_components(date),
            numbers: derive_numbers(date),
        }
    }
}

fn split_three(date: &str) -> Option<(&str, &str, &str)> {
    let mut parts = date.split('/');
    let day = parts.next()?;
    let month = parts.next()?;
    let year = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some((day, month, year))
}

fn last_two(value: &str) -> String {
    let skip = value.chars().count().saturating_sub(2);
    value.chars().skip(skip).collect()
}

fn present(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

pub fn parse_components(date: &str) -> DateComponents {
    let Some((day, month, year)) = split_three(date) else {
        return DateComponents::default();
    };
    DateComponents {
        day: present(day.to_string()),
        month: present(month.to_string()),
        full_year: present(year.to_string()),
        short_year: present(last_two(year)),
    }
}

/// The twelve numeric strings derived from a date, in fixed order.
///
/// Day and month are normalized as integers, so leading zeros disappear.
/// Returns an empty list when the date cannot be split or either part is not
/// an integer.
pub fn derive_numbers(date: &str) -> Vec<String> {
    let Some((day, month, year)) = split_three(date) else {
        return Vec::new();
    };
    let (Ok(day), Ok(month)) = (day.trim().parse::<i64>(), month.trim().parse::<i64>()) else {
        return Vec::new();
    };
    let d = day.to_string();
    let m = month.to_string();
    let y = year.trim();
    let sy = last_two(y);
    vec![
        y.to_string(),
        sy.clone(),
        format!("{d}{m}"),
        format!("{d}{m}{y}"),
        format!("{d}{m}{sy}"),
        format!("{m}{d}"),
        format!("{m}{d}{y}"),
        format!("{m}{d}{sy}"),
        format!("{y}{m}{d}"),
        format!("{sy}{m}{d}"),
        format!("{y}{d}{m}"),
        format!("{sy}{d}{m}"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components_of_well_formed_date() {
        let components = parse_components("5/7/2003");
        assert_eq!(components.day.as_deref(), Some("5"));
        assert_eq!(components.month.as_deref(), Some("7"));
        assert_eq!(components.full_year.as_deref(), Some("2003"));
        assert_eq!(components.short_year.as_deref(), Some("03"));
    }

    #[test]
    fn components_keep_leading_zeros() {
        let components = parse_components("05/07/99");
        assert_eq!(components.day.as_deref(), Some("05"));
        assert_eq!(components.short_year.as_deref(), Some("99"));
    }

    #[test]
    fn wrong_separator_count_yields_nothing() {
        assert_eq!(parse_components("5/7"), DateComponents::default());
        assert_eq!(parse_components("5/7/20/03"), DateComponents::default());
        assert_eq!(parse_components("2003-07-05"), DateComponents::default());
        assert!(derive_numbers("5-7-2003").is_empty());
        assert!(derive_numbers("").is_empty());
    }

    #[test]
    fn derived_numbers_follow_fixed_order() {
        assert_eq!(
            derive_numbers("05/07/2003"),
            vec![
                "2003", "03", "57", "572003", "5703", "75", "752003", "7503", "200375", "0375",
                "200357", "0357",
            ]
        );
    }

    #[test]
    fn non_numeric_day_yields_no_numbers_but_keeps_components() {
        let derivation = DateDerivation::derive("xx/7/2003");
        assert!(derivation.numbers.is_empty());
        assert_eq!(derivation.components.day.as_deref(), Some("xx"));
    }

    #[test]
    fn short_year_of_short_value() {
        assert_eq!(parse_components("1/1/7").short_year.as_deref(), Some("7"));
        assert_eq!(parse_components("1/1/").short_year, None);
    }
}
