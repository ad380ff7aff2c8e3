//! Case-pattern mini-language applied to bound string values.
//!
//! Patterns are written after a `u:` prefix in rule tokens:
//!
//! | Pattern  | Effect                                             |
//! |----------|----------------------------------------------------|
//! | `u:A`    | uppercase every character                          |
//! | `u:N`    | lowercase every character (the default)            |
//! | `u:1,3`  | lowercase, then uppercase 1-based positions 1 and 3 |
//! | `u:L`    | lowercase, then uppercase the last character       |
//!
//! Position entries that are out of range or not numeric are ignored.

use std::fmt;

/// One entry of a position-list pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasePosition {
    /// 1-based character index.
    Index(usize),
    /// The final character, whatever the value's length.
    Last,
}

impl CasePosition {
    fn parse(entry: &str) -> Option<Self> {
        let entry = entry.trim();
        if entry == "L" {
            return Some(Self::Last);
        }
        match entry.parse::<usize>() {
            Ok(index) if index >= 1 => Some(Self::Index(index)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CasePattern {
    Upper,
    #[default]
    Lower,
    /// Lowercase everything, then uppercase the listed positions.
    Positions(Vec<CasePosition>),
}

impl CasePattern {
    /// Parse a `u:` pattern. Anything unrecognized means lowercase.
    pub fn parse(text: &str) -> Self {
        let Some(body) = text.strip_prefix("u:") else {
            return Self::Lower;
        };
        match body {
            "A" => Self::Upper,
            "N" => Self::Lower,
            _ => Self::Positions(body.split(',').filter_map(CasePosition::parse).collect()),
        }
    }

    pub fn apply(&self, value: &str) -> String {
        match self {
            Self::Upper => value.to_uppercase(),
            Self::Lower => value.to_lowercase(),
            Self::Positions(positions) => {
                let chars: Vec<char> = value.to_lowercase().chars().collect();
                let mut raise = vec![false; chars.len()];
                for position in positions {
                    let slot = match *position {
                        CasePosition::Last => raise.last_mut(),
                        CasePosition::Index(index) => raise.get_mut(index - 1),
                    };
                    if let Some(flag) = slot {
                        *flag = true;
                    }
                }
                let mut out = String::with_capacity(value.len());
                for (ch, upper) in chars.into_iter().zip(raise) {
                    if upper {
                        out.extend(ch.to_uppercase());
                    } else {
                        out.push(ch);
                    }
                }
                out
            }
        }
    }
}

impl fmt::Display for CasePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upper => f.write_str("u:A"),
            Self::Lower => f.write_str("u:N"),
            Self::Positions(positions) => {
                f.write_str("u:")?;
                for (idx, position) in positions.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(",")?;
                    }
                    match position {
                        CasePosition::Index(index) => write!(f, "{index}")?,
                        CasePosition::Last => f.write_str("L")?,
                    }
                }
                Ok(())
            }
        }
    }
}

/// Parse `pattern` and apply it to `value` in one step.
pub fn apply_case_pattern(pattern: &str, value: &str) -> String {
    CasePattern::parse(pattern).apply(value)
}
