//! Rule grammar: one line of text becomes an ordered token sequence.
//!
//! Tokens are separated by the literal `" + "`. Parsing never fails;
//! anything unrecognized becomes a literal carrying the raw token text.

use std::sync::LazyLock;

use regex::Regex;

use crate::case::CasePattern;

/// Separator between tokens in a rule line.
pub const TOKEN_SEPARATOR: &str = " + ";

/// `string`, `string_leet` or `character`, an optional slot number, then an
/// optional `:`-introduced case pattern.
static STRING_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(string_leet|string|character)(\d*)(?::(.*))?$")
        .expect("Invalid string token regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A whole input string. `slot` is the 1-based string the author meant.
    String { case: CasePattern, slot: usize },
    /// A whole input string, expanded into every leet variant.
    StringLeet { case: CasePattern, slot: usize },
    /// The first character of an input string.
    Character { case: CasePattern, slot: usize },
    Day,
    Month,
    Year,
    ShortYear,
    /// One of the twelve numbers derived from a date.
    FullDate,
    Symbol,
    CommonNumber,
    /// A raw input number.
    Number,
    Literal(String),
}

impl Token {
    /// Whether this token binds a value from the current date.
    pub fn is_date(&self) -> bool {
        matches!(
            self,
            Self::Day | Self::Month | Self::Year | Self::ShortYear | Self::FullDate
        )
    }
}

/// A parsed rule line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// The trimmed source line.
    pub source: String,
    pub tokens: Vec<Token>,
    /// Render candidates with single spaces between slots.
    pub space_joined: bool,
}

impl Rule {
    pub fn has_date_tokens(&self) -> bool {
        self.tokens.iter().any(Token::is_date)
    }
}

/// Parse one rule line.
pub fn parse_rule(line: &str) -> Rule {
    let source = line.trim();
    let tokens = source.split(TOKEN_SEPARATOR).map(parse_token).collect();
    Rule {
        source: source.to_string(),
        tokens,
        space_joined: source.contains(TOKEN_SEPARATOR) && source.contains("literal: "),
    }
}

/// Classify a single token, longest match first.
pub fn parse_token(token: &str) -> Token {
    if let Some(captures) = STRING_TOKEN_REGEX.captures(token) {
        let slot = captures
            .get(2)
            .and_then(|digits| digits.as_str().parse::<usize>().ok())
            .unwrap_or(1);
        let case = captures
            .get(3)
            .as_ref()
            .map(regex::Match::as_str)
            .filter(|pattern| pattern.starts_with("u:"))
            .map(CasePattern::parse)
            .unwrap_or_default();
        return match &captures[1] {
            "string_leet" => Token::StringLeet { case, slot },
            "string" => Token::String { case, slot },
            _ => Token::Character { case, slot },
        };
    }
    match token {
        "day" => Token::Day,
        "month" => Token::Month,
        "year" => Token::Year,
        "short_year" => Token::ShortYear,
        "full_date" => Token::FullDate,
        "symbol" => Token::Symbol,
        "common_number" => Token::CommonNumber,
        "number" => Token::Number,
        _ => match token.strip_prefix("literal:") {
            Some(value) => Token::Literal(value.to_string()),
            None => Token::Literal(token.to_string()),
        },
    }
}
