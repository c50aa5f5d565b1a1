//! Version pragmas declared inside contract sources.
//!
//! Pragma expressions use npm-style ranges: a bare version is an exact match,
//! whitespace separated comparators must all hold, `||` separates alternatives
//! and `a - b` is an inclusive range. `semver::VersionReq` reads a bare version
//! as a caret requirement and needs commas between comparators, so every
//! expression is rewritten before parsing.

use regex::{Captures, Regex};
use semver::VersionReq;
use std::{
    fmt::{Display, Formatter},
    sync::OnceLock,
};
use thiserror::Error;

const OPERATORS: [&str; 7] = ["^", "~", ">=", "<=", ">", "<", "="];

#[derive(Error, Debug)]
pub enum PragmaError {
    #[error("empty version pragma")]
    Empty,
    #[error("invalid version pragma '{pragma}': {source}")]
    InvalidRequirement {
        pragma: String,
        #[source]
        source: semver::Error,
    },
}

/// Parsed version pragma. A version satisfies it if any alternative matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionPragma {
    raw: String,
    alternatives: Vec<VersionReq>,
}

impl VersionPragma {
    pub fn parse(expression: &str) -> Result<Self, PragmaError> {
        let raw = expression.trim();
        if raw.is_empty() {
            return Err(PragmaError::Empty);
        }
        let alternatives = raw
            .split("||")
            .map(|alternative| {
                if alternative.trim().is_empty() {
                    return Err(PragmaError::Empty);
                }
                parse_alternative(alternative).map_err(|source| PragmaError::InvalidRequirement {
                    pragma: raw.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            raw: raw.to_string(),
            alternatives,
        })
    }

    pub fn matches(&self, version: &semver::Version) -> bool {
        self.alternatives.iter().any(|req| req.matches(version))
    }
}

impl Display for VersionPragma {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

fn parse_alternative(alternative: &str) -> Result<VersionReq, semver::Error> {
    let spaced = split_comparators(alternative);
    let tokens: Vec<&str> = spaced.split_whitespace().collect();
    let mut comparators = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];
        if tokens.get(i + 1) == Some(&"-") && i + 2 < tokens.len() {
            comparators.push(format!(">={}", token));
            comparators.push(format!("<={}", tokens[i + 2]));
            i += 3;
        } else if OPERATORS.contains(&token) && i + 1 < tokens.len() {
            comparators.push(format!("{}{}", token, tokens[i + 1]));
            i += 2;
        } else {
            comparators.push(exact_if_bare(token));
            i += 1;
        }
    }
    VersionReq::parse(&comparators.join(", "))
}

/// Inserts a space before every operator glued to the previous comparator,
/// so `>=0.6.0<0.7.0` reads as `>=0.6.0 <0.7.0`.
fn split_comparators(alternative: &str) -> String {
    let is_operator = |c: char| matches!(c, '^' | '~' | '>' | '<' | '=');
    let mut spaced = String::with_capacity(alternative.len());
    let mut previous = None;
    for c in alternative.chars() {
        if is_operator(c) && previous.map_or(false, |p: char| !is_operator(p) && !p.is_whitespace()) {
            spaced.push(' ');
        }
        spaced.push(c);
        previous = Some(c);
    }
    spaced
}

fn exact_if_bare(comparator: &str) -> String {
    let comparator = comparator.trim_start_matches('v');
    let is_bare = comparator.starts_with(|c: char| c.is_ascii_digit());
    let has_wildcard = comparator
        .split('.')
        .any(|part| matches!(part, "*" | "x" | "X"));
    if is_bare && !has_wildcard {
        format!("={}", comparator)
    } else {
        comparator.to_string()
    }
}

/// Comments and string literals. Strings are matched too so that `//` or a
/// pragma inside a literal is never taken for source text.
fn comments_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)"(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*'|/\*.*?\*/|//[^\n]*"#).unwrap()
    })
}

fn solidity_pragma_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bpragma\s+solidity\b\s*([^;]+);").unwrap())
}

fn vyper_pragma_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^[ \t]*#[ \t]*(?:@version|pragma[ \t]+version)[ \t]+([^\r\n]+?)[ \t]*\r?$")
            .unwrap()
    })
}

/// Every `pragma solidity ...;` statement of a source file. Commented out
/// statements are ignored.
pub fn solidity_pragmas(source: &str) -> Result<Vec<VersionPragma>, PragmaError> {
    let source = comments_regex().replace_all(source, |captures: &Captures| {
        let matched = &captures[0];
        if matched.starts_with('"') {
            "\"\""
        } else if matched.starts_with('\'') {
            "''"
        } else {
            " "
        }
    });
    solidity_pragma_regex()
        .captures_iter(&source)
        .map(|captures| VersionPragma::parse(&captures[1]))
        .collect()
}

/// The `# @version ...` (or `#pragma version ...`) line of a vyper source.
pub fn vyper_pragma(source: &str) -> Result<Option<VersionPragma>, PragmaError> {
    vyper_pragma_regex()
        .captures(source)
        .map(|captures| VersionPragma::parse(&captures[1]))
        .transpose()
}
