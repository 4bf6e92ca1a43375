//! Pattern Matcher - ordered, case-insensitive regexes with argument capture
//!
//! A plugin may declare many synonymous phrasings of the same intent. The
//! regexes are tried in declaration order and the first one that matches
//! supplies the captured arguments.

use regex::{Captures, Regex, RegexBuilder};

use crate::error::{AnswerError, Result};

/// One or more compiled regular expressions tried in order
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    regexes: Vec<Regex>,
}

impl PatternMatcher {
    /// Compile the patterns; every pattern is made case-insensitive
    pub fn new(patterns: &[&str]) -> Result<Self> {
        let regexes = patterns
            .iter()
            .map(|p| {
                RegexBuilder::new(p)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| AnswerError::InvalidPattern {
                        pattern: p.to_string(),
                        reason: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { regexes })
    }

    /// Convenience for a single pattern
    pub fn single(pattern: &str) -> Result<Self> {
        Self::new(&[pattern])
    }

    /// True if any pattern matches
    pub fn is_match(&self, query: &str) -> bool {
        self.regexes.iter().any(|r| r.is_match(query))
    }

    /// Raw captures of the first matching pattern, for named groups
    pub fn find<'q>(&self, query: &'q str) -> Option<Captures<'q>> {
        self.regexes.iter().find_map(|r| r.captures(query))
    }

    /// Capture groups of the first matching pattern
    ///
    /// Groups are trimmed; groups that did not participate are empty
    /// strings so positions stay stable.
    pub fn captures(&self, query: &str) -> Option<Vec<String>> {
        self.regexes.iter().find_map(|r| {
            r.captures(query).map(|caps| {
                caps.iter()
                    .skip(1)
                    .map(|m| m.map(|m| m.as_str().trim().to_string()).unwrap_or_default())
                    .collect()
            })
        })
    }

    /// Value of a named group in the first matching pattern
    ///
    /// `None` when nothing matches, or when the first matching pattern has
    /// no such group or it did not participate.
    pub fn named(&self, query: &str, name: &str) -> Option<String> {
        self.find(query)
            .and_then(|caps| caps.name(name).map(|m| m.as_str().trim().to_string()))
    }

    /// First capture group of the first matching pattern
    ///
    /// `None` when nothing matches or when the trimmed capture is empty,
    /// which is how a plugin says "shape recognized, nothing to answer".
    pub fn first_arg(&self, query: &str) -> Option<String> {
        self.captures(query)
            .and_then(|groups| groups.into_iter().next())
            .filter(|arg| !arg.is_empty())
    }

    /// Source text of each pattern, for introspection
    pub fn sources(&self) -> Vec<&str> {
        self.regexes.iter().map(|r| r.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.regexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regexes.is_empty()
    }
}
