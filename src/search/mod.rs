//! Search functionality.
//!
//! Provides literal text search within documents with:
//! - Forward and backward search from a starting line
//! - Case-insensitive option
//! - Match ranges for highlighting

use std::ops::Range;

use regex::{Regex, RegexBuilder};

use crate::document::Document;

/// Which way a search walks through the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// A compiled literal search pattern.
#[derive(Debug, Clone)]
pub struct Matcher {
    query: String,
    regex: Regex,
}

impl Matcher {
    /// Compile `query` as a literal pattern.
    ///
    /// Returns `None` for an empty query.
    pub fn new(query: &str, case_sensitive: bool) -> Option<Self> {
        if query.is_empty() {
            return None;
        }
        let regex = RegexBuilder::new(&regex::escape(query))
            .case_insensitive(!case_sensitive)
            .build()
            .ok()?;
        Some(Self {
            query: query.to_string(),
            regex,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Byte ranges of every match in `text`.
    pub fn ranges(&self, text: &str) -> Vec<Range<usize>> {
        self.regex.find_iter(text).map(|m| m.range()).collect()
    }

    /// First line at or after `from` that matches.
    pub fn find_forward(&self, doc: &Document, from: usize) -> Option<usize> {
        (from..doc.end_num()).find(|&n| doc.raw_line(n).is_some_and(|l| self.is_match(&l)))
    }

    /// Last line at or before `from` that matches, not going above `floor`.
    pub fn find_backward(&self, doc: &Document, from: usize, floor: usize) -> Option<usize> {
        let from = from.min(doc.end_num().checked_sub(1)?);
        (floor..=from)
            .rev()
            .find(|&n| doc.raw_line(n).is_some_and(|l| self.is_match(&l)))
    }
}
