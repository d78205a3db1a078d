//! Supported course-format list
//!
//! Stored as a single comma-separated value. Parsing skips empty segments
//! and duplicates; segments are matched exactly.

use indexmap::IndexSet;
use std::fmt;

/// Ordered set of supported course-format identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportedFormatList {
    formats: IndexSet<String>,
}

impl SupportedFormatList {
    /// Create empty list
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a stored comma-separated value
    #[must_use]
    pub fn parse(value: &str) -> Self {
        value
            .split(',')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Check if format is in the list
    #[inline]
    #[must_use]
    pub fn contains(&self, format: &str) -> bool {
        self.formats.contains(format)
    }

    /// Append a format; returns false if already present
    pub fn push(&mut self, format: impl Into<String>) -> bool {
        self.formats.insert(format.into())
    }

    /// Formats in stored order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.formats.iter().map(String::as_str)
    }

    /// Number of formats
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    /// Check if list is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

impl fmt::Display for SupportedFormatList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, format) in self.formats.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(format)?;
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for SupportedFormatList {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            formats: iter.into_iter().map(Into::into).collect(),
        }
    }
}
