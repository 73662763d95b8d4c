//! Violation collection and reporting
//!
//! Validation walks the whole document before failing, so a report carries
//! every violation found in one pass rather than the first one hit.

use std::fmt;

/// A single schema violation, pointing at `section.key`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Section the violation occurred in
    pub section: String,

    /// Offending key; `None` for section-level problems
    pub key: Option<String>,

    /// Human-readable reason
    pub reason: String,
}

impl Violation {
    pub(crate) fn new(section: &str, key: Option<&str>, reason: impl Into<String>) -> Self {
        Self {
            section: section.to_string(),
            key: key.map(str::to_string),
            reason: reason.into(),
        }
    }

    /// Dotted location of the violation (`test.batch_size`, or bare section)
    pub fn location(&self) -> String {
        match &self.key {
            Some(key) => format!("{}.{}", self.section, key),
            None => self.section.clone(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location(), self.reason)
    }
}

/// Aggregate of every violation found in one validation pass
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    pub(crate) fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Whether the report names `section.key`
    pub fn mentions(&self, section: &str, key: &str) -> bool {
        self.violations
            .iter()
            .any(|v| v.section == section && v.key.as_deref() == Some(key))
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.len() == 1 { "" } else { "s" };
        write!(f, "invalid configuration ({} violation{plural})", self.len())?;
        for violation in &self.violations {
            write!(f, "\n  - {violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}
