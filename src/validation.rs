//! Field validation for request bodies.
//!
//! `ProfileRules` is built once at startup and lives in `AppState`; DTOs take it by
//! reference in their `validate` methods. Violations are collected per field so the
//! error response can report every bad field at once.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// What went wrong with a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    Required,
    MinLength(usize),
    MaxLength(usize),
    GreaterThan(i64),
    /// Any other rule, identified by tag. Rendered generically.
    Other(&'static str),
}

impl Violation {
    /// Human-readable reason shown to clients.
    pub fn reason(&self) -> String {
        match self {
            Violation::Required => "is required".to_string(),
            Violation::MinLength(n) => format!("must be at least {}", n),
            Violation::MaxLength(n) => format!("must be at most {}", n),
            Violation::GreaterThan(n) => format!("must be greater than {}", n),
            Violation::Other(_) => "is invalid".to_string(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("validation failed for {} field(s)", .violations.len())]
pub struct ValidationErrors {
    violations: Vec<(&'static str, Violation)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &'static str, violation: Violation) -> Self {
        let mut errors = Self::new();
        errors.add(field, violation);
        errors
    }

    /// Records a violation. Only the first violation per field is kept.
    pub fn add(&mut self, field: &'static str, violation: Violation) {
        if !self.violations.iter().any(|(f, _)| *f == field) {
            self.violations.push((field, violation));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn get(&self, field: &str) -> Option<&Violation> {
        self.violations
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v)
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// field name -> reason, as rendered in the error body.
    pub fn to_field_map(&self) -> BTreeMap<&'static str, String> {
        self.violations
            .iter()
            .map(|(field, violation)| (*field, violation.reason()))
            .collect()
    }
}

/// Length bounds for a text field, counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRule {
    pub min: usize,
    pub max: usize,
}

impl TextRule {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Checks a value that must be present.
    pub fn check_required(&self, value: &str) -> Option<Violation> {
        if value.is_empty() {
            return Some(Violation::Required);
        }
        self.check_length(value)
    }

    /// Checks a value that may be omitted; empty counts as omitted.
    pub fn check_optional(&self, value: Option<&str>) -> Option<Violation> {
        match value {
            Some(v) if !v.is_empty() => self.check_length(v),
            _ => None,
        }
    }

    fn check_length(&self, value: &str) -> Option<Violation> {
        let len = value.chars().count();
        if len < self.min {
            Some(Violation::MinLength(self.min))
        } else if len > self.max {
            Some(Violation::MaxLength(self.max))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProfileRules {
    pub first_name: TextRule,
    pub last_name: TextRule,
    pub city: TextRule,
}

impl ProfileRules {
    pub fn new() -> Self {
        Self {
            first_name: TextRule::new(2, 50),
            last_name: TextRule::new(2, 50),
            city: TextRule::new(2, 100),
        }
    }
}

impl Default for ProfileRules {
    fn default() -> Self {
        Self::new()
    }
}
