//! Catalog dataset validation: surfaces structural problems in a raw item
//! dump before it reaches the normalizer. The normalizer itself never fails;
//! this is the place that tells you why your registries came out thin.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;

use crate::catalog::item::RawItem;
use crate::catalog::normalize::{CHARACTER_CATEGORY, MODIFIER_CATEGORY};
use crate::catalog::profiles::WeaponCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }
}

pub fn validate_items(items: &[RawItem]) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut seen_names: HashSet<&str> = HashSet::new();

    let mut characters = 0usize;
    let mut weapons = 0usize;
    let mut mods = 0usize;

    for (index, item) in items.iter().enumerate() {
        let context = if item.name.trim().is_empty() {
            format!("item #{index}")
        } else {
            item.name.clone()
        };

        if item.name.trim().is_empty() {
            report.push(ValidationSeverity::Error, &context, "empty item name");
        } else if !seen_names.insert(item.name.as_str()) {
            report.push(ValidationSeverity::Error, &context, "duplicate item name");
        }

        if item.category == CHARACTER_CATEGORY {
            characters += 1;
            if item.stats.as_ref().map_or(true, |stats| stats.is_empty()) {
                report.push(
                    ValidationSeverity::Warning,
                    &context,
                    "character has no stat list; all defaults will apply",
                );
            }
        } else if WeaponCategory::parse(&item.category).is_some() {
            weapons += 1;
            if item.stats.as_ref().map_or(true, |stats| stats.is_empty()) {
                report.push(
                    ValidationSeverity::Warning,
                    &context,
                    "weapon has no stat list; fallback damage will apply",
                );
            }
        } else if item.category == MODIFIER_CATEGORY {
            mods += 1;
            if item.level_stats.as_ref().map_or(true, |tiers| tiers.is_empty()) {
                report.push(
                    ValidationSeverity::Warning,
                    &context,
                    "modifier has no level stats; it will contribute no effects",
                );
            }
        }
    }

    report.push(
        ValidationSeverity::Info,
        "catalog",
        format!("{characters} characters, {weapons} weapons, {mods} modifiers"),
    );
    if characters == 0 || weapons == 0 || mods == 0 {
        report.push(
            ValidationSeverity::Warning,
            "catalog",
            "at least one registry is empty; searches will return no builds",
        );
    }

    report
}

/// Read a catalog dump and validate it. IO/parse failures are the only hard
/// errors; content problems come back as diagnostics.
pub fn validate_catalog(path: &str) -> Result<ValidationReport, io::Error> {
    let raw = fs::read_to_string(path)?;
    let items: Vec<RawItem> = serde_json::from_str(&raw)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    Ok(validate_items(&items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn duplicate_and_empty_names_are_errors() {
        let items: Vec<RawItem> = serde_json::from_value(json!([
            {"category": "Primary", "name": "Braton", "stats": [{"name": "Damage", "value": 30}]},
            {"category": "Primary", "name": "Braton", "stats": [{"name": "Damage", "value": 30}]},
            {"category": "Mods", "name": "  "}
        ]))
        .unwrap();

        let report = validate_items(&items);
        assert!(report.has_errors());
        let errors: Vec<_> = report
            .diagnostics
            .iter()
            .filter(|d| d.severity == ValidationSeverity::Error)
            .collect();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn empty_registry_is_a_warning_not_an_error() {
        let items: Vec<RawItem> = serde_json::from_value(json!([
            {"category": "Warframes", "name": "Excalibur",
             "stats": [{"name": "Health", "value": 270}]}
        ]))
        .unwrap();

        let report = validate_items(&items);
        assert!(!report.has_errors());
        assert!(report
            .diagnostics
            .iter()
            .any(|d| d.message.contains("registry is empty")));
    }
}
