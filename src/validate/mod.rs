//! Container name and access-policy validation
//!
//! Runs at configuration-resolution time, strictly before any remote
//! call; invalid input never causes partial remote side effects.

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StratoformError};

/// Check a container name against the service naming rules.
///
/// Every violated rule is reported, not just the first, so a single bad
/// name surfaces all of its problems at once.
pub fn validate_container_name(name: &str) -> Vec<String> {
    let mut violations = Vec::new();

    // Naming convention as laid out in the service docs
    let allowed = Regex::new(r"^\$root$|^[0-9a-z-]+$").unwrap();
    if !allowed.is_match(name) {
        violations.push(format!(
            "only lowercase alphanumeric characters and hyphens allowed: \"{name}\""
        ));
    }
    if name.len() < 3 || name.len() > 63 {
        violations.push(format!("must be between 3 and 63 characters: \"{name}\""));
    }
    if name.starts_with('-') {
        violations.push(format!("cannot begin with a hyphen: \"{name}\""));
    }

    violations
}

/// `validate_container_name` as a hard check for the `name` field.
pub fn check_container_name(name: &str) -> Result<()> {
    let violations = validate_container_name(name);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(StratoformError::validation("name", violations))
    }
}

/// Public access level for a container.
///
/// `Private` is represented on the wire by the absence of a public-access
/// value; that empty-string special case lives only in
/// [`AccessType::as_wire_value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessType {
    #[default]
    Private,
    Blob,
    Container,
}

impl AccessType {
    /// Case-insensitive parse of a declared `container_access_type` value.
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "private" => Ok(Self::Private),
            "blob" => Ok(Self::Blob),
            "container" => Ok(Self::Container),
            _ => Err(StratoformError::validation(
                "container_access_type",
                vec![format!(
                    "access type \"{value}\" is invalid, must be \"private\", \"blob\" or \"container\""
                )],
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Blob => "blob",
            Self::Container => "container",
        }
    }

    /// Value sent in the public-access header; empty means private.
    pub fn as_wire_value(&self) -> &'static str {
        match self {
            Self::Private => "",
            Self::Blob => "blob",
            Self::Container => "container",
        }
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessType {
    type Err = StratoformError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_container_names() {
        let valid = vec!["my-container", "abc", "a-1-b-2", "$root", "logs-2024"];
        for name in valid {
            assert!(
                validate_container_name(name).is_empty(),
                "name \"{name}\" should be valid"
            );
        }
    }

    #[test]
    fn test_invalid_container_names() {
        let too_long = "a".repeat(64);
        let invalid = vec![
            "My_Container", // uppercase and underscore
            "ab",           // too short
            "test vault",   // space
            "-leading",     // leading hyphen
            "UPPER",        // uppercase
            too_long.as_str(),
        ];
        for name in invalid {
            assert!(
                !validate_container_name(name).is_empty(),
                "name \"{name}\" should be invalid"
            );
        }
    }

    #[test]
    fn test_all_violations_accumulate() {
        // "-a" is both too short and begins with a hyphen
        let violations = validate_container_name("-a");
        assert!(violations.len() >= 2, "got {violations:?}");

        // "-A" additionally violates the character set
        let violations = validate_container_name("-A");
        assert_eq!(violations.len(), 3, "got {violations:?}");
    }

    #[test]
    fn test_check_container_name_reports_field() {
        let err = check_container_name("NOPE").unwrap_err();
        match err {
            StratoformError::Validation { field, violations } => {
                assert_eq!(field, "name");
                assert!(!violations.is_empty());
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_access_type_parse_case_insensitive() {
        assert_eq!(AccessType::parse("private").unwrap(), AccessType::Private);
        assert_eq!(AccessType::parse("Blob").unwrap(), AccessType::Blob);
        assert_eq!(AccessType::parse("CONTAINER").unwrap(), AccessType::Container);
    }

    #[test]
    fn test_access_type_rejects_unknown() {
        for value in ["page", "public", "", "priv"] {
            assert!(
                AccessType::parse(value).is_err(),
                "access type \"{value}\" should be rejected"
            );
        }
    }

    #[test]
    fn test_private_wire_value_is_empty() {
        assert_eq!(AccessType::Private.as_wire_value(), "");
        assert_eq!(AccessType::Blob.as_wire_value(), "blob");
        assert_eq!(AccessType::Container.as_wire_value(), "container");
    }

    #[test]
    fn test_default_is_private() {
        assert_eq!(AccessType::default(), AccessType::Private);
    }
}
