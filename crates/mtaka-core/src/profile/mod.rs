pub mod builtin;
pub mod schema;

use crate::error::MtakaError;
use schema::{ClassifierPolicy, DatasetProfile, HouseholdCount};
use std::collections::HashSet;
use std::path::Path;

/// Load a dataset profile from a JSON file.
pub fn load_profile(path: &Path) -> Result<DatasetProfile, MtakaError> {
    let content = std::fs::read_to_string(path).map_err(|e| MtakaError::ProfileLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_profile(&content, path)
}

/// Parse a profile from a JSON string.
pub fn parse_profile(json: &str, source: &Path) -> Result<DatasetProfile, MtakaError> {
    let profile: DatasetProfile =
        serde_json::from_str(json).map_err(|e| MtakaError::ProfileLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Parse a profile from a JSON string (no file path context).
pub fn parse_profile_str(json: &str) -> Result<DatasetProfile, MtakaError> {
    let profile: DatasetProfile = serde_json::from_str(json).map_err(MtakaError::Json)?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Validate that a profile is well-formed.
pub fn validate_profile(profile: &DatasetProfile) -> Result<(), MtakaError> {
    if profile.name.trim().is_empty() {
        return Err(MtakaError::ProfileInvalid("name must not be empty".into()));
    }

    let mut seen = HashSet::new();
    for (field, column) in profile.fields.columns() {
        if column.trim().is_empty() {
            return Err(MtakaError::ProfileInvalid(format!(
                "column name for {field:?} must not be empty"
            )));
        }
        if !seen.insert(column) {
            return Err(MtakaError::ProfileInvalid(format!(
                "column '{column}' is mapped to more than one field"
            )));
        }
    }

    let (kind, entries) = match &profile.classifier {
        ClassifierPolicy::BusinessNames { names } => ("business_names", names),
        ClassifierPolicy::MixedGroups { groups } => ("mixed_groups", groups),
    };
    if entries.is_empty() {
        return Err(MtakaError::ProfileInvalid(format!(
            "classifier policy '{kind}' has an empty list"
        )));
    }
    if entries.iter().any(|e| e.trim().is_empty()) {
        return Err(MtakaError::ProfileInvalid(format!(
            "classifier policy '{kind}' contains a blank entry"
        )));
    }

    // Display names must map back to exactly one key
    let mut displays = HashSet::new();
    for (key, display) in &profile.group_names {
        if key.trim().is_empty() || display.trim().is_empty() {
            return Err(MtakaError::ProfileInvalid(
                "group names must not contain blank keys or display names".into(),
            ));
        }
        if !displays.insert(display.as_str()) {
            return Err(MtakaError::ProfileInvalid(format!(
                "display name '{display}' is used for more than one group"
            )));
        }
        if display != key && profile.group_names.contains_key(display) {
            return Err(MtakaError::ProfileInvalid(format!(
                "display name '{display}' collides with another group key"
            )));
        }
    }

    if let HouseholdCount::Fixed { value: 0 } = profile.household_count {
        return Err(MtakaError::ProfileInvalid(
            "fixed household count must be greater than zero".into(),
        ));
    }

    if let Some(ref targets) = profile.targets {
        targets
            .validate()
            .map_err(|e| MtakaError::ProfileInvalid(e.to_string()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &str = r#""fields": {
        "date": "DATE", "group": "Group", "household": "HOUSEHOLD NAME",
        "wet_waste": "WET", "dry_waste": "DRY", "hdpe": "HDPE", "pet": "PET",
        "pp": "PP", "paper": "PAPER", "metal": "METAL", "glass": "GLASS"
    }"#;

    fn profile_json(extra: &str) -> String {
        format!(
            r#"{{
                "name": "Test",
                "version": "1.0",
                {FIELDS},
                "classifier": {{ "policy": "business_names", "names": ["Tavanas"] }}
                {extra}
            }}"#
        )
    }

    #[test]
    fn test_parse_valid_profile() {
        let p = parse_profile_str(&profile_json("")).unwrap();
        assert_eq!(p.name, "Test");
        assert_eq!(p.household_count, HouseholdCount::Observed);
        assert!(p.group_names.is_empty());
        assert!(p.fields.location.is_none());
    }

    #[test]
    fn test_fixed_household_count() {
        let p = parse_profile_str(&profile_json(
            r#", "household_count": { "mode": "fixed", "value": 2000 }"#,
        ))
        .unwrap();
        assert_eq!(p.household_count, HouseholdCount::Fixed { value: 2000 });
    }

    #[test]
    fn test_zero_fixed_count_rejected() {
        assert!(parse_profile_str(&profile_json(
            r#", "household_count": { "mode": "fixed", "value": 0 }"#,
        ))
        .is_err());
    }

    #[test]
    fn test_duplicate_display_name_rejected() {
        assert!(parse_profile_str(&profile_json(
            r#", "group_names": { "KT": "Kel Takau", "KT2": "Kel Takau" }"#,
        ))
        .is_err());
    }

    #[test]
    fn test_display_colliding_with_key_rejected() {
        assert!(parse_profile_str(&profile_json(
            r#", "group_names": { "A": "B", "B": "Bee" }"#,
        ))
        .is_err());
    }

    #[test]
    fn test_empty_classifier_list_rejected() {
        let json = format!(
            r#"{{ "name": "T", "version": "1", {FIELDS},
                 "classifier": {{ "policy": "mixed_groups", "groups": [] }} }}"#
        );
        assert!(parse_profile_str(&json).is_err());
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let json = r#"{ "name": "T", "version": "1",
            "fields": {
                "date": "DATE", "group": "DATE", "household": "H",
                "wet_waste": "WET", "dry_waste": "DRY", "hdpe": "HDPE", "pet": "PET",
                "pp": "PP", "paper": "PAPER", "metal": "METAL", "glass": "GLASS"
            },
            "classifier": { "policy": "business_names", "names": ["X"] } }"#;
        assert!(parse_profile_str(json).is_err());
    }

    #[test]
    fn test_zero_targets_rejected() {
        assert!(parse_profile_str(&profile_json(
            r#", "targets": { "groups": 15, "households": 0, "weeks": 31 }"#,
        ))
        .is_err());
    }

    #[test]
    fn test_oversized_targets_rejected() {
        let err = parse_profile_str(&profile_json(
            r#", "targets": { "groups": 15, "households": 18446744073709551615, "weeks": 31 }"#,
        ))
        .unwrap_err();
        assert!(matches!(err, MtakaError::ProfileInvalid(_)));
        assert!(parse_profile_str(&profile_json(
            r#", "targets": { "groups": 15, "households": 2000, "weeks": 1000000 }"#,
        ))
        .is_err());
    }

    #[test]
    fn test_load_profile_missing_file() {
        let err = load_profile(Path::new("/nonexistent/profile.json")).unwrap_err();
        assert!(matches!(err, MtakaError::ProfileLoad { .. }));
    }
}
