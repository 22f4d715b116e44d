pub mod categories;
pub mod clean;
pub mod extrapolate;
pub mod forecast;
pub mod groups;
pub mod materials;
pub mod options;
pub mod profiles;
pub mod summary;

use chrono::NaiveDate;
use mtaka_core::clean::CleanedDataset;
use mtaka_core::error::MtakaError;
use mtaka_core::filter::{DateRange, FilterState, GroupNames};
use mtaka_core::model::Material;
use mtaka_core::profile::builtin::{self, DEFAULT_PRESET};
use mtaka_core::profile::schema::DatasetProfile;

use crate::{DataArgs, FilterArgs};

/// Resolve `--profile` / `--profile-file`, falling back to the default preset.
pub fn resolve_profile(data: &DataArgs) -> Result<DatasetProfile, MtakaError> {
    match (&data.profile_file, &data.profile) {
        (Some(path), _) => mtaka_core::profile::load_profile(path),
        (None, Some(name)) => builtin::load_preset(name),
        (None, None) => builtin::load_preset(DEFAULT_PRESET),
    }
}

/// Profile plus the cleaned records it describes.
pub fn load(data: &DataArgs) -> Result<(DatasetProfile, CleanedDataset), MtakaError> {
    let profile = resolve_profile(data)?;
    let dataset = mtaka_core::load_dataset(&data.input_file, &profile)?;
    if !dataset.report.skipped.is_empty() {
        eprintln!(
            "note: {} of {} record(s) skipped during cleaning (run `mtaka clean` for details)",
            dataset.report.skipped.len(),
            dataset.report.total_records
        );
    }
    Ok((profile, dataset))
}

/// Build a filter from command-line selections. Groups are given by display
/// name.
pub fn filter_state(args: &FilterArgs, names: &GroupNames) -> Result<FilterState, MtakaError> {
    let date_range = DateRange {
        start: args.from.as_deref().map(parse_day).transpose()?,
        end: args.to.as_deref().map(parse_day).transpose()?,
    };
    if let (Some(start), Some(end)) = (date_range.start, date_range.end) {
        if start > end {
            log::warn!("--from {start} is after --to {end}; nothing will match");
        }
    }

    let materials = args
        .materials
        .iter()
        .map(|m| {
            Material::from_str_loose(m)
                .ok_or_else(|| MtakaError::InvalidFilter(format!("unknown material '{m}'")))
        })
        .collect::<Result<_, _>>()?;

    let state = FilterState {
        date_range,
        households: args.households.iter().map(|h| h.trim().to_string()).collect(),
        materials,
        ..Default::default()
    };
    Ok(state.with_display_groups(args.groups.iter().map(|g| g.trim()), names))
}

fn parse_day(s: &str) -> Result<NaiveDate, MtakaError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| MtakaError::InvalidFilter(format!("'{s}' is not a YYYY-MM-DD date: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};

    fn names() -> GroupNames {
        GroupNames::new(&BTreeMap::from([(
            "KT".to_string(),
            "Kel Takau".to_string(),
        )]))
    }

    #[test]
    fn test_empty_args_give_default_filter() {
        let state = filter_state(&FilterArgs::default(), &names()).unwrap();
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn test_filter_args_translated() {
        let args = FilterArgs {
            from: Some("2025-03-01".into()),
            to: Some("2025-03-31".into()),
            groups: vec!["Kel Takau".into(), "Nawal".into()],
            households: vec![" H1 ".into()],
            materials: vec!["PET".into(), "paper".into()],
        };
        let state = filter_state(&args, &names()).unwrap();
        assert_eq!(state.date_range.start, NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(state.date_range.end, NaiveDate::from_ymd_opt(2025, 3, 31));
        assert_eq!(
            state.groups,
            BTreeSet::from(["KT".to_string(), "Nawal".to_string()])
        );
        assert_eq!(state.households, BTreeSet::from(["H1".to_string()]));
        assert_eq!(
            state.materials,
            BTreeSet::from([Material::Pet, Material::Paper])
        );
    }

    #[test]
    fn test_bad_date_rejected() {
        let args = FilterArgs {
            from: Some("13/3/2025".into()),
            ..Default::default()
        };
        let err = filter_state(&args, &names()).unwrap_err();
        assert!(matches!(err, MtakaError::InvalidFilter(_)));
    }

    #[test]
    fn test_unknown_material_rejected() {
        let args = FilterArgs {
            materials: vec!["wood".into()],
            ..Default::default()
        };
        let err = filter_state(&args, &names()).unwrap_err();
        assert!(err.to_string().contains("wood"));
    }
}
