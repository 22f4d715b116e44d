use crate::model::{CleanedRecord, Material};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Inclusive date bounds; a missing bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }
}

/// User-selected filters. An empty set means "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub date_range: DateRange,
    /// Internal group keys.
    #[serde(default)]
    pub groups: BTreeSet<String>,
    #[serde(default)]
    pub households: BTreeSet<String>,
    /// Which material series to report. Not a record predicate.
    #[serde(default)]
    pub materials: BTreeSet<Material>,
}

impl FilterState {
    /// Select groups by the names shown to users, translating each back to
    /// its internal key.
    pub fn with_display_groups<'a>(
        mut self,
        display_names: impl IntoIterator<Item = &'a str>,
        names: &GroupNames,
    ) -> Self {
        self.groups = display_names
            .into_iter()
            .map(|d| names.key_for(d).to_string())
            .collect();
        self
    }

    pub fn matches(&self, record: &CleanedRecord) -> bool {
        if !self.date_range.contains(record.date) {
            return false;
        }
        if !self.groups.is_empty() && !self.groups.contains(&record.group) {
            return false;
        }
        if !self.households.is_empty() && !self.households.contains(&record.household_name) {
            return false;
        }
        true
    }

    /// Selected materials in canonical order; all of them when none are selected.
    pub fn selected_materials(&self) -> Vec<Material> {
        if self.materials.is_empty() {
            Material::ALL.to_vec()
        } else {
            Material::ALL
                .into_iter()
                .filter(|m| self.materials.contains(m))
                .collect()
        }
    }
}

/// Records passing every active predicate of `state`, in input order.
pub fn filter(records: &[CleanedRecord], state: &FilterState) -> Vec<CleanedRecord> {
    records
        .iter()
        .filter(|r| state.matches(r))
        .cloned()
        .collect()
}

/// Two-way table between internal group keys and display names.
///
/// Keys without an entry are their own display name, in both directions.
#[derive(Debug, Clone, Default)]
pub struct GroupNames {
    to_display: BTreeMap<String, String>,
    to_key: BTreeMap<String, String>,
}

impl GroupNames {
    pub fn new(mapping: &BTreeMap<String, String>) -> Self {
        let to_display = mapping.clone();
        let to_key = mapping
            .iter()
            .map(|(k, d)| (d.clone(), k.clone()))
            .collect();
        Self { to_display, to_key }
    }

    pub fn display_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.to_display.get(key).map(String::as_str).unwrap_or(key)
    }

    pub fn key_for<'a>(&'a self, display: &'a str) -> &'a str {
        self.to_key.get(display).map(String::as_str).unwrap_or(display)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.to_display.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HouseholdCategory, MaterialTotals};
    use rust_decimal_macros::dec;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rec(date: NaiveDate, group: &str, household: &str) -> CleanedRecord {
        CleanedRecord {
            date,
            date_string: String::new(),
            group: group.into(),
            household_name: household.into(),
            wet_waste: dec!(1),
            dry_waste: dec!(1),
            materials: MaterialTotals::default(),
            location: None,
            week_bucket: crate::parsing::date::week_bucket(date),
            category: HouseholdCategory::Domestic,
        }
    }

    fn data() -> Vec<CleanedRecord> {
        vec![
            rec(ymd(2025, 3, 13), "A", "H1"),
            rec(ymd(2025, 3, 15), "B", "H2"),
            rec(ymd(2025, 4, 2), "B", "H3"),
        ]
    }

    #[test]
    fn test_default_state_passes_everything() {
        assert_eq!(filter(&data(), &FilterState::default()).len(), 3);
    }

    #[test]
    fn test_date_bounds_inclusive() {
        let state = FilterState {
            date_range: DateRange {
                start: Some(ymd(2025, 3, 15)),
                end: Some(ymd(2025, 4, 2)),
            },
            ..Default::default()
        };
        let out = filter(&data(), &state);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].household_name, "H2");
    }

    #[test]
    fn test_open_ended_range() {
        let state = FilterState {
            date_range: DateRange {
                start: None,
                end: Some(ymd(2025, 3, 13)),
            },
            ..Default::default()
        };
        assert_eq!(filter(&data(), &state).len(), 1);
    }

    #[test]
    fn test_range_excluding_everything() {
        let state = FilterState {
            date_range: DateRange {
                start: Some(ymd(2026, 1, 1)),
                end: None,
            },
            ..Default::default()
        };
        assert!(filter(&data(), &state).is_empty());
    }

    #[test]
    fn test_group_and_household_are_anded() {
        let state = FilterState {
            groups: BTreeSet::from(["B".to_string()]),
            households: BTreeSet::from(["H1".to_string(), "H3".to_string()]),
            ..Default::default()
        };
        let out = filter(&data(), &state);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].household_name, "H3");
    }

    #[test]
    fn test_material_selection_does_not_filter_records() {
        let state = FilterState {
            materials: BTreeSet::from([Material::Glass]),
            ..Default::default()
        };
        assert_eq!(filter(&data(), &state).len(), 3);
        assert_eq!(state.selected_materials(), vec![Material::Glass]);
        assert_eq!(FilterState::default().selected_materials().len(), 6);
    }

    #[test]
    fn test_display_group_selection() {
        let names = GroupNames::new(&BTreeMap::from([("B".to_string(), "Bravo".to_string())]));
        let state = FilterState::default().with_display_groups(["Bravo", "A"], &names);
        assert_eq!(state.groups, BTreeSet::from(["A".to_string(), "B".to_string()]));
        assert_eq!(filter(&data(), &state).len(), 3);
    }

    #[test]
    fn test_group_names_round_trip() {
        let mapping = BTreeMap::from([
            ("KT".to_string(), "Kel Takau".to_string()),
            ("NW".to_string(), "Nawal".to_string()),
        ]);
        let names = GroupNames::new(&mapping);
        for key in names.keys() {
            assert_eq!(names.key_for(names.display_name(key)), key);
        }
        assert_eq!(names.display_name("XYZ"), "XYZ");
        assert_eq!(names.key_for("XYZ"), "XYZ");
    }
}
