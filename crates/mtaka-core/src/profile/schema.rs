use crate::extrapolate::ProjectionTargets;
use crate::model::{Material, RawField};
use crate::parsing::date::DateOrder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything that differs between versions of the collection dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetProfile {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    #[serde(default)]
    pub date_order: DateOrder,
    /// Column names as they appear in the asset.
    pub fields: FieldNames,
    pub classifier: ClassifierPolicy,
    /// Internal group key -> human-readable name.
    #[serde(default)]
    pub group_names: BTreeMap<String, String>,
    #[serde(default)]
    pub household_count: HouseholdCount,
    /// Default population and duration for extrapolation.
    #[serde(default)]
    pub targets: Option<ProjectionTargets>,
}

/// Column names of one dataset version. Versions disagree on spacing and
/// brackets ("WET WASTE (KGS)" vs "WET WASTE(KGS)"), so nothing is assumed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldNames {
    pub date: String,
    pub group: String,
    pub household: String,
    pub wet_waste: String,
    pub dry_waste: String,
    pub hdpe: String,
    pub pet: String,
    pub pp: String,
    pub paper: String,
    pub metal: String,
    pub glass: String,
    #[serde(default)]
    pub location: Option<String>,
}

impl FieldNames {
    /// Each known column paired with its name in the asset.
    pub fn columns(&self) -> Vec<(RawField, &str)> {
        let mut cols = vec![
            (RawField::Date, self.date.as_str()),
            (RawField::Group, self.group.as_str()),
            (RawField::Household, self.household.as_str()),
            (RawField::WetWaste, self.wet_waste.as_str()),
            (RawField::DryWaste, self.dry_waste.as_str()),
            (RawField::Material(Material::Hdpe), self.hdpe.as_str()),
            (RawField::Material(Material::Pet), self.pet.as_str()),
            (RawField::Material(Material::Pp), self.pp.as_str()),
            (RawField::Material(Material::Paper), self.paper.as_str()),
            (RawField::Material(Material::Metal), self.metal.as_str()),
            (RawField::Material(Material::Glass), self.glass.as_str()),
        ];
        if let Some(ref location) = self.location {
            cols.push((RawField::Location, location.as_str()));
        }
        cols
    }
}

/// How business collection points are recognised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ClassifierPolicy {
    /// A fixed list of business household names.
    BusinessNames { names: Vec<String> },
    /// Groups known to mix domestic and business points; every household
    /// in them counts as business.
    MixedGroups { groups: Vec<String> },
}

/// Where the household figure of the global KPIs comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum HouseholdCount {
    /// Distinct non-blank household names in the data slice.
    #[default]
    Observed,
    /// A known enrolled population, regardless of the slice.
    Fixed { value: usize },
}
