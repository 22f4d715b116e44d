use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::AddAssign;

/// A cell value as it appears in the source asset, before coercion.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RawValue {
    #[default]
    Empty,
    Number(Decimal),
    Text(String),
}

impl RawValue {
    /// Text form used for string fields (date, group, household, location).
    pub fn into_text(self) -> Option<String> {
        match self {
            RawValue::Empty => None,
            RawValue::Number(n) => Some(n.normalize().to_string()),
            RawValue::Text(s) => Some(s),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<Decimal> for RawValue {
    fn from(d: Decimal) -> Self {
        RawValue::Number(d)
    }
}

/// The columns a raw record is made of. Column names per dataset come from
/// the profile's field map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawField {
    Date,
    Group,
    Household,
    WetWaste,
    DryWaste,
    Material(Material),
    Location,
}

/// One waste-collection observation as loaded from the asset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub date: Option<String>,
    pub group: Option<String>,
    pub household_name: Option<String>,
    pub wet_waste: RawValue,
    pub dry_waste: RawValue,
    pub hdpe: RawValue,
    pub pet: RawValue,
    pub pp: RawValue,
    pub paper: RawValue,
    pub metal: RawValue,
    pub glass: RawValue,
    pub location: Option<String>,
}

impl RawRecord {
    pub fn assign(&mut self, field: RawField, value: RawValue) {
        match field {
            RawField::Date => self.date = value.into_text(),
            RawField::Group => self.group = value.into_text(),
            RawField::Household => self.household_name = value.into_text(),
            RawField::WetWaste => self.wet_waste = value,
            RawField::DryWaste => self.dry_waste = value,
            RawField::Material(m) => *self.material_mut(m) = value,
            RawField::Location => self.location = value.into_text(),
        }
    }

    pub fn material(&self, material: Material) -> &RawValue {
        match material {
            Material::Hdpe => &self.hdpe,
            Material::Pet => &self.pet,
            Material::Pp => &self.pp,
            Material::Paper => &self.paper,
            Material::Metal => &self.metal,
            Material::Glass => &self.glass,
        }
    }

    fn material_mut(&mut self, material: Material) -> &mut RawValue {
        match material {
            Material::Hdpe => &mut self.hdpe,
            Material::Pet => &mut self.pet,
            Material::Pp => &mut self.pp,
            Material::Paper => &mut self.paper,
            Material::Metal => &mut self.metal,
            Material::Glass => &mut self.glass,
        }
    }
}

/// Recyclable material categories that dry waste decomposes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    Hdpe,
    Pet,
    Pp,
    Paper,
    Metal,
    Glass,
}

impl Material {
    pub const ALL: [Material; 6] = [
        Material::Hdpe,
        Material::Pet,
        Material::Pp,
        Material::Paper,
        Material::Metal,
        Material::Glass,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Material::Hdpe => "HDPE",
            Material::Pet => "PET",
            Material::Pp => "PP",
            Material::Paper => "Paper",
            Material::Metal => "Metal",
            Material::Glass => "Glass",
        }
    }

    /// Accepts labels as the dashboard filters send them ("PAPER WASTE", "Glass", "pet").
    pub fn from_str_loose(s: &str) -> Option<Material> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "hdpe" => Some(Material::Hdpe),
            "pet" => Some(Material::Pet),
            "pp" => Some(Material::Pp),
            "paper" | "paper waste" => Some(Material::Paper),
            "metal" => Some(Material::Metal),
            "glass" => Some(Material::Glass),
            _ => None,
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-material quantities, used both for a single record and for sums.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialTotals {
    pub hdpe: Decimal,
    pub pet: Decimal,
    pub pp: Decimal,
    pub paper: Decimal,
    pub metal: Decimal,
    pub glass: Decimal,
}

impl MaterialTotals {
    pub fn get(&self, material: Material) -> Decimal {
        match material {
            Material::Hdpe => self.hdpe,
            Material::Pet => self.pet,
            Material::Pp => self.pp,
            Material::Paper => self.paper,
            Material::Metal => self.metal,
            Material::Glass => self.glass,
        }
    }

    pub fn set(&mut self, material: Material, value: Decimal) {
        match material {
            Material::Hdpe => self.hdpe = value,
            Material::Pet => self.pet = value,
            Material::Pp => self.pp = value,
            Material::Paper => self.paper = value,
            Material::Metal => self.metal = value,
            Material::Glass => self.glass = value,
        }
    }

    pub fn sum(&self) -> Decimal {
        Material::ALL.iter().map(|m| self.get(*m)).sum()
    }
}

impl AddAssign for MaterialTotals {
    fn add_assign(&mut self, rhs: Self) {
        for m in Material::ALL {
            self.set(m, self.get(m) + rhs.get(m));
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HouseholdCategory {
    #[default]
    Domestic,
    Business,
}

impl fmt::Display for HouseholdCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HouseholdCategory::Domestic => write!(f, "Domestic"),
            HouseholdCategory::Business => write!(f, "Business"),
        }
    }
}

/// Canonical record derived 1:1 from a valid raw record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanedRecord {
    pub date: NaiveDate,
    /// The date as written in the source, kept for reference.
    pub date_string: String,
    pub group: String,
    pub household_name: String,
    pub wet_waste: Decimal,
    pub dry_waste: Decimal,
    pub materials: MaterialTotals,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// `YYYY-WW` key of the week containing `date`.
    pub week_bucket: String,
    pub category: HouseholdCategory,
}

impl CleanedRecord {
    pub fn total_waste(&self) -> Decimal {
        self.wet_waste + self.dry_waste
    }

    pub fn is_business(&self) -> bool {
        self.category == HouseholdCategory::Business
    }

    /// Household name if it is non-blank.
    pub fn household(&self) -> Option<&str> {
        let name = self.household_name.trim();
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }
}
