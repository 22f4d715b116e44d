use crate::model::{Material, MaterialTotals};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Headline figures for a data slice.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GlobalKpis {
    pub number_of_groups: usize,
    pub number_of_households: usize,
    pub number_of_weeks: usize,
    pub total_wet_waste: Decimal,
    pub total_dry_waste: Decimal,
    /// Wet plus dry.
    pub total_weight: Decimal,
}

/// Totals for one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupBreakdown {
    /// Internal group key.
    pub group: String,
    pub display_name: String,
    pub wet_waste: Decimal,
    pub dry_waste: Decimal,
    pub materials: MaterialTotals,
    pub total_weight: Decimal,
    /// Distinct non-blank household names in the group.
    pub household_count: usize,
    /// Total weight per household, zero for groups without named households.
    pub avg_per_household: Decimal,
}

/// Weekly per-household generation rate for one household category.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryRates {
    pub avg_weekly_wet_waste: Decimal,
    pub avg_weekly_dry_waste: Decimal,
    pub total_households: usize,
    pub total_weeks: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryAverages {
    pub domestic: CategoryRates,
    pub business: CategoryRates,
}

/// One material's total, for material-selected views.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaterialAmount {
    pub material: Material,
    pub total: Decimal,
}

/// Sums for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotals {
    /// `YYYY-MM`.
    pub month: String,
    pub starts_on: NaiveDate,
    pub wet_waste: Decimal,
    pub dry_waste: Decimal,
    pub materials: MaterialTotals,
}

impl MonthlyTotals {
    pub fn total_weight(&self) -> Decimal {
        self.wet_waste + self.dry_waste
    }
}

/// Values to populate the filter controls with.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    /// Group display names, sorted.
    pub groups: Vec<String>,
    /// Non-blank household names, sorted.
    pub households: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateBounds {
    pub first: NaiveDate,
    pub last: NaiveDate,
}
