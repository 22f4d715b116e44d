pub mod forecast;

pub use forecast::{forecast, Forecast, ForecastPoint};

use crate::aggregate::ratio;
use crate::error::MtakaError;
use crate::model::CleanedRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Weeks in a month for per-household monthly averages.
///
/// Applied everywhere a weekly rate is turned into a monthly one.
pub const WEEKS_PER_MONTH: Decimal = Decimal::from_parts(4, 0, 0, false, 0);

pub const DAYS_PER_WEEK: Decimal = Decimal::from_parts(7, 0, 0, false, 0);

/// Population and duration to scale observed rates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionTargets {
    /// Informational; rates are per household, not per group.
    pub groups: usize,
    pub households: usize,
    pub weeks: usize,
}

impl ProjectionTargets {
    /// Upper bound on target households.
    pub const MAX_HOUSEHOLDS: usize = 100_000_000;
    /// Upper bound on target weeks (a century).
    pub const MAX_WEEKS: usize = 5_200;

    /// Both households and weeks must be non-zero and within bounds.
    pub fn validate(&self) -> Result<(), MtakaError> {
        if self.households == 0 || self.weeks == 0 {
            return Err(MtakaError::InvalidTargets(
                "need at least one household and one week".into(),
            ));
        }
        if self.households > Self::MAX_HOUSEHOLDS {
            return Err(MtakaError::InvalidTargets(format!(
                "{} households exceeds the limit of {}",
                self.households,
                Self::MAX_HOUSEHOLDS
            )));
        }
        if self.weeks > Self::MAX_WEEKS {
            return Err(MtakaError::InvalidTargets(format!(
                "{} weeks exceeds the limit of {}",
                self.weeks,
                Self::MAX_WEEKS
            )));
        }
        Ok(())
    }
}

impl Default for ProjectionTargets {
    fn default() -> Self {
        Self {
            groups: 15,
            households: 2000,
            weeks: 31,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WasteRates {
    pub wet_waste: Decimal,
    pub dry_waste: Decimal,
    pub total_weight: Decimal,
}

impl WasteRates {
    fn new(wet_waste: Decimal, dry_waste: Decimal) -> Self {
        Self {
            wet_waste,
            dry_waste,
            total_weight: wet_waste + dry_waste,
        }
    }

    fn scale(&self, factor: Decimal) -> Option<Self> {
        let wet_waste = self.wet_waste.checked_mul(factor)?;
        let dry_waste = self.dry_waste.checked_mul(factor)?;
        Some(Self {
            wet_waste,
            dry_waste,
            total_weight: wet_waste.checked_add(dry_waste)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionResult {
    pub observed_groups: usize,
    pub observed_households: usize,
    pub observed_weeks: usize,
    pub targets: ProjectionTargets,
    pub weekly_per_household: WasteRates,
    pub daily_per_household: WasteRates,
    pub monthly_per_household: WasteRates,
    /// Weekly rate x target households x target weeks.
    pub extrapolated: WasteRates,
}

/// Scale per-household rates observed in `records` to `targets`.
///
/// Pass the whole cleaned dataset: projections describe the population,
/// not whatever slice is currently filtered. With no named households or
/// no weeks every rate is zero. Targets outside [`ProjectionTargets::validate`]
/// or a projection too large to represent are errors.
pub fn extrapolate(
    records: &[CleanedRecord],
    targets: ProjectionTargets,
) -> Result<ProjectionResult, MtakaError> {
    targets.validate()?;

    let groups: HashSet<&str> = records.iter().map(|r| r.group.as_str()).collect();
    let households: HashSet<&str> = records.iter().filter_map(CleanedRecord::household).collect();
    let weeks: HashSet<&str> = records.iter().map(|r| r.week_bucket.as_str()).collect();

    let total_wet: Decimal = records.iter().map(|r| r.wet_waste).sum();
    let total_dry: Decimal = records.iter().map(|r| r.dry_waste).sum();

    let household_weeks = Decimal::from(households.len()) * Decimal::from(weeks.len());
    let weekly = WasteRates::new(ratio(total_wet, household_weeks), ratio(total_dry, household_weeks));

    let daily = WasteRates::new(
        ratio(weekly.wet_waste, DAYS_PER_WEEK),
        ratio(weekly.dry_waste, DAYS_PER_WEEK),
    );
    let overflow = || MtakaError::InvalidTargets("projection exceeds the representable range".into());
    let monthly = weekly.scale(WEEKS_PER_MONTH).ok_or_else(overflow)?;
    let extrapolated = Decimal::from(targets.households)
        .checked_mul(Decimal::from(targets.weeks))
        .and_then(|factor| weekly.scale(factor))
        .ok_or_else(overflow)?;

    log::debug!(
        "extrapolating {} households over {} weeks to {} households over {} weeks",
        households.len(),
        weeks.len(),
        targets.households,
        targets.weeks
    );

    Ok(ProjectionResult {
        observed_groups: groups.len(),
        observed_households: households.len(),
        observed_weeks: weeks.len(),
        targets,
        weekly_per_household: weekly,
        daily_per_household: daily,
        monthly_per_household: monthly,
        extrapolated,
    })
}
