pub mod aggregate;
pub mod classify;
pub mod clean;
pub mod error;
pub mod extrapolate;
pub mod filter;
pub mod model;
pub mod parsing;
pub mod profile;
pub mod source;

use std::path::Path;

use aggregate::{
    CategoryAverages, GlobalKpis, GroupBreakdown, MaterialAmount, MonthlyTotals,
};
use clean::CleanedDataset;
use error::MtakaError;
use filter::{FilterState, GroupNames};
use model::CleanedRecord;
use profile::schema::DatasetProfile;
use serde::Serialize;

/// Main API entry point: load an asset from disk and clean it under `profile`.
///
/// `.xlsx` files are read from their first worksheet; anything else is read
/// as a JSON array of records.
pub fn load_dataset(path: &Path, profile: &DatasetProfile) -> Result<CleanedDataset, MtakaError> {
    let raw = source::read_raw_records(path, profile)?;
    Ok(clean::clean_with_profile(&raw, profile))
}

/// Clean a JSON asset already in memory.
pub fn load_dataset_json(json: &str, profile: &DatasetProfile) -> Result<CleanedDataset, MtakaError> {
    use source::RecordSource;
    let raw = source::JsonSource.read_records(json.as_bytes(), &profile.fields)?;
    Ok(clean::clean_with_profile(&raw, profile))
}

/// Every aggregate shown for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub filter: FilterState,
    pub record_count: usize,
    pub kpis: GlobalKpis,
    pub groups: Vec<GroupBreakdown>,
    pub categories: CategoryAverages,
    pub materials: Vec<MaterialAmount>,
    pub monthly: Vec<MonthlyTotals>,
}

/// Filter `records` and recompute all aggregates over the result.
pub fn summarize(
    records: &[CleanedRecord],
    state: &FilterState,
    profile: &DatasetProfile,
) -> Summary {
    let names = GroupNames::new(&profile.group_names);
    let filtered = filter::filter(records, state);
    log::debug!("{} of {} records match the filter", filtered.len(), records.len());

    Summary {
        filter: state.clone(),
        record_count: filtered.len(),
        kpis: aggregate::global_kpis(&filtered, profile.household_count),
        groups: aggregate::group_breakdown(&filtered, &names),
        categories: aggregate::category_averages(&filtered),
        materials: aggregate::selected_material_totals(&filtered, state),
        monthly: aggregate::monthly_totals(&filtered),
    }
}
