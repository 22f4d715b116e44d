use mtaka_core::aggregate::{monthly_totals, MonthlyTotals};
use mtaka_core::error::MtakaError;
use mtaka_core::extrapolate::{forecast, Forecast};
use mtaka_core::filter::{filter, GroupNames};
use serde::Serialize;

use super::{filter_state, load};
use crate::output;
use crate::{DataArgs, FilterArgs};

#[derive(Serialize)]
struct ForecastReport {
    observed: Vec<MonthlyTotals>,
    forecast: Forecast,
}

pub fn run(data: &DataArgs, filter_args: &FilterArgs) -> Result<(), MtakaError> {
    let (profile, dataset) = load(data)?;
    let names = GroupNames::new(&profile.group_names);
    let state = filter_state(filter_args, &names)?;
    let observed = monthly_totals(&filter(&dataset.records, &state));
    let forecast = forecast(&observed);

    match data.output.as_str() {
        "json" => output::json::print(&ForecastReport { observed, forecast })?,
        _ => output::table::print_forecast(&observed, &forecast),
    }
    Ok(())
}
