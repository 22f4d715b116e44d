use mtaka_core::aggregate::{date_bounds, filter_options, households_for_groups};
use mtaka_core::error::MtakaError;
use mtaka_core::filter::{FilterState, GroupNames};
use serde::Serialize;

use super::load;
use crate::output;
use crate::DataArgs;

#[derive(Serialize)]
struct OptionsReport {
    groups: Vec<String>,
    households: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dates: Option<mtaka_core::aggregate::DateBounds>,
}

pub fn run(data: &DataArgs, groups: &[String]) -> Result<(), MtakaError> {
    let (profile, dataset) = load(data)?;
    let names = GroupNames::new(&profile.group_names);
    let options = filter_options(&dataset.records, &names);
    let selected = FilterState::default().with_display_groups(groups.iter().map(|g| g.trim()), &names);
    let households = households_for_groups(&dataset.records, &selected.groups);
    let bounds = date_bounds(&dataset.records);

    match data.output.as_str() {
        "json" => output::json::print(&OptionsReport {
            groups: options.groups,
            households,
            dates: bounds,
        })?,
        _ => output::table::print_options(&options, &households, bounds.as_ref()),
    }
    Ok(())
}
