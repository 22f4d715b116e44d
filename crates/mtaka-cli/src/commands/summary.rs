use mtaka_core::error::MtakaError;
use mtaka_core::filter::GroupNames;

use super::{filter_state, load};
use crate::output;
use crate::{DataArgs, FilterArgs};

pub fn run(data: &DataArgs, filter: &FilterArgs) -> Result<(), MtakaError> {
    let (profile, dataset) = load(data)?;
    let names = GroupNames::new(&profile.group_names);
    let state = filter_state(filter, &names)?;
    let summary = mtaka_core::summarize(&dataset.records, &state, &profile);

    match data.output.as_str() {
        "json" => output::json::print(&summary)?,
        _ => output::table::print_summary(&summary),
    }
    Ok(())
}
