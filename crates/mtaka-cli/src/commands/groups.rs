use mtaka_core::aggregate::group_breakdown;
use mtaka_core::error::MtakaError;
use mtaka_core::filter::{filter, GroupNames};

use super::{filter_state, load};
use crate::output;
use crate::{DataArgs, FilterArgs};

pub fn run(data: &DataArgs, filter_args: &FilterArgs) -> Result<(), MtakaError> {
    let (profile, dataset) = load(data)?;
    let names = GroupNames::new(&profile.group_names);
    let state = filter_state(filter_args, &names)?;
    let records = filter(&dataset.records, &state);
    let groups = group_breakdown(&records, &names);

    match data.output.as_str() {
        "json" => output::json::print(&groups)?,
        _ => output::table::print_groups(&groups),
    }
    Ok(())
}
