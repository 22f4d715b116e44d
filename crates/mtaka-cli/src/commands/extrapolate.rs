use mtaka_core::error::MtakaError;
use mtaka_core::extrapolate::{extrapolate, ProjectionTargets};

use super::load;
use crate::output;
use crate::DataArgs;

/// Projection over the whole dataset; filters never apply here.
pub fn run(
    data: &DataArgs,
    households: Option<usize>,
    weeks: Option<usize>,
    groups: Option<usize>,
) -> Result<(), MtakaError> {
    let (profile, dataset) = load(data)?;
    let targets = with_overrides(profile.targets.unwrap_or_default(), households, weeks, groups)?;
    let projection = extrapolate(&dataset.records, targets)?;

    match data.output.as_str() {
        "json" => output::json::print(&projection)?,
        _ => output::table::print_projection(&projection),
    }
    Ok(())
}

/// Apply command-line overrides to the profile's targets and check them.
fn with_overrides(
    mut targets: ProjectionTargets,
    households: Option<usize>,
    weeks: Option<usize>,
    groups: Option<usize>,
) -> Result<ProjectionTargets, MtakaError> {
    if let Some(h) = households {
        targets.households = h;
    }
    if let Some(w) = weeks {
        targets.weeks = w;
    }
    if let Some(g) = groups {
        targets.groups = g;
    }
    targets.validate()?;
    Ok(targets)
}
