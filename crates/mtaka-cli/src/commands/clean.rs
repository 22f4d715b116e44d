use mtaka_core::error::MtakaError;
use std::path::PathBuf;

use super::resolve_profile;
use crate::output;
use crate::DataArgs;

pub fn run(data: &DataArgs, output_file: Option<PathBuf>) -> Result<(), MtakaError> {
    let profile = resolve_profile(data)?;
    let dataset = mtaka_core::load_dataset(&data.input_file, &profile)?;

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&dataset.records)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Cleaned {} record(s), written to {}",
                dataset.records.len(),
                path.display()
            );
            if !dataset.report.skipped.is_empty() {
                eprintln!(
                    "  {} record(s) skipped during cleaning",
                    dataset.report.skipped.len()
                );
            }
        }
        None => match data.output.as_str() {
            "json" => output::json::print(&dataset)?,
            _ => output::table::print_clean_report(&dataset.report),
        },
    }
    Ok(())
}
