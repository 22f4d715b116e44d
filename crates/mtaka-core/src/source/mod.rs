pub mod json;
pub mod xlsx;

pub use json::JsonSource;
pub use xlsx::XlsxSource;

use crate::error::MtakaError;
use crate::model::{RawField, RawRecord};
use crate::profile::schema::{DatasetProfile, FieldNames};
use std::path::Path;

/// Trait for dataset asset formats.
pub trait RecordSource: Send + Sync {
    /// Decode an asset into raw records, one per row, in source order.
    fn read_records(&self, bytes: &[u8], fields: &FieldNames) -> Result<Vec<RawRecord>, MtakaError>;

    /// Name of this format (for diagnostics).
    fn format_name(&self) -> &str;
}

/// Pick a source from the file extension. Anything other than `.xlsx` is
/// read as JSON.
pub fn source_for_path(path: &Path, profile: &DatasetProfile) -> Box<dyn RecordSource> {
    let is_xlsx = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"));
    if is_xlsx {
        Box::new(XlsxSource::new(profile.date_order))
    } else {
        Box::new(JsonSource)
    }
}

/// Read and decode the asset at `path` without cleaning it.
pub fn read_raw_records(path: &Path, profile: &DatasetProfile) -> Result<Vec<RawRecord>, MtakaError> {
    let bytes = std::fs::read(path)
        .map_err(|e| MtakaError::DatasetLoad(format!("{}: {e}", path.display())))?;
    let source = source_for_path(path, profile);
    log::debug!("reading {} as {}", path.display(), source.format_name());
    let records = source.read_records(&bytes, &profile.fields)?;
    log::info!("loaded {} raw records from {}", records.len(), path.display());
    Ok(records)
}

/// Lookup from asset column names to record fields.
pub(crate) struct ColumnMap<'a> {
    columns: Vec<(RawField, &'a str)>,
}

impl<'a> ColumnMap<'a> {
    pub(crate) fn new(fields: &'a FieldNames) -> Self {
        Self {
            columns: fields.columns(),
        }
    }

    /// Field stored under `header`, ignoring surrounding whitespace.
    pub(crate) fn field_for(&self, header: &str) -> Option<RawField> {
        let header = header.trim();
        self.columns
            .iter()
            .find(|(_, name)| name.trim() == header)
            .map(|(field, _)| *field)
    }

    /// Resolve a header row, warning about expected columns it lacks.
    pub(crate) fn resolve<'h>(&self, headers: impl IntoIterator<Item = &'h str>) -> Vec<Option<RawField>> {
        let mapped: Vec<Option<RawField>> = headers.into_iter().map(|h| self.field_for(h)).collect();
        for (field, name) in &self.columns {
            if !mapped.contains(&Some(*field)) {
                log::warn!("column '{name}' not found in asset; {field:?} will be empty");
            }
        }
        mapped
    }
}
