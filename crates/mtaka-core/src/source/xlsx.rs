use std::io::Cursor;

use calamine::{Data, DataType, Reader, Xlsx};
use rust_decimal::Decimal;

use crate::error::MtakaError;
use crate::model::{RawRecord, RawValue};
use crate::parsing::date::{format_date, DateOrder};
use crate::profile::schema::FieldNames;

use super::{ColumnMap, RecordSource};

/// First worksheet of an xlsx workbook, header in row 1.
///
/// Date-formatted cells are written back out as text in the profile's date
/// order so they go through the same parser as typed-in dates.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxSource {
    date_order: DateOrder,
}

impl XlsxSource {
    pub fn new(date_order: DateOrder) -> Self {
        Self { date_order }
    }

    fn cell_to_raw(&self, cell: &Data) -> RawValue {
        match cell {
            Data::Empty => RawValue::Empty,
            Data::String(s) if s.trim().is_empty() => RawValue::Empty,
            Data::String(s) => RawValue::Text(s.clone()),
            Data::Float(f) => RawValue::Number(f64_to_decimal(*f)),
            Data::Int(i) => RawValue::Number(Decimal::from(*i)),
            Data::DateTime(_) | Data::DateTimeIso(_) => match cell.as_datetime() {
                Some(dt) => RawValue::Text(format_date(dt.date(), self.date_order)),
                None => RawValue::Text(cell.to_string()),
            },
            _ => RawValue::Text(cell.to_string()),
        }
    }
}

impl RecordSource for XlsxSource {
    fn read_records(&self, bytes: &[u8], fields: &FieldNames) -> Result<Vec<RawRecord>, MtakaError> {
        let cursor = Cursor::new(bytes);
        let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(cursor)
            .map_err(|e| MtakaError::Spreadsheet(format!("failed to open xlsx: {e}")))?;

        let sheet = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| MtakaError::Spreadsheet("workbook has no worksheets".into()))?
            .map_err(|e| MtakaError::Spreadsheet(format!("failed to read first worksheet: {e}")))?;

        let mut rows = sheet.rows();
        let Some(header) = rows.next() else {
            return Ok(Vec::new());
        };
        let header_names: Vec<String> = header.iter().map(|c| c.to_string()).collect();
        let mapped = ColumnMap::new(fields).resolve(header_names.iter().map(String::as_str));

        let mut records = Vec::new();
        for row in rows {
            // trailing formatted-but-empty rows
            if row.iter().all(|c| matches!(self.cell_to_raw(c), RawValue::Empty)) {
                continue;
            }
            let mut record = RawRecord::default();
            for (field, cell) in mapped.iter().zip(row) {
                if let Some(field) = field {
                    record.assign(*field, self.cell_to_raw(cell));
                }
            }
            records.push(record);
        }

        Ok(records)
    }

    fn format_name(&self) -> &str {
        "xlsx"
    }
}

/// Shortest round-trip form, so a 2.3 cell reads as 2.3. Non-finite or
/// out-of-range values become zero.
fn f64_to_decimal(f: f64) -> Decimal {
    f.to_string().parse().unwrap_or_default()
}
