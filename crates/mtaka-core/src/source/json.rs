use crate::error::MtakaError;
use crate::model::{RawRecord, RawValue};
use crate::profile::schema::FieldNames;
use rust_decimal::Decimal;
use serde_json::Value;

use super::{ColumnMap, RecordSource};

/// A JSON array of flat objects keyed by column name.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSource;

impl RecordSource for JsonSource {
    fn read_records(&self, bytes: &[u8], fields: &FieldNames) -> Result<Vec<RawRecord>, MtakaError> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| MtakaError::DatasetLoad(format!("malformed JSON: {e}")))?;
        let Value::Array(rows) = value else {
            return Err(MtakaError::DatasetLoad(
                "expected a JSON array of records".into(),
            ));
        };

        let columns = ColumnMap::new(fields);
        if let Some(Value::Object(first)) = rows.first() {
            columns.resolve(first.keys().map(String::as_str));
        }

        let mut records = Vec::with_capacity(rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            let Value::Object(object) = row else {
                return Err(MtakaError::DatasetLoad(format!(
                    "record {index} is not an object"
                )));
            };

            let mut record = RawRecord::default();
            for (key, value) in object {
                if let Some(field) = columns.field_for(&key) {
                    record.assign(field, json_to_raw(value));
                }
            }
            records.push(record);
        }

        Ok(records)
    }

    fn format_name(&self) -> &str {
        "json"
    }
}

fn json_to_raw(value: Value) -> RawValue {
    match value {
        Value::Null => RawValue::Empty,
        Value::String(s) => RawValue::Text(s),
        Value::Number(n) => {
            let text = n.to_string();
            match text
                .parse::<Decimal>()
                .or_else(|_| Decimal::from_scientific(&text))
            {
                Ok(d) => RawValue::Number(d),
                Err(_) => {
                    log::warn!("JSON number {text} is outside the decimal range");
                    RawValue::Text(text)
                }
            }
        }
        other => RawValue::Text(other.to_string()),
    }
}
