pub mod date;
pub mod values;

use crate::model::{Material, MaterialTotals, RawRecord};
use chrono::NaiveDate;
use date::{parse_date, DateOrder};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use values::coerce_quantity;

/// A raw record with typed fields, before week and category are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecord {
    pub date: NaiveDate,
    pub date_string: String,
    pub group: String,
    pub household_name: String,
    pub wet_waste: Decimal,
    pub dry_waste: Decimal,
    pub materials: MaterialTotals,
    pub location: Option<String>,
}

/// Why a raw record was left out of the cleaned dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RejectReason {
    MissingDate,
    InvalidDate(String),
    MissingGroup,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::MissingDate => write!(f, "missing date"),
            RejectReason::InvalidDate(s) => write!(f, "invalid date '{s}'"),
            RejectReason::MissingGroup => write!(f, "missing group"),
        }
    }
}

/// Parse one raw record.
///
/// Records without a usable date or group are rejected. Quantity fields
/// never cause a rejection; malformed ones become zero.
pub fn parse_record(raw: &RawRecord, order: DateOrder) -> Result<ParsedRecord, RejectReason> {
    let date_string = match raw.date.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => return Err(RejectReason::MissingDate),
    };

    let group = match raw.group.as_deref().map(str::trim) {
        Some(g) if !g.is_empty() => g.to_string(),
        _ => return Err(RejectReason::MissingGroup),
    };

    let date =
        parse_date(&date_string, order).ok_or_else(|| RejectReason::InvalidDate(date_string.clone()))?;

    let mut materials = MaterialTotals::default();
    for m in Material::ALL {
        materials.set(m, coerce_quantity(raw.material(m)));
    }

    let location = raw
        .location
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string);

    Ok(ParsedRecord {
        date,
        date_string,
        group,
        household_name: raw
            .household_name
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string(),
        wet_waste: coerce_quantity(&raw.wet_waste),
        dry_waste: coerce_quantity(&raw.dry_waste),
        materials,
        location,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawValue;
    use rust_decimal_macros::dec;

    fn raw(date: &str, group: &str) -> RawRecord {
        RawRecord {
            date: Some(date.into()),
            group: Some(group.into()),
            household_name: Some("H1".into()),
            wet_waste: RawValue::Number(dec!(2)),
            dry_waste: RawValue::from("20"),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_record() {
        let parsed = parse_record(&raw("13/3/2025", " A "), DateOrder::DayFirst).unwrap();
        assert_eq!(parsed.group, "A");
        assert_eq!(parsed.wet_waste, dec!(2));
        assert_eq!(parsed.dry_waste, dec!(20));
        assert_eq!(parsed.materials, MaterialTotals::default());
        assert_eq!(parsed.date_string, "13/3/2025");
    }

    #[test]
    fn test_blank_group_rejected() {
        assert_eq!(
            parse_record(&raw("13/3/2025", "   "), DateOrder::DayFirst),
            Err(RejectReason::MissingGroup)
        );
        let mut r = raw("13/3/2025", "A");
        r.group = None;
        assert_eq!(
            parse_record(&r, DateOrder::DayFirst),
            Err(RejectReason::MissingGroup)
        );
    }

    #[test]
    fn test_missing_date_rejected() {
        let mut r = raw("", "A");
        assert_eq!(
            parse_record(&r, DateOrder::DayFirst),
            Err(RejectReason::MissingDate)
        );
        r.date = None;
        assert_eq!(
            parse_record(&r, DateOrder::DayFirst),
            Err(RejectReason::MissingDate)
        );
    }

    #[test]
    fn test_impossible_date_rejected() {
        assert_eq!(
            parse_record(&raw("31/4/2025", "A"), DateOrder::DayFirst),
            Err(RejectReason::InvalidDate("31/4/2025".into()))
        );
    }

    #[test]
    fn test_malformed_quantity_is_zero_not_rejected() {
        let mut r = raw("13/3/2025", "A");
        r.wet_waste = RawValue::from("lots");
        r.glass = RawValue::from("1.5");
        let parsed = parse_record(&r, DateOrder::DayFirst).unwrap();
        assert_eq!(parsed.wet_waste, Decimal::ZERO);
        assert_eq!(parsed.materials.glass, dec!(1.5));
    }

    #[test]
    fn test_blank_location_dropped() {
        let mut r = raw("13/3/2025", "A");
        r.location = Some("  ".into());
        assert_eq!(parse_record(&r, DateOrder::DayFirst).unwrap().location, None);
        r.location = Some("-0.0917, 34.7680".into());
        assert_eq!(
            parse_record(&r, DateOrder::DayFirst).unwrap().location.as_deref(),
            Some("-0.0917, 34.7680")
        );
    }
}
