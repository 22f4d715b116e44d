use crate::classify::HouseholdClassifier;
use crate::model::{CleanedRecord, RawRecord};
use crate::parsing::date::{week_bucket, DateOrder};
use crate::parsing::{parse_record, RejectReason};
use crate::profile::schema::DatasetProfile;
use serde::Serialize;

/// A raw record that did not make it into the cleaned dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRecord {
    /// Position in the source asset (0-based).
    pub index: usize,
    pub reason: RejectReason,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleanReport {
    pub total_records: usize,
    pub kept_records: usize,
    pub skipped: Vec<SkippedRecord>,
}

/// The canonical in-memory dataset plus what was dropped on the way.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleanedDataset {
    pub records: Vec<CleanedRecord>,
    pub report: CleanReport,
}

/// Parse every raw record, drop the rejects, and attach week bucket and
/// household category. Surviving records keep their input order.
pub fn clean(
    raw: &[RawRecord],
    order: DateOrder,
    classifier: &HouseholdClassifier,
) -> CleanedDataset {
    let mut records = Vec::with_capacity(raw.len());
    let mut skipped = Vec::new();

    for (index, raw_record) in raw.iter().enumerate() {
        let parsed = match parse_record(raw_record, order) {
            Ok(p) => p,
            Err(reason) => {
                log::debug!("skipping record {index}: {reason}");
                skipped.push(SkippedRecord { index, reason });
                continue;
            }
        };

        let category = classifier.classify(&parsed.group, &parsed.household_name);
        records.push(CleanedRecord {
            week_bucket: week_bucket(parsed.date),
            date: parsed.date,
            date_string: parsed.date_string,
            group: parsed.group,
            household_name: parsed.household_name,
            wet_waste: parsed.wet_waste,
            dry_waste: parsed.dry_waste,
            materials: parsed.materials,
            location: parsed.location,
            category,
        });
    }

    let report = CleanReport {
        total_records: raw.len(),
        kept_records: records.len(),
        skipped,
    };

    log::info!(
        "cleaned {} of {} records ({} skipped)",
        report.kept_records,
        report.total_records,
        report.skipped.len()
    );
    if report.total_records > 0 && report.kept_records * 2 < report.total_records {
        log::warn!(
            "more than half of the records were dropped; check the profile's date order ({order})"
        );
    }

    CleanedDataset { records, report }
}

/// Clean using the date order and classifier policy of a profile.
pub fn clean_with_profile(raw: &[RawRecord], profile: &DatasetProfile) -> CleanedDataset {
    let classifier = HouseholdClassifier::new(&profile.classifier);
    clean(raw, profile.date_order, &classifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HouseholdCategory, RawValue};
    use crate::profile::schema::ClassifierPolicy;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn raw(date: &str, group: &str, household: &str) -> RawRecord {
        RawRecord {
            date: Some(date.into()),
            group: Some(group.into()),
            household_name: Some(household.into()),
            wet_waste: RawValue::Number(dec!(1)),
            dry_waste: RawValue::Number(dec!(2)),
            ..Default::default()
        }
    }

    fn classifier() -> HouseholdClassifier {
        HouseholdClassifier::new(&ClassifierPolicy::BusinessNames {
            names: vec!["Tavanas".into()],
        })
    }

    #[test]
    fn test_rejects_dropped_and_order_kept() {
        let input = vec![
            raw("13/3/2025", "A", "H1"),
            raw("13/3/2025", "", "H2"),
            raw("31/4/2025", "A", "H3"),
            raw("15/3/2025", "B", "Tavanas"),
        ];
        let ds = clean(&input, DateOrder::DayFirst, &classifier());

        assert_eq!(ds.records.len(), 2);
        assert_eq!(ds.records[0].household_name, "H1");
        assert_eq!(ds.records[1].household_name, "Tavanas");
        assert_eq!(ds.records[1].category, HouseholdCategory::Business);
        assert_eq!(ds.records[0].category, HouseholdCategory::Domestic);

        assert_eq!(ds.report.total_records, 4);
        assert_eq!(ds.report.kept_records, 2);
        assert_eq!(
            ds.report.skipped,
            vec![
                SkippedRecord {
                    index: 1,
                    reason: RejectReason::MissingGroup
                },
                SkippedRecord {
                    index: 2,
                    reason: RejectReason::InvalidDate("31/4/2025".into())
                },
            ]
        );
    }

    #[test]
    fn test_blank_quantities_become_zero() {
        let input = vec![RawRecord {
            date: Some("13/3/2025".into()),
            group: Some("A".into()),
            household_name: Some(String::new()),
            wet_waste: RawValue::from(""),
            dry_waste: RawValue::from(""),
            hdpe: RawValue::from(""),
            pet: RawValue::from(""),
            pp: RawValue::from(""),
            paper: RawValue::from(""),
            metal: RawValue::from(""),
            glass: RawValue::from(""),
            location: None,
        }];
        let ds = clean(&input, DateOrder::DayFirst, &classifier());
        let r = &ds.records[0];
        assert_eq!(r.wet_waste, Decimal::ZERO);
        assert_eq!(r.dry_waste, Decimal::ZERO);
        assert_eq!(r.materials.sum(), Decimal::ZERO);
        assert_eq!(r.total_waste(), Decimal::ZERO);
    }

    #[test]
    fn test_week_bucket_attached() {
        let ds = clean(&[raw("13/3/2025", "A", "H1")], DateOrder::DayFirst, &classifier());
        assert_eq!(ds.records[0].week_bucket, "2025-11");
    }

    #[test]
    fn test_empty_input() {
        let ds = clean(&[], DateOrder::DayFirst, &classifier());
        assert!(ds.records.is_empty());
        assert_eq!(ds.report, CleanReport::default());
    }
}
