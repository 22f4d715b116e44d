use super::outcome::{
    CategoryAverages, CategoryRates, DateBounds, FilterOptions, GlobalKpis, GroupBreakdown,
    MaterialAmount, MonthlyTotals,
};
use super::ratio;
use crate::filter::{FilterState, GroupNames};
use crate::model::{CleanedRecord, MaterialTotals};
use crate::parsing::date::month_key;
use crate::profile::schema::HouseholdCount;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

fn distinct_households<'a>(records: impl IntoIterator<Item = &'a CleanedRecord>) -> usize {
    records
        .into_iter()
        .filter_map(CleanedRecord::household)
        .collect::<HashSet<_>>()
        .len()
}

fn distinct_weeks<'a>(records: impl IntoIterator<Item = &'a CleanedRecord>) -> usize {
    records
        .into_iter()
        .map(|r| r.week_bucket.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Group, household and week counts plus waste sums.
///
/// With a fixed household count the household figure is the configured
/// population for any non-empty slice.
pub fn global_kpis(records: &[CleanedRecord], household_count: HouseholdCount) -> GlobalKpis {
    if records.is_empty() {
        return GlobalKpis::default();
    }

    let groups: HashSet<&str> = records.iter().map(|r| r.group.as_str()).collect();
    let total_wet_waste: Decimal = records.iter().map(|r| r.wet_waste).sum();
    let total_dry_waste: Decimal = records.iter().map(|r| r.dry_waste).sum();

    let number_of_households = match household_count {
        HouseholdCount::Observed => distinct_households(records),
        HouseholdCount::Fixed { value } => value,
    };

    GlobalKpis {
        number_of_groups: groups.len(),
        number_of_households,
        number_of_weeks: distinct_weeks(records),
        total_wet_waste,
        total_dry_waste,
        total_weight: total_wet_waste + total_dry_waste,
    }
}

/// Per-group totals, heaviest group first.
///
/// Ties are broken by group key so every chart ranks groups identically.
pub fn group_breakdown(records: &[CleanedRecord], names: &GroupNames) -> Vec<GroupBreakdown> {
    #[derive(Default)]
    struct Acc<'a> {
        wet: Decimal,
        dry: Decimal,
        materials: MaterialTotals,
        households: HashSet<&'a str>,
    }

    let mut map: HashMap<&str, Acc> = HashMap::new();
    for r in records {
        let e = map.entry(r.group.as_str()).or_default();
        e.wet += r.wet_waste;
        e.dry += r.dry_waste;
        e.materials += r.materials;
        if let Some(h) = r.household() {
            e.households.insert(h);
        }
    }

    let mut rows: Vec<GroupBreakdown> = map
        .into_iter()
        .map(|(group, acc)| {
            let total_weight = acc.wet + acc.dry;
            let household_count = acc.households.len();
            GroupBreakdown {
                group: group.to_string(),
                display_name: names.display_name(group).to_string(),
                wet_waste: acc.wet,
                dry_waste: acc.dry,
                materials: acc.materials,
                total_weight,
                household_count,
                avg_per_household: ratio(total_weight, Decimal::from(household_count)),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_weight
            .cmp(&a.total_weight)
            .then_with(|| a.group.cmp(&b.group))
    });
    rows
}

/// Average weekly wet/dry waste per household for domestic and business
/// points.
///
/// This is a rate: partition sum / households / weeks, each denominator
/// floored at one.
pub fn category_averages(records: &[CleanedRecord]) -> CategoryAverages {
    let (business, domestic): (Vec<&CleanedRecord>, Vec<&CleanedRecord>) =
        records.iter().partition(|r| r.is_business());

    CategoryAverages {
        domestic: category_rates(&domestic),
        business: category_rates(&business),
    }
}

fn category_rates(records: &[&CleanedRecord]) -> CategoryRates {
    let households = distinct_households(records.iter().copied());
    let weeks = distinct_weeks(records.iter().copied());
    let wet: Decimal = records.iter().map(|r| r.wet_waste).sum();
    let dry: Decimal = records.iter().map(|r| r.dry_waste).sum();

    let per = Decimal::from(households.max(1)) * Decimal::from(weeks.max(1));
    CategoryRates {
        avg_weekly_wet_waste: ratio(wet, per),
        avg_weekly_dry_waste: ratio(dry, per),
        total_households: households,
        total_weeks: weeks,
    }
}

/// Sum of each recyclable material.
pub fn material_totals(records: &[CleanedRecord]) -> MaterialTotals {
    records.iter().fold(MaterialTotals::default(), |mut acc, r| {
        acc += r.materials;
        acc
    })
}

/// Material totals limited to the materials selected in `state`.
pub fn selected_material_totals(
    records: &[CleanedRecord],
    state: &FilterState,
) -> Vec<MaterialAmount> {
    let totals = material_totals(records);
    state
        .selected_materials()
        .into_iter()
        .map(|material| MaterialAmount {
            material,
            total: totals.get(material),
        })
        .collect()
}

/// Wet, dry and material sums per calendar month, oldest first.
pub fn monthly_totals(records: &[CleanedRecord]) -> Vec<MonthlyTotals> {
    let mut months: BTreeMap<String, MonthlyTotals> = BTreeMap::new();
    for r in records {
        let key = month_key(r.date);
        let e = months.entry(key.clone()).or_insert_with(|| MonthlyTotals {
            month: key,
            starts_on: NaiveDate::from_ymd_opt(r.date.year(), r.date.month(), 1).unwrap_or(r.date),
            wet_waste: Decimal::ZERO,
            dry_waste: Decimal::ZERO,
            materials: MaterialTotals::default(),
        });
        e.wet_waste += r.wet_waste;
        e.dry_waste += r.dry_waste;
        e.materials += r.materials;
    }
    months.into_values().collect()
}

/// Distinct group display names and household names, both sorted.
pub fn filter_options(records: &[CleanedRecord], names: &GroupNames) -> FilterOptions {
    let groups: BTreeSet<&str> = records
        .iter()
        .map(|r| names.display_name(&r.group))
        .collect();
    let households: BTreeSet<&str> = records.iter().filter_map(CleanedRecord::household).collect();

    FilterOptions {
        groups: groups.into_iter().map(str::to_string).collect(),
        households: households.into_iter().map(str::to_string).collect(),
    }
}

/// Sorted household names belonging to any of `groups` (internal keys).
/// An empty selection yields every household.
pub fn households_for_groups(records: &[CleanedRecord], groups: &BTreeSet<String>) -> Vec<String> {
    let households: BTreeSet<&str> = records
        .iter()
        .filter(|r| groups.is_empty() || groups.contains(&r.group))
        .filter_map(CleanedRecord::household)
        .collect();
    households.into_iter().map(str::to_string).collect()
}

/// Earliest and latest record dates, used as the initial date filter.
pub fn date_bounds(records: &[CleanedRecord]) -> Option<DateBounds> {
    let first = records.iter().map(|r| r.date).min()?;
    let last = records.iter().map(|r| r.date).max()?;
    Some(DateBounds { first, last })
}
