pub mod engine;
pub mod outcome;

pub use engine::{
    category_averages, date_bounds, filter_options, global_kpis, group_breakdown,
    households_for_groups, material_totals, monthly_totals, selected_material_totals,
};
pub use outcome::{
    CategoryAverages, CategoryRates, DateBounds, FilterOptions, GlobalKpis, GroupBreakdown,
    MaterialAmount, MonthlyTotals,
};

use rust_decimal::Decimal;

/// `numerator / denominator`, or zero when the denominator is zero.
pub(crate) fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}
