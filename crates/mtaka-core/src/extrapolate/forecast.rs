use crate::aggregate::{ratio, MonthlyTotals};
use crate::parsing::date::month_key;
use chrono::Months;
use rust_decimal::Decimal;
use serde::Serialize;

/// Months projected past the last observed month.
pub const FORECAST_MONTHS: u32 = 6;

/// Most recent months the trend is measured over.
pub const TREND_WINDOW: usize = 3;

/// Share of a predicted total reported as wet waste; the rest is dry.
pub const WET_SHARE: Decimal = Decimal::from_parts(7, 0, 0, false, 1);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    /// `YYYY-MM`.
    pub month: String,
    pub predicted: Decimal,
    pub wet_waste: Decimal,
    pub dry_waste: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Forecast {
    /// Average month-over-month change across the trend window.
    pub monthly_growth: Decimal,
    pub points: Vec<ForecastPoint>,
}

/// Straight-line projection of monthly total weight.
///
/// The growth is `(last - first) / (n - 1)` over the last three months (or
/// fewer when that is all there is). Predictions start from the last
/// observed total and never go below zero. Fewer than two months give an
/// empty forecast.
pub fn forecast(months: &[MonthlyTotals]) -> Forecast {
    if months.len() < 2 {
        return Forecast::default();
    }

    let recent = &months[months.len().saturating_sub(TREND_WINDOW)..];
    let (Some(first), Some(last)) = (recent.first(), recent.last()) else {
        return Forecast::default();
    };
    let steps = Decimal::from(recent.len() - 1);
    let monthly_growth = ratio(last.total_weight() - first.total_weight(), steps);
    let last_value = last.total_weight();

    let dry_share = Decimal::ONE - WET_SHARE;
    let points = (1..=FORECAST_MONTHS)
        .filter_map(|i| {
            let month_start = last.starts_on.checked_add_months(Months::new(i))?;
            let predicted = (last_value + monthly_growth * Decimal::from(i)).max(Decimal::ZERO);
            Some(ForecastPoint {
                month: month_key(month_start),
                predicted,
                wet_waste: predicted * WET_SHARE,
                dry_waste: predicted * dry_share,
            })
        })
        .collect();

    Forecast {
        monthly_growth,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MaterialTotals;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn month(y: i32, m: u32, wet: Decimal, dry: Decimal) -> MonthlyTotals {
        let starts_on = NaiveDate::from_ymd_opt(y, m, 1).unwrap();
        MonthlyTotals {
            month: month_key(starts_on),
            starts_on,
            wet_waste: wet,
            dry_waste: dry,
            materials: MaterialTotals::default(),
        }
    }

    #[test]
    fn test_needs_two_months() {
        assert_eq!(forecast(&[]), Forecast::default());
        assert_eq!(
            forecast(&[month(2025, 3, dec!(10), dec!(0))]),
            Forecast::default()
        );
    }

    #[test]
    fn test_uses_last_three_months() {
        let months = vec![
            month(2025, 1, dec!(500), dec!(0)),
            month(2025, 2, dec!(100), dec!(0)),
            month(2025, 3, dec!(120), dec!(0)),
            month(2025, 4, dec!(140), dec!(0)),
        ];
        let f = forecast(&months);
        assert_eq!(f.monthly_growth, dec!(20));
        assert_eq!(f.points.len(), 6);
        assert_eq!(f.points[0].month, "2025-05");
        assert_eq!(f.points[0].predicted, dec!(160));
        assert_eq!(f.points[5].month, "2025-10");
        assert_eq!(f.points[5].predicted, dec!(260));
    }

    #[test]
    fn test_two_months_trend() {
        let months = vec![
            month(2025, 3, dec!(40), dec!(10)),
            month(2025, 4, dec!(50), dec!(20)),
        ];
        let f = forecast(&months);
        assert_eq!(f.monthly_growth, dec!(20));
        assert_eq!(f.points[0].predicted, dec!(90));
        assert_eq!(f.points[0].wet_waste, dec!(63));
        assert_eq!(f.points[0].dry_waste, dec!(27));
    }

    #[test]
    fn test_floored_at_zero() {
        let months = vec![
            month(2025, 3, dec!(100), dec!(0)),
            month(2025, 4, dec!(40), dec!(0)),
        ];
        let f = forecast(&months);
        assert_eq!(f.monthly_growth, dec!(-60));
        assert_eq!(f.points[0].predicted, dec!(0));
        assert!(f.points.iter().all(|p| p.predicted >= Decimal::ZERO));
    }

    #[test]
    fn test_crosses_year_boundary() {
        let months = vec![
            month(2025, 10, dec!(10), dec!(0)),
            month(2025, 11, dec!(10), dec!(0)),
        ];
        let f = forecast(&months);
        let labels: Vec<&str> = f.points.iter().map(|p| p.month.as_str()).collect();
        assert_eq!(
            labels,
            vec!["2025-12", "2026-01", "2026-02", "2026-03", "2026-04", "2026-05"]
        );
    }
}
