use mtaka_core::aggregate::{
    CategoryAverages, CategoryRates, DateBounds, FilterOptions, GlobalKpis, GroupBreakdown,
    MaterialAmount, MonthlyTotals,
};
use mtaka_core::clean::CleanReport;
use mtaka_core::extrapolate::{Forecast, ProjectionResult, WasteRates};
use mtaka_core::model::Material;
use mtaka_core::Summary;
use rust_decimal::Decimal;

/// Kilograms, two decimals.
fn kg(d: Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

pub fn print_kpis(kpis: &GlobalKpis) {
    println!("  Groups:          {}", kpis.number_of_groups);
    println!("  Households:      {}", kpis.number_of_households);
    println!("  Weeks:           {}", kpis.number_of_weeks);
    println!("  Wet waste (kg):  {}", kg(kpis.total_wet_waste));
    println!("  Dry waste (kg):  {}", kg(kpis.total_dry_waste));
    println!("  Total (kg):      {}", kg(kpis.total_weight));
    println!();
}

pub fn print_groups(groups: &[GroupBreakdown]) {
    if groups.is_empty() {
        println!("  No records match the selection.\n");
        return;
    }

    let name_width = groups
        .iter()
        .map(|g| g.display_name.len())
        .max()
        .unwrap_or(10)
        .max("Group".len());

    println!(
        "  {:<width$}  {:>10}  {:>10}  {:>10}  {:>10}  {:>12}",
        "Group",
        "Wet (kg)",
        "Dry (kg)",
        "Total (kg)",
        "Households",
        "Avg/hh (kg)",
        width = name_width
    );
    println!("  {}", "-".repeat(name_width + 62));
    for g in groups {
        println!(
            "  {:<width$}  {:>10}  {:>10}  {:>10}  {:>10}  {:>12}",
            g.display_name,
            kg(g.wet_waste),
            kg(g.dry_waste),
            kg(g.total_weight),
            g.household_count,
            kg(g.avg_per_household),
            width = name_width
        );
    }
    println!();
}

pub fn print_materials(materials: &[MaterialAmount]) {
    for m in materials {
        println!("  {:<8} {:>10} kg", m.material.label(), kg(m.total));
    }
    println!();
}

pub fn print_categories(averages: &CategoryAverages) {
    print_category("Domestic", &averages.domestic);
    print_category("Business", &averages.business);
}

fn print_category(label: &str, rates: &CategoryRates) {
    println!(
        "  {label}: {} household(s) over {} week(s)",
        rates.total_households, rates.total_weeks
    );
    println!(
        "    avg weekly wet waste per household: {} kg",
        kg(rates.avg_weekly_wet_waste)
    );
    println!(
        "    avg weekly dry waste per household: {} kg",
        kg(rates.avg_weekly_dry_waste)
    );
    println!();
}

pub fn print_monthly(months: &[MonthlyTotals], materials: &[Material]) {
    if months.is_empty() {
        println!("  No monthly data.\n");
        return;
    }
    print!("  {:<8}  {:>10}  {:>10}  {:>10}", "Month", "Wet", "Dry", "Total");
    for m in materials {
        print!("  {:>8}", m.label());
    }
    println!();
    for month in months {
        print!(
            "  {:<8}  {:>10}  {:>10}  {:>10}",
            month.month,
            kg(month.wet_waste),
            kg(month.dry_waste),
            kg(month.total_weight())
        );
        for m in materials {
            print!("  {:>8}", kg(month.materials.get(*m)));
        }
        println!();
    }
    println!();
}

pub fn print_summary(summary: &Summary) {
    println!("=== Overview ({} records) ===\n", summary.record_count);
    print_kpis(&summary.kpis);
    println!("=== Groups ===\n");
    print_groups(&summary.groups);
    println!("=== Household categories ===\n");
    print_categories(&summary.categories);
    println!("=== Materials ===\n");
    print_materials(&summary.materials);
    println!("=== Monthly ===\n");
    let selected: Vec<Material> = summary.materials.iter().map(|m| m.material).collect();
    print_monthly(&summary.monthly, &selected);
}

pub fn print_options(options: &FilterOptions, households: &[String], bounds: Option<&DateBounds>) {
    match bounds {
        Some(b) => println!("  Dates: {} to {}\n", b.first, b.last),
        None => println!("  Dates: (no records)\n"),
    }
    println!("  Groups ({}):", options.groups.len());
    for g in &options.groups {
        println!("    {g}");
    }
    println!();
    println!("  Households ({}):", households.len());
    for h in households {
        println!("    {h}");
    }
    println!();
}

pub fn print_projection(p: &ProjectionResult) {
    println!(
        "  Observed: {} group(s), {} household(s), {} week(s)",
        p.observed_groups, p.observed_households, p.observed_weeks
    );
    println!(
        "  Target:   {} group(s), {} household(s), {} week(s)\n",
        p.targets.groups, p.targets.households, p.targets.weeks
    );
    println!("  {:<28}  {:>12}  {:>12}  {:>12}", "", "Wet (kg)", "Dry (kg)", "Total (kg)");
    print_rates("Daily per household", &p.daily_per_household);
    print_rates("Weekly per household", &p.weekly_per_household);
    print_rates("Monthly per household", &p.monthly_per_household);
    print_rates("Extrapolated", &p.extrapolated);
    println!();
}

fn print_rates(label: &str, r: &WasteRates) {
    println!(
        "  {:<28}  {:>12}  {:>12}  {:>12}",
        label,
        kg(r.wet_waste),
        kg(r.dry_waste),
        kg(r.total_weight)
    );
}

pub fn print_forecast(months: &[MonthlyTotals], forecast: &Forecast) {
    println!("=== Observed ===\n");
    print_monthly(months, &[]);

    println!("=== Forecast ===\n");
    if forecast.points.is_empty() {
        println!("  At least two months of data are needed for a forecast.\n");
        return;
    }
    println!("  Monthly growth: {} kg\n", kg(forecast.monthly_growth));
    println!("  {:<8}  {:>10}  {:>10}  {:>10}", "Month", "Total", "Wet", "Dry");
    for p in &forecast.points {
        println!(
            "  {:<8}  {:>10}  {:>10}  {:>10}",
            p.month,
            kg(p.predicted),
            kg(p.wet_waste),
            kg(p.dry_waste)
        );
    }
    println!();
}

pub fn print_clean_report(report: &CleanReport) {
    println!(
        "  Kept {} of {} record(s), skipped {}.",
        report.kept_records,
        report.total_records,
        report.skipped.len()
    );
    if !report.skipped.is_empty() {
        println!();
        for s in &report.skipped {
            // 1-based, header excluded, as a spreadsheet user counts rows
            println!("  record {:>5}: {}", s.index + 1, s.reason);
        }
    }
    println!();
}
