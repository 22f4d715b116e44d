use mtaka_core::error::MtakaError;
use mtaka_core::profile::builtin;
use mtaka_core::profile::schema::{ClassifierPolicy, DatasetProfile, HouseholdCount};
use mtaka_core::extrapolate::WEEKS_PER_MONTH;
use std::path::Path;

pub fn list() -> Result<(), MtakaError> {
    println!("Available predefined profiles:\n");
    for name in builtin::PRESETS {
        let profile = builtin::load_preset(name)?;
        let marker = if *name == builtin::DEFAULT_PRESET {
            " [default]"
        } else {
            ""
        };
        println!(
            "  {:<14} {} (v{}){}",
            name, profile.name, profile.version, marker
        );
        if let Some(ref desc) = profile.description {
            println!("                 {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn explain(preset: &str) -> Result<(), MtakaError> {
    let profile = builtin::load_preset(preset)?;
    describe(&profile);
    Ok(())
}

fn describe(profile: &DatasetProfile) {
    println!("{} (version {})\n", profile.name, profile.version);

    if let Some(ref desc) = profile.description {
        println!("{}\n", desc);
    }

    println!("Dates are read as {}.\n", profile.date_order);

    println!("Columns:");
    for (field, name) in profile.fields.columns() {
        println!("  {:<28} <- \"{}\"", format!("{field:?}"), name);
    }
    println!();

    match &profile.classifier {
        ClassifierPolicy::BusinessNames { names } => {
            println!("Business collection points ({} names, exact match):", names.len());
            for n in names {
                println!("  {n}");
            }
        }
        ClassifierPolicy::MixedGroups { groups } => {
            println!("Every household in these groups counts as business:");
            for g in groups {
                println!("  {g}");
            }
        }
    }
    println!("Everything else is domestic.\n");

    if !profile.group_names.is_empty() {
        println!("Group display names:");
        for (key, display) in &profile.group_names {
            println!("  {:<14} -> {}", key, display);
        }
        println!();
    }

    match profile.household_count {
        HouseholdCount::Observed => {
            println!("Household KPI: distinct household names in the selection.")
        }
        HouseholdCount::Fixed { value } => {
            println!("Household KPI: fixed enrolled population of {value}.")
        }
    }

    let targets = profile.targets.unwrap_or_default();
    println!(
        "Extrapolation targets: {} households over {} weeks ({} groups).",
        targets.households, targets.weeks, targets.groups
    );
    println!("Monthly figures use {WEEKS_PER_MONTH} weeks per month.\n");
}

pub fn validate(file: &Path) -> Result<(), MtakaError> {
    let profile = mtaka_core::profile::load_profile(file)?;

    println!("Profile '{}' (v{}) is valid.", profile.name, profile.version);
    println!("  Date order: {}", profile.date_order);
    println!("  Group names: {} mapped", profile.group_names.len());

    // Potential issues (warnings, not errors)
    let mut warnings = Vec::new();
    if profile.fields.location.is_none() {
        warnings.push("no location column configured".to_string());
    }
    if profile.targets.is_none() {
        warnings.push("no projection targets; extrapolation will use 2000 households over 31 weeks".to_string());
    }
    if let ClassifierPolicy::MixedGroups { groups } = &profile.classifier {
        for g in groups {
            if !profile.group_names.is_empty() && !profile.group_names.contains_key(g) {
                warnings.push(format!("mixed group '{g}' has no display name"));
            }
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
