use fqi_core::error::FqiError;
use fqi_core::profiles::builtin;
use fqi_core::profiles::schema::ThresholdProfile;
use fqi_core::score::fqi::GAS_WARNING_RATIO;
use fqi_core::score::mold::MOLD_RULES;
use fqi_core::score::shelf_life::{category_bonus, decay_rate};
use rust_decimal::Decimal;
use std::path::Path;

pub fn list(profiles_file: Option<&Path>) -> Result<(), FqiError> {
    let catalog = super::catalog(profiles_file)?;

    println!("{} (v{})\n", catalog.name, catalog.version);
    let max_name = catalog
        .profiles
        .iter()
        .map(|p| p.name.len())
        .max()
        .unwrap_or(10);

    for profile in &catalog.profiles {
        println!(
            "  {:<width$}  gas {:>6}  temp {:>4} °C",
            profile.name,
            profile.gas_critical,
            profile.temp_critical,
            width = max_name
        );
        if let Some(ref note) = profile.note {
            println!("  {:<width$}  {}", "", note, width = max_name);
        }
    }
    println!();
    Ok(())
}

pub fn explain(name: &str, profiles_file: Option<&Path>) -> Result<(), FqiError> {
    let catalog = super::catalog(profiles_file)?;
    let profile = builtin::lookup(&catalog, name)?;

    println!("{}\n", profile.name);
    if let Some(ref note) = profile.note {
        println!("{}\n", note);
    }

    let warning = (profile.gas_critical * GAS_WARNING_RATIO).normalize();
    println!("Gas:");
    println!("  >= {:<8} spoiled by gas (FQI 0)", profile.gas_critical);
    println!("  >= {:<8} starting to spoil (FQI 55)", warning);
    println!();

    println!("Temperature:");
    println!("  >= {:<8} heat damaged (FQI 52)", profile.temp_critical);
    println!();

    let categories = profile.categories();
    if categories.is_empty() {
        println!("Recognized categories: none");
    } else {
        let names: Vec<String> = categories
            .iter()
            .map(|c| format!("{} ({})", c, c.description()))
            .collect();
        println!("Recognized categories: {}", names.join(", "));
    }

    let rules: Vec<_> = MOLD_RULES
        .iter()
        .filter(|rule| rule.category.in_name(&profile.name))
        .collect();
    if rules.is_empty() {
        println!("Mold check: none, color readings are ignored");
    } else {
        println!("Mold check:");
        for rule in rules {
            println!("  {:<8} {}", rule.category, rule.describes);
        }
    }
    println!();

    print_decay(&profile);
    Ok(())
}

fn print_decay(profile: &ThresholdProfile) {
    let bonus = match category_bonus(&profile.name) {
        Some((category, points)) => format!(" (includes +{points} for {category})"),
        None => String::new(),
    };
    let cool = profile.temp_critical.saturating_sub(Decimal::TEN);
    let warm = profile.temp_critical.saturating_sub(Decimal::ONE);

    println!("Decay rate, FQI points per hour{bonus}:");
    println!("  at {:>5} °C  {}", cool, decay_rate(cool, profile));
    println!("  at {:>5} °C  {}", warm, decay_rate(warm, profile));
    println!(
        "  at {:>5} °C  {}",
        profile.temp_critical,
        decay_rate(profile.temp_critical, profile)
    );
    println!();
}

pub fn validate(file: &Path) -> Result<(), FqiError> {
    let catalog = fqi_core::profiles::load_catalog(file)?;

    println!(
        "Catalog '{}' (v{}) is valid.",
        catalog.name, catalog.version
    );
    println!("  Profiles: {}", catalog.profiles.len());

    let mut warnings = Vec::new();
    for profile in &catalog.profiles {
        if profile.categories().is_empty() {
            warnings.push(format!(
                "profile '{}' matches no food category: no mold check, no decay bonus",
                profile.name
            ));
            continue;
        }
        // the mold check only sees capitalized markers
        for category in profile.categories() {
            let has_rule = MOLD_RULES.iter().any(|r| r.category == category);
            if has_rule && !category.in_name(&profile.name) {
                warnings.push(format!(
                    "profile '{}' mentions {} in lowercase; write '{}' to enable its mold check",
                    profile.name,
                    category.keyword(),
                    category.marker()
                ));
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
