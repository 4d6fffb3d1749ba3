use std::io;
use std::path::Path;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bar_batch_calc::cli::{Cli, Command};
use bar_batch_calc::error::{BatchError, Result};
use bar_batch_calc::interface::{
    display_recommendations, display_shopping_list, display_summary, display_warnings,
    prompt_adjustment, prompt_yes_no, resolve_name,
};
use bar_batch_calc::shopping::{
    export_shopping_csv, write_shopping_csv, DefaultUnitLabels, LabelMap, UnitLabels,
};
use bar_batch_calc::state::{
    load_calculation, save_calculation, save_request_json, CalculationManager,
};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let labels: Box<dyn UnitLabels> = match &cli.labels {
        Some(path) => Box::new(LabelMap::load(path)?),
        None => Box::new(DefaultUnitLabels),
    };

    let path = Path::new(&cli.file);
    if !path.exists() {
        eprintln!("Calculation file not found: {}", cli.file);
        return Ok(());
    }

    let calculation = load_calculation(path)?;
    let mut manager = CalculationManager::new(calculation, cli.engine_config());

    match cli.command.unwrap_or_default() {
        Command::Summary => {
            let summary = manager.summary()?;
            display_summary(&manager.calculation().name, &summary, labels.as_ref());
        }
        Command::Shopping => {
            display_shopping_list(&manager.shopping_list()?, labels.as_ref());
        }
        Command::Export { out } => {
            let list = manager.shopping_list()?;
            match out {
                Some(out) => {
                    export_shopping_csv(&list, labels.as_ref(), &out)?;
                    println!("Wrote shopping list to {}", out.display());
                }
                None => write_shopping_csv(&list, labels.as_ref(), io::stdout().lock())?,
            }
        }
        Command::Recommend { cocktail } => {
            cmd_recommend(&mut manager, path, &cocktail, labels.as_ref())?
        }
        Command::SetAmount { cocktail, amount } => {
            let Some(id) = resolve_cocktail(&manager, &cocktail)? else {
                return Ok(());
            };
            let planned = manager.set_planned_amount(&id, amount)?;
            println!("Planned amount set to {}.", planned);
            save(&manager, path)?;
        }
        Command::SelectUnit { ingredient, unit } => {
            let Some(id) = resolve_ingredient(&manager, &ingredient)? else {
                return Ok(());
            };
            let unit_id = resolve_unit(&manager, &id, &unit)?;
            manager.select_shopping_unit(&id, &unit_id)?;
            println!("Shopping unit set.");
            save(&manager, path)?;
        }
        Command::Check {
            ingredient,
            uncheck,
        } => {
            let Some(id) = resolve_ingredient(&manager, &ingredient)? else {
                return Ok(());
            };
            cmd_check(&mut manager, &id, !uncheck)?;
            save(&manager, path)?;
        }
        Command::Cleanup => {
            let removed = manager.cleanup_shopping_units();
            println!("Removed {} unused shopping units.", removed);
            save(&manager, path)?;
        }
        Command::Request => {
            println!("{}", save_request_json(manager.calculation())?);
        }
    }

    Ok(())
}

/// Show recommendations for a cocktail and optionally apply one.
fn cmd_recommend(
    manager: &mut CalculationManager,
    path: &Path,
    cocktail: &str,
    labels: &dyn UnitLabels,
) -> Result<()> {
    let Some(id) = resolve_cocktail(manager, cocktail)? else {
        return Ok(());
    };

    let (recommendations, warnings) = manager.recommendations(&id)?;
    let name = manager
        .calculation()
        .items
        .iter()
        .find(|i| i.cocktail.id == id)
        .map(|i| i.cocktail.name.clone())
        .unwrap_or_else(|| id.clone());

    display_recommendations(&name, &recommendations, labels);
    display_warnings(&warnings);

    let Some(delta) = prompt_adjustment(&recommendations)? else {
        return Ok(());
    };

    let planned = manager.apply_recommendation(&id, delta)?;
    println!("{} planned: {}", name, planned);
    display_shopping_list(&manager.shopping_list()?, labels);

    if prompt_yes_no("Save updated calculation?", true)? {
        save(manager, path)?;
    }
    Ok(())
}

/// Check an ingredient, selecting its resolved output unit first if needed.
fn cmd_check(manager: &mut CalculationManager, ingredient_id: &str, checked: bool) -> Result<()> {
    let has_unit = manager
        .calculation()
        .shopping_unit(ingredient_id)
        .is_some_and(|s| s.has_unit());

    if !has_unit {
        let list = manager.shopping_list()?;
        let unit_id = list
            .row(ingredient_id)
            .and_then(|r| r.output_unit.as_ref())
            .map(|o| o.unit.id.clone())
            .ok_or_else(|| {
                BatchError::InvalidInput(format!(
                    "no unit resolved for '{}', use select-unit first",
                    ingredient_id
                ))
            })?;
        manager.select_shopping_unit(ingredient_id, &unit_id)?;
    }

    manager.set_checked(ingredient_id, checked)?;
    println!("{}", if checked { "Checked." } else { "Unchecked." });
    Ok(())
}

fn resolve_cocktail(manager: &CalculationManager, input: &str) -> Result<Option<String>> {
    if let Some(id) = manager.find_cocktail_id(input) {
        return Ok(Some(id.to_string()));
    }
    let names = manager.cocktail_names();
    Ok(resolve_name("cocktail", input, &names)?
        .and_then(|name| manager.find_cocktail_id(&name).map(str::to_string)))
}

fn resolve_ingredient(manager: &CalculationManager, input: &str) -> Result<Option<String>> {
    if let Some(id) = manager.find_ingredient_id(input) {
        return Ok(Some(id.to_string()));
    }
    let names = manager.ingredient_names();
    Ok(resolve_name("ingredient", input, &names)?
        .and_then(|name| manager.find_ingredient_id(&name).map(str::to_string)))
}

/// Match a unit by id or case-insensitive name among the declared units.
fn resolve_unit(manager: &CalculationManager, ingredient_id: &str, input: &str) -> Result<String> {
    let needle = input.to_lowercase();
    let units = manager.table().units_for(ingredient_id);

    units
        .iter()
        .find(|u| u.id == input || u.name.to_lowercase() == needle)
        .map(|u| u.id.clone())
        .ok_or_else(|| {
            let declared: Vec<&str> = units.iter().map(|u| u.name.as_str()).collect();
            BatchError::InvalidInput(format!(
                "unit '{}' is not declared for this ingredient (declared: {})",
                input,
                declared.join(", ")
            ))
        })
}

fn save(manager: &CalculationManager, path: &Path) -> Result<()> {
    save_calculation(path, manager.calculation())?;
    info!(path = %path.display(), "calculation saved");
    println!("Calculation saved.");
    Ok(())
}
