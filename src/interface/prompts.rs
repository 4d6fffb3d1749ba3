use dialoguer::{Confirm, Select};
use strsim::jaro_winkler;

use crate::engine::Recommendation;
use crate::error::Result;

/// Similarity above which a name counts as a fuzzy match.
const FUZZY_THRESHOLD: f64 = 0.7;

/// Candidates similar to `input`, best match first.
pub fn fuzzy_candidates<'a>(input: &str, candidates: &[&'a str]) -> Vec<(&'a str, f64)> {
    let input = input.to_lowercase();
    let mut matches: Vec<(&str, f64)> = candidates
        .iter()
        .map(|c| (*c, jaro_winkler(&c.to_lowercase(), &input)))
        .filter(|(_, score)| *score > FUZZY_THRESHOLD)
        .collect();

    matches.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    matches
}

/// Resolve a user-typed name against known names.
///
/// Exact (case-insensitive) matches win; otherwise the user confirms a
/// single fuzzy match or picks from several.
pub fn resolve_name(kind: &str, input: &str, candidates: &[&str]) -> Result<Option<String>> {
    let input = input.trim();

    if let Some(exact) = candidates
        .iter()
        .find(|c| c.to_lowercase() == input.to_lowercase())
    {
        return Ok(Some(exact.to_string()));
    }

    let matches = fuzzy_candidates(input, candidates);

    match matches.as_slice() {
        [] => {
            println!("No {} matching '{}'", kind, input);
            Ok(None)
        }
        [(only, _)] => {
            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}'?", only))
                .default(true)
                .interact()?;
            Ok(confirm.then(|| only.to_string()))
        }
        _ => {
            let options: Vec<String> = matches
                .iter()
                .take(5)
                .map(|(name, _)| name.to_string())
                .collect();

            let mut selection_options = options.clone();
            selection_options.push("None of these".to_string());

            let selection = Select::new()
                .with_prompt(format!("Which {} did you mean?", kind))
                .items(&selection_options)
                .default(0)
                .interact()?;

            Ok(options.get(selection).cloned())
        }
    }
}

/// Let the user pick one adjustment from the recommendations.
///
/// Returns the planned-amount delta, or `None` for "no change".
pub fn prompt_adjustment(recommendations: &[Recommendation]) -> Result<Option<i64>> {
    let mut deltas = Vec::new();
    let mut options = Vec::new();

    for rec in recommendations {
        if rec.more > 0 {
            deltas.push(rec.more);
            options.push(format!(
                "{}: +{} (use up the open {})",
                rec.ingredient_name, rec.more, rec.output_unit.name
            ));
        }
        if rec.less < 0 {
            deltas.push(rec.less);
            options.push(format!(
                "{}: {} (open one {} less)",
                rec.ingredient_name, rec.less, rec.output_unit.name
            ));
        }
    }

    if options.is_empty() {
        return Ok(None);
    }
    options.push("No change".to_string());

    let selection = Select::new()
        .with_prompt("Apply an adjustment?")
        .items(&options)
        .default(options.len() - 1)
        .interact()?;

    Ok(deltas.get(selection).copied())
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
