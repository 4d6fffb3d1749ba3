use std::collections::HashMap;

use tracing::debug;

use crate::models::{CalculationItem, DemandEntry, GarnishDemand};

/// Sum ingredient demand over all items, weighted by planned amount.
///
/// One entry per (ingredient, recipe unit) pair. Entries of the same
/// ingredient in different units are kept apart. Entries come out in
/// first-seen order.
pub fn aggregate_ingredients(items: &[CalculationItem]) -> Vec<DemandEntry> {
    let mut index: HashMap<(String, Option<String>), usize> = HashMap::new();
    let mut entries: Vec<DemandEntry> = Vec::new();

    for item in items {
        let planned = item.planned_amount as f64;
        for (step_ingredient, ingredient) in item.cocktail.used_ingredients() {
            let unit_id = step_ingredient.unit.as_ref().map(|u| u.id.clone());
            let key = (ingredient.id.clone(), unit_id);
            let amount = step_ingredient.amount_or_zero() * planned;

            match index.get(&key) {
                Some(&i) => entries[i].amount += amount,
                None => {
                    index.insert(key, entries.len());
                    entries.push(DemandEntry {
                        ingredient_id: ingredient.id.clone(),
                        ingredient_name: ingredient.name.clone(),
                        unit: step_ingredient.unit.clone(),
                        amount,
                    });
                }
            }
        }
    }

    debug!(items = items.len(), buckets = entries.len(), "aggregated ingredient demand");
    entries
}

/// Count garnish usage over all items, weighted by planned amount.
pub fn aggregate_garnishes(items: &[CalculationItem]) -> Vec<GarnishDemand> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut totals: Vec<GarnishDemand> = Vec::new();

    for item in items {
        for usage in &item.cocktail.garnishes {
            let garnish = &usage.garnish;
            let planned = u64::from(item.planned_amount);

            match index.get(&garnish.id) {
                Some(&i) => totals[i].amount += planned,
                None => {
                    index.insert(garnish.id.clone(), totals.len());
                    totals.push(GarnishDemand {
                        garnish_id: garnish.id.clone(),
                        garnish_name: garnish.name.clone(),
                        amount: planned,
                    });
                }
            }
        }
    }

    totals
}

/// Demand entries grouped by ingredient, preserving first-seen order.
pub fn group_by_ingredient(entries: &[DemandEntry]) -> Vec<Vec<&DemandEntry>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Vec<&DemandEntry>> = Vec::new();

    for entry in entries {
        match index.get(entry.ingredient_id.as_str()) {
            Some(&i) => groups[i].push(entry),
            None => {
                index.insert(entry.ingredient_id.as_str(), groups.len());
                groups.push(vec![entry]);
            }
        }
    }

    groups
}
