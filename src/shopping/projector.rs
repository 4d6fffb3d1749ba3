use serde::Serialize;
use tracing::debug;

use crate::engine::aggregation::{aggregate_ingredients, group_by_ingredient};
use crate::engine::config::{EngineConfig, Warnings};
use crate::engine::constants::tolerant_ceil;
use crate::engine::conversion::VolumeTable;
use crate::engine::output_unit::{select_output_unit, OutputUnit, UnitSource};
use crate::engine::recommendation::sum_in_output_units;
use crate::error::Result;
use crate::models::{CocktailCalculation, DataWarning, DemandEntry, UnitRef};

/// Raw demand of an ingredient in one recipe unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawAmount {
    pub unit: Option<UnitRef>,
    pub amount: f64,
}

/// One ingredient on the shopping list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingRow {
    pub ingredient_id: String,
    pub ingredient_name: String,
    pub checked: bool,
    /// Per recipe unit amounts, kept for transparency.
    pub raw_amounts: Vec<RawAmount>,
    pub output_unit: Option<OutputUnit>,
    /// Total demand in the output unit; `None` while unresolved.
    pub total: Option<f64>,
    /// Whole output units to buy.
    pub units_to_buy: Option<u64>,
}

impl ShoppingRow {
    pub fn is_resolved(&self) -> bool {
        self.total.is_some()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ShoppingList {
    pub rows: Vec<ShoppingRow>,
    pub warnings: Vec<DataWarning>,
}

impl ShoppingList {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, ingredient_id: &str) -> Option<&ShoppingRow> {
        self.rows.iter().find(|r| r.ingredient_id == ingredient_id)
    }
}

/// Project aggregated demand into one shopping row per ingredient.
///
/// Output unit order of preference: the user's selection, the single
/// recipe unit when all demand uses one unit, then the configured
/// fallback. Rows whose demand cannot be fully converted stay unresolved.
pub fn project_shopping_list(
    calculation: &CocktailCalculation,
    table: &VolumeTable,
    config: &EngineConfig,
) -> Result<ShoppingList> {
    let mut warnings = Warnings::new();
    let demand = aggregate_ingredients(&calculation.items);

    let rows = group_by_ingredient(&demand)
        .into_iter()
        .map(|group| project_group(calculation, &group, table, config, &mut warnings))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        rows = rows.len(),
        unresolved = rows.iter().filter(|r| !r.is_resolved()).count(),
        "projected shopping list"
    );

    Ok(ShoppingList {
        rows,
        warnings: warnings.into_vec(),
    })
}

fn project_group(
    calculation: &CocktailCalculation,
    group: &[&DemandEntry],
    table: &VolumeTable,
    config: &EngineConfig,
    warnings: &mut Warnings,
) -> Result<ShoppingRow> {
    // group_by_ingredient never yields empty groups
    let first = group[0];
    let ingredient_id = first.ingredient_id.as_str();
    let ingredient_name = first.ingredient_name.as_str();

    let selection = calculation.shopping_unit(ingredient_id);
    let single_recipe_unit = match (group, selection.filter(|s| s.has_unit())) {
        ([only], None) => only.unit.clone().map(|unit| OutputUnit {
            unit,
            source: UnitSource::RecipeUnit,
        }),
        _ => None,
    };
    let output_unit = single_recipe_unit
        .or_else(|| select_output_unit(ingredient_id, selection, table, config));

    let total = match &output_unit {
        None => None,
        Some(out) if out.source == UnitSource::RecipeUnit => Some(first.amount),
        Some(out) => match table.resolve(ingredient_id, &out.unit.id) {
            Some(output_volume) => sum_in_output_units(
                ingredient_id,
                ingredient_name,
                group.iter().map(|e| (e.unit_id(), e.amount)),
                output_volume,
                table,
                config,
                warnings,
            )?,
            None => {
                warnings.missing_conversion(
                    config,
                    ingredient_id,
                    ingredient_name,
                    Some(out.unit.id.as_str()),
                )?;
                None
            }
        },
    };

    Ok(ShoppingRow {
        ingredient_id: ingredient_id.to_string(),
        ingredient_name: ingredient_name.to_string(),
        checked: selection.is_some_and(|s| s.is_checked()),
        raw_amounts: group
            .iter()
            .map(|e| RawAmount {
                unit: e.unit.clone(),
                amount: e.amount,
            })
            .collect(),
        output_unit,
        total,
        units_to_buy: total.map(|t| tolerant_ceil(t).max(0.0) as u64),
    })
}
