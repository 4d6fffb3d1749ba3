use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::engine::aggregation::aggregate_ingredients;
use crate::engine::config::{EngineConfig, Warnings};
use crate::engine::constants::{tolerant_ceil, tolerant_floor};
use crate::engine::conversion::VolumeTable;
use crate::engine::output_unit::select_output_unit;
use crate::error::{BatchError, Result};
use crate::models::{clamp_planned_amount, CocktailCalculation, UnitRef};

/// Suggested planned-amount adjustments for one ingredient of a cocktail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub ingredient_id: String,
    pub ingredient_name: String,
    pub output_unit: UnitRef,
    /// Current consumption, in output units.
    pub total_needed_amount: f64,
    /// Whole output units that must be opened.
    pub total_needed_units: f64,
    /// Output units consumed by one serving of the cocktail.
    pub per_cocktail_amount: f64,
    /// Servings that can be added without opening another unit.
    pub more: i64,
    /// Servings to remove (negative) so one fewer unit is opened.
    pub less: i64,
}

/// Apply an adjustment to a planned amount, clamping at 0.
pub fn apply_adjustment(planned_amount: u32, delta: i64) -> u32 {
    clamp_planned_amount(i64::from(planned_amount).saturating_add(delta))
}

/// Recommendations for every ingredient used by `cocktail_id`.
///
/// Ingredients without an output unit, with incomplete conversions, or
/// unused by the cocktail are skipped.
pub fn recommend_for_cocktail(
    calculation: &CocktailCalculation,
    cocktail_id: &str,
    table: &VolumeTable,
    config: &EngineConfig,
    warnings: &mut Warnings,
) -> Result<Vec<Recommendation>> {
    let item = calculation
        .items
        .iter()
        .find(|i| i.cocktail.id == cocktail_id)
        .ok_or_else(|| BatchError::CocktailNotFound(cocktail_id.to_string()))?;

    let demand = aggregate_ingredients(&calculation.items);
    let mut seen: HashSet<&str> = HashSet::new();
    let mut recommendations = Vec::new();

    for (_, ingredient) in item.cocktail.used_ingredients() {
        if !seen.insert(ingredient.id.as_str()) {
            continue;
        }

        let selection = calculation.shopping_unit(&ingredient.id);
        let Some(output) = select_output_unit(&ingredient.id, selection, table, config) else {
            debug!(ingredient = %ingredient.id, "no output unit, skipping recommendation");
            continue;
        };

        let Some(output_volume) = table.resolve(&ingredient.id, &output.unit.id) else {
            warnings.missing_conversion(
                config,
                &ingredient.id,
                &ingredient.name,
                Some(output.unit.id.as_str()),
            )?;
            continue;
        };

        let buckets = demand
            .iter()
            .filter(|e| e.ingredient_id == ingredient.id)
            .map(|e| (e.unit_id(), e.amount));
        let Some(total_needed_amount) = sum_in_output_units(
            &ingredient.id,
            &ingredient.name,
            buckets,
            output_volume,
            table,
            config,
            warnings,
        )?
        else {
            continue;
        };

        let own_usage = item
            .cocktail
            .used_ingredients()
            .filter(|(_, ing)| ing.id == ingredient.id)
            .map(|(si, _)| (si.unit.as_ref().map(|u| u.id.as_str()), si.amount_or_zero()));
        let Some(per_cocktail_amount) = sum_in_output_units(
            &ingredient.id,
            &ingredient.name,
            own_usage,
            output_volume,
            table,
            config,
            warnings,
        )?
        else {
            continue;
        };

        if per_cocktail_amount <= 0.0 {
            continue;
        }

        let total_needed_units = tolerant_ceil(total_needed_amount);
        let more = tolerant_floor((total_needed_units - total_needed_amount) / per_cocktail_amount);
        let less =
            tolerant_ceil((total_needed_units - 1.0 - total_needed_amount) / per_cocktail_amount);

        recommendations.push(Recommendation {
            ingredient_id: ingredient.id.clone(),
            ingredient_name: ingredient.name.clone(),
            output_unit: output.unit,
            total_needed_amount,
            total_needed_units,
            per_cocktail_amount,
            more: more as i64,
            less: less as i64,
        });
    }

    Ok(recommendations)
}

/// Sum `(unit, amount)` pairs of one ingredient in output units.
///
/// `None` when any pair cannot be converted.
pub(crate) fn sum_in_output_units<'a>(
    ingredient_id: &str,
    ingredient_name: &str,
    amounts: impl Iterator<Item = (Option<&'a str>, f64)>,
    output_volume: f64,
    table: &VolumeTable,
    config: &EngineConfig,
    warnings: &mut Warnings,
) -> Result<Option<f64>> {
    let mut total = 0.0;
    for (unit_id, amount) in amounts {
        match unit_id.and_then(|u| table.to_purchase_fraction(ingredient_id, amount, u)) {
            Some(fraction) => total += fraction * output_volume,
            None => {
                warnings.missing_conversion(config, ingredient_id, ingredient_name, unit_id)?;
                return Ok(None);
            }
        }
    }
    Ok(Some(total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::*;
    use crate::models::{CalculationItem, IngredientShoppingUnit};

    fn select(calc: &mut CocktailCalculation, ingredient_id: &str, unit_id: &str) {
        calc.ingredient_shopping_units.push(IngredientShoppingUnit {
            ingredient_id: ingredient_id.to_string(),
            unit_id: unit_id.to_string(),
            checked: false,
        });
    }

    fn gin_only(planned: u32) -> CocktailCalculation {
        let a = cocktail("a", Some(8.0), vec![step_ingredient(gin(), 4.0, "cl")]);
        let mut calc = calculation(vec![CalculationItem::new(a, planned)]);
        select(&mut calc, "gin", "bottle");
        calc
    }

    #[test]
    fn test_gin_bottle_example() {
        let calc = gin_only(10);
        let table = VolumeTable::from_items(&calc.items);
        let mut warnings = Warnings::new();

        let recs =
            recommend_for_cocktail(&calc, "a", &table, &EngineConfig::default(), &mut warnings)
                .unwrap();

        assert_eq!(recs.len(), 1);
        let rec = &recs[0];
        assert!((rec.total_needed_amount - 40.0 / 70.0).abs() < 1e-9);
        assert_eq!(rec.total_needed_units, 1.0);
        assert!((rec.per_cocktail_amount - 4.0 / 70.0).abs() < 1e-9);
        assert_eq!(rec.more, 7);
        assert_eq!(rec.less, -10);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_exact_multiple_is_not_off_by_one() {
        // 35 servings * 4 cl = 140 cl = exactly 2 bottles
        let calc = gin_only(35);
        let table = VolumeTable::from_items(&calc.items);
        let mut warnings = Warnings::new();

        let recs =
            recommend_for_cocktail(&calc, "a", &table, &EngineConfig::default(), &mut warnings)
                .unwrap();

        assert_eq!(recs[0].total_needed_units, 2.0);
        assert_eq!(recs[0].more, 0);
        assert_eq!(recs[0].less, -17);
    }

    #[test]
    fn test_ingredient_without_output_unit_is_skipped() {
        let a = cocktail("a", None, vec![step_ingredient(gin(), 4.0, "cl")]);
        let calc = calculation(vec![CalculationItem::new(a, 10)]);
        let table = VolumeTable::from_items(&calc.items);
        let mut warnings = Warnings::new();

        let recs =
            recommend_for_cocktail(&calc, "a", &table, &EngineConfig::default(), &mut warnings)
                .unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn test_zero_usage_is_skipped_not_divided() {
        let a = cocktail("a", None, vec![step_ingredient(gin(), 0.0, "cl")]);
        let mut calc = calculation(vec![CalculationItem::new(a, 10)]);
        select(&mut calc, "gin", "bottle");
        let table = VolumeTable::from_items(&calc.items);
        let mut warnings = Warnings::new();

        let recs =
            recommend_for_cocktail(&calc, "a", &table, &EngineConfig::default(), &mut warnings)
                .unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn test_missing_bucket_conversion_skips_with_warning() {
        let a = cocktail(
            "a",
            None,
            vec![
                step_ingredient(gin(), 4.0, "cl"),
                step_ingredient(gin(), 1.0, "dash"),
            ],
        );
        let mut calc = calculation(vec![CalculationItem::new(a, 10)]);
        select(&mut calc, "gin", "bottle");
        let table = VolumeTable::from_items(&calc.items);
        let mut warnings = Warnings::new();

        let recs =
            recommend_for_cocktail(&calc, "a", &table, &EngineConfig::default(), &mut warnings)
                .unwrap();
        assert!(recs.is_empty());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_unknown_cocktail() {
        let calc = gin_only(1);
        let table = VolumeTable::from_items(&calc.items);
        let err = recommend_for_cocktail(
            &calc,
            "nope",
            &table,
            &EngineConfig::default(),
            &mut Warnings::new(),
        )
        .unwrap_err();
        assert!(matches!(err, BatchError::CocktailNotFound(_)));
    }

    #[test]
    fn test_apply_adjustment_clamps() {
        assert_eq!(apply_adjustment(10, 7), 17);
        assert_eq!(apply_adjustment(10, -10), 0);
        assert_eq!(apply_adjustment(3, -10), 0);
    }
}
