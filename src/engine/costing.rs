use serde::Serialize;
use tracing::debug;

use crate::engine::config::{EngineConfig, Warnings};
use crate::engine::conversion::VolumeTable;
use crate::error::Result;
use crate::models::{CalculationItem, CocktailRecipe, DataWarning};

/// Production cost of a single serving.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub ingredients: f64,
    pub garnishes: f64,
}

impl CostBreakdown {
    #[inline]
    pub fn total(&self) -> f64 {
        self.ingredients + self.garnishes
    }
}

/// Monetary figures of one calculation item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemFinancials {
    pub cocktail_id: String,
    pub cocktail_name: String,
    pub planned_amount: u32,
    pub cost_per_cocktail: f64,
    pub price_per_cocktail: f64,
    pub cost: f64,
    pub revenue: f64,
    pub profit: f64,
}

/// Per-item figures plus calculation-wide totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CalculationFinancials {
    pub items: Vec<ItemFinancials>,
    pub total_cost: f64,
    pub total_revenue: f64,
    pub total_profit: f64,
}

/// Cost of one serving of `recipe`.
///
/// Each step ingredient costs `price / volume(step unit) * amount`; each
/// garnish adds its price. Missing prices and conversions contribute 0 and
/// are reported through `warnings` (or rejected, per `config`).
pub fn cocktail_cost(
    recipe: &CocktailRecipe,
    table: &VolumeTable,
    config: &EngineConfig,
    warnings: &mut Warnings,
) -> Result<CostBreakdown> {
    let mut cost = CostBreakdown::default();

    for (step_ingredient, ingredient) in recipe.used_ingredients() {
        let unit_id = step_ingredient.unit.as_ref().map(|u| u.id.as_str());
        let volume = unit_id.and_then(|u| table.resolve(&ingredient.id, u));

        let Some(volume) = volume else {
            warnings.missing_conversion(config, &ingredient.id, &ingredient.name, unit_id)?;
            continue;
        };

        let Some(price) = ingredient.price else {
            warnings.push(DataWarning::MissingPrice {
                item_id: ingredient.id.clone(),
                item_name: ingredient.name.clone(),
            });
            continue;
        };

        cost.ingredients += price / volume * step_ingredient.amount_or_zero();
    }

    for usage in &recipe.garnishes {
        match usage.garnish.price {
            Some(price) => cost.garnishes += price,
            None => warnings.push(DataWarning::MissingPrice {
                item_id: usage.garnish.id.clone(),
                item_name: usage.garnish.name.clone(),
            }),
        }
    }

    Ok(cost)
}

/// Cost, revenue and profit of one item.
pub fn item_financials(
    item: &CalculationItem,
    table: &VolumeTable,
    config: &EngineConfig,
    warnings: &mut Warnings,
) -> Result<ItemFinancials> {
    let per_cocktail = cocktail_cost(&item.cocktail, table, config, warnings)?.total();
    let planned = item.planned_amount as f64;
    let price = item.effective_price();

    let cost = planned * per_cocktail;
    let revenue = planned * price;

    Ok(ItemFinancials {
        cocktail_id: item.cocktail.id.clone(),
        cocktail_name: item.cocktail.name.clone(),
        planned_amount: item.planned_amount,
        cost_per_cocktail: per_cocktail,
        price_per_cocktail: price,
        cost,
        revenue,
        profit: revenue - cost,
    })
}

/// Cost, revenue and profit of every item and of the whole calculation.
pub fn calculation_financials(
    items: &[CalculationItem],
    table: &VolumeTable,
    config: &EngineConfig,
    warnings: &mut Warnings,
) -> Result<CalculationFinancials> {
    let items = items
        .iter()
        .map(|item| item_financials(item, table, config, warnings))
        .collect::<Result<Vec<_>>>()?;

    let total_cost: f64 = items.iter().map(|i| i.cost).sum();
    let total_revenue: f64 = items.iter().map(|i| i.revenue).sum();

    debug!(total_cost, total_revenue, "computed calculation financials");

    Ok(CalculationFinancials {
        items,
        total_cost,
        total_revenue,
        total_profit: total_revenue - total_cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::*;
    use crate::error::BatchError;

    fn gin_tonic() -> CocktailRecipe {
        with_garnish(
            cocktail(
                "gin_tonic",
                Some(9.0),
                vec![
                    step_ingredient(gin(), 4.0, "cl"),
                    step_ingredient(tonic(), 10.0, "cl"),
                ],
            ),
            "lime",
            Some(0.25),
        )
    }

    #[test]
    fn test_cocktail_cost() {
        let recipe = gin_tonic();
        let table = VolumeTable::from_items(&[CalculationItem::new(recipe.clone(), 1)]);
        let mut warnings = Warnings::new();

        let cost = cocktail_cost(&recipe, &table, &EngineConfig::default(), &mut warnings).unwrap();

        // 20/70*4 + 3/100*10
        let expected = 20.0 / 70.0 * 4.0 + 0.3;
        assert!((cost.ingredients - expected).abs() < 1e-9);
        assert!((cost.garnishes - 0.25).abs() < 1e-9);
        assert!((cost.total() - (expected + 0.25)).abs() < 1e-9);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_item_financials_use_custom_price() {
        let mut item = CalculationItem::new(gin_tonic(), 10);
        item.custom_price = Some(8.0);
        let table = VolumeTable::from_items(std::slice::from_ref(&item));
        let mut warnings = Warnings::new();

        let fin = item_financials(&item, &table, &EngineConfig::default(), &mut warnings).unwrap();

        assert!((fin.revenue - 80.0).abs() < 1e-9);
        assert!((fin.cost - fin.cost_per_cocktail * 10.0).abs() < 1e-9);
        assert_eq!(fin.profit, fin.revenue - fin.cost);
    }

    #[test]
    fn test_missing_conversion_warns_and_contributes_zero() {
        let recipe = cocktail(
            "odd",
            Some(5.0),
            vec![step_ingredient(gin(), 2.0, "dash")],
        );
        let table = VolumeTable::from_items(&[CalculationItem::new(recipe.clone(), 1)]);
        let mut warnings = Warnings::new();

        let cost = cocktail_cost(&recipe, &table, &EngineConfig::default(), &mut warnings).unwrap();

        assert_eq!(cost.total(), 0.0);
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            warnings.as_slice()[0],
            DataWarning::MissingConversion { .. }
        ));
    }

    #[test]
    fn test_missing_conversion_rejected_in_strict_mode() {
        let recipe = cocktail("odd", None, vec![step_ingredient(gin(), 2.0, "dash")]);
        let table = VolumeTable::from_items(&[CalculationItem::new(recipe.clone(), 1)]);
        let mut warnings = Warnings::new();

        let err = cocktail_cost(&recipe, &table, &EngineConfig::strict(), &mut warnings).unwrap_err();
        assert!(matches!(err, BatchError::MissingConversion { .. }));
    }

    #[test]
    fn test_missing_price_is_reported() {
        let recipe = with_garnish(
            cocktail(
                "cheap",
                None,
                vec![step_ingredient(ingredient("water", None, &[("cl", 100.0)]), 5.0, "cl")],
            ),
            "straw",
            None,
        );
        let table = VolumeTable::from_items(&[CalculationItem::new(recipe.clone(), 1)]);
        let mut warnings = Warnings::new();

        let cost = cocktail_cost(&recipe, &table, &EngineConfig::default(), &mut warnings).unwrap();
        assert_eq!(cost.total(), 0.0);
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_empty_calculation_has_zero_totals() {
        let mut warnings = Warnings::new();
        let fin = calculation_financials(
            &[],
            &VolumeTable::new(),
            &EngineConfig::default(),
            &mut warnings,
        )
        .unwrap();

        assert!(fin.items.is_empty());
        assert_eq!(fin.total_cost, 0.0);
        assert_eq!(fin.total_revenue, 0.0);
        assert_eq!(fin.total_profit, 0.0);
    }
}
