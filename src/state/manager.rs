use tracing::info;

use crate::engine::{
    apply_adjustment, recommend_for_cocktail, summarize, CalculationSummary, EngineConfig,
    Recommendation, VolumeTable, Warnings,
};
use crate::error::{BatchError, Result};
use crate::models::{
    clamp_planned_amount, CalculationItem, CocktailCalculation, DataWarning,
    IngredientShoppingUnit, SaveCalculationRequest,
};
use crate::shopping::{project_shopping_list, ShoppingList};

/// Single-session editor over a calculation document.
///
/// Every mutation leaves derived figures stale; callers recompute through
/// [`summary`](Self::summary), [`shopping_list`](Self::shopping_list) or
/// [`recommendations`](Self::recommendations).
pub struct CalculationManager {
    calculation: CocktailCalculation,
    table: VolumeTable,
    config: EngineConfig,
}

impl CalculationManager {
    /// Wrap a calculation, taking the volume tables from its snapshots.
    pub fn new(calculation: CocktailCalculation, config: EngineConfig) -> Self {
        let table = VolumeTable::from_items(&calculation.items);
        Self::with_table(calculation, table, config)
    }

    /// Wrap a calculation with an externally supplied volume table.
    pub fn with_table(
        calculation: CocktailCalculation,
        table: VolumeTable,
        config: EngineConfig,
    ) -> Self {
        Self {
            calculation,
            table,
            config,
        }
    }

    pub fn calculation(&self) -> &CocktailCalculation {
        &self.calculation
    }

    pub fn into_calculation(self) -> CocktailCalculation {
        self.calculation
    }

    pub fn table(&self) -> &VolumeTable {
        &self.table
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Find a cocktail id by id or case-insensitive name.
    pub fn find_cocktail_id(&self, name_or_id: &str) -> Option<&str> {
        let needle = name_or_id.to_lowercase();
        self.calculation
            .items
            .iter()
            .map(|i| &i.cocktail)
            .find(|c| c.id == name_or_id || c.name.to_lowercase() == needle)
            .map(|c| c.id.as_str())
    }

    /// Find an ingredient id by id or case-insensitive name.
    pub fn find_ingredient_id(&self, name_or_id: &str) -> Option<&str> {
        let needle = name_or_id.to_lowercase();
        self.calculation
            .items
            .iter()
            .flat_map(|i| i.cocktail.used_ingredients())
            .map(|(_, ing)| ing)
            .find(|ing| ing.id == name_or_id || ing.name.to_lowercase() == needle)
            .map(|ing| ing.id.as_str())
    }

    /// Names of all cocktails in the calculation.
    pub fn cocktail_names(&self) -> Vec<&str> {
        self.calculation
            .items
            .iter()
            .map(|i| i.cocktail.name.as_str())
            .collect()
    }

    /// Names of all ingredients used, deduplicated.
    pub fn ingredient_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for (_, ing) in self
            .calculation
            .items
            .iter()
            .flat_map(|i| i.cocktail.used_ingredients())
        {
            if !names.contains(&ing.name.as_str()) {
                names.push(ing.name.as_str());
            }
        }
        names
    }

    fn item_mut(&mut self, cocktail_id: &str) -> Result<&mut CalculationItem> {
        self.calculation
            .items
            .iter_mut()
            .find(|i| i.cocktail.id == cocktail_id)
            .ok_or_else(|| BatchError::CocktailNotFound(cocktail_id.to_string()))
    }

    /// Set a planned amount; negative input is clamped to 0.
    pub fn set_planned_amount(&mut self, cocktail_id: &str, amount: i64) -> Result<u32> {
        let item = self.item_mut(cocktail_id)?;
        item.planned_amount = clamp_planned_amount(amount);
        Ok(item.planned_amount)
    }

    pub fn set_custom_price(&mut self, cocktail_id: &str, price: Option<f64>) -> Result<()> {
        if let Some(p) = price {
            if !p.is_finite() || p < 0.0 {
                return Err(BatchError::InvalidInput(format!(
                    "custom price must be a non-negative number, got {}",
                    p
                )));
            }
        }
        self.item_mut(cocktail_id)?.custom_price = price;
        Ok(())
    }

    /// Apply a `more`/`less` adjustment to a cocktail's planned amount.
    pub fn apply_recommendation(&mut self, cocktail_id: &str, delta: i64) -> Result<u32> {
        let item = self.item_mut(cocktail_id)?;
        let before = item.planned_amount;
        item.planned_amount = apply_adjustment(before, delta);
        info!(
            cocktail = cocktail_id,
            before,
            after = item.planned_amount,
            "applied recommendation"
        );
        Ok(item.planned_amount)
    }

    /// Choose the purchase unit of an ingredient on the shopping list.
    ///
    /// The unit must be declared for the ingredient.
    pub fn select_shopping_unit(&mut self, ingredient_id: &str, unit_id: &str) -> Result<()> {
        if !self.calculation.used_ingredient_ids().contains(ingredient_id) {
            return Err(BatchError::IngredientNotFound(ingredient_id.to_string()));
        }
        if self.table.unit(ingredient_id, unit_id).is_none() {
            return Err(BatchError::InvalidInput(format!(
                "unit '{}' is not declared for ingredient '{}'",
                unit_id, ingredient_id
            )));
        }

        let units = &mut self.calculation.ingredient_shopping_units;
        match units.iter_mut().find(|s| s.ingredient_id == ingredient_id) {
            Some(existing) => existing.unit_id = unit_id.to_string(),
            None => units.push(IngredientShoppingUnit {
                ingredient_id: ingredient_id.to_string(),
                unit_id: unit_id.to_string(),
                checked: false,
            }),
        }
        Ok(())
    }

    /// Mark an ingredient as handled; requires a selected unit.
    pub fn set_checked(&mut self, ingredient_id: &str, checked: bool) -> Result<()> {
        let selection = self
            .calculation
            .ingredient_shopping_units
            .iter_mut()
            .find(|s| s.ingredient_id == ingredient_id && s.has_unit())
            .ok_or_else(|| {
                BatchError::InvalidInput(format!(
                    "select a unit for '{}' before checking it",
                    ingredient_id
                ))
            })?;
        selection.checked = checked;
        Ok(())
    }

    /// Drop shopping units of ingredients no longer used.
    pub fn cleanup_shopping_units(&mut self) -> usize {
        self.calculation.cleanup_shopping_units()
    }

    pub fn summary(&self) -> Result<CalculationSummary> {
        summarize(&self.calculation, &self.table, &self.config)
    }

    pub fn shopping_list(&self) -> Result<ShoppingList> {
        project_shopping_list(&self.calculation, &self.table, &self.config)
    }

    pub fn recommendations(
        &self,
        cocktail_id: &str,
    ) -> Result<(Vec<Recommendation>, Vec<DataWarning>)> {
        let mut warnings = Warnings::new();
        let recs = recommend_for_cocktail(
            &self.calculation,
            cocktail_id,
            &self.table,
            &self.config,
            &mut warnings,
        )?;
        Ok((recs, warnings.into_vec()))
    }

    pub fn to_save_request(&self) -> SaveCalculationRequest {
        self.calculation.to_save_request()
    }
}
