use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::models::CocktailRecipe;

/// Clamp a user-entered planned amount into the valid range.
///
/// Negative values become 0; values beyond `u32::MAX` saturate.
pub fn clamp_planned_amount(value: i64) -> u32 {
    value.clamp(0, u32::MAX as i64) as u32
}

fn deserialize_planned_amount<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(clamp_planned_amount(raw))
}

/// One cocktail in a calculation together with how many are planned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationItem {
    pub cocktail: CocktailRecipe,

    #[serde(deserialize_with = "deserialize_planned_amount")]
    pub planned_amount: u32,

    /// Overrides the recipe's list price for revenue purposes.
    #[serde(default)]
    pub custom_price: Option<f64>,
}

impl CalculationItem {
    pub fn new(cocktail: CocktailRecipe, planned_amount: u32) -> Self {
        Self {
            cocktail,
            planned_amount,
            custom_price: None,
        }
    }

    /// Price used for revenue: custom price, else list price, else 0.
    #[inline]
    pub fn effective_price(&self) -> f64 {
        self.custom_price.or(self.cocktail.price).unwrap_or(0.0)
    }
}

/// The user's chosen purchase unit for an ingredient on the shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientShoppingUnit {
    pub ingredient_id: String,

    #[serde(default)]
    pub unit_id: String,

    #[serde(default)]
    pub checked: bool,
}

impl IngredientShoppingUnit {
    /// Whether a purchase unit has actually been picked.
    #[inline]
    pub fn has_unit(&self) -> bool {
        !self.unit_id.is_empty()
    }

    /// Checked state, honored only when a unit is selected.
    #[inline]
    pub fn is_checked(&self) -> bool {
        self.checked && self.has_unit()
    }
}

/// A batch calculation document.
///
/// The document is replaced as a whole on every save; item identity is not
/// carried across saves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CocktailCalculation {
    #[serde(default)]
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub workspace_id: String,

    /// Whether monetary figures are computed and shown.
    #[serde(default)]
    pub show_sales_stuff: bool,

    #[serde(rename = "cocktailCalculationItems", default)]
    pub items: Vec<CalculationItem>,

    #[serde(default)]
    pub ingredient_shopping_units: Vec<IngredientShoppingUnit>,
}

impl CocktailCalculation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            workspace_id: String::new(),
            show_sales_stuff: false,
            items: Vec::new(),
            ingredient_shopping_units: Vec::new(),
        }
    }

    /// Shopping unit selection for an ingredient, if any.
    pub fn shopping_unit(&self, ingredient_id: &str) -> Option<&IngredientShoppingUnit> {
        self.ingredient_shopping_units
            .iter()
            .find(|s| s.ingredient_id == ingredient_id)
    }

    /// Ids of all ingredients used by any item's cocktail.
    pub fn used_ingredient_ids(&self) -> HashSet<&str> {
        self.items
            .iter()
            .flat_map(|item| item.cocktail.used_ingredients())
            .map(|(_, ing)| ing.id.as_str())
            .collect()
    }

    /// Drop shopping unit rows whose ingredient is no longer used.
    ///
    /// Returns the number of removed rows.
    pub fn cleanup_shopping_units(&mut self) -> usize {
        let used: HashSet<String> = self
            .used_ingredient_ids()
            .into_iter()
            .map(str::to_string)
            .collect();

        let before = self.ingredient_shopping_units.len();
        self.ingredient_shopping_units
            .retain(|s| used.contains(&s.ingredient_id));
        before - self.ingredient_shopping_units.len()
    }

    /// Build the body persisted on save, after cleanup.
    pub fn to_save_request(&self) -> SaveCalculationRequest {
        let mut cleaned = self.clone();
        cleaned.cleanup_shopping_units();

        SaveCalculationRequest {
            name: cleaned.name,
            show_sales_stuff: cleaned.show_sales_stuff,
            calculation_items: cleaned
                .items
                .iter()
                .map(|item| SavedCalculationItem {
                    cocktail_id: item.cocktail.id.clone(),
                    planned_amount: item.planned_amount,
                    custom_price: item.custom_price,
                })
                .collect(),
            ingredient_shopping_units: cleaned.ingredient_shopping_units,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCalculationItem {
    pub cocktail_id: String,
    pub planned_amount: u32,
    pub custom_price: Option<f64>,
}

/// Full-document save body: replaces all prior items and shopping units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveCalculationRequest {
    pub name: String,
    pub show_sales_stuff: bool,
    pub calculation_items: Vec<SavedCalculationItem>,
    pub ingredient_shopping_units: Vec<IngredientShoppingUnit>,
}
