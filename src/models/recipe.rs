use serde::{Deserialize, Serialize};

/// A unit as referenced by recipes and volume tables ("cl", "Bottle", ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitRef {
    pub id: String,
    pub name: String,
}

impl UnitRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One row of an ingredient's volume table.
///
/// The ingredient's price buys `volume` of `unit`, so Gin at 20 with
/// `cl = 70` and `Bottle = 1` costs 20/70 per cl.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientVolume {
    pub unit: UnitRef,
    pub volume: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub price: Option<f64>,

    #[serde(default)]
    pub volumes: Vec<IngredientVolume>,
}

/// An ingredient used in a recipe step.
///
/// Rows without an ingredient reference are placeholders left by the recipe
/// editor and are ignored by every calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepIngredient {
    #[serde(default)]
    pub ingredient: Option<Ingredient>,

    #[serde(default)]
    pub amount: Option<f64>,

    #[serde(default)]
    pub unit: Option<UnitRef>,
}

impl StepIngredient {
    /// Amount per serving, 0 when unset.
    #[inline]
    pub fn amount_or_zero(&self) -> f64 {
        self.amount.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStep {
    #[serde(default)]
    pub ingredients: Vec<StepIngredient>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Garnish {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CocktailGarnish {
    pub garnish: Garnish,
}

/// Snapshot of a cocktail recipe as handed to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CocktailRecipe {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub price: Option<f64>,

    #[serde(default)]
    pub steps: Vec<RecipeStep>,

    #[serde(default)]
    pub garnishes: Vec<CocktailGarnish>,
}

impl CocktailRecipe {
    /// All step ingredients that reference an actual ingredient.
    pub fn used_ingredients(&self) -> impl Iterator<Item = (&StepIngredient, &Ingredient)> {
        self.steps
            .iter()
            .flat_map(|step| step.ingredients.iter())
            .filter_map(|si| si.ingredient.as_ref().map(|ing| (si, ing)))
    }

    /// Whether any step uses the given ingredient.
    pub fn uses_ingredient(&self, ingredient_id: &str) -> bool {
        self.used_ingredients()
            .any(|(_, ing)| ing.id == ingredient_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_used_ingredients_skips_placeholders() {
        let json = r#"{
            "id": "c1",
            "name": "Gin Tonic",
            "price": 9.5,
            "steps": [
                {"ingredients": [
                    {"ingredient": {"id": "gin", "name": "Gin"}, "amount": 4, "unit": {"id": "cl", "name": "cl"}},
                    {"ingredient": null, "amount": 2, "unit": null}
                ]},
                {"ingredients": [
                    {"ingredient": {"id": "tonic", "name": "Tonic"}, "amount": 12, "unit": {"id": "cl", "name": "cl"}}
                ]}
            ]
        }"#;

        let recipe: CocktailRecipe = serde_json::from_str(json).unwrap();
        let ids: Vec<&str> = recipe
            .used_ingredients()
            .map(|(_, ing)| ing.id.as_str())
            .collect();

        assert_eq!(ids, vec!["gin", "tonic"]);
        assert!(recipe.uses_ingredient("tonic"));
        assert!(!recipe.uses_ingredient("lime"));
        assert!(recipe.garnishes.is_empty());
    }

    #[test]
    fn test_amount_or_zero() {
        let si = StepIngredient {
            ingredient: None,
            amount: None,
            unit: None,
        };
        assert_eq!(si.amount_or_zero(), 0.0);
    }
}
