//! Small builders shared by the engine's unit tests.

use crate::models::{
    CalculationItem, CocktailCalculation, CocktailGarnish, CocktailRecipe, Garnish, Ingredient,
    IngredientVolume, RecipeStep, StepIngredient, UnitRef,
};

pub fn unit(id: &str) -> UnitRef {
    UnitRef::new(id, id)
}

pub fn ingredient(id: &str, price: Option<f64>, volumes: &[(&str, f64)]) -> Ingredient {
    Ingredient {
        id: id.to_string(),
        name: capitalize(id),
        price,
        volumes: volumes
            .iter()
            .map(|(u, v)| IngredientVolume {
                unit: unit(u),
                volume: *v,
            })
            .collect(),
    }
}

/// Gin at 20 per bottle: 70 cl or 1 bottle.
pub fn gin() -> Ingredient {
    ingredient("gin", Some(20.0), &[("cl", 70.0), ("bottle", 1.0)])
}

/// Tonic at 3 per bottle: 100 cl or 1 bottle.
pub fn tonic() -> Ingredient {
    ingredient("tonic", Some(3.0), &[("cl", 100.0), ("bottle", 1.0)])
}

pub fn step_ingredient(ingredient: Ingredient, amount: f64, unit_id: &str) -> StepIngredient {
    StepIngredient {
        ingredient: Some(ingredient),
        amount: Some(amount),
        unit: Some(unit(unit_id)),
    }
}

pub fn cocktail(id: &str, price: Option<f64>, ingredients: Vec<StepIngredient>) -> CocktailRecipe {
    CocktailRecipe {
        id: id.to_string(),
        name: capitalize(id),
        price,
        steps: vec![RecipeStep { ingredients }],
        garnishes: Vec::new(),
    }
}

pub fn with_garnish(mut recipe: CocktailRecipe, id: &str, price: Option<f64>) -> CocktailRecipe {
    recipe.garnishes.push(CocktailGarnish {
        garnish: Garnish {
            id: id.to_string(),
            name: capitalize(id),
            price,
        },
    });
    recipe
}

pub fn calculation(items: Vec<CalculationItem>) -> CocktailCalculation {
    let mut calc = CocktailCalculation::new("Test");
    calc.show_sales_stuff = true;
    calc.items = items;
    calc
}

fn capitalize(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
