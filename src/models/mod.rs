mod calculation;
mod demand;
mod recipe;

pub use calculation::{
    clamp_planned_amount, CalculationItem, CocktailCalculation, IngredientShoppingUnit,
    SaveCalculationRequest, SavedCalculationItem,
};
pub use demand::{DataWarning, DemandEntry, GarnishDemand};
pub use recipe::{
    CocktailGarnish, CocktailRecipe, Garnish, Ingredient, IngredientVolume, RecipeStep,
    StepIngredient, UnitRef,
};
