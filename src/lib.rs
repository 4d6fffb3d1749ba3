pub mod cli;
pub mod engine;
pub mod error;
pub mod interface;
pub mod models;
pub mod shopping;
pub mod state;

pub use error::{BatchError, Result};
pub use models::{CalculationItem, CocktailCalculation, CocktailRecipe};
