use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Cocktail not found: {0}")]
    CocktailNotFound(String),

    #[error("Ingredient not found: {0}")]
    IngredientNotFound(String),

    #[error("No conversion for ingredient '{ingredient}' in unit '{unit}'")]
    MissingConversion { ingredient: String, unit: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Could not replace calculation file: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, BatchError>;
