mod manager;
mod persistence;

pub use manager::CalculationManager;
pub use persistence::{load_calculation, save_calculation, save_request_json};
