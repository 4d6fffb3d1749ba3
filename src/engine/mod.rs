pub mod aggregation;
pub mod config;
pub mod constants;
pub mod conversion;
pub mod costing;
pub mod output_unit;
pub mod recommendation;
pub mod summary;

#[cfg(test)]
pub(crate) mod fixtures;

pub use aggregation::{aggregate_garnishes, aggregate_ingredients, group_by_ingredient};
pub use config::{EngineConfig, MissingConversionPolicy, UnitFallback, Warnings};
pub use constants::*;
pub use conversion::VolumeTable;
pub use costing::{
    calculation_financials, cocktail_cost, item_financials, CalculationFinancials, CostBreakdown,
    ItemFinancials,
};
pub use output_unit::{select_output_unit, OutputUnit, UnitSource};
pub use recommendation::{apply_adjustment, recommend_for_cocktail, Recommendation};
pub use summary::{summarize, CalculationSummary};
