use serde::Serialize;
use tracing::debug;

use crate::engine::aggregation::{aggregate_garnishes, aggregate_ingredients};
use crate::engine::config::{EngineConfig, Warnings};
use crate::engine::conversion::VolumeTable;
use crate::engine::costing::{calculation_financials, CalculationFinancials};
use crate::error::Result;
use crate::models::{CocktailCalculation, DataWarning, DemandEntry, GarnishDemand};

/// Everything derived from a calculation snapshot in one recompute.
#[derive(Debug, Clone, Serialize)]
pub struct CalculationSummary {
    pub ingredients: Vec<DemandEntry>,
    pub garnishes: Vec<GarnishDemand>,
    /// Present only when the calculation shows sales figures.
    pub financials: Option<CalculationFinancials>,
    pub warnings: Vec<DataWarning>,
}

/// Recompute all aggregates of a calculation from scratch.
pub fn summarize(
    calculation: &CocktailCalculation,
    table: &VolumeTable,
    config: &EngineConfig,
) -> Result<CalculationSummary> {
    let mut warnings = Warnings::new();

    let ingredients = aggregate_ingredients(&calculation.items);
    let garnishes = aggregate_garnishes(&calculation.items);

    let financials = if calculation.show_sales_stuff {
        Some(calculation_financials(
            &calculation.items,
            table,
            config,
            &mut warnings,
        )?)
    } else {
        None
    };

    debug!(
        calculation = %calculation.name,
        warnings = warnings.len(),
        "recomputed calculation summary"
    );

    Ok(CalculationSummary {
        ingredients,
        garnishes,
        financials,
        warnings: warnings.into_vec(),
    })
}
