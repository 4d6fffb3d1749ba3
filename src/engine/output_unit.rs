use serde::Serialize;

use crate::engine::config::{EngineConfig, UnitFallback};
use crate::engine::conversion::VolumeTable;
use crate::models::{IngredientShoppingUnit, UnitRef};

/// Why a unit was chosen as an ingredient's output unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UnitSource {
    /// Picked by the user on the shopping list.
    Selected,
    /// The ingredient declares exactly one conversion.
    SoleConversion,
    /// All demand is in a single recipe unit; no conversion needed.
    RecipeUnit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputUnit {
    pub unit: UnitRef,
    pub source: UnitSource,
}

/// Resolve the purchase unit of an ingredient.
///
/// An explicit selection always wins. Otherwise the sole declared
/// conversion is used when `config.unit_fallback` allows it.
pub fn select_output_unit(
    ingredient_id: &str,
    selection: Option<&IngredientShoppingUnit>,
    table: &VolumeTable,
    config: &EngineConfig,
) -> Option<OutputUnit> {
    if let Some(selected) = selection.filter(|s| s.has_unit()) {
        let unit = table
            .unit(ingredient_id, &selected.unit_id)
            .cloned()
            .unwrap_or_else(|| UnitRef::new(&selected.unit_id, &selected.unit_id));
        return Some(OutputUnit {
            unit,
            source: UnitSource::Selected,
        });
    }

    match config.unit_fallback {
        UnitFallback::SoleConversion => table.sole_unit(ingredient_id).map(|unit| OutputUnit {
            unit: unit.clone(),
            source: UnitSource::SoleConversion,
        }),
        UnitFallback::Disabled => None,
    }
}
