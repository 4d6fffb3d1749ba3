use serde::Serialize;

use crate::models::UnitRef;

/// Aggregated demand for one (ingredient, recipe unit) bucket.
///
/// Derived on every recompute, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemandEntry {
    pub ingredient_id: String,
    pub ingredient_name: String,
    /// `None` when the recipe step left the unit empty.
    pub unit: Option<UnitRef>,
    pub amount: f64,
}

impl DemandEntry {
    pub fn unit_id(&self) -> Option<&str> {
        self.unit.as_ref().map(|u| u.id.as_str())
    }
}

/// Aggregated count of a garnish across all planned cocktails.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GarnishDemand {
    pub garnish_id: String,
    pub garnish_name: String,
    pub amount: u64,
}

/// Incomplete input data that degraded a computed figure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DataWarning {
    /// No usable volume declared for the ingredient in this unit.
    MissingConversion {
        ingredient_id: String,
        ingredient_name: String,
        unit_id: String,
    },
    /// Ingredient or garnish has no price; it contributed 0 cost.
    MissingPrice { item_id: String, item_name: String },
}

impl std::fmt::Display for DataWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataWarning::MissingConversion {
                ingredient_name,
                unit_id,
                ..
            } => write!(
                f,
                "no conversion for '{}' in unit '{}'",
                ingredient_name,
                if unit_id.is_empty() { "<none>" } else { unit_id }
            ),
            DataWarning::MissingPrice { item_name, .. } => {
                write!(f, "no price set for '{}'", item_name)
            }
        }
    }
}
