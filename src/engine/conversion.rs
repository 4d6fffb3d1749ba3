use std::collections::HashMap;

use crate::models::{CalculationItem, Ingredient, UnitRef};

/// Declared volume table of every ingredient, keyed by ingredient id.
///
/// Read-only to the engine. A lookup that misses means "no known
/// conversion", which callers must never treat as zero.
#[derive(Debug, Clone, Default)]
pub struct VolumeTable {
    volumes: HashMap<String, Vec<(UnitRef, f64)>>,
}

impl VolumeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the volume tables embedded in the item snapshots.
    ///
    /// The first snapshot seen for an ingredient wins.
    pub fn from_items(items: &[CalculationItem]) -> Self {
        let mut table = Self::new();
        for item in items {
            for (_, ingredient) in item.cocktail.used_ingredients() {
                if !table.volumes.contains_key(&ingredient.id) {
                    table.insert_ingredient(ingredient);
                }
            }
        }
        table
    }

    /// Replace the declared table of one ingredient.
    pub fn insert_ingredient(&mut self, ingredient: &Ingredient) {
        let rows = ingredient
            .volumes
            .iter()
            .map(|v| (v.unit.clone(), v.volume))
            .collect();
        self.volumes.insert(ingredient.id.clone(), rows);
    }

    /// Declare (or overwrite) a single conversion.
    pub fn insert(&mut self, ingredient_id: &str, unit: UnitRef, volume: f64) {
        let rows = self.volumes.entry(ingredient_id.to_string()).or_default();
        match rows.iter_mut().find(|(u, _)| u.id == unit.id) {
            Some(row) => row.1 = volume,
            None => rows.push((unit, volume)),
        }
    }

    /// Volume of `unit_id` per purchase of the ingredient.
    ///
    /// Zero, negative and non-finite declarations resolve to `None` as
    /// they cannot be divided by.
    pub fn resolve(&self, ingredient_id: &str, unit_id: &str) -> Option<f64> {
        self.volumes
            .get(ingredient_id)?
            .iter()
            .find(|(u, _)| u.id == unit_id)
            .map(|(_, v)| *v)
            .filter(|v| v.is_finite() && *v > 0.0)
    }

    /// Declared units of an ingredient, including unusable ones.
    pub fn units_for(&self, ingredient_id: &str) -> Vec<&UnitRef> {
        self.volumes
            .get(ingredient_id)
            .map(|rows| rows.iter().map(|(u, _)| u).collect())
            .unwrap_or_default()
    }

    /// Look up a declared unit by id.
    pub fn unit(&self, ingredient_id: &str, unit_id: &str) -> Option<&UnitRef> {
        self.volumes
            .get(ingredient_id)?
            .iter()
            .map(|(u, _)| u)
            .find(|u| u.id == unit_id)
    }

    /// The only declared unit, when exactly one exists.
    pub fn sole_unit(&self, ingredient_id: &str) -> Option<&UnitRef> {
        match self.units_for(ingredient_id).as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Express `amount` of `from_unit` as a fraction of one purchase.
    pub fn to_purchase_fraction(
        &self,
        ingredient_id: &str,
        amount: f64,
        from_unit: &str,
    ) -> Option<f64> {
        self.resolve(ingredient_id, from_unit).map(|vol| amount / vol)
    }

    /// Convert `amount` between two declared units of the same ingredient.
    pub fn convert(
        &self,
        ingredient_id: &str,
        amount: f64,
        from_unit: &str,
        to_unit: &str,
    ) -> Option<f64> {
        if from_unit == to_unit {
            return Some(amount);
        }
        let fraction = self.to_purchase_fraction(ingredient_id, amount, from_unit)?;
        let to_vol = self.resolve(ingredient_id, to_unit)?;
        Some(fraction * to_vol)
    }

    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }
}
