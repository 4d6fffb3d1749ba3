use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::Result;
use crate::models::UnitRef;

/// Translates unit names for display and export.
pub trait UnitLabels {
    fn label(&self, unit: &UnitRef) -> String;
}

/// German labels for common bar units, keyed by lowercase unit name.
pub static GERMAN_UNIT_LABELS: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        let mut m = HashMap::new();
        m.insert("bottle", "Flasche");
        m.insert("can", "Dose");
        m.insert("piece", "Stück");
        m.insert("slice", "Scheibe");
        m.insert("leaf", "Blatt");
        m.insert("dash", "Spritzer");
        m.insert("splash", "Schuss");
        m.insert("pinch", "Prise");
        m.insert("barspoon", "Barlöffel");
        m.insert("teaspoon", "Teelöffel");
        m.insert("tablespoon", "Esslöffel");
        m.insert("package", "Packung");
        m.insert("gram", "Gramm");
        m.insert("liter", "Liter");
        m
    });

/// Built-in labels; unknown units keep their own name.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultUnitLabels;

impl UnitLabels for DefaultUnitLabels {
    fn label(&self, unit: &UnitRef) -> String {
        GERMAN_UNIT_LABELS
            .get(unit.name.to_lowercase().as_str())
            .map(|l| l.to_string())
            .unwrap_or_else(|| unit.name.clone())
    }
}

/// User-supplied labels layered over [`DefaultUnitLabels`].
///
/// Keys match either the unit id or its name.
#[derive(Debug, Clone, Default)]
pub struct LabelMap {
    labels: HashMap<String, String>,
}

impl LabelMap {
    pub fn new(labels: HashMap<String, String>) -> Self {
        Self { labels }
    }

    /// Load a flat JSON object of `unit -> label`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let labels: HashMap<String, String> = serde_json::from_str(&content)?;
        Ok(Self::new(labels))
    }
}

impl UnitLabels for LabelMap {
    fn label(&self, unit: &UnitRef) -> String {
        self.labels
            .get(&unit.id)
            .or_else(|| self.labels.get(&unit.name))
            .cloned()
            .unwrap_or_else(|| DefaultUnitLabels.label(unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_labels() {
        assert_eq!(DefaultUnitLabels.label(&UnitRef::new("u1", "Bottle")), "Flasche");
        assert_eq!(DefaultUnitLabels.label(&UnitRef::new("u2", "cl")), "cl");
    }

    #[test]
    fn test_label_map_overrides_and_falls_back() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"u1": "Pulle", "cl": "Zentiliter"}"#).unwrap();

        let labels = LabelMap::load(file.path()).unwrap();
        assert_eq!(labels.label(&UnitRef::new("u1", "Bottle")), "Pulle");
        assert_eq!(labels.label(&UnitRef::new("u9", "cl")), "Zentiliter");
        assert_eq!(labels.label(&UnitRef::new("u3", "Piece")), "Stück");
    }
}
