use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::Result;
use crate::models::CocktailCalculation;

/// Load a calculation document from a JSON file.
pub fn load_calculation<P: AsRef<Path>>(path: P) -> Result<CocktailCalculation> {
    let content = fs::read_to_string(path.as_ref())?;
    let calculation: CocktailCalculation = serde_json::from_str(&content)?;
    debug!(
        path = %path.as_ref().display(),
        items = calculation.items.len(),
        "loaded calculation"
    );
    Ok(calculation)
}

/// Save a calculation document, replacing the previous file as a whole.
///
/// Unused shopping units are dropped first. The document is written to a
/// temp file next to the target and then persisted over it, so readers see
/// either the old or the new snapshot.
pub fn save_calculation<P: AsRef<Path>>(path: P, calculation: &CocktailCalculation) -> Result<()> {
    let path = path.as_ref();
    let mut snapshot = calculation.clone();
    snapshot.cleanup_shopping_units();

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(serde_json::to_string_pretty(&snapshot)?.as_bytes())?;
    file.flush()?;
    file.persist(path)?;

    debug!(path = %path.display(), items = snapshot.items.len(), "saved calculation");
    Ok(())
}

/// Write the persistence request body for a calculation.
pub fn save_request_json(calculation: &CocktailCalculation) -> Result<String> {
    Ok(serde_json::to_string_pretty(&calculation.to_save_request())?)
}
