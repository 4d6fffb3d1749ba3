use std::collections::HashSet;

use tracing::warn;

use crate::error::{BatchError, Result};
use crate::models::DataWarning;

/// What to do when an ingredient has no usable volume for a needed unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingConversionPolicy {
    /// Contribute nothing and report a [`DataWarning`].
    #[default]
    Warn,
    /// Fail the computation with [`BatchError::MissingConversion`].
    Reject,
}

/// How an output unit is chosen when the user has not selected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitFallback {
    /// Use the ingredient's only declared unit when exactly one exists.
    #[default]
    SoleConversion,
    /// Never pick a unit on the user's behalf.
    Disabled,
}

/// Knobs shared by every engine computation.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineConfig {
    pub missing_conversion: MissingConversionPolicy,
    pub unit_fallback: UnitFallback,
}

impl EngineConfig {
    pub fn strict() -> Self {
        Self {
            missing_conversion: MissingConversionPolicy::Reject,
            ..Default::default()
        }
    }
}

/// Deduplicated collection of data warnings raised during one recompute.
#[derive(Debug, Clone, Default)]
pub struct Warnings {
    seen: HashSet<DataWarning>,
    ordered: Vec<DataWarning>,
}

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: DataWarning) {
        if self.seen.insert(warning.clone()) {
            warn!(%warning, "incomplete calculation data");
            self.ordered.push(warning);
        }
    }

    pub fn extend(&mut self, other: Warnings) {
        for w in other.ordered {
            self.push(w);
        }
    }

    /// Record a missing conversion or fail, depending on the policy.
    pub fn missing_conversion(
        &mut self,
        config: &EngineConfig,
        ingredient_id: &str,
        ingredient_name: &str,
        unit_id: Option<&str>,
    ) -> Result<()> {
        let unit_id = unit_id.unwrap_or_default();
        match config.missing_conversion {
            MissingConversionPolicy::Reject => Err(BatchError::MissingConversion {
                ingredient: ingredient_name.to_string(),
                unit: unit_id.to_string(),
            }),
            MissingConversionPolicy::Warn => {
                self.push(DataWarning::MissingConversion {
                    ingredient_id: ingredient_id.to_string(),
                    ingredient_name: ingredient_name.to_string(),
                    unit_id: unit_id.to_string(),
                });
                Ok(())
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn as_slice(&self) -> &[DataWarning] {
        &self.ordered
    }

    pub fn into_vec(self) -> Vec<DataWarning> {
        self.ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_policy_deduplicates() {
        let config = EngineConfig::default();
        let mut warnings = Warnings::new();

        warnings
            .missing_conversion(&config, "gin", "Gin", Some("dash"))
            .unwrap();
        warnings
            .missing_conversion(&config, "gin", "Gin", Some("dash"))
            .unwrap();
        warnings
            .missing_conversion(&config, "gin", "Gin", None)
            .unwrap();

        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_reject_policy_errors() {
        let config = EngineConfig::strict();
        let mut warnings = Warnings::new();

        let err = warnings
            .missing_conversion(&config, "gin", "Gin", Some("dash"))
            .unwrap_err();
        assert!(matches!(err, BatchError::MissingConversion { .. }));
        assert!(warnings.is_empty());
    }
}
