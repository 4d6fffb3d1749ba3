use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::engine::{EngineConfig, MissingConversionPolicy, UnitFallback};

/// BarBatchCalc: plan cocktail batches, costs and shopping lists for an event.
#[derive(Parser, Debug)]
#[command(name = "bar_batch_calc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the calculation JSON file.
    #[arg(short, long, global = true, default_value = "calculation.json")]
    pub file: String,

    /// Fail instead of warning when a unit conversion is missing.
    #[arg(long, global = true)]
    pub strict: bool,

    /// Never pick an ingredient's only declared unit automatically.
    #[arg(long, global = true)]
    pub no_unit_fallback: bool,

    /// JSON file mapping unit ids or names to display labels.
    #[arg(long, global = true)]
    pub labels: Option<PathBuf>,

    /// Log engine details to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            missing_conversion: if self.strict {
                MissingConversionPolicy::Reject
            } else {
                MissingConversionPolicy::Warn
            },
            unit_fallback: if self.no_unit_fallback {
                UnitFallback::Disabled
            } else {
                UnitFallback::SoleConversion
            },
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show ingredient and garnish demand plus sales figures.
    Summary,

    /// Show the shopping list.
    Shopping,

    /// Export the shopping list as CSV.
    Export {
        /// Output file; stdout when omitted.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Suggest planned-amount changes that avoid opening another bottle.
    Recommend {
        /// Cocktail name or id.
        cocktail: String,
    },

    /// Set how many of a cocktail are planned.
    SetAmount {
        /// Cocktail name or id.
        cocktail: String,

        /// Planned amount; negative values are clamped to 0.
        #[arg(allow_hyphen_values = true)]
        amount: i64,
    },

    /// Choose the purchase unit of an ingredient.
    SelectUnit {
        /// Ingredient name or id.
        ingredient: String,

        /// Unit name or id, as declared for the ingredient.
        unit: String,
    },

    /// Mark an ingredient on the shopping list as handled.
    Check {
        /// Ingredient name or id.
        ingredient: String,

        /// Clear the mark instead.
        #[arg(long)]
        uncheck: bool,
    },

    /// Drop shopping units of ingredients no longer used.
    Cleanup,

    /// Print the save request body for the persistence layer.
    Request,
}

impl Default for Command {
    fn default() -> Self {
        Command::Summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_map_to_engine_config() {
        let cli = Cli::parse_from(["bar_batch_calc", "--strict", "--no-unit-fallback", "summary"]);
        let config = cli.engine_config();
        assert_eq!(config.missing_conversion, MissingConversionPolicy::Reject);
        assert_eq!(config.unit_fallback, UnitFallback::Disabled);

        let cli = Cli::parse_from(["bar_batch_calc"]);
        let config = cli.engine_config();
        assert_eq!(config.missing_conversion, MissingConversionPolicy::Warn);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_negative_amount_parses() {
        let cli = Cli::parse_from(["bar_batch_calc", "set-amount", "Mojito", "-3"]);
        match cli.command {
            Some(Command::SetAmount { cocktail, amount }) => {
                assert_eq!(cocktail, "Mojito");
                assert_eq!(amount, -3);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
