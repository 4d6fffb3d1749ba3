use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::engine::constants::{CSV_AMOUNT_DECIMALS, CSV_HEADER};
use crate::error::Result;
use crate::shopping::labels::UnitLabels;
use crate::shopping::projector::ShoppingList;

/// A parsed row of the shopping list export.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CsvShoppingRow {
    #[serde(rename = "Markiert")]
    pub checked: bool,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Geplante Menge")]
    pub planned_amount: f64,

    #[serde(rename = "Einheit")]
    pub unit: String,
}

/// Write the shopping list as CSV.
///
/// Resolved rows export their total in the output unit. Unresolved rows
/// export one line per recipe unit so no demand is dropped.
pub fn write_shopping_csv<W: io::Write>(
    list: &ShoppingList,
    labels: &dyn UnitLabels,
    writer: W,
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;

    for row in &list.rows {
        match (&row.output_unit, row.total) {
            (Some(out), Some(total)) => {
                wtr.write_record([
                    row.checked.to_string(),
                    row.ingredient_name.clone(),
                    format_amount(total),
                    labels.label(&out.unit),
                ])?;
            }
            _ => {
                for raw in &row.raw_amounts {
                    wtr.write_record([
                        row.checked.to_string(),
                        row.ingredient_name.clone(),
                        format_amount(raw.amount),
                        raw.unit.as_ref().map(|u| labels.label(u)).unwrap_or_default(),
                    ])?;
                }
            }
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Write the shopping list CSV to a file.
pub fn export_shopping_csv(list: &ShoppingList, labels: &dyn UnitLabels, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_shopping_csv(list, labels, io::BufWriter::new(file))
}

/// Parse a shopping list CSV produced by [`write_shopping_csv`].
pub fn read_shopping_csv<R: io::Read>(reader: R) -> Result<Vec<CsvShoppingRow>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let rows = rdr
        .deserialize()
        .collect::<std::result::Result<Vec<CsvShoppingRow>, csv::Error>>()?;
    Ok(rows)
}

fn format_amount(amount: f64) -> String {
    format!("{:.*}", CSV_AMOUNT_DECIMALS, amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{OutputUnit, UnitSource};
    use crate::models::UnitRef;
    use crate::shopping::labels::DefaultUnitLabels;
    use crate::shopping::projector::{RawAmount, ShoppingRow};

    fn sample_list() -> ShoppingList {
        ShoppingList {
            rows: vec![
                ShoppingRow {
                    ingredient_id: "gin".to_string(),
                    ingredient_name: "Gin".to_string(),
                    checked: true,
                    raw_amounts: vec![RawAmount {
                        unit: Some(UnitRef::new("cl", "cl")),
                        amount: 40.0,
                    }],
                    output_unit: Some(OutputUnit {
                        unit: UnitRef::new("bottle", "Bottle"),
                        source: UnitSource::Selected,
                    }),
                    total: Some(40.0 / 70.0),
                    units_to_buy: Some(1),
                },
                ShoppingRow {
                    ingredient_id: "rum".to_string(),
                    ingredient_name: "Rum, dark".to_string(),
                    checked: false,
                    raw_amounts: vec![
                        RawAmount {
                            unit: Some(UnitRef::new("cl", "cl")),
                            amount: 12.0,
                        },
                        RawAmount {
                            unit: Some(UnitRef::new("dash", "Dash")),
                            amount: 3.0,
                        },
                    ],
                    output_unit: None,
                    total: None,
                    units_to_buy: None,
                },
            ],
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_csv_layout() {
        let mut out = Vec::new();
        write_shopping_csv(&sample_list(), &DefaultUnitLabels, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Markiert,Name,Geplante Menge,Einheit");
        assert_eq!(lines[1], "true,Gin,0.57,Flasche");
        assert_eq!(lines[2], "false,\"Rum, dark\",12.00,cl");
        assert_eq!(lines[3], "false,\"Rum, dark\",3.00,Spritzer");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_csv_read_back() {
        let mut out = Vec::new();
        write_shopping_csv(&sample_list(), &DefaultUnitLabels, &mut out).unwrap();

        let rows = read_shopping_csv(out.as_slice()).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].checked);
        assert_eq!(rows[1].name, "Rum, dark");
        assert!((rows[0].planned_amount - 40.0 / 70.0).abs() < 0.01);
    }
}
