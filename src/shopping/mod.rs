pub mod export;
pub mod labels;
pub mod projector;

pub use export::{export_shopping_csv, read_shopping_csv, write_shopping_csv, CsvShoppingRow};
pub use labels::{DefaultUnitLabels, LabelMap, UnitLabels};
pub use projector::{project_shopping_list, RawAmount, ShoppingList, ShoppingRow};
