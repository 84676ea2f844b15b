//! Synthetic reference table for tests, in the dataset's labelled format.
//!
//! Values are shaped like the air table but are not authoritative.

use std::sync::Arc;

use super::resolver::Resolver;
use super::table::DecoTable;

/// Depths: 10.7, 12.2, 18.3, 27.4, 30.5, 42.7, 57.9.
/// The last record is missing its repetitive group and must be skipped.
pub const SAMPLE_TABLE_JSON: &str = r#"[
  {"Profundidad (m)": 10.7, "Tiempo de Fondo (min)": 15, "Tiempo Total Ascenso (min)": "00:01:10", "Grupo Repetición": "B"},
  {"Profundidad (m)": 10.7, "Tiempo de Fondo (min)": 30, "Tiempo Total Ascenso (min)": "00:01:10", "Grupo Repetición": "D"},
  {"Profundidad (m)": 10.7, "Tiempo de Fondo (min)": 232, "Tiempo Total Ascenso (min)": "00:01:10", "Grupo Repetición": "Z"},
  {"Profundidad (m)": 12.2, "Tiempo de Fondo (min)": 170, "Tiempo hasta la primera parada": "00:00:40", "Parada 6.1m": 6.0, "Tiempo Total Ascenso (min)": "00:07:20", "Grupo Repetición": "O"},
  {"Profundidad (m)": 12.2, "Tiempo de Fondo (min)": 100, "Tiempo Total Ascenso (min)": "00:01:20", "Grupo Repetición": "K"},
  {"Profundidad (m)": 18.3, "Tiempo de Fondo (min)": 60, "Tiempo Total Ascenso (min)": "00:02:00", "Grupo Repetición": "M"},
  {"Profundidad (m)": 18.3, "Tiempo de Fondo (min)": 80, "Parada 6.1m": 15.0, "Tiempo Total Ascenso (min)": "00:17:50", "Grupo Repetición": "O"},
  {"Profundidad (m)": 27.4, "Tiempo de Fondo (min)": 30, "Tiempo Total Ascenso (min)": "00:03:00", "Grupo Repetición": "J"},
  {"Profundidad (m)": 27.4, "Tiempo de Fondo (min)": 45, "Parada 9.1m": null, "Parada 6.1m": 18.0, "Tiempo Total Ascenso (min)": "00:21:00", "Grupo Repetición": "Q"},
  {"Profundidad (m)": 27.4, "Tiempo de Fondo (min)": 50, "Tiempo hasta la primera parada": "00:02:00", "Parada 9.1m": 3.0, "Parada 6.1m": 20.0, "Tiempo Total Ascenso (min)": "00:26:00", "Grupo Repetición": "T"},
  {"Profundidad (m)": 30.5, "Tiempo de Fondo (min)": 25, "Parada 6.1m": 0.0, "Tiempo Total Ascenso (min)": "00:03:20", "Grupo Repetición": "N"},
  {"Profundidad (m)": 30.5, "Tiempo de Fondo (min)": 40, "Parada 9.1m": 5.0, "Parada 6.1m": 22.0, "Tiempo Total Ascenso (min)": "00:31:00", "Grupo Repetición": "Z"},
  {"Profundidad (m)": 42.7, "Tiempo de Fondo (min)": 10, "Tiempo Total Ascenso (min)": "00:04:40", "Grupo Repetición": "E"},
  {"Profundidad (m)": 42.7, "Tiempo de Fondo (min)": 20, "Parada 12.2m": 2.0, "Parada 9.1m": 4.0, "Parada 6.1m": 15.0, "Tiempo Total Ascenso (min)": "00:26:40", "Grupo Repetición": "**"},
  {"Profundidad (m)": 57.9, "Tiempo de Fondo (min)": 20, "Parada 39.6m": 1.0, "Parada 30.5m": -1.0, "Parada 24.4m": 2.0, "Parada 18.3m": 3.0, "Parada 12.2m": 5.0, "Parada 6.1m": 30.0, "Tiempo Total Ascenso (min)": "00:47:20", "Grupo Repetición": "**"},
  {"Profundidad (m)": 57.9, "Tiempo de Fondo (min)": 10, "Parada 6.1m": 0.0, "Parada 9.1m": 1.0, "Tiempo Total Ascenso (min)": "00:08:00"}
]"#;

/// Number of records in [`SAMPLE_TABLE_JSON`] that pass validation.
pub const SAMPLE_VALID_ENTRIES: usize = 15;

pub fn sample_table() -> DecoTable {
    DecoTable::from_json(SAMPLE_TABLE_JSON.as_bytes()).expect("sample table parses")
}

pub fn sample_resolver() -> Resolver {
    Resolver::new(Arc::new(sample_table()))
}
