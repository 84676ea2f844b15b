//! Data types for table-driven decompression.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Name of the reference table every result is resolved against.
pub const TABLE_NAME: &str = "US Navy Rev 7 – Tabla de Aire I";

/// Canonical stop depths in meters, deepest first (130 fsw down to 20 fsw).
pub const STOP_DEPTHS: [f64; 12] = [
    39.6, 36.6, 33.5, 30.5, 27.4, 24.4, 21.3, 18.3, 15.2, 12.2, 9.1, 6.1,
];

/// One row of the reference table as it appears in the external dataset.
///
/// The dataset keys its columns by descriptive labels; this struct is the
/// single place those labels are mapped onto field names.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTableEntry {
    #[serde(rename = "Profundidad (m)")]
    pub depth: f64,
    #[serde(rename = "Tiempo de Fondo (min)", deserialize_with = "whole_minutes")]
    pub bottom_time: u32,
    #[serde(rename = "Tiempo hasta la primera parada", default)]
    pub time_to_first_stop: Option<String>,
    #[serde(rename = "Parada 39.6m", default)]
    pub stop_39_6: Option<f64>,
    #[serde(rename = "Parada 36.6m", default)]
    pub stop_36_6: Option<f64>,
    #[serde(rename = "Parada 33.5m", default)]
    pub stop_33_5: Option<f64>,
    #[serde(rename = "Parada 30.5m", default)]
    pub stop_30_5: Option<f64>,
    #[serde(rename = "Parada 27.4m", default)]
    pub stop_27_4: Option<f64>,
    #[serde(rename = "Parada 24.4m", default)]
    pub stop_24_4: Option<f64>,
    #[serde(rename = "Parada 21.3m", default)]
    pub stop_21_3: Option<f64>,
    #[serde(rename = "Parada 18.3m", default)]
    pub stop_18_3: Option<f64>,
    #[serde(rename = "Parada 15.2m", default)]
    pub stop_15_2: Option<f64>,
    #[serde(rename = "Parada 12.2m", default)]
    pub stop_12_2: Option<f64>,
    #[serde(rename = "Parada 9.1m", default)]
    pub stop_9_1: Option<f64>,
    #[serde(rename = "Parada 6.1m", default)]
    pub stop_6_1: Option<f64>,
    #[serde(rename = "Tiempo Total Ascenso (min)")]
    pub total_ascent_time: String,
    #[serde(rename = "Grupo Repetición")]
    pub repetitive_group: String,
}

/// Accepts integer minutes, including whole-number floats such as `170.0`.
fn whole_minutes<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value = f64::deserialize(deserializer)?;
    if value.fract() != 0.0 || value < 0.0 || value > f64::from(u32::MAX) {
        return Err(D::Error::custom(format!(
            "bottom time must be a whole number of minutes, got {}",
            value
        )));
    }
    Ok(value as u32)
}

/// Accepts any whole number of minutes, sign included, so that range checks
/// happen in request validation rather than in the JSON extractor.
fn signed_whole_minutes<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() || value.fract() != 0.0 || value.abs() > i64::MAX as f64 {
        return Err(D::Error::custom(format!(
            "bottomTime must be a whole number of minutes, got {}",
            value
        )));
    }
    Ok(value as i64)
}

/// A validated row of the reference table. `(depth, bottom_time)` is unique.
#[derive(Debug, Clone, PartialEq)]
pub struct TableEntry {
    /// Depth in meters
    pub depth: f64,
    /// Bottom time in minutes
    pub bottom_time: u32,
    /// Stop durations in minutes, aligned with [`STOP_DEPTHS`]
    pub stops: [Option<f64>; 12],
    /// Tabulated time to first stop, as formatted in the dataset
    pub time_to_first_stop: Option<String>,
    /// Total ascent time, as formatted in the dataset
    pub total_ascent_time: String,
    /// Repetitive group designator
    pub repetitive_group: String,
}

impl TryFrom<RawTableEntry> for TableEntry {
    type Error = String;

    fn try_from(raw: RawTableEntry) -> Result<Self, Self::Error> {
        if !raw.depth.is_finite() || raw.depth <= 0.0 {
            return Err(format!("depth must be positive, got {}", raw.depth));
        }
        if raw.bottom_time == 0 {
            return Err("bottom time must be positive".to_string());
        }

        Ok(TableEntry {
            depth: raw.depth,
            bottom_time: raw.bottom_time,
            stops: [
                raw.stop_39_6,
                raw.stop_36_6,
                raw.stop_33_5,
                raw.stop_30_5,
                raw.stop_27_4,
                raw.stop_24_4,
                raw.stop_21_3,
                raw.stop_18_3,
                raw.stop_15_2,
                raw.stop_12_2,
                raw.stop_9_1,
                raw.stop_6_1,
            ],
            time_to_first_stop: raw.time_to_first_stop,
            total_ascent_time: raw.total_ascent_time,
            repetitive_group: raw.repetitive_group,
        })
    }
}

/// Request payload for a decompression calculation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecompressionRequest {
    /// Maximum depth in meters
    pub max_depth: f64,
    /// Bottom time in minutes
    #[serde(deserialize_with = "signed_whole_minutes")]
    pub bottom_time: i64,
    /// Altitude above sea level in meters
    pub altitude: f64,
    /// Breathing gas identifier
    pub breathing_gas: String,
    /// Oxygen decompression option
    pub oxygen_deco: String,
}

/// A required stop during ascent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecompressionStop {
    /// Stop depth in meters
    pub depth: f64,
    /// Stop duration in minutes
    pub duration: f64,
}

/// Inputs exactly as the diver supplied them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActualInputs {
    pub depth: f64,
    pub bottom_time: u32,
}

/// Table coordinates the inputs were rounded to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoundedValues {
    pub depth: f64,
    pub time: u32,
}

/// Residual nitrogen band for a repetitive group letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NitrogenLoad {
    Low,
    Moderate,
    High,
    Unknown,
}

impl NitrogenLoad {
    /// A-I are low, J-R moderate, S-Z high.
    pub fn from_group(group: &str) -> Self {
        let mut chars = group.chars();
        match (chars.next().map(|c| c.to_ascii_uppercase()), chars.next()) {
            (Some('A'..='I'), None) => NitrogenLoad::Low,
            (Some('J'..='R'), None) => NitrogenLoad::Moderate,
            (Some('S'..='Z'), None) => NitrogenLoad::High,
            _ => NitrogenLoad::Unknown,
        }
    }
}

/// Response payload for a decompression calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecompressionResult {
    pub no_decompression_dive: bool,
    /// Stops in ascent order, deepest first
    pub decompression_stops: Vec<DecompressionStop>,
    pub actual_inputs: ActualInputs,
    pub rounded_values: RoundedValues,
    pub table_used: &'static str,
    pub table_cell: String,
    pub altitude: f64,
    pub breathing_gas: String,
    pub oxygen_deco: String,
    pub total_ascent_time: String,
    pub repetitive_group: String,
    pub nitrogen_load: NitrogenLoad,
    /// Minutes from the actual depth to the first stop, 0 without stops
    pub time_to_first_stop: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tabulated_time_to_first_stop: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct DepthRange {
    pub min: f64,
    pub max: f64,
}

/// Preview of the bottom times tabulated at one depth.
#[derive(Debug, Clone, Serialize)]
pub struct DepthPreview {
    pub depth: f64,
    pub times: Vec<u32>,
    pub total_entries: usize,
}

/// Table coverage summary used for client-side input hints.
#[derive(Debug, Clone, Serialize)]
pub struct TableInfo {
    pub table_name: &'static str,
    pub total_depths: usize,
    pub depth_range: DepthRange,
    pub available_depths: Vec<f64>,
    pub sample_depth_times: Vec<DepthPreview>,
    pub table_digest: String,
    pub loaded_at: DateTime<Utc>,
}

/// Error body returned by the decompression endpoints.
#[derive(Debug, Serialize)]
pub struct DecoErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
