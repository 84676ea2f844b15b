//! Table lookup with conservative rounding.
//!
//! Inputs are always rounded up to a tabulated entry that assumes at least
//! as much depth and time as the actual dive, never less. Bottom times past
//! the deepest coverage of a depth are rejected instead of extrapolated.

use std::sync::Arc;

use thiserror::Error;

use super::models::{
    ActualInputs, DecompressionRequest, DecompressionResult, DecompressionStop, NitrogenLoad,
    RoundedValues, TableEntry, STOP_DEPTHS, TABLE_NAME,
};
use super::table::DecoTable;
use super::validator;

/// Ascent rate to the first stop, meters per minute.
pub const ASCENT_RATE_M_PER_MIN: f64 = 9.0;

/// Resolution failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecoError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(
        "exposure not tabulable: bottom time {bottom_time} min exceeds the {max_time} min \
         tabulated at {depth}m, reduce bottom time or depth"
    )]
    ExposureNotTabulable {
        depth: f64,
        bottom_time: u32,
        max_time: u32,
    },

    #[error("no table entry found for depth {depth}m and time {bottom_time} minutes")]
    EntryNotFound { depth: f64, bottom_time: u32 },
}

/// Smallest candidate `>= target`, or the largest candidate when `target`
/// exceeds them all. `None` only for an empty candidate set.
///
/// `candidates` must be sorted ascending.
pub fn equal_or_next_greater<T>(target: T, candidates: &[T]) -> Option<T>
where
    T: PartialOrd + Copy,
{
    candidates
        .iter()
        .copied()
        .find(|&c| c >= target)
        .or_else(|| candidates.last().copied())
}

/// Required stops of an entry, deepest first.
///
/// Slots without a duration, or with a non-positive one, are not stops.
pub fn extract_stops(entry: &TableEntry) -> Vec<DecompressionStop> {
    STOP_DEPTHS
        .iter()
        .zip(entry.stops.iter())
        .filter_map(|(&depth, duration)| match *duration {
            Some(duration) if duration > 0.0 => Some(DecompressionStop { depth, duration }),
            _ => None,
        })
        .collect()
}

/// Whole minutes from `max_depth` up to `first_stop` at the standard ascent
/// rate, never less than one.
pub fn time_to_first_stop(max_depth: f64, first_stop: Option<&DecompressionStop>) -> u32 {
    match first_stop {
        Some(stop) => {
            let minutes = ((max_depth - stop.depth) / ASCENT_RATE_M_PER_MIN).round();
            minutes.max(1.0) as u32
        }
        None => 0,
    }
}

/// Resolves dive parameters against a shared, immutable table.
#[derive(Debug, Clone)]
pub struct Resolver {
    table: Arc<DecoTable>,
}

impl Resolver {
    pub fn new(table: Arc<DecoTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &DecoTable {
        &self.table
    }

    /// Resolve a request into a decompression schedule.
    pub fn resolve(&self, request: &DecompressionRequest) -> Result<DecompressionResult, DecoError> {
        let bottom_time = validator::validate(request)?;
        let max_depth = request.max_depth;

        let depths = self.table.available_depths();
        let rounded_depth = equal_or_next_greater(max_depth, &depths).ok_or(
            DecoError::EntryNotFound {
                depth: max_depth,
                bottom_time,
            },
        )?;

        let max_time = self.table.max_time(rounded_depth).ok_or(DecoError::EntryNotFound {
            depth: rounded_depth,
            bottom_time,
        })?;
        if bottom_time > max_time {
            let err = DecoError::ExposureNotTabulable {
                depth: rounded_depth,
                bottom_time,
                max_time,
            };
            tracing::warn!("Decompression calculation rejected: {}", err);
            return Err(err);
        }

        let times = self.table.available_times(rounded_depth);
        let rounded_time = equal_or_next_greater(bottom_time, &times).unwrap_or(max_time);

        let entry = self
            .table
            .find_entry(rounded_depth, rounded_time)
            .ok_or_else(|| {
                let err = DecoError::EntryNotFound {
                    depth: rounded_depth,
                    bottom_time: rounded_time,
                };
                tracing::error!("Decompression table inconsistency: {}", err);
                err
            })?;

        let stops = extract_stops(entry);
        let no_decompression_dive = stops.is_empty();
        // Measured from the actual depth, not the rounded one.
        let time_to_first_stop = time_to_first_stop(max_depth, stops.first());

        tracing::info!(
            "Calculated decompression for {}m/{}min -> {}m/{}min, No-deco: {}, Stops: {}",
            max_depth,
            bottom_time,
            rounded_depth,
            rounded_time,
            no_decompression_dive,
            stops.len()
        );

        Ok(DecompressionResult {
            no_decompression_dive,
            decompression_stops: stops,
            actual_inputs: ActualInputs {
                depth: max_depth,
                bottom_time,
            },
            rounded_values: RoundedValues {
                depth: rounded_depth,
                time: rounded_time,
            },
            table_used: TABLE_NAME,
            table_cell: format!("Profundidad: {}m / Tiempo: {}min", rounded_depth, rounded_time),
            altitude: request.altitude,
            breathing_gas: request.breathing_gas.clone(),
            oxygen_deco: request.oxygen_deco.clone(),
            total_ascent_time: entry.total_ascent_time.clone(),
            repetitive_group: entry.repetitive_group.clone(),
            nitrogen_load: NitrogenLoad::from_group(&entry.repetitive_group),
            time_to_first_stop,
            tabulated_time_to_first_stop: entry.time_to_first_stop.clone(),
        })
    }
}
