//! Request validation for decompression calculations.

use super::models::DecompressionRequest;
use super::resolver::DecoError;

/// Check request bounds before any table lookup, returning the bottom time
/// in whole minutes.
///
/// Altitude, gas and oxygen mode are passthrough values; only altitude has
/// a bound.
pub fn validate(request: &DecompressionRequest) -> Result<u32, DecoError> {
    if !request.max_depth.is_finite() || request.max_depth <= 0.0 {
        return Err(DecoError::InvalidRequest(format!(
            "maxDepth must be greater than 0, got {}",
            request.max_depth
        )));
    }
    let bottom_time = match u32::try_from(request.bottom_time) {
        Ok(minutes) if minutes > 0 => minutes,
        _ => {
            return Err(DecoError::InvalidRequest(format!(
                "bottomTime must be greater than 0, got {}",
                request.bottom_time
            )))
        }
    };
    if !request.altitude.is_finite() || request.altitude < 0.0 {
        return Err(DecoError::InvalidRequest(format!(
            "altitude must be 0 or greater, got {}",
            request.altitude
        )));
    }
    Ok(bottom_time)
}
