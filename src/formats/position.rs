//! Mixed-radix conversion between raster indices and per-axis positions.
//! The first axis varies fastest.

use super::{FormatError, Result};

/// Number of planes the axis lengths describe.
pub fn plane_count(lengths: &[u64]) -> Result<u64> {
    lengths
        .iter()
        .try_fold(1_u64, |count, length| count.checked_mul(*length))
        .ok_or_else(|| FormatError::RasterOverflow(lengths.to_vec()))
}

pub fn raster_to_position(lengths: &[u64], raster: u64) -> Result<Vec<u64>> {
    let count = plane_count(lengths)?;
    if raster >= count {
        return Err(FormatError::PlaneOutOfRange {
            index: raster,
            count,
        });
    }
    let mut remainder = raster;
    let position = lengths
        .iter()
        .map(|length| {
            let value = remainder % length;
            remainder /= length;
            value
        })
        .collect();
    Ok(position)
}

pub fn position_to_raster(lengths: &[u64], position: &[u64]) -> Result<u64> {
    if position.len() != lengths.len()
        || position
            .iter()
            .zip(lengths)
            .any(|(value, length)| value >= length)
    {
        return Err(FormatError::InvalidPosition {
            position: position.to_vec(),
            lengths: lengths.to_vec(),
        });
    }
    // Fitting the product bounds every partial sum below.
    plane_count(lengths)?;
    let mut raster = 0;
    let mut stride = 1;
    for (value, length) in position.iter().zip(lengths) {
        raster += value * stride;
        stride *= length;
    }
    Ok(raster)
}
