//! # Space Allocation
//!
//! Sections at the bottom of a page stretch to use whatever height is left.
//! This module decides how many rows that is, and checks after a page is
//! composed that nothing ran below the bottom margin.

use crate::error::FolioError;

use super::EPSILON;

/// Breathing room kept between the last filled row and the bottom margin.
pub const FILL_PADDING: f64 = 10.0;

/// How many rows of `line_height` fit between `top` and `floor`, keeping
/// [`FILL_PADDING`] clear above the floor.
pub fn rows_that_fit(top: f64, floor: f64, line_height: f64) -> usize {
    if line_height <= 0.0 {
        return 0;
    }
    let remaining = top - floor - FILL_PADDING;
    if remaining <= 0.0 {
        return 0;
    }
    (remaining / line_height).floor() as usize
}

/// Reject a page whose final cursor sits below `floor`.
pub fn check_floor(page: usize, cursor: f64, floor: f64) -> Result<(), FolioError> {
    if cursor + EPSILON < floor {
        return Err(FolioError::Overflow {
            page,
            cursor,
            floor,
        });
    }
    Ok(())
}
