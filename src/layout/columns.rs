//! # Column Layout
//!
//! Side-by-side sections split the content width evenly, minus a fixed
//! gutter between neighbours. Each column advances its own cursor from a
//! shared top; whatever follows starts below the tallest column.

use crate::error::FolioError;

/// An even split of a horizontal span into columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Columns {
    x: f64,
    width: f64,
    gutter: f64,
    count: usize,
}

impl Columns {
    /// Split `total_width` starting at `x` into `count` columns separated by `gutter`.
    pub fn split(x: f64, total_width: f64, count: usize, gutter: f64) -> Result<Self, FolioError> {
        if count == 0 {
            return Err(FolioError::NoColumns);
        }
        let width = (total_width - gutter * (count - 1) as f64) / count as f64;
        Ok(Self {
            x,
            width,
            gutter,
            count,
        })
    }

    /// Width of each column.
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Left edge of column `index`.
    pub fn x(&self, index: usize) -> f64 {
        self.x + index as f64 * (self.width + self.gutter)
    }

    /// Right edge of column `index`.
    pub fn right(&self, index: usize) -> f64 {
        self.x(index) + self.width
    }
}

/// Where content continues after columns that ended at `ends`: the lowest
/// (tallest-column) position, so nothing below overlaps any column.
pub fn merge(ends: &[f64]) -> f64 {
    ends.iter().copied().fold(f64::INFINITY, f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_columns_share_width_minus_gutter() {
        let cols = Columns::split(20.0, 410.0, 2, 10.0).unwrap();
        assert_eq!(cols.width(), 200.0);
        assert_eq!(cols.x(0), 20.0);
        assert_eq!(cols.x(1), 230.0);
        assert_eq!(cols.right(1), 430.0);
    }

    #[test]
    fn three_columns_have_two_gutters() {
        let cols = Columns::split(0.0, 320.0, 3, 10.0).unwrap();
        assert_eq!(cols.count(), 3);
        assert_eq!(cols.width(), 100.0);
        assert_eq!(cols.x(2), 220.0);
    }

    #[test]
    fn zero_columns_is_an_error() {
        assert!(matches!(
            Columns::split(0.0, 100.0, 0, 10.0),
            Err(FolioError::NoColumns)
        ));
    }

    #[test]
    fn merge_takes_the_tallest_column() {
        assert_eq!(merge(&[335.4, 343.4]), 335.4);
        assert_eq!(merge(&[120.0]), 120.0);
    }
}
