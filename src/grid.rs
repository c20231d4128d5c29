//! Two-dimensional grids holding composite values.
//!
//! Both grid types store their cells row-major with row 0 at the southern
//! edge of the composite, matching the order of the RADOLAN payload.

use serde::Serialize;

/// Decoded composite values, including the no-data sentinel cells.
#[derive(Debug, Clone, PartialEq)]
pub struct RawGrid {
    nrows: usize,
    ncols: usize,
    values: Vec<f64>,
}

impl RawGrid {
    /// Wraps `values` as an `nrows x ncols` grid.
    ///
    /// Returns `None` if the number of values does not match the shape.
    pub fn new(nrows: usize, ncols: usize, values: Vec<f64>) -> Option<Self> {
        (values.len() == nrows * ncols).then_some(Self {
            nrows,
            ncols,
            values,
        })
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.nrows || col >= self.ncols {
            return None;
        }
        self.values.get(row * self.ncols + col).copied()
    }

    /// Masks every cell equal to `sentinel`.
    ///
    /// ```
    /// use dwd_radar::RawGrid;
    ///
    /// let raw = RawGrid::new(1, 3, vec![10.0, -9999.0, 65.0]).unwrap();
    /// let masked = raw.mask_equal(-9999.0);
    /// assert_eq!(masked.values(), &[Some(10.0), None, Some(65.0)]);
    /// ```
    pub fn mask_equal(&self, sentinel: f64) -> Grid {
        Grid {
            nrows: self.nrows,
            ncols: self.ncols,
            values: self
                .values
                .iter()
                .map(|&v| (v != sentinel).then_some(v))
                .collect(),
        }
    }
}

/// A masked grid; `None` marks cells without a valid measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    nrows: usize,
    ncols: usize,
    values: Vec<Option<f64>>,
}

impl Grid {
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Value at `(row, col)`; `None` when masked or out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.nrows || col >= self.ncols {
            return None;
        }
        self.values.get(row * self.ncols + col).copied().flatten()
    }

    /// Applies `f` to every valid cell and keeps the mask.
    pub fn map<F>(&self, f: F) -> Grid
    where
        F: Fn(f64) -> f64,
    {
        Grid {
            nrows: self.nrows,
            ncols: self.ncols,
            values: self.values.iter().map(|v| v.map(&f)).collect(),
        }
    }

    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Largest valid value, ignoring NaN.
    pub fn max(&self) -> Option<f64> {
        self.values
            .iter()
            .flatten()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }
}
