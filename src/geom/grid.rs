//! Sampling grids for the strip's parameter domain.
//!
//! Grids are stored row-major. Row `i` corresponds to the lateral sample `v[i]`
//! and column `j` to the angular sample `u[j]`, so `grid.get(i, j)` always
//! refers to the parameter pair `(u[j], v[i])`.

use serde::Serialize;
use serde::ser::{SerializeSeq, Serializer};

/// `count` evenly spaced values over `[start, stop]`, both endpoints included.
///
/// The last sample is pinned to `stop` so the seam value is exact regardless
/// of accumulated rounding in `start + k * step`. `count == 1` yields `[start]`.
#[must_use]
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count).map(|k| k as f64 * step + start).collect();
            values[count - 1] = stop;
            values
        }
    }
}

/// A dense, row-major 2D array of reals.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarGrid {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl ScalarGrid {
    /// Builds a grid by evaluating `f(row, col)` for every cell.
    #[must_use]
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut values = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                values.push(f(i, j));
            }
        }
        Self { rows, cols, values }
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Value at `(row, col)`, or `None` when out of range.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            self.values.get(row * self.cols + col).copied()
        } else {
            None
        }
    }

    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row < self.rows {
            let start = row * self.cols;
            Some(&self.values[start..start + self.cols])
        } else {
            None
        }
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks_exact(self.cols.max(1)).take(self.rows)
    }

    /// Flat row-major view.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Copies the grid into nested rows, the layout plotting front-ends expect.
    #[must_use]
    pub fn to_nested(&self) -> Vec<Vec<f64>> {
        self.iter_rows().map(<[f64]>::to_vec).collect()
    }

    #[must_use]
    pub fn is_all_finite(&self) -> bool {
        self.values.iter().all(|value| value.is_finite())
    }
}

impl Serialize for ScalarGrid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows))?;
        for row in self.iter_rows() {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}

/// The 1D parameter samples and their outer-product pairing.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterGrid {
    u: Vec<f64>,
    v: Vec<f64>,
    u_grid: ScalarGrid,
    v_grid: ScalarGrid,
}

impl ParameterGrid {
    /// Pairs every `v` (rows) with every `u` (columns).
    #[must_use]
    pub fn new(u: Vec<f64>, v: Vec<f64>) -> Self {
        let u_grid = ScalarGrid::from_fn(v.len(), u.len(), |_, j| u[j]);
        let v_grid = ScalarGrid::from_fn(v.len(), u.len(), |i, _| v[i]);
        Self {
            u,
            v,
            u_grid,
            v_grid,
        }
    }

    #[must_use]
    pub fn u(&self) -> &[f64] {
        &self.u
    }

    #[must_use]
    pub fn v(&self) -> &[f64] {
        &self.v
    }

    #[must_use]
    pub const fn u_grid(&self) -> &ScalarGrid {
        &self.u_grid
    }

    #[must_use]
    pub const fn v_grid(&self) -> &ScalarGrid {
        &self.v_grid
    }

    /// Spacing between the first two `u` samples (0 for fewer than two samples).
    #[must_use]
    pub fn du(&self) -> f64 {
        spacing(&self.u)
    }

    /// Spacing between the first two `v` samples (0 for fewer than two samples).
    #[must_use]
    pub fn dv(&self) -> f64 {
        spacing(&self.v)
    }

    /// Iterates `(row, col, u, v)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, f64, f64)> + '_ {
        self.v.iter().enumerate().flat_map(move |(i, &v)| {
            self.u.iter().enumerate().map(move |(j, &u)| (i, j, u, v))
        })
    }
}

fn spacing(values: &[f64]) -> f64 {
    match values {
        [first, second, ..] => second - first,
        _ => 0.0,
    }
}
