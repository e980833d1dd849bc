//! Two-dimensional temperature field storage
//!
//! Stores the interior of the plate as a flat `Vec<f64>` in row-major order.
//! Boundary cells are not part of the field: the heating elements live in
//! [`BoundaryValues`](crate::boundary::BoundaryValues) and the cold edges are
//! constants resolved by the kernel.

use serde::{Deserialize, Serialize};

/// Interior temperature field in row-major order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Field {
    /// Create a field of the given interior size, initialized to zero.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Create a field initialized to a uniform temperature.
    #[must_use]
    pub fn with_value(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            data: vec![value; rows * cols],
            rows,
            cols,
        }
    }

    /// Wrap an existing row-major buffer.
    pub(crate) fn from_parts(data: Vec<f64>, rows: usize, cols: usize) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { data, rows, cols }
    }

    /// Interior row count.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Interior column count.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Temperature at an interior position.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the interior.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.rows && col < self.cols, "cell out of bounds");
        self.data[row * self.cols + col]
    }

    /// Set the temperature at an interior position.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the interior.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        assert!(row < self.rows && col < self.cols, "cell out of bounds");
        self.data[row * self.cols + col] = value;
    }

    /// Borrow one interior row.
    ///
    /// # Panics
    ///
    /// Panics if the row is outside the interior.
    #[must_use]
    pub fn row(&self, row: usize) -> &[f64] {
        assert!(row < self.rows, "row out of bounds");
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// The whole field as a flat row-major slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable access to the flat row-major storage.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Overwrite every interior cell with one temperature.
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_field_is_cold() {
        let field = Field::new(6, 4);
        assert_eq!(field.rows(), 6);
        assert_eq!(field.cols(), 4);
        assert_eq!(field.as_slice().len(), 24);
        assert!(field.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn uniform_field_holds_its_value() {
        let field = Field::with_value(3, 3, 37.5);
        assert!(field.as_slice().iter().all(|&v| v == 37.5));
    }

    #[test]
    fn get_set_use_row_major_order() {
        let mut field = Field::new(5, 7);
        field.set(2, 3, 81.25);
        assert_eq!(field.get(2, 3), 81.25);
        assert_eq!(field.as_slice()[2 * 7 + 3], 81.25);
    }

    #[test]
    fn row_view_matches_storage() {
        let mut field = Field::new(4, 3);
        field.set(1, 0, 1.0);
        field.set(1, 2, 2.0);
        assert_eq!(field.row(1), &[1.0, 0.0, 2.0]);
    }

    #[test]
    fn fill_overwrites_every_cell() {
        let mut field = Field::new(2, 2);
        field.fill(99.0);
        assert!(field.as_slice().iter().all(|&v| v == 99.0));
    }

    #[test]
    #[should_panic(expected = "cell out of bounds")]
    fn out_of_bounds_access_panics() {
        let field = Field::new(4, 4);
        let _ = field.get(0, 4);
    }
}
