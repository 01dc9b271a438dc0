//! Recorded path: dense sample matrix with a known column layout

use nalgebra::DMatrix;

use crate::correction_error::CorrectionError;
use crate::parameters::path_correction::PathLayout;
use crate::path_traits::{Position, POSITION_DIMS};

/// Ordered samples of a recorded path, one row per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    data: DMatrix<f64>,
    layout: PathLayout,
}

/// Splits time sequence data into input (`..split_col`) and output (`split_col..`) columns.
pub fn split_data(matrix: &DMatrix<f64>, split_col: usize) -> (DMatrix<f64>, DMatrix<f64>) {
    let split = split_col.min(matrix.ncols());
    (
        matrix.columns(0, split).into_owned(),
        matrix.columns(split, matrix.ncols() - split).into_owned(),
    )
}

impl Path {
    /// Wraps the sample matrix, checking that the layout fits its rows.
    pub fn new(data: DMatrix<f64>, layout: PathLayout) -> Result<Self, CorrectionError> {
        layout.validate(data.ncols())?;
        Ok(Path { data, layout })
    }

    /// Builds the path from rows of equal width.
    pub fn from_rows(rows: &[Vec<f64>], layout: PathLayout) -> Result<Self, CorrectionError> {
        let width = rows.first().map_or(0, |row| row.len());
        if let Some(ragged) = rows.iter().position(|row| row.len() != width) {
            return Err(CorrectionError::InvalidConfiguration(format!(
                "row {} has {} columns, expected {}",
                ragged,
                rows[ragged].len(),
                width
            )));
        }
        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        Self::new(DMatrix::from_row_slice(rows.len(), width, &flat), layout)
    }

    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    pub fn layout(&self) -> &PathLayout {
        &self.layout
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    pub fn into_matrix(self) -> DMatrix<f64> {
        self.data
    }

    fn position_at(&self, row: usize, column: usize) -> Position {
        Position::new(
            self.data[(row, column)],
            self.data[(row, column + 1)],
            self.data[(row, column + 2)],
        )
    }

    /// Time of the sample, normalized if `normalize_time` has been called.
    pub fn time(&self, row: usize) -> f64 {
        self.data[(row, self.layout.time_column)]
    }

    /// Position of `gate` as recorded in the given sample.
    pub fn gate(&self, row: usize, gate: usize) -> Position {
        self.position_at(row, self.layout.gate_start(gate))
    }

    pub fn tooltip(&self, row: usize) -> Position {
        self.position_at(row, self.layout.tooltip_column)
    }

    /// Segment rating of the sample, if the path has been rated.
    pub fn rating(&self, row: usize) -> Option<f64> {
        self.layout.rating_column.map(|column| self.data[(row, column)])
    }

    pub fn tooltips(&self) -> Vec<Position> {
        (0..self.len()).map(|row| self.tooltip(row)).collect()
    }

    /// Samples `start..end`, bounds clamped to the path.
    pub fn rows(&self, start: usize, end: usize) -> Path {
        let end = end.min(self.len());
        let start = start.min(end);
        Path {
            data: self.data.rows(start, end - start).into_owned(),
            layout: self.layout,
        }
    }

    /// Model inputs (time and gates) and outputs (tooltip and anything after).
    pub fn split_data(&self) -> (DMatrix<f64>, DMatrix<f64>) {
        split_data(&self.data, self.layout.input_columns())
    }

    /// Shifts the time column to start at 0 and scales it to end at 1.
    pub fn normalize_time(&mut self) -> Result<(), CorrectionError> {
        if self.is_empty() {
            return Err(CorrectionError::EmptyPath { found: 0 });
        }
        let column = self.layout.time_column;
        let min = self.data.column(column).iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.data.column(column).iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = max - min;
        if !(span > 0.0) {
            return Err(CorrectionError::DegenerateTimestep { index: 0, dt: span });
        }
        for t in self.data.column_mut(column).iter_mut() {
            *t = (*t - min) / span;
        }
        Ok(())
    }

    /// Companion full record of a correction: all but the last sample, with time
    /// and gate columns unchanged and the tooltip replaced by `corrected`.
    pub fn with_corrected_tooltips(&self, corrected: &[Position]) -> Result<Path, CorrectionError> {
        if corrected.len() + 1 != self.len() {
            return Err(CorrectionError::InvalidConfiguration(format!(
                "{} corrected positions do not match a path of {} samples",
                corrected.len(),
                self.len()
            )));
        }
        let mut full = self.rows(0, corrected.len());
        let column = self.layout.tooltip_column;
        for (row, position) in corrected.iter().enumerate() {
            for dim in 0..POSITION_DIMS {
                full.data[(row, column + dim)] = position[dim];
            }
        }
        Ok(full)
    }

    /// Same path with the rating column set to `ratings` (one per sample). A path
    /// without a rating column gets one appended.
    pub(crate) fn with_ratings(&self, ratings: &[f64]) -> Path {
        let (mut data, layout) = match self.layout.rating_column {
            Some(_) => (self.data.clone(), self.layout),
            None => {
                let column = self.data.ncols();
                (
                    self.data.clone().insert_column(column, 0.0),
                    PathLayout { rating_column: Some(column), ..self.layout },
                )
            }
        };
        if let Some(column) = layout.rating_column {
            for (row, rating) in ratings.iter().enumerate().take(data.nrows()) {
                data[(row, column)] = *rating;
            }
        }
        Path { data, layout }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_gate_path() -> Path {
        Path::from_rows(
            &[
                vec![2.0, 0.5, 0.5, 0.5, 0.0, 0.0, 0.0],
                vec![3.0, 0.5, 0.5, 0.5, 0.1, 0.2, 0.3],
                vec![6.0, 0.5, 0.5, 0.5, 0.2, 0.4, 0.6],
            ],
            PathLayout::with_gates(1),
        )
        .expect("valid path")
    }

    #[test]
    fn test_accessors() {
        let path = one_gate_path();
        assert_eq!(path.len(), 3);
        assert_eq!(path.gate(1, 0), Position::new(0.5, 0.5, 0.5));
        assert_eq!(path.tooltip(2), Position::new(0.2, 0.4, 0.6));
        assert_eq!(path.rating(0), None);
    }

    #[test]
    fn test_normalize_time() {
        let mut path = one_gate_path();
        path.normalize_time().expect("non-degenerate time");
        assert_eq!(path.time(0), 0.0);
        assert!((path.time(1) - 0.25).abs() < 1e-12);
        assert_eq!(path.time(2), 1.0);
    }

    #[test]
    fn test_normalize_constant_time_fails() {
        let mut path = Path::from_rows(
            &vec![vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]; 2],
            PathLayout::with_gates(1),
        )
        .expect("valid path");
        assert!(matches!(
            path.normalize_time(),
            Err(CorrectionError::DegenerateTimestep { .. })
        ));
    }

    #[test]
    fn test_split_data() {
        let (inputs, outputs) = one_gate_path().split_data();
        assert_eq!(inputs.ncols(), 4);
        assert_eq!(outputs.ncols(), 3);
        assert_eq!(outputs[(2, 1)], 0.4);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let rows = vec![vec![0.0; 7], vec![0.0; 6]];
        assert!(Path::from_rows(&rows, PathLayout::with_gates(1)).is_err());
    }

    #[test]
    fn test_with_corrected_tooltips() {
        let path = one_gate_path();
        let corrected = [Position::new(1.0, 1.0, 1.0), Position::new(2.0, 2.0, 2.0)];
        let full = path.with_corrected_tooltips(&corrected).expect("matching length");
        assert_eq!(full.len(), 2);
        assert_eq!(full.time(1), 3.0);
        assert_eq!(full.gate(1, 0), path.gate(1, 0));
        assert_eq!(full.tooltip(1), Position::new(2.0, 2.0, 2.0));
        assert!(path.with_corrected_tooltips(&corrected[..1]).is_err());
    }

    #[test]
    fn test_rows_clamped() {
        let path = one_gate_path();
        assert_eq!(path.rows(1, 10).len(), 2);
        assert!(path.rows(5, 2).is_empty());
    }
}
