//! Defines the correction parameter and path layout data structures

pub mod path_correction {
    use crate::correction_error::CorrectionError;
    use crate::path_traits::POSITION_DIMS;

    /// Column layout of a recorded path matrix:
    /// `[time, gate_1 .. gate_G (3 each), tooltip (3), rating?]`.
    /// Offsets are configuration, never inferred from the data.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct PathLayout {
        /// Column of the time value.
        pub time_column: usize,

        /// First column of the first gate. Gate `g` occupies the three columns
        /// starting at `gate_column + 3 * g`.
        pub gate_column: usize,

        /// Number of gates encoded in every sample, and so the number of segments.
        pub gate_count: usize,

        /// First of the three tooltip position columns.
        pub tooltip_column: usize,

        /// Column of the per-sample segment rating, if the path has been rated.
        pub rating_column: Option<usize>,
    }

    impl Default for PathLayout {
        /// Layout of the training simulator output: time, 8 gates, tooltip, rating.
        fn default() -> Self {
            let gate_count = 8;
            let tooltip_column = 1 + gate_count * POSITION_DIMS;
            PathLayout {
                time_column: 0,
                gate_column: 1,
                gate_count,
                tooltip_column,
                rating_column: Some(tooltip_column + POSITION_DIMS),
            }
        }
    }

    impl PathLayout {
        /// Layout of a path with `gate_count` gates and no rating.
        pub fn with_gates(gate_count: usize) -> Self {
            PathLayout {
                time_column: 0,
                gate_column: 1,
                gate_count,
                tooltip_column: 1 + gate_count * POSITION_DIMS,
                rating_column: None,
            }
        }

        /// First column of the given gate.
        pub fn gate_start(&self, gate: usize) -> usize {
            self.gate_column + gate * POSITION_DIMS
        }

        /// Number of leading input columns (time and gates), the split column
        /// between model inputs and model outputs.
        pub fn input_columns(&self) -> usize {
            self.tooltip_column
        }

        /// Checks that the layout fits a row of `width` columns and that the
        /// fields do not overlap.
        pub fn validate(&self, width: usize) -> Result<(), CorrectionError> {
            if self.gate_count == 0 {
                return Err(CorrectionError::InvalidConfiguration(
                    "at least one gate is required".into(),
                ));
            }
            let gates_end = self.gate_start(self.gate_count);
            if gates_end > width {
                return Err(CorrectionError::InvalidConfiguration(format!(
                    "gate count {} exceeds the {} gates encoded in rows of {} columns",
                    self.gate_count,
                    width.saturating_sub(self.gate_column) / POSITION_DIMS,
                    width
                )));
            }
            if self.time_column >= width {
                return Err(CorrectionError::InvalidConfiguration(format!(
                    "time column {} is outside rows of {} columns",
                    self.time_column, width
                )));
            }
            let tooltip_end = self.tooltip_column + POSITION_DIMS;
            if tooltip_end > width {
                return Err(CorrectionError::InvalidConfiguration(format!(
                    "tooltip columns {}..{} are outside rows of {} columns",
                    self.tooltip_column, tooltip_end, width
                )));
            }
            if let Some(rating) = self.rating_column {
                if rating >= width {
                    return Err(CorrectionError::InvalidConfiguration(format!(
                        "rating column {} is outside rows of {} columns",
                        rating, width
                    )));
                }
            }

            let overlaps = |a: (usize, usize), b: (usize, usize)| a.0 < b.1 && b.0 < a.1;
            let time = (self.time_column, self.time_column + 1);
            let gates = (self.gate_column, gates_end);
            let tooltip = (self.tooltip_column, tooltip_end);
            if overlaps(time, gates) || overlaps(time, tooltip) || overlaps(gates, tooltip) {
                return Err(CorrectionError::InvalidConfiguration(format!(
                    "overlapping columns: time {:?}, gates {:?}, tooltip {:?}",
                    time, gates, tooltip
                )));
            }
            if let Some(column) = self.rating_column {
                let rating = (column, column + 1);
                if [time, gates, tooltip].iter().any(|&field| overlaps(rating, field)) {
                    return Err(CorrectionError::InvalidConfiguration(format!(
                        "rating column {} overlaps time {:?}, gates {:?} or tooltip {:?}",
                        column, time, gates, tooltip
                    )));
                }
            }
            Ok(())
        }
    }

    /// Parameters of the gate motion and of the corrector.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Parameters {
        /// Real duration of the path in seconds. Path time is normalized to [0, 1]
        /// and scaled by this value.
        pub total_duration: f64,

        /// Gate oscillation frequency, in cycles per total duration.
        pub gate_frequency: f64,

        /// Gate oscillation amplitude in meters. Zero means static gates.
        pub gate_amplitude: f64,

        /// Axis (0 = x, 1 = y, 2 = z) along which the gates oscillate.
        pub oscillation_axis: usize,

        /// Maximal magnitude of the tooltip acceleration, m/s².
        pub max_acceleration: f64,

        /// Column layout of the path.
        pub layout: PathLayout,
    }

    impl Default for Parameters {
        fn default() -> Self {
            Parameters {
                total_duration: 20.0,
                gate_frequency: 4.0,
                gate_amplitude: 0.02,
                oscillation_axis: 1,
                max_acceleration: 1.0,
                layout: PathLayout::default(),
            }
        }
    }

    impl Parameters {
        /// Gates that stay where they were recorded.
        pub fn static_gates() -> Self {
            Parameters {
                gate_amplitude: 0.0,
                ..Default::default()
            }
        }

        /// Checks value ranges. The layout is checked against the path separately.
        pub fn validate(&self) -> Result<(), CorrectionError> {
            if !(self.total_duration.is_finite() && self.total_duration > 0.0) {
                return Err(CorrectionError::InvalidConfiguration(format!(
                    "total duration must be positive (got {})",
                    self.total_duration
                )));
            }
            if !(self.max_acceleration.is_finite() && self.max_acceleration >= 0.0) {
                return Err(CorrectionError::InvalidConfiguration(format!(
                    "max acceleration must be non-negative (got {})",
                    self.max_acceleration
                )));
            }
            if !self.gate_frequency.is_finite() || !self.gate_amplitude.is_finite() {
                return Err(CorrectionError::InvalidConfiguration(format!(
                    "gate frequency ({}) and amplitude ({}) must be finite",
                    self.gate_frequency, self.gate_amplitude
                )));
            }
            if self.oscillation_axis >= POSITION_DIMS {
                return Err(CorrectionError::InvalidConfiguration(format!(
                    "oscillation axis must be 0, 1 or 2 (got {})",
                    self.oscillation_axis
                )));
            }
            Ok(())
        }

        /// Convert to string yaml representation (quick viewing, etc).
        pub fn to_yaml(&self) -> String {
            let rating = match self.layout.rating_column {
                Some(column) => column.to_string(),
                None => "~".to_string(),
            };
            format!(
                "path_correction_parameters:\n  \
              total_duration: {:?}\n  \
              gate_frequency: {:?}\n  \
              gate_amplitude: {:?}\n  \
              oscillation_axis: {}\n  \
              max_acceleration: {:?}\n\
            path_layout:\n  \
              time_column: {}\n  \
              gate_column: {}\n  \
              gate_count: {}\n  \
              tooltip_column: {}\n  \
              rating_column: {}\n",
                self.total_duration,
                self.gate_frequency,
                self.gate_amplitude,
                self.oscillation_axis,
                self.max_acceleration,
                self.layout.time_column,
                self.layout.gate_column,
                self.layout.gate_count,
                self.layout.tooltip_column,
                rating
            )
        }
    }
}
