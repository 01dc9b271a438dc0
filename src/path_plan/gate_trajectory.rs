//! Moving gates: where the gate of the active segment is at a given time

use std::f64::consts::PI;

use crate::parameters::path_correction::Parameters;
use crate::path::Path;
use crate::path_traits::{GateMotion, Position};

/// Gate oscillating sinusoidally along one axis around its recorded position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscillatingGate {
    /// Cycles per `total_duration`.
    pub frequency: f64,
    /// Meters.
    pub amplitude: f64,
    pub axis: usize,
    /// Seconds.
    pub total_duration: f64,
}

impl OscillatingGate {
    pub fn new(parameters: &Parameters) -> Self {
        OscillatingGate {
            frequency: parameters.gate_frequency,
            amplitude: parameters.gate_amplitude,
            axis: parameters.oscillation_axis,
            total_duration: parameters.total_duration,
        }
    }

    /// Displacement of the gate from its baseline along the oscillation axis.
    pub fn displacement(&self, t: f64) -> f64 {
        self.amplitude * (2.0 * PI * self.frequency * t / self.total_duration).sin()
    }
}

impl GateMotion for OscillatingGate {
    fn gate_position(&self, baseline: &Position, _gate: usize, t: f64) -> Position {
        let mut position = *baseline;
        position[self.axis] += self.displacement(t);
        position
    }
}

/// Baseline of the gate: its position in the first sample of the path. Later
/// samples are not consulted.
pub fn gate_baseline(path: &Path, gate: usize) -> Position {
    path.gate(0, gate)
}
