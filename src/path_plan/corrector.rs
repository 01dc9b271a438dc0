//! Causal correction of a recorded path towards moving gates
//!
//! The corrector walks the recorded path once, in time order. At every step the
//! next recorded sample is shifted by how far the gate of the active segment has
//! moved from where it was recorded, and the acceleration needed for this shift is
//! limited in magnitude. The resulting velocity is integrated forward, and the
//! difference between the corrected and the recorded displacement is carried to
//! later steps as the cumulative offset.

use tracing::{debug, info, trace};

use crate::annotations::{AnnotatedPosition, StepFlags};
use crate::correction_error::CorrectionError;
use crate::gate_trajectory::{gate_baseline, OscillatingGate};
use crate::parameters::path_correction::Parameters;
use crate::path::Path;
use crate::path_traits::{GateMotion, InverseKinematics, JointVelocities, Pose, Position};
use crate::segments::{detect_segments, Segments};
use crate::utils::path_correction::is_valid;

/// Gate displacement below this counts as no motion (sine round-off at whole periods).
const GATE_MOTION_EPSILON: f64 = 1e-12;

/// State threaded through the correction, one update per step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrajectoryState {
    /// Sum of all corrections so far, added to recorded positions.
    pub offset: Position,
    /// Velocity of the previous corrected step.
    pub velocity: Position,
}

/// Corrected tooltip positions, one less than samples in the path: the last
/// sample has no successor to correct against.
#[derive(Debug, Clone)]
pub struct CorrectedPath {
    pub steps: Vec<AnnotatedPosition>,
}

impl CorrectedPath {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn positions(&self) -> Vec<Position> {
        self.steps.iter().map(|step| step.position).collect()
    }

    /// Number of steps where the acceleration limit engaged.
    pub fn limited_steps(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| step.flags.contains(StepFlags::ACCEL_LIMITED))
            .count()
    }

    /// Largest acceleration magnitude over all steps.
    pub fn peak_acceleration(&self) -> f64 {
        self.steps
            .iter()
            .map(|step| step.acceleration.norm())
            .fold(0.0, f64::max)
    }
}

/// Corrects recorded paths so that they follow gates moving according to `motion`.
#[derive(Debug, Clone)]
pub struct Corrector<M: GateMotion = OscillatingGate> {
    /// Seconds, path time is normalized to [0, 1] and scaled by this.
    pub total_duration: f64,

    /// Maximal acceleration magnitude, m/s².
    pub max_acceleration: f64,

    pub motion: M,
}

impl Corrector<OscillatingGate> {
    /// Corrector with gates oscillating as configured in the parameters.
    pub fn new(parameters: &Parameters) -> Result<Self, CorrectionError> {
        Self::with_motion(parameters, OscillatingGate::new(parameters))
    }
}

impl<M: GateMotion> Corrector<M> {
    pub fn with_motion(parameters: &Parameters, motion: M) -> Result<Self, CorrectionError> {
        parameters.validate()?;
        Ok(Corrector {
            total_duration: parameters.total_duration,
            max_acceleration: parameters.max_acceleration,
            motion,
        })
    }

    /// Detects the segments of the path and corrects it.
    pub fn correct(&self, path: &Path) -> Result<CorrectedPath, CorrectionError> {
        let segments = detect_segments(path)?;
        self.correct_segmented(path, &segments)
    }

    /// Corrects the path using already known segments.
    pub fn correct_segmented(
        &self,
        path: &Path,
        segments: &Segments,
    ) -> Result<CorrectedPath, CorrectionError> {
        if path.len() < 2 {
            return Err(CorrectionError::EmptyPath { found: path.len() });
        }
        if segments.len() != path.layout().gate_count {
            return Err(CorrectionError::InvalidConfiguration(format!(
                "{} segments for {} gates",
                segments.len(),
                path.layout().gate_count
            )));
        }

        let steps = path.len() - 1;
        let (_, corrected) = (0..steps).try_fold(
            (TrajectoryState::default(), Vec::with_capacity(steps)),
            |(state, mut corrected), i| {
                let (next, step) = self.step(path, segments, &state, i)?;
                corrected.push(step);
                Ok::<_, CorrectionError>((next, corrected))
            },
        )?;

        let corrected = CorrectedPath { steps: corrected };
        info!(
            "Corrected {} steps over {} segments, {} acceleration limited, peak {:.4} m/s²",
            corrected.len(),
            segments.len(),
            corrected.limited_steps(),
            corrected.peak_acceleration()
        );
        Ok(corrected)
    }

    /// Correction of the step from sample `i` to sample `i + 1`.
    fn step(
        &self,
        path: &Path,
        segments: &Segments,
        state: &TrajectoryState,
        i: usize,
    ) -> Result<(TrajectoryState, AnnotatedPosition), CorrectionError> {
        let segment = segments.segment_of(i);

        let t_curr = path.time(i) * self.total_duration;
        let t_next = path.time(i + 1) * self.total_duration;
        let x_curr = path.tooltip(i) + state.offset;
        let x_next = path.tooltip(i + 1) + state.offset;

        let dt = t_next - t_curr;
        if !(dt > 0.0) {
            return Err(CorrectionError::DegenerateTimestep { index: i, dt });
        }
        let dx = x_next - x_curr;
        let recorded_velocity = dx / dt;

        // The last segment ends past the path, its waypoint is the last sample.
        let recorded_target = path.tooltip(segments.end(segment).min(path.len() - 1));
        let x_target = recorded_target + state.offset;

        let baseline = gate_baseline(path, segment);
        let x_gate = self.motion.gate_position(&baseline, segment, t_curr);

        // How the recorded path missed the gate. Only gate movement is chased.
        let approach_miss = baseline - recorded_target;
        let x_new = x_next + (x_gate - x_target - approach_miss);

        let v_new = (x_new - x_curr) / dt;
        let mut a_new = (v_new - state.velocity) / dt;

        let mut flags = StepFlags::NONE;
        if i == 0 || segments.segment_of(i - 1) != segment {
            flags |= StepFlags::SEGMENT_START;
            debug!("Step {} enters segment {}", i, segment);
        }
        if segment + 1 == segments.len() {
            flags |= StepFlags::FINAL_SEGMENT;
        }
        if (x_gate - baseline).norm() > GATE_MOTION_EPSILON {
            flags |= StepFlags::GATE_CHASE;
        }

        let a_norm = a_new.norm();
        let a_clipped = a_norm.clamp(-self.max_acceleration, self.max_acceleration);
        if a_norm != 0.0 {
            a_new *= a_clipped / a_norm;
            if a_clipped < a_norm {
                flags |= StepFlags::ACCEL_LIMITED;
                trace!("Step {}: acceleration {:.4} limited to {:.4}", i, a_norm, a_clipped);
            }
        } else {
            flags |= StepFlags::ZERO_ACCEL;
        }

        let v_new = state.velocity + a_new * dt;
        let x_new = x_curr + v_new * dt;
        if !is_valid(&x_new) {
            return Err(CorrectionError::InvalidConfiguration(format!(
                "non-finite tooltip or gate position around sample {}",
                i
            )));
        }

        let next = TrajectoryState {
            offset: state.offset + (v_new * dt - dx),
            velocity: v_new,
        };
        let step = AnnotatedPosition {
            position: x_new,
            velocity: v_new,
            acceleration: a_new,
            recorded_velocity,
            segment,
            flags,
        };
        Ok((next, step))
    }
}

/// Joint velocities that move the arm along the corrected path, starting from
/// `start` (the first recorded tooltip position). One value per corrected step.
pub fn joint_velocities(
    corrected: &CorrectedPath,
    start: &Position,
    kinematics: &impl InverseKinematics,
) -> Vec<JointVelocities> {
    let mut from = Pose::translation(start.x, start.y, start.z);
    corrected
        .steps
        .iter()
        .map(|step| {
            let to = Pose::translation(step.position.x, step.position.y, step.position.z);
            let velocities = kinematics.calc_inverse_kinematics(&from, &to);
            from = to;
            velocities
        })
        .collect()
}
