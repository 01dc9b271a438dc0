use bitflags::bitflags;
use std::fmt;

use crate::path_traits::Position;

bitflags! {
    /// Flags that can be set on corrected steps in the output
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct StepFlags: u32 {
        const NONE =                0b0000_0000;

        /// First step of a segment (the previous step belonged to another segment).
        const SEGMENT_START =       0b0000_0001;

        /// The step belongs to the last segment, the one running to the end of the path.
        const FINAL_SEGMENT =       0b0000_0010;

        /// The gate has moved away from its recorded position, and the step has
        /// been redirected towards it.
        const GATE_CHASE =          0b0000_0100;

        /// The acceleration needed to follow the gate exceeded the limit and has been
        /// scaled down to it. The step lags behind the ideal correction.
        const ACCEL_LIMITED =       0b0000_1000;

        /// Zero acceleration, nothing to rescale.
        const ZERO_ACCEL =          0b0001_0000;
    }
}

/// Corrected tooltip position with the kinematic diagnostics of the step leading to it.
#[derive(Clone, Copy)]
pub struct AnnotatedPosition {
    pub position: Position,

    /// Velocity of the step after correction, m/s.
    pub velocity: Position,

    /// Acceleration of the step after clamping, m/s².
    pub acceleration: Position,

    /// Velocity of the recorded path over this step. Diagnostic only, it does not
    /// feed the correction.
    pub recorded_velocity: Position,

    /// Index of the segment (and gate) active during this step.
    pub segment: usize,

    pub flags: StepFlags,
}

fn flag_representation(flags: &StepFlags) -> String {
    const FLAG_MAP: &[(StepFlags, &str)] = &[
        (StepFlags::SEGMENT_START, "SEGMENT_START"),
        (StepFlags::FINAL_SEGMENT, "FINAL_SEGMENT"),
        (StepFlags::GATE_CHASE, "GATE_CHASE"),
        (StepFlags::ACCEL_LIMITED, "ACCEL_LIMITED"),
        (StepFlags::ZERO_ACCEL, "ZERO_ACCEL"),
    ];

    FLAG_MAP
        .iter()
        .filter(|(flag, _)| flags.contains(*flag))
        .map(|(_, name)| *name)
        .collect::<Vec<_>>()
        .join(" | ")
}

impl fmt::Debug for AnnotatedPosition {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{} segment {}: [{:.4}, {:.4}, {:.4}], |v| {:.4}, |a| {:.4}",
            flag_representation(&self.flags),
            self.segment,
            self.position.x,
            self.position.y,
            self.position.z,
            self.velocity.norm(),
            self.acceleration.norm()
        )
    }
}
