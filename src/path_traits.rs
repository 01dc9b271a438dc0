extern crate nalgebra as na;

use na::{Isometry3, Vector3};
use crate::path::Path;

/// Cartesian position of the tooltip or of a gate, in meters.
pub type Position = Vector3<f64>;

/// Pose of the tooltip. Recorded paths carry no orientation, so poses built from
/// path samples have identity rotation.
/// ```
/// extern crate nalgebra as na;
/// use na::{Isometry3, Translation3, UnitQuaternion};
///
/// type Pose = Isometry3<f64>;
///
/// let pose = Pose::from_parts(Translation3::new(0.1, 0.0, 0.05), UnitQuaternion::identity());
/// ```
pub type Pose = Isometry3<f64>;

/// Number of joints of the arm the joint velocities are computed for.
pub const ARM_JOINTS: usize = 7;

/// Joint velocities in rad/s, one value per joint of the arm.
pub type JointVelocities = [f64; ARM_JOINTS];

/// Joint velocities when the arm stays still.
pub const JOINTS_AT_REST: JointVelocities = [0.0; ARM_JOINTS];

/// Number of Cartesian dimensions of every gate and of the tooltip.
pub const POSITION_DIMS: usize = 3;

/// Maps a requested tooltip movement into joint space.
pub trait InverseKinematics {
    /// Joint velocities moving the tooltip from `pos_init` to `pos_goal`.
    fn calc_inverse_kinematics(&self, pos_init: &Pose, pos_goal: &Pose) -> JointVelocities;
}

/// Inverse kinematics that never moves the arm. Stands in until a real solver
/// for the target arm is plugged in.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullKinematics;

impl InverseKinematics for NullKinematics {
    fn calc_inverse_kinematics(&self, _pos_init: &Pose, _pos_goal: &Pose) -> JointVelocities {
        JOINTS_AT_REST
    }
}

/// Current position of a gate that may move after the path has been recorded.
pub trait GateMotion {
    /// Position of gate `gate` at time `t` (seconds since path start), given
    /// its `baseline` position as recorded in the first sample.
    fn gate_position(&self, baseline: &Position, gate: usize, t: f64) -> Position;
}

/// Presentation layer that displays a path with optionally trimmed-off parts.
pub trait PathView {
    fn redraw(&mut self, path: &Path, prefix: Option<&Path>, suffix: Option<&Path>, title: &str);
}

#[cfg(test)]
mod tests {
    use super::*;
    use na::Translation3;

    #[test]
    fn test_null_kinematics_stays_at_rest() {
        let from = Pose::translation(0.0, 0.0, 0.0);
        let to = Pose::from_parts(Translation3::new(0.1, 0.2, 0.3), na::UnitQuaternion::identity());
        assert_eq!(NullKinematics.calc_inverse_kinematics(&from, &to), JOINTS_AT_REST);
    }
}
