//! Helper functions

use crate::annotations::AnnotatedPosition;
use crate::path_traits::Position;

/// Checks position validity
pub(crate) mod path_correction {
    use crate::path_traits::Position;

    /// Checks if all coordinates are finite
    pub fn is_valid(position: &Position) -> bool {
        position.iter().all(|&x| x.is_finite())
    }
}

/// Print corrected steps with their annotations.
pub fn dump_steps(steps: &[AnnotatedPosition]) {
    for (i, step) in steps.iter().enumerate() {
        println!("{:5}: {:?}", i, step);
    }
}

/// Print segment ranges and the closest approach to their gate.
pub fn dump_segments(ends: &[usize], approaches: &[f64]) {
    let mut start = 0;
    for (gate, (&end, approach)) in ends.iter().zip(approaches).enumerate() {
        println!(
            "Segment {}: samples {}..{}, closest approach {:.2} mm",
            gate + 1,
            start,
            end,
            approach * 1000.0
        );
        start = end;
    }
}

/// Largest distance between corresponding positions.
pub fn max_deviation(a: &[Position], b: &[Position]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(pa, pb)| (pa - pb).norm())
        .fold(0.0, f64::max)
}
