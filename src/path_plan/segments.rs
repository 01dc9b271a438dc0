//! Segment detection: splits the path at the closest approach to every gate

use std::ops::Range;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use crate::correction_error::CorrectionError;
use crate::path::Path;

/// End indices of the path segments, one per gate. Segment `g` spans from the end
/// of segment `g - 1` (or 0) to `ends[g]`, exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segments {
    ends: Vec<usize>,
}

impl Segments {
    pub fn ends(&self) -> &[usize] {
        &self.ends
    }

    pub fn len(&self) -> usize {
        self.ends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    /// End index of the given segment.
    pub fn end(&self, segment: usize) -> usize {
        self.ends[segment]
    }

    /// Half-open sample ranges of all segments. Consecutive ranges share their
    /// boundary, so together they cover the whole path.
    pub fn ranges(&self) -> Vec<Range<usize>> {
        let mut start = 0;
        self.ends
            .iter()
            .map(|&end| {
                let range = start..end.max(start);
                start = range.end;
                range
            })
            .collect()
    }

    /// Segment the sample belongs to: the first segment whose end is not before it.
    /// Falls back to the first segment if none qualifies.
    pub fn segment_of(&self, sample: usize) -> usize {
        self.ends.iter().position(|&end| sample <= end).unwrap_or(0)
    }
}

/// Index of the sample where the tooltip comes closest to the gate. The gate
/// position is read from the same sample. Ties resolve to the earliest sample.
fn closest_sample(path: &Path, gate: usize) -> usize {
    let mut closest = 0;
    let mut min_distance = f64::INFINITY;
    for row in 0..path.len() {
        let distance = (path.tooltip(row) - path.gate(row, gate)).norm();
        if distance < min_distance {
            min_distance = distance;
            closest = row;
        }
    }
    closest
}

fn segment_end(path: &Path, gate: usize) -> usize {
    // The last segment always runs to the end of the path.
    if gate == path.layout().gate_count - 1 {
        path.len()
    } else {
        closest_sample(path, gate)
    }
}

/// Detects one segment per gate. Every segment except the last ends at the
/// sample closest to its gate; the last ends at the path length.
pub fn detect_segments(path: &Path) -> Result<Segments, CorrectionError> {
    let layout = path.layout();
    layout.validate(path.matrix().ncols())?;
    if path.is_empty() {
        return Err(CorrectionError::EmptyPath { found: 0 });
    }

    #[cfg(feature = "parallel")]
    let ends: Vec<usize> = (0..layout.gate_count)
        .into_par_iter()
        .map(|gate| segment_end(path, gate))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let ends: Vec<usize> = (0..layout.gate_count)
        .map(|gate| segment_end(path, gate))
        .collect();

    if ends.windows(2).any(|pair| pair[0] > pair[1]) {
        debug!("Segment ends are not monotonic: {:?}", ends);
    }
    debug!("Detected {} segments ending at {:?}", ends.len(), ends);
    Ok(Segments { ends })
}

/// Distance between each gate and the tooltip at the end of that gate's segment.
/// The end of the last segment is past the path, its last sample is used instead.
pub fn closest_approaches(path: &Path, segments: &Segments) -> Vec<f64> {
    segments
        .ends()
        .iter()
        .enumerate()
        .map(|(gate, &end)| {
            let row = end.min(path.len() - 1);
            (path.gate(row, gate) - path.tooltip(row)).norm()
        })
        .collect()
}
