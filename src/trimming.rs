//! Selection state of interactive path trimming
//!
//! The trimming view owns a `TrimSelection` and forwards its slider and button
//! events to it. Each slider change asks the view to redraw the kept part of the
//! path together with the parts that would be cut off.

use crate::path::Path;
use crate::path_traits::PathView;

const TRIM_TITLE: &str = "Trim Path";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrimSelection {
    /// First kept sample.
    pub start: usize,
    /// First sample cut off at the end.
    pub end: usize,
    /// Set once the user accepts the selection.
    pub confirmed: bool,
}

impl TrimSelection {
    /// Initial selection keeping all samples but the last.
    pub fn new(path: &Path) -> Self {
        TrimSelection {
            start: 0,
            end: path.len().saturating_sub(1),
            confirmed: false,
        }
    }

    fn slider_index(value: f64, path: &Path) -> usize {
        if value.is_finite() && value > 0.0 {
            (value.round() as usize).min(path.len())
        } else {
            0
        }
    }

    /// Kept part, prefix and suffix cut off by the current selection.
    pub fn parts(&self, path: &Path) -> (Path, Path, Path) {
        let end = self.end.max(self.start);
        (
            path.rows(self.start, end),
            path.rows(0, self.start),
            path.rows(end, path.len()),
        )
    }

    fn redraw(&self, path: &Path, view: &mut impl PathView) {
        let (kept, prefix, suffix) = self.parts(path);
        view.redraw(
            &kept,
            (!prefix.is_empty()).then_some(&prefix),
            (!suffix.is_empty()).then_some(&suffix),
            TRIM_TITLE,
        );
    }

    /// Start slider moved.
    pub fn start_changed(&mut self, value: f64, path: &Path, view: &mut impl PathView) {
        self.start = Self::slider_index(value, path);
        self.redraw(path, view);
    }

    /// End slider moved.
    pub fn end_changed(&mut self, value: f64, path: &Path, view: &mut impl PathView) {
        self.end = Self::slider_index(value, path);
        self.redraw(path, view);
    }

    /// Trim button clicked.
    pub fn confirm(&mut self) {
        self.confirmed = true;
    }

    /// The trimmed path if the selection was confirmed, otherwise the path as is.
    pub fn apply(&self, path: &Path) -> Path {
        if self.confirmed {
            self.parts(path).0
        } else {
            path.clone()
        }
    }
}
