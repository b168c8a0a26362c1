//! Leaf-cell counts and area measures for cell unions.

use std::f64::consts::PI;

use s2::cell::Cell;
use s2::cellid::MAX_LEVEL;
use s2::metric::{AVG_AREAMETRIC, MIN_WIDTHMETRIC};

use crate::core::cell_union::CellUnion;

/// Minimum edge separation of a cell at a given level, for the quadratic
/// cube-face projection.
pub(crate) const MIN_WIDTH: s2::metric::Metric = MIN_WIDTHMETRIC;

/// Average area of a cell at a given level; every level partitions the
/// sphere, so the derivative is a sixth of the full `4π` per face.
pub(crate) const AVG_AREA: s2::metric::Metric = AVG_AREAMETRIC;

impl CellUnion {
    /// The number of leaf cells covered by the union, at most `6 · 4^30` for
    /// the whole sphere.
    #[must_use]
    pub fn leaf_cells_covered(&self) -> u64 {
        self.ids
            .iter()
            .map(|id| 1u64 << ((MAX_LEVEL - id.level()) << 1))
            .sum()
    }

    /// Approximates the area by the number of leaves covered times the
    /// average leaf area.
    ///
    /// Average areas ignore cell distortion, so this can be off by up to a
    /// factor of 1.7; it is however proportional to
    /// [`CellUnion::leaf_cells_covered`] and therefore exact for *relative*
    /// comparisons between unions.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "leaf counts are at most 6*4^30; the result is an approximation anyway"
    )]
    pub fn average_based_area(&self) -> f64 {
        AVG_AREA.value(MAX_LEVEL as _) * self.leaf_cells_covered() as f64
    }

    /// Approximates the area by summing each cell's approximate area, which
    /// accounts for cell distortion.
    #[must_use]
    pub fn approx_area(&self) -> f64 {
        self.ids.iter().map(|id| Cell::from(id).approx_area()).sum()
    }

    /// Computes the area by summing each cell's exact area.
    #[must_use]
    pub fn exact_area(&self) -> f64 {
        self.ids.iter().map(|id| Cell::from(id).exact_area()).sum()
    }
}
