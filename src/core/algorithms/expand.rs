//! Neighbor-based dilation of cell unions.

use s2::cellid::{CellID, MAX_LEVEL};
use s2::s1::angle::Angle;

use crate::core::cell_union::CellUnion;
use crate::geometry::metrics::MIN_WIDTH;

impl CellUnion {
    /// Expands the union by adding a rim of cells at `level` around its
    /// boundary.
    ///
    /// Each cell at or below `level` contributes all `level` cells abutting
    /// it. A cell finer than `level` is first promoted to its `level`
    /// ancestor (which is also added), since a `level` cell rarely abuts a
    /// smaller cell.
    ///
    /// The output size is exponential in the difference between `level` and
    /// the finest input cell: expanding a level-10 cell at level 20 adds on
    /// the order of 4000 cells. [`CellUnion::expand_by_radius`] bounds that
    /// gap and is easier to use for most callers.
    pub fn expand_at_level(&mut self, level: u64) {
        self.debug_assert_normalized();
        let mut output: Vec<CellID> = Vec::new();
        let mut i = self.ids.len();
        while i > 0 {
            i -= 1;
            let mut id = self.ids[i];
            if id.level() > level {
                id = id.parent(level);
                // The promoted cell may swallow earlier (finer) cells; skip
                // them rather than generating their neighbors again.
                while i > 0 && id.contains(&self.ids[i - 1]) {
                    i -= 1;
                }
            }
            output.push(id);
            output.extend(id.all_neighbors(level));
        }
        self.init_swap(&mut output);
    }

    /// Expands the union so that it contains all points within `min_radius`
    /// of the original region, without using cells more than
    /// `max_level_diff` levels finer than the coarsest input cell.
    ///
    /// `max_level_diff` trades accuracy against output size when a large
    /// region is expanded by a small amount: with `max_level_diff == 4` the
    /// region is dilated by at least `min_radius` but never by less than
    /// roughly 1/16 the width of its largest cell. In the worst case the
    /// output is `4 · (1 + 2^max_level_diff)` times larger than the input.
    pub fn expand_by_radius(&mut self, min_radius: Angle, max_level_diff: u64) {
        let coarsest = self.ids.iter().map(CellID::level).min().unwrap_or(MAX_LEVEL);
        // The finest level whose cells are everywhere at least min_radius
        // wide; neighbors at this level dilate by the full radius.
        let radius_level = MIN_WIDTH.max_level(min_radius.rad()) as u64;
        if radius_level == 0 && min_radius.rad() > MIN_WIDTH.value(0) {
            // The expansion exceeds the width of a face cell; one face-level
            // rim is not enough, so expand twice.
            self.expand_at_level(0);
        }
        self.expand_at_level(radius_level.min(coarsest + max_level_diff));
    }
}
