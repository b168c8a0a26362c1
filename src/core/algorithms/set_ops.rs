//! Set algebra on normalized cell unions.
//!
//! All three binary operations consume two normal-form unions and return a
//! fresh normal-form union. Because cells of the hierarchy are either nested
//! or disjoint, intersection and containment reduce to interval arithmetic
//! on the leaf ranges `[range_min, range_max]`, and the sorted sequences can
//! be merged in a single pass.

use s2::cellid::CellID;

use crate::core::cell_union::CellUnion;

impl CellUnion {
    /// Returns the union of `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &CellUnion) -> CellUnion {
        self.debug_assert_normalized();
        other.debug_assert_normalized();
        let mut ids = Vec::with_capacity(self.ids.len() + other.ids.len());
        ids.extend_from_slice(&self.ids);
        ids.extend_from_slice(&other.ids);
        CellUnion::from_ids(ids)
    }

    /// Returns the intersection of `self` and `other`.
    #[must_use]
    pub fn intersection(&self, other: &CellUnion) -> CellUnion {
        self.debug_assert_normalized();
        other.debug_assert_normalized();
        let mut ids = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < self.ids.len() && j < other.ids.len() {
            let a = self.ids[i];
            let b = other.ids[j];
            if a.range_max() < b.range_min() {
                i += 1;
            } else if b.range_max() < a.range_min() {
                j += 1;
            } else if a.contains(&b) {
                // b may be followed by more descendants of a.
                ids.push(b);
                j += 1;
            } else if b.contains(&a) {
                ids.push(a);
                i += 1;
            } else {
                // Cells are either nested or disjoint, so overlapping but
                // non-nested ranges mean an input skipped normalization.
                debug_assert!(false, "intersection inputs must be normalized");
                if a < b {
                    i += 1;
                } else {
                    j += 1;
                }
            }
        }
        // The merge emits sorted, disjoint cells, but nothing above prevents
        // a complete sibling family in the output, so collapse once more.
        let mut out = CellUnion { ids };
        out.normalize();
        out
    }

    /// Returns the intersection of `self` with a single cell. This is useful
    /// for splitting a union into chunks.
    ///
    /// The result is at most `id` itself (when some stored cell covers it)
    /// or the contiguous run of stored descendants of `id`.
    #[must_use]
    pub fn intersection_with_cellid(&self, id: CellID) -> CellUnion {
        self.debug_assert_normalized();
        if self.contains_cellid(id) {
            return CellUnion { ids: vec![id] };
        }
        let min = id.range_min();
        let max = id.range_max();
        let start = self.ids.partition_point(|&c| c < min);
        let ids: Vec<CellID> = self.ids[start..]
            .iter()
            .copied()
            .take_while(|&c| c <= max)
            .collect();
        // A contiguous slice of a normalized sequence is itself normalized.
        CellUnion { ids }
    }

    /// Returns the difference `self \ other`.
    #[must_use]
    pub fn difference(&self, other: &CellUnion) -> CellUnion {
        self.debug_assert_normalized();
        other.debug_assert_normalized();
        let mut ids = Vec::new();
        for &id in &self.ids {
            difference_internal(id, other, &mut ids);
        }
        let mut out = CellUnion { ids };
        out.normalize();
        out
    }
}

/// Emits the part of `cell` not covered by `other`, subdividing only where
/// `other` cuts into it.
fn difference_internal(cell: CellID, other: &CellUnion, out: &mut Vec<CellID>) {
    if !other.intersects_cellid(cell) {
        out.push(cell);
    } else if !other.contains_cellid(cell) {
        for child in cell.children() {
            difference_internal(child, other, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face(f: u64) -> CellID {
        CellID::from_face(f)
    }

    #[test]
    fn union_merges_and_collapses() {
        let kids = face(0).children();
        let x = CellUnion::from_ids(vec![kids[0], kids[1]]);
        let y = CellUnion::from_ids(vec![kids[2], kids[3], face(4)]);
        let merged = x.union(&y);
        assert_eq!(merged.cells(), &[face(0), face(4)]);
    }

    #[test]
    fn union_with_empty_is_identity() {
        let x = CellUnion::from_ids(vec![face(1), face(2)]);
        let empty = CellUnion::new();
        assert_eq!(x.union(&empty), x);
        assert_eq!(empty.union(&x), x);
    }

    #[test]
    fn intersection_of_nested_cells_keeps_the_finer() {
        let grandchild = face(1).children()[2].children()[1];
        let x = CellUnion::from_ids(vec![face(1), face(2)]);
        let y = CellUnion::from_ids(vec![grandchild, face(2)]);
        let result = x.intersection(&y);
        assert_eq!(result.cells(), &[grandchild, face(2)]);
    }

    #[test]
    fn intersection_with_empty_annihilates() {
        let x = CellUnion::from_ids(vec![face(0)]);
        let empty = CellUnion::new();
        assert!(x.intersection(&empty).is_empty());
        assert!(empty.intersection(&x).is_empty());
    }

    #[test]
    fn intersection_with_a_coarser_union_projects_the_finer() {
        let kids = face(0).children();
        let x = CellUnion::from_ids(vec![kids[0], kids[1], kids[2]]);
        let y = CellUnion::from_ids(vec![face(0)]);
        let result = x.intersection(&y);
        assert_eq!(result, x);
        assert!(result.is_normalized());
    }

    #[test]
    fn intersection_with_contained_cell_returns_the_cell() {
        let x = CellUnion::from_ids(vec![face(1), face(2)]);
        let inner = face(1).children()[2];
        let result = x.intersection_with_cellid(inner);
        assert_eq!(result.cells(), &[inner]);
    }

    #[test]
    fn intersection_with_coarse_cell_returns_descendant_run() {
        let kids = face(3).children();
        let fine = kids[1].children();
        let x = CellUnion::from_ids(vec![kids[0], fine[0], fine[3], face(4)]);
        let result = x.intersection_with_cellid(kids[1]);
        assert_eq!(result.cells(), &[fine[0], fine[3]]);

        // Disjoint cell: empty result.
        assert!(x.intersection_with_cellid(face(5)).is_empty());
    }

    #[test]
    fn difference_carves_out_a_descendant() {
        // Removing one grandchild from a face leaves its three level-2
        // siblings and the three level-1 cells that do not contain it.
        let child = face(0).children()[1];
        let grandchild = child.children()[0];
        let x = CellUnion::from_ids(vec![face(0)]);
        let y = CellUnion::from_ids(vec![grandchild]);

        let result = x.difference(&y);
        let mut expected: Vec<CellID> = face(0)
            .children()
            .iter()
            .filter(|&&c| c != child)
            .copied()
            .collect();
        expected.extend(child.children().iter().filter(|&&c| c != grandchild));
        expected.sort_unstable();
        assert_eq!(result.cells(), expected.as_slice());
        assert_eq!(result.len(), 6);
        assert!(result.is_normalized());
    }

    #[test]
    fn difference_laws() {
        let kids = face(2).children();
        let x = CellUnion::from_ids(vec![kids[0], kids[1], kids[2]]);
        let y = CellUnion::from_ids(vec![kids[1], kids[3]]);

        let diff = x.difference(&y);
        assert!(diff.intersection(&y).is_empty());
        assert_eq!(diff.union(&x.intersection(&y)), x);

        // Subtracting everything leaves nothing.
        assert!(x.difference(&x).is_empty());
        // Subtracting nothing changes nothing.
        assert_eq!(x.difference(&CellUnion::new()), x);
    }
}
