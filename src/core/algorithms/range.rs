//! Minimal covers of contiguous leaf-cell ranges.

use s2::cellid::CellID;

use crate::core::cell_union::{CellUnion, CellUnionError};

impl CellUnion {
    /// Builds the minimal normalized union covering exactly the leaf cells
    /// from `min_id` through `max_id`, inclusive.
    ///
    /// The cover is produced in Hilbert order by repeatedly emitting the
    /// largest cell that starts at the current position and still fits in
    /// the remaining window; cells grow toward the middle of the range and
    /// shrink again near its end.
    ///
    /// # Errors
    ///
    /// Returns [`CellUnionError::NonLeafRange`] unless both bounds are leaf
    /// cells, and [`CellUnionError::InvertedRange`] if `min_id > max_id`.
    pub fn from_min_max(min_id: CellID, max_id: CellID) -> Result<Self, CellUnionError> {
        if !min_id.is_leaf() || !max_id.is_leaf() {
            return Err(CellUnionError::NonLeafRange {
                min: min_id,
                max: max_id,
            });
        }
        if min_id > max_id {
            return Err(CellUnionError::InvertedRange {
                min: min_id,
                max: max_id,
            });
        }

        let mut ids = Vec::new();
        let mut pos = min_id;
        while pos <= max_id {
            // Grow pos into the largest ancestor that still starts at pos
            // and whose leaf range stays inside the window.
            let mut cell = pos;
            while !cell.is_face() {
                let parent = cell.immediate_parent();
                if parent.range_min() != pos || parent.range_max() > max_id {
                    break;
                }
                cell = parent;
            }
            ids.push(cell);
            pos = cell.range_max().next();
        }
        // Sorted, disjoint, and maximally collapsed by construction: a
        // complete sibling family would have been emitted as its parent.
        Ok(CellUnion { ids })
    }

    /// Builds the minimal normalized union covering the half-open leaf range
    /// `[begin, end)`. If `begin == end` the result is empty.
    ///
    /// # Errors
    ///
    /// Returns [`CellUnionError::NonLeafRange`] unless both bounds are leaf
    /// cells, and [`CellUnionError::InvertedRange`] if `begin > end`.
    pub fn from_begin_end(begin: CellID, end: CellID) -> Result<Self, CellUnionError> {
        if !begin.is_leaf() || !end.is_leaf() {
            return Err(CellUnionError::NonLeafRange {
                min: begin,
                max: end,
            });
        }
        if begin > end {
            return Err(CellUnionError::InvertedRange {
                min: begin,
                max: end,
            });
        }
        if begin == end {
            return Ok(CellUnion::new());
        }
        Self::from_min_max(begin, end.prev())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use s2::cellid::MAX_LEVEL;

    #[test]
    fn full_face_range_collapses_to_the_face_cell() {
        let face = CellID::from_face(0);
        let cover = CellUnion::from_min_max(face.range_min(), face.range_max()).unwrap();
        assert_eq!(cover.cells(), &[face]);
    }

    #[test]
    fn whole_sphere_range() {
        let min = CellID::from_face(0).range_min();
        let max = CellID::from_face(5).range_max();
        let cover = CellUnion::from_min_max(min, max).unwrap();
        let faces: Vec<CellID> = (0..6).map(CellID::from_face).collect();
        assert_eq!(cover.cells(), faces.as_slice());
    }

    #[test]
    fn single_leaf_range() {
        let leaf = CellID::from_face(3).child_begin_at_level(MAX_LEVEL);
        let cover = CellUnion::from_min_max(leaf, leaf).unwrap();
        assert_eq!(cover.cells(), &[leaf]);
        assert_eq!(cover.leaf_cells_covered(), 1);
    }

    #[test]
    fn misaligned_range_tiles_with_mixed_levels() {
        // Skip the very first leaf of the face: the cover must tile the rest
        // with progressively larger cells, never re-including the gap.
        let face = CellID::from_face(2);
        let min = face.range_min().next();
        let max = face.range_max();
        let cover = CellUnion::from_min_max(min, max).unwrap();

        assert!(cover.is_normalized());
        assert!(!cover.contains_cellid(face.range_min()));
        assert!(cover.contains_cellid(max));
        assert_eq!(cover.leaf_cells_covered(), (1u64 << 60) - 1);
    }

    #[test]
    fn leaf_count_matches_id_arithmetic() {
        // Leaf ids advance by two in the raw encoding.
        let base = CellID::from_face(1).child_begin_at_level(MAX_LEVEL);
        let min = base.next().next();
        let max = min.advance(997);
        let cover = CellUnion::from_min_max(min, max).unwrap();
        assert_eq!(cover.leaf_cells_covered(), 998);
        assert_eq!(cover.leaf_cells_covered(), (max.0 - min.0) / 2 + 1);
    }

    #[test]
    fn begin_end_is_half_open() {
        let begin = CellID::from_face(0).child_begin_at_level(MAX_LEVEL);
        assert!(CellUnion::from_begin_end(begin, begin).unwrap().is_empty());

        let end = begin.advance(4);
        let cover = CellUnion::from_begin_end(begin, end).unwrap();
        assert_eq!(cover.leaf_cells_covered(), 4);
        assert!(cover.contains_cellid(end.prev()));
        assert!(!cover.contains_cellid(end));
    }

    #[test]
    fn range_preconditions_are_reported() {
        let face = CellID::from_face(0);
        let leaf = face.child_begin_at_level(MAX_LEVEL);

        assert!(matches!(
            CellUnion::from_min_max(face, leaf),
            Err(CellUnionError::NonLeafRange { .. })
        ));
        assert!(matches!(
            CellUnion::from_min_max(leaf.next(), leaf),
            Err(CellUnionError::InvertedRange { .. })
        ));
        assert!(matches!(
            CellUnion::from_begin_end(leaf.next(), leaf),
            Err(CellUnionError::InvertedRange { .. })
        ));
    }
}
