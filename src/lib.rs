//! # s2union
//!
//! Normalized cell unions over the S2 cell hierarchy.
//!
//! A [`CellUnion`](core::cell_union::CellUnion) is a region on the unit
//! sphere represented as a collection of S2 cells of various sizes. Cell
//! unions are typically used to approximate other shapes: unlike polygons,
//! cells have a fixed hierarchical structure, which makes unions cheap to
//! intersect, subtract, and test for membership.
//!
//! The cell hierarchy itself (the quad-tree over the six cube faces and the
//! Hilbert encoding of cells into 64-bit [`CellID`](s2::cellid::CellID)s)
//! comes from the [`s2`] crate; this crate builds the region algebra on top
//! of it.
//!
//! # Normal form
//!
//! Every `CellUnion` maintains a canonical representation:
//!
//! 1. all cell ids are valid,
//! 2. the sequence is strictly increasing in Hilbert order,
//! 3. no cell contains another (leaf ranges are pairwise disjoint),
//! 4. no four consecutive cells are the children of a common parent.
//!
//! All constructors establish normal form and every operation that produces a
//! union preserves it. Code that needs to accumulate unsorted, overlapping
//! ids first should go through [`RawCellUnion`](core::raw::RawCellUnion) and
//! finalize once.
//!
//! # Basic usage
//!
//! ```rust
//! use s2union::prelude::*;
//!
//! // Four sibling cells collapse to their parent.
//! let face = CellID::from_face(2);
//! let union = CellUnion::from_ids(face.children().to_vec());
//! assert_eq!(union.cells(), &[face]);
//!
//! // Membership is logarithmic in the number of cells.
//! let leaf = face.child_begin_at_level(MAX_LEVEL);
//! assert!(union.contains_cellid(leaf));
//!
//! // Set algebra stays in normal form.
//! let other = CellUnion::from_ids(vec![CellID::from_face(3)]);
//! let both = union.union(&other);
//! assert_eq!(both.len(), 2);
//! assert!(both.contains(&union));
//! ```
//!
//! # Covering a range of leaf cells
//!
//! ```rust
//! use s2union::prelude::*;
//!
//! let face = CellID::from_face(0);
//! let cover = CellUnion::from_min_max(face.range_min(), face.range_max()).unwrap();
//! assert_eq!(cover.cells(), &[face]);
//! assert_eq!(cover.leaf_cells_covered(), 1u64 << 60);
//! ```
//!
//! # Guarantees and limitations
//!
//! - Operations on normal-form inputs always produce normal-form outputs;
//!   the invariants above are checked by `debug_assert!` at algebra entry
//!   points and can be queried with
//!   [`CellUnion::is_normalized`](core::cell_union::CellUnion::is_normalized).
//! - Queries against a union built through
//!   [`CellUnion::from_normalized`](core::cell_union::CellUnion::from_normalized)
//!   with a sequence that is *not* in normal form return unspecified (but
//!   memory-safe) results.
//! - [`CellUnion::expand_at_level`](core::cell_union::CellUnion::expand_at_level)
//!   output is exponential in the difference between the expansion level and
//!   the finest input cell; prefer
//!   [`CellUnion::expand_by_radius`](core::cell_union::CellUnion::expand_by_radius),
//!   which bounds the level gap.
//! - There is no wire format. `encode`/`decode` exist for interface
//!   completeness and report
//!   [`CellUnionError::EncodingUnsupported`](core::cell_union::CellUnionError::EncodingUnsupported).

// Forbid unsafe code throughout the entire crate
#![forbid(unsafe_code)]

/// Core data structures and algorithms for cell unions.
///
/// This includes the [`CellUnion`](cell_union::CellUnion) value itself, the
/// [`RawCellUnion`](raw::RawCellUnion) accumulator, and the set-algebra,
/// expansion, and range-cover algorithms.
pub mod core {
    /// Algorithms that produce new unions from existing ones.
    pub mod algorithms {
        /// Neighbor-based dilation at a fixed level or by a minimum radius.
        pub mod expand;
        /// Minimal covers of contiguous leaf-cell ranges.
        pub mod range;
        /// Union, intersection, and difference of normalized unions.
        pub mod set_ops;
    }
    pub mod cell_union;
    pub mod raw;
    pub use cell_union::*;
    pub use raw::*;
}

/// Geometric measures and region bounds for cell unions.
pub mod geometry {
    /// Leaf-cell counts and area approximations.
    pub mod metrics;
    /// Bounding cap/rect and `s2::region::Region` conformance.
    pub mod region;
    pub use metrics::*;
}

/// Checks at compile time that a type implements the `auto` traits expected
/// of a value type. Only used for testing.
#[must_use]
pub const fn is_normal<T: Sized + Send + Sync + Unpin>() -> bool {
    true
}

/// Re-exports of the crate types and the `s2` types that appear in the
/// public API.
pub mod prelude {
    pub use crate::core::cell_union::{CellUnion, CellUnionError};
    pub use crate::core::raw::RawCellUnion;
    pub use s2::cap::Cap;
    pub use s2::cell::Cell;
    pub use s2::cellid::{CellID, MAX_LEVEL};
    pub use s2::latlng::LatLng;
    pub use s2::point::Point;
    pub use s2::rect::Rect;
    pub use s2::region::Region;
    pub use s2::s1::angle::Angle;
    pub use s2::s1::Rad;
}
