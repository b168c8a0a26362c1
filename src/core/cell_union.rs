//! The [`CellUnion`] region type and its normal form.
//!
//! A cell union represents a region of the sphere as a sorted sequence of S2
//! cell ids whose leaf ranges are pairwise disjoint and maximally collapsed
//! (no four stored cells are the four children of a common parent). Every
//! public constructor establishes this normal form, and every operation that
//! produces a union preserves it, so queries can rely on the interval
//! structure of Hilbert-ordered cell ranges.

use std::ops::Index;

use s2::cellid::{CellID, MAX_LEVEL};
use thiserror::Error;

/// Errors produced by cell-union construction and persistence stubs.
///
/// All region algebra is total on normal-form inputs; only range-cover
/// construction and the (deliberately unimplemented) wire format can fail.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CellUnionError {
    /// A leaf-range cover was requested with bounds that are not leaf cells.
    #[error("cell range bounds must be leaf cells: min={min:?}, max={max:?}")]
    NonLeafRange {
        /// The lower bound as given.
        min: CellID,
        /// The upper bound as given.
        max: CellID,
    },

    /// A leaf-range cover was requested with an inverted range.
    #[error("inverted cell range: min={min:?} exceeds max={max:?}")]
    InvertedRange {
        /// The lower bound as given.
        min: CellID,
        /// The upper bound as given.
        max: CellID,
    },

    /// Wire encoding of cell unions is not implemented.
    #[error("cell union wire encoding is not supported")]
    EncodingUnsupported,
}

/// A region built from a normalized collection of S2 cells.
///
/// The union owns its backing sequence exclusively; [`CellUnion::init_swap`]
/// and [`CellUnion::detach`] move the buffer in and out without copying.
///
/// Two unions compare equal iff their cell sequences are identical, which
/// coincides with region equality because the normal form is unique for a
/// given point set.
///
/// # Examples
///
/// ```rust
/// use s2union::prelude::*;
///
/// let face = CellID::from_face(0);
/// let union = CellUnion::from_ids(face.children().to_vec());
///
/// // The four children collapsed into their parent.
/// assert_eq!(union.cells(), &[face]);
/// assert!(union.contains_cellid(face.child_begin_at_level(MAX_LEVEL)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellUnion {
    pub(crate) ids: Vec<CellID>,
}

// =============================================================================
// CONSTRUCTION & LIFECYCLE
// =============================================================================

impl CellUnion {
    /// Creates an empty union.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a union from the given cell ids, normalizing them.
    #[must_use]
    pub fn from_ids(ids: Vec<CellID>) -> Self {
        let mut union = CellUnion { ids };
        union.normalize();
        union
    }

    /// Builds a union from raw 64-bit cell ids, normalizing them.
    #[must_use]
    pub fn from_u64_ids(ids: &[u64]) -> Self {
        Self::from_ids(ids.iter().copied().map(CellID).collect())
    }

    /// Builds a union from a sequence the caller promises is already in
    /// normal form, without copying or re-normalizing.
    ///
    /// Queries against a union whose sequence is *not* in normal form return
    /// unspecified results. Checked builds verify the promise.
    #[must_use]
    pub fn from_normalized(ids: Vec<CellID>) -> Self {
        let union = CellUnion { ids };
        debug_assert!(union.is_normalized());
        union
    }

    /// Replaces the contents of this union with the given cell ids and
    /// normalizes them.
    pub fn init(&mut self, ids: &[CellID]) {
        self.ids.clear();
        self.ids.extend_from_slice(ids);
        self.normalize();
    }

    /// Takes ownership of the given vector's contents (leaving it empty) and
    /// normalizes them. This is the zero-copy counterpart of
    /// [`CellUnion::init`].
    pub fn init_swap(&mut self, ids: &mut Vec<CellID>) {
        self.ids = std::mem::take(ids);
        self.normalize();
    }

    /// Gives ownership of the backing sequence to the caller without copying
    /// and leaves this union empty. Any previous contents of `out` are lost.
    pub fn detach(&mut self, out: &mut Vec<CellID>) {
        *out = std::mem::take(&mut self.ids);
    }

    /// Consumes the union and returns its backing sequence.
    #[must_use]
    pub fn into_ids(self) -> Vec<CellID> {
        self.ids
    }

    /// Reallocates the backing sequence to exact size if more than `excess`
    /// elements of capacity are unused. This reduces memory usage when many
    /// unions are held in memory at once.
    pub fn pack(&mut self, excess: usize) {
        if self.ids.capacity() - self.ids.len() > excess {
            self.ids.shrink_to_fit();
        }
    }
}

// =============================================================================
// INSPECTION
// =============================================================================

impl CellUnion {
    /// The number of cells in the union.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if the union contains no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The `i`-th cell in ascending Hilbert order.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    #[must_use]
    pub fn cell(&self, i: usize) -> CellID {
        self.ids[i]
    }

    /// The cells in ascending Hilbert order.
    #[must_use]
    pub fn cells(&self) -> &[CellID] {
        &self.ids
    }

    /// Iterates over the cells in ascending Hilbert order.
    pub fn iter(&self) -> std::slice::Iter<'_, CellID> {
        self.ids.iter()
    }

    /// Reports whether the cell sequence satisfies all normal-form
    /// invariants: validity, strictly increasing order, pairwise-disjoint
    /// leaf ranges, and no complete sibling groups.
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        if !self.ids.iter().all(CellID::is_valid) {
            return false;
        }
        if self
            .ids
            .windows(2)
            .any(|w| w[0].range_max() >= w[1].range_min())
        {
            return false;
        }
        !(3..self.ids.len()).any(|i| {
            are_siblings(
                self.ids[i - 3],
                self.ids[i - 2],
                self.ids[i - 1],
                self.ids[i],
            )
        })
    }

    pub(crate) fn debug_assert_normalized(&self) {
        debug_assert!(
            self.is_normalized(),
            "cell union must be normalized before use"
        );
    }
}

// =============================================================================
// NORMAL FORM
// =============================================================================

/// Reports whether the four cells are the four children of a common parent.
///
/// A necessary condition is that the xor of the four ids vanishes; the exact
/// test then masks out the two child-position bits and checks that the first
/// three cells agree with the fourth everywhere else. Face cells have no
/// parent and never form a sibling group.
pub(crate) fn are_siblings(a: CellID, b: CellID, c: CellID, d: CellID) -> bool {
    if a.0 ^ b.0 ^ c.0 != d.0 {
        return false;
    }
    let mask = d.lsb() << 1;
    let mask = !(mask + (mask << 1));
    let masked = d.0 & mask;
    a.0 & mask == masked && b.0 & mask == masked && c.0 & mask == masked && !d.is_face()
}

impl CellUnion {
    /// Re-establishes normal form: sorts the cells, discards cells contained
    /// by other cells, and replaces groups of four sibling cells by their
    /// parent, cascading upward through the hierarchy. Returns `true` if the
    /// number of cells was reduced.
    ///
    /// This runs in `O(n log n)` dominated by the sort; the collapse pass is
    /// amortized linear because each id moves at most once per level.
    pub fn normalize(&mut self) -> bool {
        self.ids.sort_unstable();
        let before = self.ids.len();
        let mut out: Vec<CellID> = Vec::with_capacity(before);
        for &id in &self.ids {
            let mut id = id;
            // Already covered by the previous output cell.
            if out.last().is_some_and(|last| last.contains(&id)) {
                continue;
            }
            // Discard any previous cells contained by this one.
            while out.last().is_some_and(|last| id.contains(last)) {
                out.pop();
            }
            // Replace any complete sibling group by its parent. Collapsing
            // may complete another group one level up, so keep going.
            while out.len() >= 3 {
                let n = out.len();
                if !are_siblings(out[n - 3], out[n - 2], out[n - 1], id) {
                    break;
                }
                out.truncate(n - 3);
                id = id.immediate_parent();
            }
            out.push(id);
        }
        let shrank = out.len() < before;
        self.ids = out;
        shrank
    }

    /// Writes an expanded version of the union into `output` in which every
    /// cell has level at least `min_level` and a level offset from
    /// `min_level` that is a multiple of `level_mod`, subdividing cells as
    /// needed (capped at the maximum level).
    ///
    /// This converts a normalized union back into the shape produced by a
    /// covering with `min_level`/`level_mod` constraints. The output is a
    /// flat covering at the required granularity and is intentionally *not*
    /// in normal form; feed it back through [`CellUnion::from_ids`] to
    /// recover the original union.
    pub fn denormalize(&self, min_level: u64, level_mod: u64, output: &mut Vec<CellID>) {
        debug_assert!(min_level <= MAX_LEVEL);
        debug_assert!((1..=3).contains(&level_mod));
        output.clear();
        output.reserve(self.ids.len());
        for &id in &self.ids {
            let level = id.level();
            let mut new_level = level.max(min_level);
            if level_mod > 1 {
                // Round up to a multiple of level_mod above min_level.
                // MAX_LEVEL is a multiple of 1, 2, and 3, so the offset keeps
                // the maximum level reachable.
                new_level += (MAX_LEVEL - (new_level - min_level)) % level_mod;
                new_level = new_level.min(MAX_LEVEL);
            }
            if new_level == level {
                output.push(id);
            } else {
                output.extend(id.child_iter_at_level(new_level));
            }
        }
    }
}

// =============================================================================
// MEMBERSHIP
// =============================================================================

impl CellUnion {
    /// Reports whether the union contains the given cell id. Containment is
    /// defined with respect to regions: a cell contains its descendants.
    ///
    /// This is exact and logarithmic in the number of cells.
    #[must_use]
    pub fn contains_cellid(&self, id: CellID) -> bool {
        debug_assert!(id.is_valid());
        // The only stored cell that can contain id is the last one that
        // starts at or before it; ranges never straddle a stored cell.
        let i = self.ids.partition_point(|&c| c < id);
        if i < self.ids.len() && self.ids[i].range_min() <= id {
            return true;
        }
        i > 0 && self.ids[i - 1].range_max() >= id
    }

    /// Reports whether the union intersects the given cell id, i.e. shares
    /// at least one leaf cell with it.
    ///
    /// This is exact and logarithmic in the number of cells.
    #[must_use]
    pub fn intersects_cellid(&self, id: CellID) -> bool {
        debug_assert!(id.is_valid());
        let i = self.ids.partition_point(|&c| c < id);
        if i < self.ids.len() && self.ids[i].range_min() <= id.range_max() {
            return true;
        }
        i > 0 && self.ids[i - 1].range_max() >= id.range_min()
    }

    /// Reports whether every cell of `other` is contained in this union.
    ///
    /// Runs as a single merge over the two sorted sequences.
    #[must_use]
    pub fn contains(&self, other: &CellUnion) -> bool {
        self.debug_assert_normalized();
        other.debug_assert_normalized();
        let mut i = 0;
        for &id in &other.ids {
            while i < self.ids.len() && self.ids[i].range_max() < id.range_min() {
                i += 1;
            }
            let Some(cell) = self.ids.get(i) else {
                return false;
            };
            if !cell.contains(&id) {
                return false;
            }
        }
        true
    }

    /// Reports whether this union shares at least one leaf cell with
    /// `other`.
    ///
    /// Runs as a single merge over the two sorted sequences, advancing
    /// whichever side ends first.
    #[must_use]
    pub fn intersects(&self, other: &CellUnion) -> bool {
        self.debug_assert_normalized();
        other.debug_assert_normalized();
        let (mut i, mut j) = (0, 0);
        while i < self.ids.len() && j < other.ids.len() {
            let a = self.ids[i];
            let b = other.ids[j];
            if a.range_max() < b.range_min() {
                i += 1;
            } else if b.range_max() < a.range_min() {
                j += 1;
            } else {
                return true;
            }
        }
        false
    }
}

// =============================================================================
// PERSISTENCE (UNSUPPORTED)
// =============================================================================

impl CellUnion {
    /// Wire encoding is not implemented.
    ///
    /// # Errors
    ///
    /// Always returns [`CellUnionError::EncodingUnsupported`].
    pub fn encode(&self, _buf: &mut Vec<u8>) -> Result<(), CellUnionError> {
        Err(CellUnionError::EncodingUnsupported)
    }

    /// Wire decoding is not implemented.
    ///
    /// # Errors
    ///
    /// Always returns [`CellUnionError::EncodingUnsupported`].
    pub fn decode(_bytes: &[u8]) -> Result<Self, CellUnionError> {
        Err(CellUnionError::EncodingUnsupported)
    }
}

// =============================================================================
// STANDARD TRAIT IMPLEMENTATIONS
// =============================================================================

impl Index<usize> for CellUnion {
    type Output = CellID;

    fn index(&self, i: usize) -> &CellID {
        &self.ids[i]
    }
}

impl<'a> IntoIterator for &'a CellUnion {
    type Item = &'a CellID;
    type IntoIter = std::slice::Iter<'a, CellID>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

impl FromIterator<CellID> for CellUnion {
    fn from_iter<I: IntoIterator<Item = CellID>>(iter: I) -> Self {
        Self::from_ids(iter.into_iter().collect())
    }
}

impl From<Vec<CellID>> for CellUnion {
    fn from(ids: Vec<CellID>) -> Self {
        Self::from_ids(ids)
    }
}

// =============================================================================
// TESTS
// =============================================================================
