//! Bounding regions and `s2::region::Region` conformance for cell unions.

use s2::cap::Cap;
use s2::cell::Cell;
use s2::cellid::CellID;
use s2::point::Point;
use s2::r3::vector::Vector;
use s2::rect::Rect;
use s2::region::Region;
use s2::s1::angle::Angle;
use s2::s1::Rad;

use crate::core::cell_union::CellUnion;
use crate::geometry::metrics::AVG_AREA;

impl CellUnion {
    /// Returns a spherical cap containing the union.
    ///
    /// The cap axis is the area-weighted centroid of the cells, which keeps
    /// the bound reasonably tight for compact regions; the cap is then grown
    /// until it covers every cell's own bound.
    #[must_use]
    pub fn cap_bound(&self) -> Cap {
        if self.is_empty() {
            return Cap::empty();
        }
        let mut centroid = Vector {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        };
        for &id in &self.ids {
            let area = AVG_AREA.value(id.level() as _);
            let p = Point::from(id);
            centroid.x += area * p.0.x;
            centroid.y += area * p.0.y;
            centroid.z += area * p.0.z;
        }
        let axis = if centroid.x == 0.0 && centroid.y == 0.0 && centroid.z == 0.0 {
            // Antipodal cells cancel out; any axis works.
            Point(Vector {
                x: 1.0,
                y: 0.0,
                z: 0.0,
            })
        } else {
            Point(centroid.normalize())
        };

        let mut cap = Cap::from_center_angle(&axis, &Angle::from(Rad(0.0)));
        for &id in &self.ids {
            cap = cap.union(&Cell::from(&id).cap_bound());
        }
        cap
    }

    /// Returns a latitude-longitude rectangle containing the union.
    #[must_use]
    pub fn rect_bound(&self) -> Rect {
        let mut bound = Rect::empty();
        for &id in &self.ids {
            bound = bound.union(&Cell::from(&id).rect_bound());
        }
        bound
    }

    /// Reports whether the union contains the given cell, exactly.
    #[must_use]
    pub fn contains_cell(&self, cell: &Cell) -> bool {
        self.contains_cellid(cell.id)
    }

    /// Reports whether the union intersects the given cell, exactly. (The
    /// name follows the region interface, where implementations may
    /// overapproximate; this one does not.)
    #[must_use]
    pub fn may_intersect_cell(&self, cell: &Cell) -> bool {
        self.intersects_cellid(cell.id)
    }

    /// Reports whether the union contains the given point, via the leaf
    /// cell the point falls in. The point does not need to be normalized.
    #[must_use]
    pub fn contains_point(&self, p: &Point) -> bool {
        self.contains_cellid(CellID::from(*p))
    }
}

impl Region for CellUnion {
    fn cap_bound(&self) -> Cap {
        CellUnion::cap_bound(self)
    }

    fn rect_bound(&self) -> Rect {
        CellUnion::rect_bound(self)
    }

    fn contains_cell(&self, cell: &Cell) -> bool {
        CellUnion::contains_cell(self, cell)
    }

    fn intersects_cell(&self, cell: &Cell) -> bool {
        self.may_intersect_cell(cell)
    }
}
