use ndarray::Array2;

/// Single board axis, used for row/column counts and positions.
pub type Coord = u8;

/// Count type for mines, flags and cells.
pub type CellCount = u16;

/// Board position `(x, y)`, `x` being the row and `y` the column.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Cell count of a `a × b` board, saturating on overflow.
pub const fn mult(a: Coord, b: Coord) -> CellCount {
    (a as CellCount).saturating_mul(b as CellCount)
}

/// Iterate the in-bounds neighbors of a position of any board-shaped grid.
pub trait NeighborIterExt {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter {
        let (rows, cols) = self.dim();
        let bounds = (
            Coord::try_from(rows).unwrap_or(Coord::MAX),
            Coord::try_from(cols).unwrap_or(Coord::MAX),
        );
        NeighborIter::new(center, bounds)
    }
}

/// Chebyshev distance 1 ring, row by row.
const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Iterator over the up-to-8 neighbors of `center` that lie inside `bounds`.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    next_offset: usize,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            next_offset: 0,
        }
    }

    fn shifted(&self, (dx, dy): (i8, i8)) -> Option<Coord2> {
        let x = self.center.0.checked_add_signed(dx)?;
        let y = self.center.1.checked_add_signed(dy)?;
        (x < self.bounds.0 && y < self.bounds.1).then_some((x, y))
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&offset) = OFFSETS.get(self.next_offset) {
            self.next_offset += 1;
            if let Some(coords) = self.shifted(offset) {
                return Some(coords);
            }
        }
        None
    }
}
