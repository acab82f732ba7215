use core::ops::Index;
use ndarray::Array2;

use crate::*;

/// Fixed-size grid of cells with precomputed neighbor mine counts.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Board {
    /// Builds a board from a mine mask and computes every cell's adjacent mine count.
    ///
    /// The mask must contain at least one safe cell.
    pub fn from_mine_mask(mine_mask: &Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyBoard.into());
        }
        let size = match (Coord::try_from(rows), Coord::try_from(cols)) {
            (Ok(rows), Ok(cols)) => (rows, cols),
            _ => return Err(ConfigError::BoardTooLarge.into()),
        };

        let mut mine_count: CellCount = 0;
        let cells = Array2::from_shape_fn(mine_mask.dim(), |(x, y)| {
            let is_mine = mine_mask[(x, y)];
            if is_mine {
                mine_count += 1;
            }
            Cell {
                is_mine,
                adjacent_mine_count: mine_mask
                    .iter_neighbors((x as Coord, y as Coord))
                    .filter(|&pos| mine_mask[pos.to_nd_index()])
                    .count() as u8,
                ..Default::default()
            }
        });

        let capacity = mult(size.0, size.1) - 1;
        if mine_count > capacity {
            return Err(ConfigError::TooManyMines {
                requested: mine_count,
                capacity,
            }
            .into());
        }

        Ok(Self { cells, mine_count })
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(ConfigError::EmptyBoard.into());
        }
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords { coords, size });
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(&mine_mask)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords { coords, size })
        }
    }

    /// `(rows, cols)`
    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        // construction rejects dimensions that do not fit a Coord
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self[coords])
    }

    /// Mutable access stays inside the crate, mines and counts are fixed once built.
    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> Result<u8> {
        Ok(self.cell(coords)?.adjacent_mine_count)
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// All positions in row-major order.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (rows, cols) = self.size();
        (0..rows).flat_map(move |x| (0..cols).map(move |y| (x, y)))
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|((x, y), cell)| ((x as Coord, y as Coord), cell))
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| cell.revealed && !cell.is_mine)
            .count() as CellCount
    }

    /// True iff every safe cell is revealed, flags are not considered.
    pub fn check_win(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.is_mine || cell.revealed)
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
