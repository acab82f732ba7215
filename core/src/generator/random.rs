use alloc::vec::Vec;
use ndarray::Array2;
use rand::Rng;
use rand::seq::{IndexedRandom, index};

use super::*;

/// Generation strategy that places mines purely at random, then opens one random safe cell so the
/// first move can never hit a mine.
#[derive(Debug)]
pub struct RandomBoardGenerator<'a, R: ?Sized> {
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> RandomBoardGenerator<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng }
    }

    fn mine_mask(&mut self, config: &GameConfig) -> Array2<bool> {
        let (rows, cols) = config.size;
        let total_cells = usize::from(config.total_cells());

        match config.density {
            MineDensity::Probability(p) => {
                let mut mines: Array2<bool> =
                    Array2::from_shape_fn(config.size.to_nd_index(), |_| self.rng.random_bool(p));

                if mines.iter().all(|&is_mine| is_mine) {
                    // clamp rather than redraw, p close to 1 would otherwise retry for a long time
                    let cleared = self.rng.random_range(0..total_cells);
                    let coords = (
                        (cleared / usize::from(cols)) as Coord,
                        (cleared % usize::from(cols)) as Coord,
                    );
                    log::warn!(
                        "Mine draw left no safe cell on a {}x{} board, clearing {:?}",
                        rows,
                        cols,
                        coords
                    );
                    mines[coords.to_nd_index()] = false;
                }
                mines
            }
            MineDensity::Count(count) => {
                let mut mines: Array2<bool> = Array2::default(config.size.to_nd_index());
                for place in index::sample(&mut *self.rng, total_cells, usize::from(count)) {
                    mines[[place / usize::from(cols), place % usize::from(cols)]] = true;
                }
                mines
            }
        }
    }
}

impl<R: Rng + ?Sized> BoardGenerator for RandomBoardGenerator<'_, R> {
    fn generate(mut self, config: &GameConfig) -> Result<Board> {
        config.validate()?;

        let mut board = Board::from_mine_mask(&self.mine_mask(config))?;

        let safe_cells: Vec<Coord2> = board
            .iter_cells()
            .filter(|(_, cell)| !cell.is_mine())
            .map(|(coords, _)| coords)
            .collect();
        let &start = safe_cells
            .choose(&mut *self.rng)
            .ok_or(ConfigError::TooManyMines {
                requested: board.mine_count(),
                capacity: board.total_cells() - 1,
            })?;
        board.cell_mut(start).revealed = true;

        log::debug!(
            "Generated {:?} board with {} mines, starting at {:?}",
            board.size(),
            board.mine_count(),
            start
        );
        Ok(board)
    }
}
