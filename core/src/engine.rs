use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::num::Saturating;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
///
/// Only a reset leaves a terminal state, by replacing the engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Owns one board and moves it through a single game.
#[derive(Clone, Debug, PartialEq)]
pub struct GameEngine {
    board: Board,
    rules: Rules,
    status: GameStatus,
    revealed_safe: CellCount,
    flagged_count: Saturating<CellCount>,
    triggered_mine: Option<Coord2>,
}

impl GameEngine {
    pub fn new(board: Board) -> Self {
        Self::with_rules(board, Rules::default())
    }

    /// Takes over a board as generated, a board whose safe cells are already all open starts won.
    pub fn with_rules(board: Board, rules: Rules) -> Self {
        let revealed_safe = board.revealed_safe_count();
        let flagged_count = board.iter_cells().filter(|(_, cell)| cell.flagged).count();
        let status = if revealed_safe == board.safe_cell_count() {
            GameStatus::Won
        } else {
            GameStatus::InProgress
        };
        Self {
            board,
            rules,
            status,
            revealed_safe,
            flagged_count: Saturating(flagged_count as CellCount),
            triggered_mine: None,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.board.mine_count()
    }

    pub fn flag_count(&self) -> CellCount {
        self.flagged_count.0
    }

    /// Mines minus flags, negative when the player over-flags.
    pub fn mines_left(&self) -> isize {
        (self.board.mine_count() as isize) - (self.flagged_count.0 as isize)
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn check_win(&self) -> bool {
        self.board.check_win()
    }

    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        Ok(self.board.cell(coords)?.view())
    }

    /// Every cell's projection in row-major order.
    pub fn views(&self) -> impl Iterator<Item = (Coord2, CellView)> + '_ {
        self.board
            .iter_cells()
            .map(|(coords, cell)| (coords, cell.view()))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.status.is_finished() {
            log::debug!("Ignoring flag at {:?}, game is {:?}", coords, self.status);
            return Ok(MarkOutcome::NoChange);
        }

        let cell = self.board.cell_mut(coords);
        if cell.revealed {
            return Ok(MarkOutcome::NoChange);
        }

        cell.flagged = !cell.flagged;
        if cell.flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        Ok(MarkOutcome::Changed)
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealReport> {
        let coords = self.board.validate_coords(coords)?;

        if self.status.is_finished() {
            log::debug!("Ignoring reveal at {:?}, game is {:?}", coords, self.status);
            return Ok(RevealReport::unchanged(self.status));
        }

        let cell = self.board[coords];
        if cell.revealed || (cell.flagged && self.rules.flag_blocks_reveal) {
            return Ok(RevealReport::unchanged(self.status));
        }

        if cell.is_mine {
            return Ok(self.explode(coords));
        }

        let revealed = self.flood_reveal(coords);
        log::debug!(
            "Revealed {} cells from {:?}, {} of {} safe cells open",
            revealed.len(),
            coords,
            self.revealed_safe,
            self.board.safe_cell_count()
        );

        if self.revealed_safe == self.board.safe_cell_count() {
            self.status = GameStatus::Won;
            log::debug!("Game won");
        }

        Ok(RevealReport {
            status: self.status,
            revealed,
        })
    }

    /// Gives up a game in progress: it counts as lost and the whole board is exposed. Returns the
    /// newly revealed cells in row-major order, nothing once the game has already ended.
    pub fn reveal_all(&mut self) -> Vec<Coord2> {
        if self.status.is_finished() {
            log::debug!("Ignoring reveal all, game is {:?}", self.status);
            return Vec::new();
        }
        self.status = GameStatus::Lost;
        log::debug!("Game given up");
        self.expose_board()
    }

    /// Reveals every cell and clears all flags.
    fn expose_board(&mut self) -> Vec<Coord2> {
        let mut revealed = Vec::new();
        for coords in self.board.iter_coords() {
            let cell = self.board.cell_mut(coords);
            cell.flagged = false;
            if !cell.revealed {
                cell.revealed = true;
                revealed.push(coords);
            }
        }
        self.flagged_count = Saturating(0);
        self.revealed_safe = self.board.safe_cell_count();
        revealed
    }

    fn explode(&mut self, coords: Coord2) -> RevealReport {
        self.board.cell_mut(coords).revealed = true;
        self.triggered_mine = Some(coords);
        self.status = GameStatus::Lost;
        log::debug!("Hit mine at {:?}, game lost", coords);

        let mut revealed = Vec::with_capacity(usize::from(self.board.total_cells()));
        revealed.push(coords);
        revealed.extend(self.expose_board());
        RevealReport {
            status: self.status,
            revealed,
        }
    }

    /// Opens a safe cell, cascading through neighbors while the adjacent mine count is zero.
    fn flood_reveal(&mut self, origin: Coord2) -> Vec<Coord2> {
        let mut revealed = Vec::new();
        let mut visited = HashSet::new();
        visited.insert(origin);
        let mut to_visit = VecDeque::from([origin]);

        while let Some(coords) = to_visit.pop_front() {
            let cell = self.board.cell_mut(coords);
            if cell.revealed || cell.is_mine {
                continue;
            }
            if cell.flagged {
                if self.rules.flag_blocks_reveal {
                    log::trace!("Flood skipped flagged cell at {:?}", coords);
                    continue;
                }
                cell.flagged = false;
                self.flagged_count -= 1;
            }

            cell.revealed = true;
            self.revealed_safe += 1;
            revealed.push(coords);

            let adjacent_mines = cell.adjacent_mine_count;
            log::trace!("Opened {:?}, adjacent mines: {}", coords, adjacent_mines);

            if adjacent_mines == 0 {
                for neighbor in self.board.iter_neighbors(coords) {
                    if visited.insert(neighbor) {
                        to_visit.push_back(neighbor);
                    }
                }
            }
        }

        revealed
    }
}
