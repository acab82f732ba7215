use serde::{Deserialize, Serialize};

/// One board position, as owned by the engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) is_mine: bool,
    pub(crate) revealed: bool,
    pub(crate) flagged: bool,
    pub(crate) adjacent_mine_count: u8,
}

impl Cell {
    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    /// Mines among the up-to-8 neighbors, in `0..=8`.
    pub const fn adjacent_mine_count(&self) -> u8 {
        self.adjacent_mine_count
    }

    pub const fn is_unrevealed(&self) -> bool {
        !self.revealed
    }

    pub const fn view(&self) -> CellView {
        CellView {
            shown: self.revealed,
            flagged: self.flagged,
            is_mine: self.is_mine,
            adjacent_mine_count: self.adjacent_mine_count,
        }
    }
}

/// Read-only projection handed to the presentation layer for rendering.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub shown: bool,
    pub flagged: bool,
    pub is_mine: bool,
    pub adjacent_mine_count: u8,
}

impl CellView {
    /// Whether a mine should be drawn, only ever true once the cell is shown.
    pub const fn shows_mine(&self) -> bool {
        self.shown && self.is_mine
    }

    /// The hint number to draw, if any.
    pub const fn hint(&self) -> Option<u8> {
        if self.shown && !self.is_mine {
            Some(self.adjacent_mine_count)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_cell_hides_hint_and_mine() {
        let cell = Cell {
            is_mine: true,
            adjacent_mine_count: 3,
            ..Default::default()
        };

        let view = cell.view();

        assert!(!view.shows_mine());
        assert_eq!(view.hint(), None);
    }

    #[test]
    fn shown_safe_cell_exposes_hint() {
        let cell = Cell {
            revealed: true,
            adjacent_mine_count: 2,
            ..Default::default()
        };

        assert_eq!(cell.view().hint(), Some(2));
        assert!(!cell.view().shows_mine());
    }
}
