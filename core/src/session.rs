use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::*;

/// One player's game from new-game to the next reset.
///
/// The presentation layer holds only this session, every move goes through it and every reset
/// replaces the engine with one over a freshly generated board.
#[derive(Clone, Debug)]
pub struct GameSession {
    config: GameConfig,
    rng: SmallRng,
    engine: GameEngine,
}

impl GameSession {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: GameConfig, mut rng: SmallRng) -> Result<Self> {
        let engine = Self::new_engine(&config, &mut rng)?;
        Ok(Self {
            config,
            rng,
            engine,
        })
    }

    fn new_engine(config: &GameConfig, rng: &mut SmallRng) -> Result<GameEngine> {
        let board = generate(config, rng)?;
        Ok(GameEngine::with_rules(board, config.rules))
    }

    /// Discards the current board and status and starts over on a new board.
    pub fn reset(&mut self) -> Result<&Board> {
        self.engine = Self::new_engine(&self.config, &mut self.rng)?;
        log::debug!("Game reset");
        Ok(self.engine.board())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut GameEngine {
        &mut self.engine
    }

    pub fn board(&self) -> &Board {
        self.engine.board()
    }

    pub fn status(&self) -> GameStatus {
        self.engine.status()
    }

    pub fn check_win(&self) -> bool {
        self.engine.check_win()
    }

    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        self.engine.cell_view(coords)
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealReport> {
        self.engine.reveal(coords)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.engine.toggle_flag(coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_mine(board: &Board) -> Option<Coord2> {
        board
            .iter_cells()
            .find(|(_, cell)| cell.is_mine())
            .map(|(coords, _)| coords)
    }

    #[test]
    fn new_session_starts_in_progress_with_one_open_cell() {
        let session = GameSession::new(GameConfig::default(), 1).unwrap();

        assert_eq!(session.board().size(), DEFAULT_SIZE);
        assert_eq!(session.board().revealed_safe_count(), 1);
        assert_eq!(session.status(), GameStatus::InProgress);
    }

    #[test]
    fn reset_after_loss_starts_a_new_game() {
        let config = GameConfig::new((6, 6), MineDensity::Count(10));
        let mut session = GameSession::new(config, 5).unwrap();
        let mine = first_mine(session.board()).unwrap();

        assert_eq!(session.reveal(mine).unwrap().status, GameStatus::Lost);
        assert!(!session.toggle_flag(mine).unwrap().has_update());

        let board = session.reset().unwrap();
        assert_eq!(board.mine_count(), 10);
        assert_eq!(board.revealed_safe_count(), 1);
        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!(session.engine().triggered_mine(), None);
    }

    #[test]
    fn single_cell_session_is_won_at_once() {
        let config = GameConfig::new((1, 1), MineDensity::Probability(0.5));
        let mut session = GameSession::new(config, 11).unwrap();

        assert!(session.check_win());
        assert_eq!(session.status(), GameStatus::Won);
        assert_eq!(
            session.reveal((0, 0)).unwrap(),
            RevealReport::unchanged(GameStatus::Won)
        );
    }

    #[test]
    fn session_applies_configured_rules() {
        let config = GameConfig::new((4, 4), MineDensity::Count(0)).with_rules(Rules {
            flag_blocks_reveal: false,
        });
        let mut session = GameSession::new(config, 2).unwrap();
        let hidden = session
            .engine()
            .views()
            .find(|(_, view)| !view.shown)
            .map(|(coords, _)| coords)
            .unwrap();

        session.toggle_flag(hidden).unwrap();
        let report = session.reveal(hidden).unwrap();

        assert_eq!(report.status, GameStatus::Won);
        assert!(session.engine().views().all(|(_, view)| view.shown));
    }

    #[test]
    fn invalid_config_is_reported_at_creation() {
        let config = GameConfig::new((2, 2), MineDensity::Probability(1.0));

        assert_eq!(
            GameSession::new(config, 0).err(),
            Some(GameError::InvalidConfig(ConfigError::InvalidProbability))
        );
    }

    #[test]
    fn cell_view_validates_coords() {
        let session = GameSession::new(GameConfig::default(), 3).unwrap();

        assert!(session.cell_view((9, 14)).is_ok());
        assert!(matches!(
            session.cell_view((10, 0)),
            Err(GameError::InvalidCoords { .. })
        ));
    }
}
