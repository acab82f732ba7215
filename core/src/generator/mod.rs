use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    fn generate(self, config: &GameConfig) -> Result<Board>;
}

/// Generates a board for `config` with [`RandomBoardGenerator`] drawing from `rng`.
pub fn generate<R: rand::Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<Board> {
    RandomBoardGenerator::new(rng).generate(config)
}
