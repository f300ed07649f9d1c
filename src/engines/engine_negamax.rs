//! Fixed-depth negamax engine over the standard evaluation.

use rand::rngs::StdRng;
use tracing::debug;

use crate::chess_errors::ChessResult;
use crate::engines::engine_trait::{engine_rng, Engine, EngineOutput};
use crate::game_state::game_state::GameState;
use crate::search::board_scoring::StandardScorer;
use crate::search::negamax::{NegamaxSearch, SearchConfig};

pub struct NegamaxEngine {
    config: SearchConfig,
    search: NegamaxSearch<StandardScorer>,
    rng: StdRng,
}

impl NegamaxEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_rng(config, engine_rng(None))
    }

    pub fn with_seed(config: SearchConfig, seed: u64) -> Self {
        Self::with_rng(config, engine_rng(Some(seed)))
    }

    pub fn with_rng(config: SearchConfig, rng: StdRng) -> Self {
        Self {
            config,
            search: NegamaxSearch::new(StandardScorer),
            rng,
        }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }
}

impl Default for NegamaxEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Engine for NegamaxEngine {
    fn name(&self) -> &str {
        "OlegChess Negamax"
    }

    fn new_game(&mut self) {
        self.search = NegamaxSearch::new(StandardScorer);
    }

    fn choose_move(&mut self, game_state: &mut GameState) -> ChessResult<EngineOutput> {
        let result = self.search.search(game_state, &self.config, &mut self.rng)?;
        debug!(
            depth = self.config.depth,
            score = result.best_score,
            nodes = result.nodes,
            "negamax engine"
        );

        Ok(EngineOutput {
            best_move: result.best_move,
            score: Some(result.best_score),
            nodes: result.nodes,
        })
    }
}
