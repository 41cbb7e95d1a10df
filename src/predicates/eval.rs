//! Evaluation context threaded through every protocol call.

use std::cell::RefCell;

use rand::Rng;

use crate::cache::PredicateCache;
use crate::core::{ChanceRng, Gamedata, GameContext};

use super::factory::PredicateFactory;

/// Everything a predicate may read while evaluating.
///
/// Cheap to copy: it only holds borrows. The cache and RNG are optional;
/// without a cache, quest checks recompute every time, and without an RNG,
/// `RANDOM` draws from the thread-local generator.
#[derive(Clone, Copy)]
pub struct EvalContext<'a> {
    /// Player, session and world state.
    pub game: &'a dyn GameContext,
    /// Content catalog.
    pub gamedata: &'a Gamedata,
    /// Quest completion cache.
    pub cache: Option<&'a PredicateCache>,
    /// Seeded randomness for `RANDOM`.
    pub rng: Option<&'a RefCell<ChanceRng>>,
    /// Nesting limit for trees built during evaluation (quest goals,
    /// activations, `show_if`, cond arms).
    pub max_depth: usize,
}

impl<'a> EvalContext<'a> {
    /// Create a context with no cache and no seeded RNG.
    pub fn new(game: &'a dyn GameContext, gamedata: &'a Gamedata) -> Self {
        Self {
            game,
            gamedata,
            cache: None,
            rng: None,
            max_depth: PredicateFactory::DEFAULT_MAX_DEPTH,
        }
    }

    /// Attach a quest completion cache.
    #[must_use]
    pub fn with_cache(mut self, cache: &'a PredicateCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Attach a seeded RNG.
    #[must_use]
    pub fn with_rng(mut self, rng: &'a RefCell<ChanceRng>) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Limit nesting of trees built during evaluation.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Current server time.
    #[must_use]
    pub fn now(&self) -> i64 {
        self.game.now()
    }

    /// A factory over this context's gamedata, for lazily built sub-trees.
    #[must_use]
    pub fn factory(&self) -> PredicateFactory<'a> {
        PredicateFactory::new(self.gamedata).with_max_depth(self.max_depth)
    }

    /// One roll against `chance`, on the seeded RNG when present.
    pub(crate) fn chance(&self, chance: f64) -> bool {
        match self.rng {
            Some(rng) => rng.borrow_mut().chance(chance),
            None => rand::thread_rng().gen::<f64>() < chance,
        }
    }
}

impl std::fmt::Debug for EvalContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvalContext")
            .field("now", &self.game.now())
            .field("cache", &self.cache)
            .field("rng", &self.rng.is_some())
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}
