//! # game-predicates
//!
//! A data-driven rule engine for game content: quest goals, unlock
//! requirements, store visibility and event gating are all written as
//! JSON predicate trees and evaluated against live player state.
//!
//! ## Design Principles
//!
//! 1. **Closed Kind Set**: Config names a kind by string; the string is
//!    resolved once at construction into an exhaustive enum.
//!
//! 2. **Explain, Don't Just Answer**: Every predicate can say why it is
//!    unsatisfied, suggest an action and report when it expires.
//!
//! 3. **Host-Agnostic**: The engine reads game state only through the
//!    `GameContext` trait and never mutates it.
//!
//! ## Modules
//!
//! - `core`: Game context seam, gamedata catalog, errors, RNG, entity IDs
//! - `predicates`: Predicate trees, the factory and the explanation protocol
//! - `cache`: Per-epoch memoization of recursive quest checks
//! - `cond`: Cond chains (predicate-guarded value selection)
//! - `games`: Reference host implementations
//!
//! ## Example
//!
//! ```
//! use game_predicates::core::{Gamedata, PredicateStrings};
//! use game_predicates::games::simple::SimplePlayerBuilder;
//! use game_predicates::predicates::{EvalContext, Predicate};
//! use serde_json::json;
//!
//! let gamedata = Gamedata::new().with_strings("PLAYER_LEVEL", PredicateStrings::named("Reach level %d"));
//! let player = SimplePlayerBuilder::new().level(3).build();
//! let ctx = EvalContext::new(&player, &gamedata);
//!
//! let pred = Predicate::build(&json!({ "predicate": "PLAYER_LEVEL", "level": 5 }), &gamedata).unwrap();
//! assert!(!pred.is_satisfied(&ctx, None).unwrap());
//! assert_eq!(pred.describe(&ctx).unwrap().as_deref(), Some("Reach level 5"));
//! ```

pub mod core;
pub mod predicates;
pub mod cache;
pub mod cond;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    Aura, Building, Cooldown, GameContext, QueryData,
    EntityId,
    PredicateError, PredicateResult,
    AuraSpec, BuildingSpec, Gamedata, PredicateStrings, QuestSpec, UiStrings,
    ChanceRng, ChanceRngState,
};

pub use crate::predicates::{
    EvalContext, Predicate, PredicateFactory, PredicateKind, Leaf,
    Explanation, ExplanationOptions, HelpAction, HelpTarget, TimeRange,
};

pub use crate::cache::{CacheEpoch, PredicateCache};

pub use crate::cond::{
    eval_cond, eval_cond_or_literal, eval_pred_or_literal, is_cond_chain,
    CondArm, CondChain, CondValue,
};
