//! Core types: the game context seam, the content catalog, errors, RNG.
//!
//! Nothing in here knows about predicate kinds. This module defines what
//! predicates evaluate *against*; the `predicates` module defines what they
//! *are*.

pub mod context;
pub mod entity;
pub mod error;
pub mod gamedata;
pub mod rng;

pub use context::{Aura, Building, Cooldown, GameContext, QueryData};
pub use entity::EntityId;
pub use error::{PredicateError, PredicateResult};
pub use gamedata::{AuraSpec, BuildingSpec, Gamedata, PredicateStrings, QuestSpec, UiStrings};
pub use rng::{ChanceRng, ChanceRngState};
