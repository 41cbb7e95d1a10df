//! The read-only view of game state that predicates evaluate against.
//!
//! The engine imposes no schema on player or world state. Hosts implement
//! [`GameContext`] over whatever they store; each leaf predicate reads only
//! the accessor it needs. Every accessor except [`GameContext::now`] has a
//! neutral default so narrow hosts (and test doubles) stay small.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::EntityId;

/// Caller-supplied side channel for relative checks.
///
/// Typically a baseline snapshot of player history taken when a quest was
/// accepted, so "gained N since then" can subtract it.
pub type QueryData = Map<String, Value>;

/// A timed player effect (buff, debuff, event marker).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Aura {
    /// Aura spec name.
    pub spec: String,
    /// Stack count (1 when unstacked).
    #[serde(default = "one")]
    pub stack: i64,
    /// Aura level (1 when unleveled).
    #[serde(default = "one")]
    pub level: i64,
    /// Activation time. Absent means active since forever.
    #[serde(default)]
    pub start_time: Option<i64>,
    /// Expiry time. Absent or non-positive means permanent.
    #[serde(default)]
    pub end_time: Option<i64>,
    /// Free-form payload matched by `match_data`.
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
}

fn one() -> i64 {
    1
}

impl Aura {
    /// Create a permanent single-stack aura.
    pub fn new(spec: impl Into<String>) -> Self {
        Self {
            spec: spec.into(),
            stack: 1,
            level: 1,
            ..Default::default()
        }
    }

    /// Set the stack count.
    #[must_use]
    pub fn with_stack(mut self, stack: i64) -> Self {
        self.stack = stack;
        self
    }

    /// Set the level.
    #[must_use]
    pub fn with_level(mut self, level: i64) -> Self {
        self.level = level;
        self
    }

    /// Set the active window.
    #[must_use]
    pub fn with_window(mut self, start: i64, end: i64) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }

    /// Attach a data payload.
    #[must_use]
    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data = Some(data);
        self
    }

    /// Is the aura in effect at `now`?
    #[must_use]
    pub fn is_live(&self, now: i64) -> bool {
        if self.start_time.is_some_and(|start| start > now) {
            return false;
        }
        !self.end_time.is_some_and(|end| end > 0 && end < now)
    }
}

/// A running cooldown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooldown {
    /// Start time (unix seconds).
    pub start: i64,
    /// End time (unix seconds).
    pub end: i64,
}

/// A building owned by the player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    /// Host entity id, used as a help-action target.
    pub id: EntityId,
    /// Building spec name.
    pub spec: String,
    /// Still under construction?
    #[serde(default)]
    pub under_construction: bool,
}

impl Building {
    /// Create a finished building.
    pub fn new(id: EntityId, spec: impl Into<String>) -> Self {
        Self {
            id,
            spec: spec.into(),
            under_construction: false,
        }
    }

    /// Mark the building as under construction.
    #[must_use]
    pub fn under_construction(mut self) -> Self {
        self.under_construction = true;
        self
    }
}

/// Read-only handle to player, session and world state.
///
/// The engine never mutates state through this trait. Hosts must not mutate
/// the underlying state while a single evaluation call is in progress, nor
/// while a cache epoch is open.
pub trait GameContext {
    /// Current server time (unix seconds).
    fn now(&self) -> i64;

    /// Account creation time, or a negative value when unknown.
    fn creation_time(&self) -> i64 {
        -1
    }

    /// Has the player finished the tutorial?
    fn tutorial_complete(&self) -> bool {
        false
    }

    /// Player history counter (attacks launched, resources harvested...).
    fn history(&self, _key: &str) -> Option<i64> {
        None
    }

    /// Has the player claimed this quest?
    fn has_completed_quest(&self, _quest: &str) -> bool {
        false
    }

    /// Player level.
    fn level(&self) -> i64 {
        1
    }

    /// All auras on the player, live or not.
    fn auras(&self) -> &[Aura] {
        &[]
    }

    /// Find a cooldown by name, optionally matching its data payload.
    fn cooldown(&self, _name: &str, _match_data: Option<&Map<String, Value>>) -> Option<Cooldown> {
        None
    }

    /// Buildings owned by the player in the current base.
    fn buildings(&self) -> &[Building] {
        &[]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aura_liveness() {
        let permanent = Aura::new("shield");
        assert!(permanent.is_live(1_000));

        let windowed = Aura::new("shield").with_window(100, 200);
        assert!(!windowed.is_live(50));
        assert!(windowed.is_live(150));
        assert!(!windowed.is_live(250));

        // Non-positive end time means permanent.
        let open_ended = Aura::new("shield").with_window(100, -1);
        assert!(open_ended.is_live(10_000));
    }

    #[test]
    fn test_aura_deserialize_defaults() {
        let aura: Aura = serde_json::from_value(serde_json::json!({ "spec": "haste" })).unwrap();
        assert_eq!(aura.stack, 1);
        assert_eq!(aura.level, 1);
        assert!(aura.start_time.is_none());
    }

    struct Minimal;

    impl GameContext for Minimal {
        fn now(&self) -> i64 {
            10
        }
    }

    #[test]
    fn test_context_defaults() {
        let ctx = Minimal;
        assert_eq!(ctx.creation_time(), -1);
        assert!(!ctx.tutorial_complete());
        assert_eq!(ctx.history("anything"), None);
        assert_eq!(ctx.level(), 1);
        assert!(ctx.auras().is_empty());
        assert!(ctx.buildings().is_empty());
        assert!(ctx.cooldown("cd", None).is_none());
    }
}
