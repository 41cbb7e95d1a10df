//! What the UI gets back from the explanation protocol.
//!
//! - [`Explanation`]: why a predicate is unsatisfied.
//! - [`HelpAction`]: what the player could do about it.
//! - [`TimeRange`]: when the verdict may flip.

use serde::{Deserialize, Serialize};

use crate::core::EntityId;

/// Options attached to an explanation.
///
/// `None` means "not stated", which matters when combinators merge the
/// options of several children: only stated values override.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplanationOptions {
    /// Done, but not yet claimed.
    pub already_obtained: Option<bool>,
}

impl ExplanationOptions {
    /// Merge `other` into `self`; stated values in `other` win.
    pub fn merge(&mut self, other: &ExplanationOptions) {
        if other.already_obtained.is_some() {
            self.already_obtained = other.already_obtained;
        }
    }
}

/// Human-readable reason a predicate is unsatisfied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub text: String,
    pub options: ExplanationOptions,
}

impl Explanation {
    /// Explanation with no options.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            options: ExplanationOptions::default(),
        }
    }

    /// Explanation with an explicit `already_obtained` flag.
    pub fn with_already_obtained(text: impl Into<String>, already_obtained: bool) -> Self {
        Self {
            text: text.into(),
            options: ExplanationOptions {
                already_obtained: Some(already_obtained),
            },
        }
    }

    /// Is the goal done but unclaimed?
    #[must_use]
    pub fn already_obtained(&self) -> bool {
        self.options.already_obtained.unwrap_or(false)
    }
}

/// What a help action points at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HelpTarget {
    /// A live game object (e.g. the building to speed up).
    Entity(EntityId),
    /// A content spec by name (e.g. the building type to build).
    Spec(String),
}

/// A structured suggestion the UI can turn into a button.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpAction {
    /// What kind of thing to act on (`"building"`, `"player_aura"`).
    pub noun: String,
    /// What to do (`"build_first"`, `"speedup"`).
    pub verb: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<HelpTarget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_arg_s: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_arg_d: Option<i64>,
    /// Manual override text copied from config.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_name: Option<String>,
    /// Manual override title copied from config.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_title: Option<String>,
}

impl HelpAction {
    /// Create a help action.
    pub fn new(noun: impl Into<String>, verb: impl Into<String>) -> Self {
        Self {
            noun: noun.into(),
            verb: verb.into(),
            target: None,
            ui_arg_s: None,
            ui_arg_d: None,
            ui_name: None,
            ui_title: None,
        }
    }

    /// The catch-all action shown when only override text is known.
    pub fn generic(text: impl Into<String>) -> Self {
        Self::new("generic", "generic").with_arg_s(text)
    }

    /// Set the target.
    #[must_use]
    pub fn with_target(mut self, target: HelpTarget) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the string argument.
    #[must_use]
    pub fn with_arg_s(mut self, arg: impl Into<String>) -> Self {
        self.ui_arg_s = Some(arg.into());
        self
    }

    /// Set the numeric argument.
    #[must_use]
    pub fn with_arg_d(mut self, arg: i64) -> Self {
        self.ui_arg_d = Some(arg);
        self
    }
}

/// `[start, end]` unix timestamps bounding when a predicate holds.
///
/// `-1` in either slot means unbounded or unknown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: i64,
    pub end: i64,
}

impl TimeRange {
    /// No known bounds.
    pub const UNBOUNDED: TimeRange = TimeRange { start: -1, end: -1 };

    /// Create a range.
    #[must_use]
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// The expiry timestamp (`end`), `-1` when not time-bounded.
    #[must_use]
    pub const fn expire_time(self) -> i64 {
        self.end
    }

    /// Intersect with `other`: latest positive start, earliest positive end.
    pub fn narrow(&mut self, other: TimeRange) {
        if other.start > 0 {
            self.start = if self.start > 0 { self.start.max(other.start) } else { other.start };
        }
        if other.end > 0 {
            self.end = if self.end > 0 { self.end.min(other.end) } else { other.end };
        }
    }

    /// Union with `other`: earliest positive start, latest positive end.
    pub fn widen(&mut self, other: TimeRange) {
        if other.start > 0 {
            self.start = if self.start > 0 { self.start.min(other.start) } else { other.start };
        }
        if other.end > 0 {
            self.end = if self.end > 0 { self.end.max(other.end) } else { other.end };
        }
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}
