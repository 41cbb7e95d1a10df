//! Shared game content catalog.
//!
//! Predicates reference content by name: `LIBRARY` pulls a reusable
//! predicate definition, quest predicates look up a quest's activation and
//! goal, descriptions are rendered from per-kind string templates. All of
//! that lives here, loaded once from JSON and borrowed by every evaluation.
//!
//! ```
//! use game_predicates::core::{Gamedata, QuestSpec};
//! use serde_json::json;
//!
//! let gamedata = Gamedata::new()
//!     .with_library_entry("is_veteran", json!({ "predicate": "PLAYER_LEVEL", "level": 10 }))
//!     .with_quest("first_blood", QuestSpec::new(json!({ "predicate": "ALWAYS_TRUE" })));
//!
//! assert!(gamedata.library_entry("is_veteran").is_some());
//! assert!(gamedata.quest("first_blood").is_some());
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{PredicateError, PredicateResult};

/// A quest definition, as far as predicates care.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestSpec {
    /// Display name, substituted into descriptions.
    #[serde(default)]
    pub ui_name: String,
    /// Predicate config that must hold before the quest is offered.
    #[serde(default)]
    pub activation: Option<Value>,
    /// Predicate config for quest completion.
    pub goal: Value,
    /// Completion only counts once the player has claimed the reward.
    #[serde(default)]
    pub force_claim: bool,
}

impl QuestSpec {
    /// Create a quest with the given goal config.
    pub fn new(goal: Value) -> Self {
        Self {
            goal,
            ..Default::default()
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_ui_name(mut self, name: impl Into<String>) -> Self {
        self.ui_name = name.into();
        self
    }

    /// Set the activation predicate config.
    #[must_use]
    pub fn with_activation(mut self, activation: Value) -> Self {
        self.activation = Some(activation);
        self
    }

    /// Require an explicit claim.
    #[must_use]
    pub fn force_claim(mut self) -> Self {
        self.force_claim = true;
        self
    }
}

/// Building metadata used by building predicates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildingSpec {
    /// Display name.
    #[serde(default)]
    pub ui_name: String,
    /// Display name with an indefinite article ("a Barracks").
    #[serde(default)]
    pub ui_name_indefinite: Option<String>,
    /// Hide the building from the UI unless this predicate holds.
    #[serde(default)]
    pub show_if: Option<Value>,
}

impl BuildingSpec {
    /// Create building metadata with a display name.
    pub fn new(ui_name: impl Into<String>) -> Self {
        Self {
            ui_name: ui_name.into(),
            ..Default::default()
        }
    }

    /// Set the `show_if` predicate config.
    #[must_use]
    pub fn with_show_if(mut self, show_if: Value) -> Self {
        self.show_if = Some(show_if);
        self
    }
}

/// Aura metadata used by aura predicates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuraSpec {
    /// Display name.
    #[serde(default)]
    pub ui_name: String,
    /// Can the player pay to end the aura early?
    #[serde(default)]
    pub speedupable: bool,
}

/// Description templates for one predicate kind or history key.
///
/// Placeholders (`%s`, `%d`, `%d1`, `%d2`, `%togo`) are filled in by each
/// predicate kind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredicateStrings {
    #[serde(default)]
    pub ui_name: Option<String>,
    #[serde(default)]
    pub ui_name_togo: Option<String>,
    #[serde(default)]
    pub ui_progress: Option<String>,
}

impl PredicateStrings {
    /// Strings with only a `ui_name` template.
    pub fn named(ui_name: impl Into<String>) -> Self {
        Self {
            ui_name: Some(ui_name.into()),
            ..Default::default()
        }
    }

    /// Add a progress template.
    #[must_use]
    pub fn with_progress(mut self, template: impl Into<String>) -> Self {
        self.ui_progress = Some(template.into());
        self
    }

    /// Add a "time to go" template.
    #[must_use]
    pub fn with_togo(mut self, template: impl Into<String>) -> Self {
        self.ui_name_togo = Some(template.into());
        self
    }
}

/// UI string tables.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UiStrings {
    /// Keyed by predicate kind (`"BUILDING_QUANTITY"`).
    #[serde(default)]
    pub predicates: FxHashMap<String, PredicateStrings>,
    /// Keyed by player history key (`"attacks_launched"`).
    #[serde(default)]
    pub player_history: FxHashMap<String, PredicateStrings>,
}

/// The content catalog predicates resolve names against.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Gamedata {
    /// Reusable predicate definitions for `LIBRARY`.
    #[serde(default)]
    pub predicate_library: FxHashMap<String, Value>,
    /// Quest definitions.
    #[serde(default)]
    pub quests: FxHashMap<String, QuestSpec>,
    /// Building metadata.
    #[serde(default)]
    pub buildings: FxHashMap<String, BuildingSpec>,
    /// Aura metadata.
    #[serde(default)]
    pub auras: FxHashMap<String, AuraSpec>,
    /// UI string tables.
    #[serde(default)]
    pub strings: UiStrings,
    /// Root of the `GAMEDATA_VAR` lookup tree.
    #[serde(default)]
    pub vars: Value,
}

impl Gamedata {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from JSON text.
    pub fn from_json(text: &str) -> PredicateResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parse a catalog from an already-decoded JSON value.
    pub fn from_value(value: Value) -> PredicateResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Add a reusable predicate definition.
    #[must_use]
    pub fn with_library_entry(mut self, name: impl Into<String>, config: Value) -> Self {
        self.predicate_library.insert(name.into(), config);
        self
    }

    /// Add a quest.
    #[must_use]
    pub fn with_quest(mut self, name: impl Into<String>, quest: QuestSpec) -> Self {
        self.quests.insert(name.into(), quest);
        self
    }

    /// Add building metadata.
    #[must_use]
    pub fn with_building(mut self, name: impl Into<String>, spec: BuildingSpec) -> Self {
        self.buildings.insert(name.into(), spec);
        self
    }

    /// Add aura metadata.
    #[must_use]
    pub fn with_aura(mut self, name: impl Into<String>, spec: AuraSpec) -> Self {
        self.auras.insert(name.into(), spec);
        self
    }

    /// Add description templates for a predicate kind.
    #[must_use]
    pub fn with_strings(mut self, kind: impl Into<String>, strings: PredicateStrings) -> Self {
        self.strings.predicates.insert(kind.into(), strings);
        self
    }

    /// Add progress templates for a player history key.
    #[must_use]
    pub fn with_history_strings(mut self, key: impl Into<String>, strings: PredicateStrings) -> Self {
        self.strings.player_history.insert(key.into(), strings);
        self
    }

    /// Set the `GAMEDATA_VAR` root.
    #[must_use]
    pub fn with_vars(mut self, vars: Value) -> Self {
        self.vars = vars;
        self
    }

    /// Look up a library predicate config.
    #[must_use]
    pub fn library_entry(&self, name: &str) -> Option<&Value> {
        self.predicate_library.get(name)
    }

    /// Look up a quest.
    #[must_use]
    pub fn quest(&self, name: &str) -> Option<&QuestSpec> {
        self.quests.get(name)
    }

    /// Look up building metadata.
    #[must_use]
    pub fn building(&self, name: &str) -> Option<&BuildingSpec> {
        self.buildings.get(name)
    }

    /// Look up aura metadata.
    #[must_use]
    pub fn aura(&self, name: &str) -> Option<&AuraSpec> {
        self.auras.get(name)
    }

    /// Description templates for a kind, if any.
    #[must_use]
    pub fn strings_for(&self, kind: &str) -> Option<&PredicateStrings> {
        self.strings.predicates.get(kind)
    }

    /// The `ui_name` template for a kind, or `MissingUiString`.
    pub fn ui_name_template(&self, kind: &str) -> PredicateResult<&str> {
        self.strings_for(kind)
            .and_then(|s| s.ui_name.as_deref())
            .ok_or_else(|| PredicateError::MissingUiString {
                kind: kind.to_string(),
            })
    }

    /// Resolve a dotted path (`"events.harvest.bonus"`) under `vars`.
    pub fn var(&self, path: &str) -> PredicateResult<&Value> {
        let mut node = &self.vars;
        for segment in path.split('.') {
            node = node
                .as_object()
                .and_then(|obj| obj.get(segment))
                .ok_or_else(|| PredicateError::UnknownVar {
                    name: path.to_string(),
                })?;
        }
        Ok(node)
    }
}
