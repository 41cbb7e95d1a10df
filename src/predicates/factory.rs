//! Construction of predicate trees from JSON config.
//!
//! The factory is the only place a kind string is looked at. It validates
//! everything it can up front: unknown kinds, malformed parameters,
//! dangling library and quest names, unsupported comparison methods and
//! runaway nesting all fail here rather than during evaluation.
//!
//! ```
//! use game_predicates::core::Gamedata;
//! use game_predicates::predicates::{PredicateFactory, PredicateKind};
//! use serde_json::json;
//!
//! let gamedata = Gamedata::new();
//! let factory = PredicateFactory::new(&gamedata);
//!
//! let pred = factory
//!     .build(&json!({
//!         "predicate": "AND",
//!         "subpredicates": [{ "predicate": "ALWAYS_TRUE" }, { "predicate": "PLAYER_LEVEL", "level": 5 }]
//!     }))
//!     .unwrap();
//! assert_eq!(pred.kind(), PredicateKind::And);
//! assert_eq!(pred.children().len(), 2);
//!
//! assert!(factory.build(&json!({ "predicate": "NO_SUCH_KIND" })).is_err());
//! ```

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::core::{Gamedata, PredicateError, PredicateResult};

use super::kind::PredicateKind;
use super::leaf::{CompareMethod, HistoryCheck, Leaf, QuestRef, VarCheck, VarMethod};
use super::predicate::{Node, Predicate, UiOverrides};

#[derive(Deserialize)]
struct ChanceConfig {
    chance: f64,
}

#[derive(Deserialize)]
struct LevelConfig {
    level: i64,
}

#[derive(Deserialize)]
struct LibraryConfig {
    name: String,
}

#[derive(Deserialize)]
struct HistoryConfig {
    key: String,
    value: i64,
    #[serde(default = "default_history_method")]
    method: String,
}

fn default_history_method() -> String {
    ">=".to_string()
}

#[derive(Deserialize)]
struct CountConfig {
    number: i64,
}

#[derive(Deserialize)]
struct HarvestConfig {
    resource_type: String,
    amount: i64,
}

#[derive(Deserialize)]
struct VarConfig {
    name: String,
    value: Value,
    #[serde(default)]
    method: Option<String>,
}

#[derive(Deserialize)]
struct OverrideConfig {
    #[serde(default)]
    ui_name: Option<String>,
    #[serde(default)]
    ui_already_obtained: bool,
    #[serde(default)]
    ui_title: Option<String>,
}

/// Builds [`Predicate`] trees against a gamedata catalog.
#[derive(Clone, Copy, Debug)]
pub struct PredicateFactory<'g> {
    gamedata: &'g Gamedata,
    max_depth: usize,
}

impl<'g> PredicateFactory<'g> {
    /// Default limit on nested construction.
    pub const DEFAULT_MAX_DEPTH: usize = 32;

    /// Create a factory with the default depth limit.
    #[must_use]
    pub fn new(gamedata: &'g Gamedata) -> Self {
        Self {
            gamedata,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the nesting limit.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The catalog names are resolved against.
    #[must_use]
    pub fn gamedata(&self) -> &'g Gamedata {
        self.gamedata
    }

    /// Build a predicate tree from a config object.
    pub fn build(&self, config: &Value) -> PredicateResult<Predicate> {
        self.build_at(config, 0)
    }

    fn build_at(&self, config: &Value, depth: usize) -> PredicateResult<Predicate> {
        if depth > self.max_depth {
            return Err(PredicateError::NestingTooDeep { limit: self.max_depth });
        }

        let missing_kind = || PredicateError::MissingKind {
            config: config.to_string(),
        };
        let data = config.as_object().ok_or_else(missing_kind)?;
        let name = data
            .get("predicate")
            .or_else(|| data.get("kind"))
            .and_then(Value::as_str)
            .ok_or_else(missing_kind)?;
        let kind = PredicateKind::from_name(name).ok_or_else(|| {
            tracing::debug!(kind = name, "rejecting unknown predicate kind");
            PredicateError::UnknownKind {
                kind: name.to_string(),
                config: config.to_string(),
            }
        })?;

        let overrides = self.read_overrides(kind, config, data, depth)?;
        let node = self.build_node(kind, config, data, depth)?;
        Ok(Predicate::from_parts(kind, data.clone(), overrides, node))
    }

    fn read_overrides(
        &self,
        kind: PredicateKind,
        config: &Value,
        data: &Map<String, Value>,
        depth: usize,
    ) -> PredicateResult<UiOverrides> {
        let OverrideConfig {
            ui_name,
            ui_already_obtained,
            ui_title,
        } = decode(kind, config)?;
        let help_predicate = match data.get("help_predicate") {
            Some(stand_in) => Some(Box::new(self.build_at(stand_in, depth + 1)?)),
            None => None,
        };
        Ok(UiOverrides {
            ui_name,
            ui_already_obtained,
            ui_title,
            help_predicate,
        })
    }

    fn build_children(
        &self,
        kind: PredicateKind,
        data: &Map<String, Value>,
        depth: usize,
    ) -> PredicateResult<Vec<Predicate>> {
        let configs = data
            .get("subpredicates")
            .and_then(Value::as_array)
            .ok_or_else(|| PredicateError::InvalidConfig {
                kind: kind.as_str().to_string(),
                message: "missing subpredicates array".to_string(),
            })?;
        configs.iter().map(|child| self.build_at(child, depth + 1)).collect()
    }

    fn build_node(
        &self,
        kind: PredicateKind,
        config: &Value,
        data: &Map<String, Value>,
        depth: usize,
    ) -> PredicateResult<Node> {
        let leaf = match kind {
            PredicateKind::And => return Ok(Node::And(self.build_children(kind, data, depth)?)),
            PredicateKind::Or => return Ok(Node::Or(self.build_children(kind, data, depth)?)),
            PredicateKind::Not => {
                let child = self
                    .build_children(kind, data, depth)?
                    .into_iter()
                    .next()
                    .ok_or_else(|| PredicateError::InvalidConfig {
                        kind: kind.as_str().to_string(),
                        message: "NOT requires a subpredicate".to_string(),
                    })?;
                return Ok(Node::Not(Box::new(child)));
            }
            PredicateKind::Library => {
                let LibraryConfig { name } = decode(kind, config)?;
                let target = self
                    .gamedata
                    .library_entry(&name)
                    .ok_or_else(|| PredicateError::UnknownLibraryEntry { name: name.clone() })?;
                tracing::trace!(name = %name, depth, "expanding library predicate");
                let target = Box::new(self.build_at(target, depth + 1)?);
                return Ok(Node::Library { name, target });
            }

            PredicateKind::AlwaysTrue => Leaf::AlwaysTrue,
            PredicateKind::AlwaysFalse => Leaf::AlwaysFalse,
            PredicateKind::Random => {
                let ChanceConfig { chance } = decode(kind, config)?;
                Leaf::Random { chance }
            }
            PredicateKind::TutorialComplete => Leaf::TutorialComplete,
            PredicateKind::AccountCreationTime => Leaf::AccountCreationTime(decode(kind, config)?),
            PredicateKind::PlayerLevel => {
                let LevelConfig { level } = decode(kind, config)?;
                Leaf::PlayerLevel { level }
            }

            PredicateKind::PlayerHistory => {
                let HistoryConfig { key, value, method } = decode(kind, config)?;
                Leaf::PlayerHistory(HistoryCheck {
                    ui_arg_s: key.clone(),
                    ui_arg_d: value.to_string(),
                    key,
                    threshold: value,
                    method: CompareMethod::parse(&method)?,
                    relative: is_relative(data),
                })
            }
            PredicateKind::AttacksLaunched
            | PredicateKind::AttacksVictory
            | PredicateKind::UnitsManufactured
            | PredicateKind::LoggedInTimes => {
                let CountConfig { number } = decode(kind, config)?;
                let key = match kind {
                    PredicateKind::AttacksLaunched => "attacks_launched",
                    PredicateKind::AttacksVictory => "attacks_victory",
                    PredicateKind::UnitsManufactured => "units_manufactured",
                    _ => "logged_in_times",
                };
                Leaf::PlayerHistory(HistoryCheck {
                    key: key.to_string(),
                    threshold: number,
                    method: CompareMethod::AtLeast,
                    relative: is_relative(data),
                    ui_arg_s: String::new(),
                    ui_arg_d: number.to_string(),
                })
            }
            PredicateKind::ResourcesHarvestedTotal => {
                let HarvestConfig { resource_type, amount } = decode(kind, config)?;
                Leaf::PlayerHistory(HistoryCheck {
                    key: format!("harvested_{resource_type}_total"),
                    threshold: amount,
                    method: CompareMethod::AtLeast,
                    relative: is_relative(data),
                    ui_arg_s: resource_type,
                    ui_arg_d: amount.to_string(),
                })
            }

            PredicateKind::BuildingQuantity => Leaf::BuildingQuantity(decode(kind, config)?),

            PredicateKind::QuestCompleted | PredicateKind::QuestActive => {
                let quest: QuestRef = decode(kind, config)?;
                if self.gamedata.quest(&quest.quest_name).is_none() {
                    return Err(PredicateError::UnknownQuest {
                        name: quest.quest_name,
                    });
                }
                if kind == PredicateKind::QuestCompleted {
                    Leaf::QuestCompleted(quest)
                } else {
                    Leaf::QuestActive(quest)
                }
            }

            PredicateKind::AuraActive => Leaf::AuraActive(decode(kind, config)?),
            PredicateKind::AuraInactive => Leaf::AuraInactive(decode(kind, config)?),
            PredicateKind::CooldownActive => Leaf::CooldownActive(decode(kind, config)?),
            PredicateKind::CooldownInactive => Leaf::CooldownInactive(decode(kind, config)?),
            PredicateKind::AbsoluteTime => Leaf::AbsoluteTime(decode(kind, config)?),

            PredicateKind::GamedataVar => {
                let VarConfig { name, value, method } = decode(kind, config)?;
                let method = match method.as_deref() {
                    Some(method) => VarMethod::parse(method)?,
                    None => VarMethod::Equal,
                };
                Leaf::GamedataVar(VarCheck { name, value, method })
            }
        };
        Ok(Node::Leaf(leaf))
    }
}

fn is_relative(data: &Map<String, Value>) -> bool {
    data.get("relative").and_then(Value::as_bool).unwrap_or(false)
}

/// Decode kind parameters from the whole config object.
fn decode<T: DeserializeOwned>(kind: PredicateKind, config: &Value) -> PredicateResult<T> {
    T::deserialize(config).map_err(|err| PredicateError::InvalidConfig {
        kind: kind.as_str().to_string(),
        message: err.to_string(),
    })
}
