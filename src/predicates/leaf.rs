//! Leaf predicates: the kinds that read game state directly.
//!
//! Each leaf holds its decoded parameters. Names that point into gamedata
//! (quests, buildings, auras) are resolved against the catalog in the
//! evaluation context, so a leaf stays valid for as long as that catalog
//! does.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::cond;
use crate::core::{Aura, Building, Gamedata, PredicateError, PredicateResult, QueryData, QuestSpec};

use super::eval::EvalContext;
use super::explain::{Explanation, HelpAction, HelpTarget, TimeRange};
use super::kind::PredicateKind;
use super::text::{pretty_duration, pretty_number};

fn one() -> i64 {
    1
}

fn minus_one() -> i64 {
    -1
}

/// Numeric comparison used by player history checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareMethod {
    /// `>=`
    AtLeast,
    /// `==`
    Equal,
    /// `<`
    Below,
}

impl CompareMethod {
    /// Parse a config method string.
    pub fn parse(method: &str) -> PredicateResult<Self> {
        match method {
            ">=" => Ok(Self::AtLeast),
            "==" => Ok(Self::Equal),
            "<" => Ok(Self::Below),
            other => Err(PredicateError::UnknownMethod {
                method: other.to_string(),
            }),
        }
    }

    /// Apply the comparison.
    #[must_use]
    pub fn compare(self, value: i64, threshold: i64) -> bool {
        match self {
            Self::AtLeast => value >= threshold,
            Self::Equal => value == threshold,
            Self::Below => value < threshold,
        }
    }
}

/// How `GAMEDATA_VAR` compares the looked-up value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VarMethod {
    /// Looked-up value equals the configured value.
    Equal,
    /// Looked-up value is an element of the configured array.
    In,
}

impl VarMethod {
    /// Parse a config method string.
    pub fn parse(method: &str) -> PredicateResult<Self> {
        match method {
            "==" => Ok(Self::Equal),
            "in" => Ok(Self::In),
            other => Err(PredicateError::UnknownMethod {
                method: other.to_string(),
            }),
        }
    }
}

/// Account creation time and age bounds. Negative bounds are open.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CreationWindow {
    /// `[start, end)` bounds on the creation timestamp.
    #[serde(default)]
    pub range: Option<[i64; 2]>,
    /// `[min, max]` bounds on account age in seconds.
    #[serde(default)]
    pub age_range: Option<[i64; 2]>,
}

impl CreationWindow {
    /// Does an account created at `created` fall inside the window at `now`?
    #[must_use]
    pub fn contains(&self, created: i64, now: i64) -> bool {
        if let Some([start, end]) = self.range {
            if start >= 0 && created < start {
                return false;
            }
            if end >= 0 && created >= end {
                return false;
            }
        }
        if let Some([min_age, max_age]) = self.age_range {
            let age = now.saturating_sub(created);
            if min_age >= 0 && age < min_age {
                return false;
            }
            if max_age >= 0 && age > max_age {
                return false;
            }
        }
        true
    }
}

/// Required count of a building type.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct BuildingQuota {
    pub building_type: String,
    pub trigger_qty: i64,
    #[serde(default)]
    pub under_construction_ok: bool,
}

impl BuildingQuota {
    fn counts(&self, building: &Building) -> bool {
        building.spec == self.building_type && (self.under_construction_ok || !building.under_construction)
    }

    /// How many owned buildings count toward the quota.
    #[must_use]
    pub fn count(&self, buildings: &[Building]) -> i64 {
        buildings.iter().filter(|b| self.counts(b)).count() as i64
    }

    fn ui_name<'g>(&'g self, gamedata: &'g Gamedata) -> &'g str {
        gamedata
            .building(&self.building_type)
            .map_or(self.building_type.as_str(), |spec| spec.ui_name.as_str())
    }

    /// Hidden buildings (failing `show_if`) get no description or help.
    fn is_shown(&self, ctx: &EvalContext<'_>) -> PredicateResult<bool> {
        match ctx.gamedata.building(&self.building_type).and_then(|spec| spec.show_if.as_ref()) {
            Some(show_if) => ctx.factory().build(show_if)?.is_satisfied(ctx, None),
            None => Ok(true),
        }
    }

    fn describe(&self, template: &str, gamedata: &Gamedata) -> String {
        let qty = if self.trigger_qty > 1 {
            format!("{}x ", self.trigger_qty)
        } else {
            String::new()
        };
        template
            .replacen("%s", self.ui_name(gamedata), 1)
            .replacen("%d ", &qty, 1)
    }

    fn help(&self, ctx: &EvalContext<'_>) -> PredicateResult<Option<HelpAction>> {
        if !self.is_shown(ctx)? {
            return Ok(None);
        }

        let mut count = 0;
        let mut pending = None;
        for building in ctx.game.buildings().iter().filter(|b| b.spec == self.building_type) {
            if self.under_construction_ok || !building.under_construction {
                count += 1;
            } else {
                pending = Some(building.id);
            }
        }
        if count >= self.trigger_qty {
            return Ok(None);
        }

        let ui_name = self.ui_name(ctx.gamedata);
        let target = HelpTarget::Spec(self.building_type.clone());
        let action = match pending {
            Some(id) => HelpAction::new("building", "speedup")
                .with_target(HelpTarget::Entity(id))
                .with_arg_s(ui_name),
            None if count < 1 => {
                let indefinite = ctx
                    .gamedata
                    .building(&self.building_type)
                    .and_then(|spec| spec.ui_name_indefinite.as_deref())
                    .unwrap_or(ui_name);
                HelpAction::new("building", "build_first")
                    .with_target(target)
                    .with_arg_s(indefinite)
                    .with_arg_d(self.trigger_qty)
            }
            None => HelpAction::new("building", "build_more")
                .with_target(target)
                .with_arg_s(ui_name)
                .with_arg_d(self.trigger_qty),
        };
        Ok(Some(action))
    }
}

/// Reference to a quest by name.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct QuestRef {
    pub quest_name: String,
    /// Only a claimed quest counts.
    #[serde(default)]
    pub must_claim: bool,
}

impl QuestRef {
    fn spec<'g>(&self, gamedata: &'g Gamedata) -> PredicateResult<&'g QuestSpec> {
        gamedata.quest(&self.quest_name).ok_or_else(|| PredicateError::UnknownQuest {
            name: self.quest_name.clone(),
        })
    }

    fn is_completed(&self, ctx: &EvalContext<'_>) -> PredicateResult<bool> {
        let quest = self.spec(ctx.gamedata)?;
        if self.must_claim || quest.force_claim {
            return Ok(ctx.game.has_completed_quest(&self.quest_name));
        }
        match ctx.cache {
            Some(cache) => cache.get_or_compute(&self.quest_name, || goal_met(quest, ctx)),
            None => goal_met(quest, ctx),
        }
    }

    fn is_active(&self, ctx: &EvalContext<'_>) -> PredicateResult<bool> {
        if ctx.game.has_completed_quest(&self.quest_name) {
            return Ok(false);
        }
        let quest = self.spec(ctx.gamedata)?;
        let factory = ctx.factory();
        if let Some(activation) = &quest.activation {
            if !factory.build(activation)?.is_satisfied(ctx, None)? {
                return Ok(false);
            }
        }
        Ok(!factory.build(&quest.goal)?.is_satisfied(ctx, None)?)
    }
}

/// Activation (if any) and goal both hold, evaluated without query data.
fn goal_met(quest: &QuestSpec, ctx: &EvalContext<'_>) -> PredicateResult<bool> {
    let factory = ctx.factory();
    if let Some(activation) = &quest.activation {
        if !factory.build(activation)?.is_satisfied(ctx, None)? {
            return Ok(false);
        }
    }
    factory.build(&quest.goal)?.is_satisfied(ctx, None)
}

/// Aura selector.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AuraMatch {
    pub aura_name: String,
    #[serde(default = "one")]
    pub min_stack: i64,
    #[serde(default = "minus_one")]
    pub min_level: i64,
    /// Every key here must equal the aura's data payload entry.
    #[serde(default)]
    pub match_data: Option<Map<String, Value>>,
}

impl AuraMatch {
    fn data_matches(&self, aura: &Aura) -> bool {
        let Some(wanted) = &self.match_data else {
            return true;
        };
        let theirs = aura.data.as_ref();
        wanted
            .iter()
            .all(|(key, value)| theirs.and_then(|data| data.get(key)) == Some(value))
    }

    /// Does `aura` satisfy the selector at `now`?
    #[must_use]
    pub fn matches(&self, aura: &Aura, now: i64) -> bool {
        aura.spec == self.aura_name
            && aura.stack >= self.min_stack
            && aura.level >= self.min_level
            && aura.is_live(now)
            && self.data_matches(aura)
    }

    fn find<'c>(&self, ctx: &EvalContext<'c>) -> Option<&'c Aura> {
        let now = ctx.now();
        ctx.game.auras().iter().find(|aura| self.matches(aura, now))
    }

    /// Seconds until the last live aura of this spec expires, or `-1`.
    fn togo(&self, ctx: &EvalContext<'_>) -> i64 {
        let now = ctx.now();
        ctx.game
            .auras()
            .iter()
            .filter(|aura| aura.spec == self.aura_name && aura.stack >= self.min_stack && aura.is_live(now))
            .last()
            .map_or(-1, |aura| aura.end_time.map_or(-1, |end| end - now))
    }

    fn ui_name<'g>(&'g self, gamedata: &'g Gamedata) -> &'g str {
        gamedata
            .aura(&self.aura_name)
            .map_or(self.aura_name.as_str(), |spec| spec.ui_name.as_str())
    }

    fn time_range(&self, ctx: &EvalContext<'_>) -> TimeRange {
        let positive = |t: Option<i64>| t.filter(|&t| t > 0).unwrap_or(-1);
        self.find(ctx)
            .map_or(TimeRange::UNBOUNDED, |aura| TimeRange::new(positive(aura.start_time), positive(aura.end_time)))
    }
}

/// Cooldown selector.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CooldownMatch {
    pub name: String,
    #[serde(default)]
    pub match_data: Option<Map<String, Value>>,
    /// Active only while at least this many seconds remain.
    #[serde(default)]
    pub min_togo: i64,
    /// Description template overriding the string table.
    #[serde(default)]
    pub ui_cooldown_name: Option<String>,
}

impl CooldownMatch {
    /// Seconds remaining, `-1` when no cooldown is running.
    fn togo(&self, ctx: &EvalContext<'_>) -> i64 {
        let now = ctx.now();
        ctx.game
            .cooldown(&self.name, self.match_data.as_ref())
            .filter(|cd| cd.end > now)
            .map_or(-1, |cd| cd.end - now)
    }

    fn is_active(&self, ctx: &EvalContext<'_>) -> bool {
        self.togo(ctx) >= self.min_togo
    }
}

/// Threshold check on a player history counter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryCheck {
    pub key: String,
    pub threshold: i64,
    pub method: CompareMethod,
    /// Subtract the query data baseline before comparing.
    pub relative: bool,
    /// `%s` substitution for descriptions.
    pub ui_arg_s: String,
    /// `%d` substitution for descriptions.
    pub ui_arg_d: String,
}

impl HistoryCheck {
    fn baseline(&self, qdata: Option<&QueryData>) -> i64 {
        match qdata {
            Some(qdata) if self.relative => qdata.get(&self.key).and_then(Value::as_i64).unwrap_or(0),
            _ => 0,
        }
    }

    fn current(&self, ctx: &EvalContext<'_>) -> i64 {
        ctx.game.history(&self.key).unwrap_or(0)
    }

    fn is_satisfied(&self, ctx: &EvalContext<'_>, qdata: Option<&QueryData>) -> bool {
        let value = self.current(ctx) - self.baseline(qdata);
        self.method.compare(value, self.threshold)
    }

    fn progress(&self, kind: PredicateKind, ctx: &EvalContext<'_>, qdata: Option<&QueryData>) -> Option<String> {
        let strings = &ctx.gamedata.strings;
        let template = strings
            .predicates
            .get(kind.as_str())
            .and_then(|s| s.ui_progress.as_deref())
            .or_else(|| strings.player_history.get(&self.key).and_then(|s| s.ui_progress.as_deref()))?;
        let gained = self.current(ctx) - self.baseline(qdata);
        Some(
            template
                .replacen("%d1", &pretty_number(gained), 1)
                .replacen("%d2", &pretty_number(self.threshold), 1),
        )
    }
}

/// Gamedata variable comparison.
#[derive(Clone, Debug, PartialEq)]
pub struct VarCheck {
    /// Dotted path under `vars`.
    pub name: String,
    pub value: Value,
    pub method: VarMethod,
}

impl VarCheck {
    fn is_satisfied(&self, ctx: &EvalContext<'_>) -> PredicateResult<bool> {
        let raw = ctx.gamedata.var(&self.name)?;
        let test = cond::eval_cond_or_literal(raw, ctx, None)?;
        Ok(match self.method {
            VarMethod::Equal => loosely_equal(&test, &self.value),
            VarMethod::In => self
                .value
                .as_array()
                .is_some_and(|items| items.iter().any(|item| loosely_equal(&test, item))),
        })
    }

    fn time_range(&self, ctx: &EvalContext<'_>) -> PredicateResult<TimeRange> {
        let raw = ctx.gamedata.var(&self.name)?;
        match raw {
            Value::Array(chain) if cond::is_cond_chain(raw) => match cond::select_arm(chain, ctx, None)? {
                Some((predicate, _)) => predicate.time_range(ctx),
                None => Ok(TimeRange::UNBOUNDED),
            },
            _ => Ok(TimeRange::UNBOUNDED),
        }
    }
}

/// JSON equality, except that numbers compare by value (`1` equals `1.0`).
fn loosely_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

/// Wall-clock window, optionally shifted, wrapped and repeating.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TimeWindow {
    /// `[start, end)`; negative bounds are open.
    pub range: [i64; 2],
    /// Wrap the clock modulo this many seconds (when positive).
    #[serde(rename = "mod", default = "minus_one")]
    pub modulus: i64,
    /// Seconds added to the clock before anything else.
    #[serde(default)]
    pub shift: i64,
    /// Repeat the window every this many seconds from `range[0]`.
    #[serde(default)]
    pub repeat_interval: Option<i64>,
}

impl TimeWindow {
    fn local_time(&self, now: i64) -> i64 {
        let shifted = now.saturating_add(self.shift);
        if self.modulus > 0 {
            shifted % self.modulus
        } else {
            shifted
        }
    }

    fn repeat(&self) -> Option<i64> {
        self.repeat_interval.filter(|&interval| interval > 0)
    }

    /// Is `now` inside the window? A zero clock never is.
    #[must_use]
    pub fn contains(&self, now: i64) -> bool {
        if now == 0 {
            return false;
        }
        let t = self.local_time(now);
        let [start, end] = self.range;
        if start >= 0 && t < start {
            return false;
        }
        if end >= 0 {
            match self.repeat() {
                Some(interval) => {
                    if t.saturating_sub(start) % interval >= end.saturating_sub(start) {
                        return false;
                    }
                }
                None => {
                    if t >= end {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// The configured range, or the current repetition when repeating.
    #[must_use]
    pub fn time_range(&self, now: i64) -> TimeRange {
        let [start, end] = self.range;
        match self.repeat() {
            Some(interval) => {
                let t = self.local_time(now);
                let delta = t.saturating_sub(start) % interval;
                let window_start = t.saturating_sub(delta);
                TimeRange::new(window_start, window_start.saturating_add(end.saturating_sub(start)))
            }
            None => TimeRange::new(start, end),
        }
    }
}

/// A leaf predicate with its decoded parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum Leaf {
    AlwaysTrue,
    AlwaysFalse,
    /// Passes when a uniform roll lands below `chance`.
    Random { chance: f64 },
    TutorialComplete,
    AccountCreationTime(CreationWindow),
    PlayerLevel { level: i64 },
    PlayerHistory(HistoryCheck),
    BuildingQuantity(BuildingQuota),
    QuestCompleted(QuestRef),
    QuestActive(QuestRef),
    AuraActive(AuraMatch),
    AuraInactive(AuraMatch),
    CooldownActive(CooldownMatch),
    CooldownInactive(CooldownMatch),
    AbsoluteTime(TimeWindow),
    GamedataVar(VarCheck),
}

impl Leaf {
    pub(crate) fn is_satisfied(&self, ctx: &EvalContext<'_>, qdata: Option<&QueryData>) -> PredicateResult<bool> {
        let game = ctx.game;
        Ok(match self {
            Self::AlwaysTrue => true,
            Self::AlwaysFalse => false,
            Self::Random { chance } => ctx.chance(*chance),
            Self::TutorialComplete => game.tutorial_complete(),
            Self::AccountCreationTime(window) => window.contains(game.creation_time(), ctx.now()),
            Self::PlayerLevel { level } => game.level() >= *level,
            Self::PlayerHistory(check) => check.is_satisfied(ctx, qdata),
            Self::BuildingQuantity(quota) => quota.count(game.buildings()) >= quota.trigger_qty,
            Self::QuestCompleted(quest) => quest.is_completed(ctx)?,
            Self::QuestActive(quest) => quest.is_active(ctx)?,
            Self::AuraActive(selector) => selector.find(ctx).is_some(),
            Self::AuraInactive(selector) => selector.find(ctx).is_none(),
            Self::CooldownActive(selector) => selector.is_active(ctx),
            Self::CooldownInactive(selector) => !selector.is_active(ctx),
            Self::AbsoluteTime(window) => window.contains(ctx.now()),
            Self::GamedataVar(check) => check.is_satisfied(ctx)?,
        })
    }

    pub(crate) fn describe(&self, kind: PredicateKind, ctx: &EvalContext<'_>) -> PredicateResult<Option<Explanation>> {
        let gamedata = ctx.gamedata;
        let template = || gamedata.ui_name_template(kind.as_str());

        let text = match self {
            Self::AlwaysTrue | Self::QuestActive(_) => return Ok(None),
            Self::AlwaysFalse | Self::Random { .. } | Self::TutorialComplete | Self::GamedataVar(_) => {
                template()?.to_string()
            }
            Self::AccountCreationTime(window) => {
                let [start, end] = window.range.unwrap_or([-1, -1]);
                template()?
                    .replacen("%d1", &start.to_string(), 1)
                    .replacen("%d2", &end.to_string(), 1)
            }
            Self::AbsoluteTime(window) => template()?
                .replacen("%d1", &window.range[0].to_string(), 1)
                .replacen("%d2", &window.range[1].to_string(), 1),
            Self::PlayerLevel { level } => template()?.replacen("%d", &level.to_string(), 1),
            Self::PlayerHistory(check) => template()?
                .replacen("%s", &check.ui_arg_s, 1)
                .replacen("%d", &check.ui_arg_d, 1),
            Self::BuildingQuantity(quota) => {
                if !quota.is_shown(ctx)? {
                    return Ok(None);
                }
                quota.describe(template()?, gamedata)
            }
            Self::QuestCompleted(quest) => {
                let spec = quest.spec(gamedata)?;
                template()?.replacen("%s", &spec.ui_name, 1)
            }
            Self::AuraActive(selector) => template()?.replacen("%s", selector.ui_name(gamedata), 1),
            Self::AuraInactive(selector) => {
                let togo = selector.togo(ctx);
                let strings = gamedata.strings_for(kind.as_str());
                let chosen = if togo > 0 {
                    strings.and_then(|s| s.ui_name_togo.as_deref())
                } else {
                    strings.and_then(|s| s.ui_name.as_deref())
                };
                let chosen = chosen.ok_or_else(|| PredicateError::MissingUiString {
                    kind: kind.as_str().to_string(),
                })?;
                chosen
                    .replacen("%s", selector.ui_name(gamedata), 1)
                    .replacen("%togo", &pretty_duration(togo), 1)
            }
            Self::CooldownActive(selector) => template()?.replacen("%s", &selector.name, 1),
            Self::CooldownInactive(selector) => {
                let chosen = match &selector.ui_cooldown_name {
                    Some(custom) => custom.as_str(),
                    None => template()?,
                };
                chosen
                    .replacen("%s", &selector.name, 1)
                    .replacen("%togo", &pretty_duration(selector.togo(ctx)), 1)
            }
        };
        Ok(Some(Explanation::new(text)))
    }

    pub(crate) fn help(&self, ctx: &EvalContext<'_>) -> PredicateResult<Option<HelpAction>> {
        match self {
            Self::BuildingQuantity(quota) => quota.help(ctx),
            Self::AuraInactive(selector) => Ok(ctx
                .gamedata
                .aura(&selector.aura_name)
                .filter(|spec| spec.speedupable)
                .map(|spec| {
                    HelpAction::new("player_aura", "speedup")
                        .with_target(HelpTarget::Spec(selector.aura_name.clone()))
                        .with_arg_s(spec.ui_name.as_str())
                })),
            _ => Ok(None),
        }
    }

    pub(crate) fn time_range(&self, kind: PredicateKind, ctx: &EvalContext<'_>) -> PredicateResult<TimeRange> {
        match self {
            Self::AlwaysTrue
            | Self::AccountCreationTime(_)
            | Self::PlayerLevel { .. }
            | Self::PlayerHistory(_)
            | Self::QuestCompleted(_)
            | Self::AuraInactive(_)
            | Self::CooldownInactive(_) => Ok(TimeRange::UNBOUNDED),
            Self::AlwaysFalse
            | Self::Random { .. }
            | Self::TutorialComplete
            | Self::BuildingQuantity(_)
            | Self::QuestActive(_) => Err(PredicateError::ExpiryUndefined {
                kind: kind.as_str().to_string(),
            }),
            Self::AuraActive(selector) => Ok(selector.time_range(ctx)),
            Self::CooldownActive(selector) => Ok(ctx
                .game
                .cooldown(&selector.name, selector.match_data.as_ref())
                .map_or(TimeRange::UNBOUNDED, |cd| TimeRange::new(cd.start, cd.end))),
            Self::AbsoluteTime(window) => Ok(window.time_range(ctx.now())),
            Self::GamedataVar(check) => check.time_range(ctx),
        }
    }

    pub(crate) fn progress(
        &self,
        kind: PredicateKind,
        ctx: &EvalContext<'_>,
        qdata: Option<&QueryData>,
    ) -> Option<String> {
        match self {
            Self::BuildingQuantity(quota) => {
                let template = ctx.gamedata.strings_for(kind.as_str())?.ui_progress.as_deref()?;
                let count = quota.count(ctx.game.buildings());
                Some(
                    template
                        .replacen("%d1", &count.to_string(), 1)
                        .replacen("%d2", &quota.trigger_qty.to_string(), 1),
                )
            }
            Self::PlayerHistory(check) => check.progress(kind, ctx, qdata),
            _ => None,
        }
    }

    pub(crate) fn difficulty(&self) -> f64 {
        match self {
            Self::PlayerHistory(check) => check.threshold as f64,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameContext;
    use serde_json::json;

    #[test]
    fn test_compare_method() {
        assert!(CompareMethod::parse(">=").unwrap().compare(5, 5));
        assert!(!CompareMethod::parse("<").unwrap().compare(5, 5));
        assert!(CompareMethod::parse("==").unwrap().compare(7, 7));
        assert!(matches!(
            CompareMethod::parse("!="),
            Err(PredicateError::UnknownMethod { method }) if method == "!="
        ));
    }

    #[test]
    fn test_var_method() {
        assert_eq!(VarMethod::parse("in").unwrap(), VarMethod::In);
        assert!(VarMethod::parse(">=").is_err());
    }

    #[test]
    fn test_creation_window() {
        let window = CreationWindow {
            range: Some([100, 200]),
            age_range: None,
        };
        assert!(!window.contains(99, 1_000));
        assert!(window.contains(100, 1_000));
        assert!(!window.contains(200, 1_000));

        let by_age = CreationWindow {
            range: None,
            age_range: Some([10, -1]),
        };
        assert!(!by_age.contains(995, 1_000));
        assert!(by_age.contains(900, 1_000));

        assert!(CreationWindow::default().contains(0, 0));
    }

    #[test]
    fn test_time_window_plain() {
        let window: TimeWindow = serde_json::from_value(json!({ "range": [100, 200] })).unwrap();
        assert_eq!(window.modulus, -1);
        assert!(!window.contains(50));
        assert!(window.contains(150));
        assert!(!window.contains(200));
        assert_eq!(window.time_range(150), TimeRange::new(100, 200));
    }

    #[test]
    fn test_time_window_zero_clock() {
        let window: TimeWindow = serde_json::from_value(json!({ "range": [-1, -1] })).unwrap();
        assert!(!window.contains(0));
        assert!(window.contains(1));
    }

    #[test]
    fn test_time_window_repeating() {
        // Open for 10s out of every 100s, starting at t=1000.
        let window: TimeWindow =
            serde_json::from_value(json!({ "range": [1000, 1010], "repeat_interval": 100 })).unwrap();
        assert!(window.contains(1005));
        assert!(!window.contains(1050));
        assert!(window.contains(1105));
        assert_eq!(window.time_range(1105), TimeRange::new(1100, 1110));
    }

    #[test]
    fn test_time_window_mod_and_shift() {
        // Daily window from 01:00 to 02:00, shifted one hour.
        let window: TimeWindow =
            serde_json::from_value(json!({ "range": [3600, 7200], "mod": 86400, "shift": 3600 })).unwrap();
        assert!(window.contains(86_400 * 5 + 10));
        assert!(!window.contains(86_400 * 5 + 3600 + 10));
    }

    #[test]
    fn test_huge_offsets_saturate() {
        let shifted: TimeWindow =
            serde_json::from_value(json!({ "range": [0, 10], "shift": i64::MAX })).unwrap();
        assert!(!shifted.contains(1_000));
        assert_eq!(shifted.time_range(1_000), TimeRange::new(0, 10));

        let repeating: TimeWindow = serde_json::from_value(json!({
            "range": [i64::MIN, i64::MAX],
            "shift": i64::MIN,
            "repeat_interval": 7
        }))
        .unwrap();
        assert!(repeating.contains(1_000));
        let range = repeating.time_range(1_000);
        assert!(range.start <= range.end);

        let ancient = CreationWindow {
            range: None,
            age_range: Some([10, -1]),
        };
        assert!(ancient.contains(i64::MIN, i64::MAX));
    }

    struct Clock;

    impl GameContext for Clock {
        fn now(&self) -> i64 {
            1_000
        }
    }

    fn var_check(value: Value, method: VarMethod) -> VarCheck {
        VarCheck {
            name: "x".to_string(),
            value,
            method,
        }
    }

    #[test]
    fn test_var_numbers_compare_by_value() {
        let gamedata = Gamedata::new().with_vars(json!({ "x": 1.0 }));
        let ctx = EvalContext::new(&Clock, &gamedata);

        assert!(var_check(json!(1), VarMethod::Equal).is_satisfied(&ctx).unwrap());
        assert!(var_check(json!([3, 1]), VarMethod::In).is_satisfied(&ctx).unwrap());
        assert!(!var_check(json!(2), VarMethod::Equal).is_satisfied(&ctx).unwrap());
        assert!(!var_check(json!("1"), VarMethod::Equal).is_satisfied(&ctx).unwrap());
    }

    #[test]
    fn test_aura_match_data() {
        let selector: AuraMatch = serde_json::from_value(json!({
            "aura_name": "event",
            "match_data": { "tier": 2 }
        }))
        .unwrap();
        assert_eq!(selector.min_stack, 1);
        assert_eq!(selector.min_level, -1);

        let mut data = Map::new();
        data.insert("tier".into(), json!(2));
        assert!(selector.matches(&Aura::new("event").with_data(data), 10));

        let mut other = Map::new();
        other.insert("tier".into(), json!(3));
        assert!(!selector.matches(&Aura::new("event").with_data(other), 10));
        assert!(!selector.matches(&Aura::new("event"), 10));
        assert!(!selector.matches(&Aura::new("other"), 10));
    }

    #[test]
    fn test_aura_min_stack() {
        let selector: AuraMatch =
            serde_json::from_value(json!({ "aura_name": "rage", "min_stack": 3 })).unwrap();
        assert!(!selector.matches(&Aura::new("rage").with_stack(2), 0));
        assert!(selector.matches(&Aura::new("rage").with_stack(3), 0));
    }

    #[test]
    fn test_building_quota_count() {
        use crate::core::EntityId;

        let quota: BuildingQuota =
            serde_json::from_value(json!({ "building_type": "barracks", "trigger_qty": 2 })).unwrap();
        let buildings = vec![
            Building::new(EntityId(1), "barracks"),
            Building::new(EntityId(2), "barracks").under_construction(),
            Building::new(EntityId(3), "farm"),
        ];
        assert_eq!(quota.count(&buildings), 1);

        let lenient = BuildingQuota {
            under_construction_ok: true,
            ..quota
        };
        assert_eq!(lenient.count(&buildings), 2);
    }
}
