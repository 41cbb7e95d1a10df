//! The predicate tree and the explanation protocol.
//!
//! Every node answers the same questions:
//!
//! - [`Predicate::is_satisfied`]: does it hold?
//! - [`Predicate::describe_detail`]: if not, why not?
//! - [`Predicate::help`]: what could the player do about it?
//! - [`Predicate::time_range`] / [`Predicate::expire_time`]: when may the
//!   verdict flip?
//! - [`Predicate::progress`] and [`Predicate::difficulty`].
//!
//! The manual overrides a config object may carry (`ui_name`,
//! `ui_already_obtained`, `ui_title`, `help_predicate`) are applied here,
//! once, for every kind. Kind-specific logic lives in the combinator and
//! leaf modules.

use serde_json::{Map, Value};

use crate::core::{Gamedata, PredicateResult, QueryData};

use super::combinator::{self, AND_SEPARATOR, OR_SEPARATOR};
use super::eval::EvalContext;
use super::explain::{Explanation, HelpAction, TimeRange};
use super::factory::PredicateFactory;
use super::kind::PredicateKind;
use super::leaf::Leaf;

/// Presentation overrides shared by every kind.
#[derive(Clone, Debug, Default)]
pub(crate) struct UiOverrides {
    pub ui_name: Option<String>,
    pub ui_already_obtained: bool,
    pub ui_title: Option<String>,
    /// Stand-in used for descriptions and help, built with the tree.
    pub help_predicate: Option<Box<Predicate>>,
}

/// Kind-specific structure of a node.
#[derive(Clone, Debug)]
pub(crate) enum Node {
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
    Library { name: String, target: Box<Predicate> },
    Leaf(Leaf),
}

/// A node in a predicate tree.
///
/// Built from config by [`PredicateFactory`]; immutable afterwards. Trees
/// are acyclic and own their children.
#[derive(Clone, Debug)]
pub struct Predicate {
    kind: PredicateKind,
    data: Map<String, Value>,
    overrides: UiOverrides,
    node: Node,
}

impl Predicate {
    pub(crate) fn from_parts(kind: PredicateKind, data: Map<String, Value>, overrides: UiOverrides, node: Node) -> Self {
        Self {
            kind,
            data,
            overrides,
            node,
        }
    }

    fn combinator(kind: PredicateKind, node: Node) -> Self {
        let mut data = Map::new();
        data.insert("predicate".to_string(), Value::String(kind.as_str().to_string()));
        Self::from_parts(kind, data, UiOverrides::default(), node)
    }

    /// Build a predicate from config against `gamedata`.
    pub fn build(config: &Value, gamedata: &Gamedata) -> PredicateResult<Self> {
        PredicateFactory::new(gamedata).build(config)
    }

    /// AND over already-built children.
    pub fn all(children: impl IntoIterator<Item = Predicate>) -> Self {
        Self::combinator(PredicateKind::And, Node::And(children.into_iter().collect()))
    }

    /// OR over already-built children.
    pub fn any(children: impl IntoIterator<Item = Predicate>) -> Self {
        Self::combinator(PredicateKind::Or, Node::Or(children.into_iter().collect()))
    }

    /// Negation of an already-built predicate.
    pub fn negate(child: Predicate) -> Self {
        Self::combinator(PredicateKind::Not, Node::Not(Box::new(child)))
    }

    // === Accessors ===

    /// The kind discriminator.
    #[must_use]
    pub fn kind(&self) -> PredicateKind {
        self.kind
    }

    /// The raw config object this node was built from.
    #[must_use]
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Direct children (combinators only).
    #[must_use]
    pub fn children(&self) -> &[Predicate] {
        match &self.node {
            Node::And(children) | Node::Or(children) => children,
            Node::Not(child) => std::slice::from_ref(&**child),
            Node::Library { .. } | Node::Leaf(_) => &[],
        }
    }

    /// The expanded target of a `LIBRARY` node.
    #[must_use]
    pub fn library_target(&self) -> Option<(&str, &Predicate)> {
        match &self.node {
            Node::Library { name, target } => Some((name.as_str(), &**target)),
            _ => None,
        }
    }

    /// The leaf parameters, if this is a leaf.
    #[must_use]
    pub fn leaf(&self) -> Option<&Leaf> {
        match &self.node {
            Node::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    /// The eagerly built `help_predicate` override.
    #[must_use]
    pub fn help_predicate(&self) -> Option<&Predicate> {
        self.overrides.help_predicate.as_deref()
    }

    // === Protocol ===

    /// Does the predicate hold?
    ///
    /// `qdata` is passed unchanged to every child. Recursive quest and
    /// `show_if` checks always use `None`.
    pub fn is_satisfied(&self, ctx: &EvalContext<'_>, qdata: Option<&QueryData>) -> PredicateResult<bool> {
        match &self.node {
            Node::And(children) => combinator::all(children, ctx, qdata),
            Node::Or(children) => combinator::any(children, ctx, qdata),
            Node::Not(child) => Ok(!child.is_satisfied(ctx, qdata)?),
            Node::Library { target, .. } => target.is_satisfied(ctx, qdata),
            Node::Leaf(leaf) => leaf.is_satisfied(ctx, qdata),
        }
    }

    /// Why the predicate is unsatisfied. `None` when it holds.
    ///
    /// Precedence: the `ui_name` override, then the `help_predicate`
    /// stand-in's own description, then this kind's description.
    pub fn describe_detail(&self, ctx: &EvalContext<'_>) -> PredicateResult<Option<Explanation>> {
        if self.is_satisfied(ctx, None)? {
            return Ok(None);
        }
        if let Some(text) = &self.overrides.ui_name {
            return Ok(Some(Explanation::with_already_obtained(
                text.as_str(),
                self.overrides.ui_already_obtained,
            )));
        }
        if let Some(stand_in) = &self.overrides.help_predicate {
            return stand_in.do_describe(ctx);
        }
        self.do_describe(ctx)
    }

    /// Text of [`Predicate::describe_detail`].
    pub fn describe(&self, ctx: &EvalContext<'_>) -> PredicateResult<Option<String>> {
        Ok(self.describe_detail(ctx)?.map(|detail| detail.text))
    }

    /// Kind-specific description, without the satisfied check or overrides.
    fn do_describe(&self, ctx: &EvalContext<'_>) -> PredicateResult<Option<Explanation>> {
        match &self.node {
            Node::And(children) => combinator::describe_unsatisfied(children, ctx, AND_SEPARATOR),
            Node::Or(children) => combinator::describe_unsatisfied(children, ctx, OR_SEPARATOR),
            Node::Not(child) => combinator::describe_not(child, ctx),
            Node::Library { target, .. } => target.describe_detail(ctx),
            Node::Leaf(leaf) => leaf.describe(self.kind, ctx),
        }
    }

    /// A suggested action toward satisfying the predicate.
    ///
    /// A `help_predicate` takes over entirely. Otherwise the kind's help
    /// gets the `ui_name`/`ui_title` overrides stamped on; with no help and
    /// a `ui_name`, an unsatisfied predicate falls back to a generic action.
    pub fn help(&self, ctx: &EvalContext<'_>) -> PredicateResult<Option<HelpAction>> {
        if let Some(stand_in) = &self.overrides.help_predicate {
            return stand_in.help(ctx);
        }
        match self.do_help(ctx)? {
            Some(mut action) => {
                if let Some(name) = &self.overrides.ui_name {
                    action.ui_name = Some(name.clone());
                }
                if let Some(title) = &self.overrides.ui_title {
                    action.ui_title = Some(title.clone());
                }
                Ok(Some(action))
            }
            None => match &self.overrides.ui_name {
                Some(name) if !self.is_satisfied(ctx, None)? => Ok(Some(HelpAction::generic(name.as_str()))),
                _ => Ok(None),
            },
        }
    }

    fn do_help(&self, ctx: &EvalContext<'_>) -> PredicateResult<Option<HelpAction>> {
        match &self.node {
            Node::And(children) => combinator::first_help(children, ctx),
            Node::Or(children) => combinator::first_help_unless_satisfied(children, ctx),
            Node::Not(_) => Ok(None),
            Node::Library { target, .. } => target.help(ctx),
            Node::Leaf(leaf) => leaf.help(ctx),
        }
    }

    /// `[start, end]` during which the predicate holds; `-1` is unbounded.
    ///
    /// Kinds with no notion of expiry return
    /// [`PredicateError::ExpiryUndefined`](crate::core::PredicateError::ExpiryUndefined).
    pub fn time_range(&self, ctx: &EvalContext<'_>) -> PredicateResult<TimeRange> {
        match &self.node {
            Node::And(children) => combinator::time_range_all(children, ctx),
            Node::Or(children) => combinator::time_range_any(children, ctx),
            Node::Not(_) => Ok(TimeRange::UNBOUNDED),
            Node::Library { target, .. } => target.time_range(ctx),
            Node::Leaf(leaf) => leaf.time_range(self.kind, ctx),
        }
    }

    /// When the predicate stops holding; `-1` when not time-bounded.
    pub fn expire_time(&self, ctx: &EvalContext<'_>) -> PredicateResult<i64> {
        Ok(self.time_range(ctx)?.expire_time())
    }

    /// Progress text such as `"3/5 built"`, where the kind supports it.
    pub fn progress(&self, ctx: &EvalContext<'_>, qdata: Option<&QueryData>) -> Option<String> {
        match &self.node {
            Node::Leaf(leaf) => leaf.progress(self.kind, ctx, qdata),
            _ => None,
        }
    }

    /// Relative effort needed to satisfy the predicate.
    #[must_use]
    pub fn difficulty(&self) -> f64 {
        match &self.node {
            Node::And(children) => combinator::difficulty_all(children),
            Node::Or(children) => combinator::difficulty_any(children),
            Node::Not(_) | Node::Library { .. } => 0.0,
            Node::Leaf(leaf) => leaf.difficulty(),
        }
    }
}
