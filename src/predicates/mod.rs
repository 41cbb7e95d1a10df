//! Predicate trees: construction, evaluation and explanation.
//!
//! A predicate is built once from JSON config by [`PredicateFactory`] and
//! then evaluated any number of times against an [`EvalContext`]. Beyond a
//! yes/no verdict, every predicate can explain itself to the UI: a reason
//! it is unsatisfied, a suggested action, the time window it holds in, and
//! where supported a progress string.

mod combinator;
pub mod eval;
pub mod explain;
pub mod factory;
pub mod kind;
pub mod leaf;
pub mod predicate;
pub mod text;

pub use eval::EvalContext;
pub use explain::{Explanation, ExplanationOptions, HelpAction, HelpTarget, TimeRange};
pub use factory::PredicateFactory;
pub use kind::PredicateKind;
pub use leaf::{
    AuraMatch, BuildingQuota, CompareMethod, CooldownMatch, CreationWindow, HistoryCheck, Leaf, QuestRef,
    TimeWindow, VarCheck, VarMethod,
};
pub use predicate::Predicate;
