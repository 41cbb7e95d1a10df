//! Cond chains: predicate-guarded value selection.
//!
//! A cond chain is an ordered list of `[predicate_config, value]` pairs.
//! Evaluation returns the value paired with the first predicate that holds.
//! Config fields that accept a plain value also accept a chain, and tell
//! the two apart by shape:
//!
//! - an array whose first element is itself an array is a chain;
//! - an empty array is a chain (that selects nothing);
//! - anything else is a literal.
//!
//! This means a literal array-of-arrays cannot be expressed, and a chain
//! whose first entry is not an array is read as a literal. Both are
//! long-standing properties of the config format and are kept as-is.
//! [`CondValue`] applies the same classification once, at load time, for
//! callers that want a typed value.
//!
//! ```
//! use game_predicates::cond::is_cond_chain;
//! use serde_json::json;
//!
//! assert!(is_cond_chain(&json!([[{ "predicate": "ALWAYS_TRUE" }, 5]])));
//! assert!(is_cond_chain(&json!([])));
//! assert!(!is_cond_chain(&json!([1, 2, 3])));
//! assert!(!is_cond_chain(&json!(5)));
//! ```

mod typed;

pub use typed::{CondArm, CondChain, CondValue};

use serde_json::Value;

use crate::core::{PredicateError, PredicateResult, QueryData};
use crate::predicates::{EvalContext, Predicate};

static NULL: Value = Value::Null;

/// Is `value` shaped like a cond chain?
#[must_use]
pub fn is_cond_chain(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.first().map_or(true, Value::is_array),
        _ => false,
    }
}

/// Find the first arm whose predicate holds.
///
/// Returns the built predicate together with its value (`null` when the arm
/// has no value slot). Predicates are built lazily, so arms after the match
/// are never constructed.
pub fn select_arm<'v>(
    chain: &'v [Value],
    ctx: &EvalContext<'_>,
    qdata: Option<&QueryData>,
) -> PredicateResult<Option<(Predicate, &'v Value)>> {
    let factory = ctx.factory();
    for (index, entry) in chain.iter().enumerate() {
        let arm = entry
            .as_array()
            .filter(|arm| !arm.is_empty())
            .ok_or(PredicateError::MalformedCondChain { index })?;
        let predicate = factory.build(&arm[0])?;
        if predicate.is_satisfied(ctx, qdata)? {
            return Ok(Some((predicate, arm.get(1).unwrap_or(&NULL))));
        }
    }
    Ok(None)
}

/// Value of the first arm whose predicate holds, `None` if none does.
pub fn eval_cond(chain: &[Value], ctx: &EvalContext<'_>, qdata: Option<&QueryData>) -> PredicateResult<Option<Value>> {
    Ok(select_arm(chain, ctx, qdata)?.map(|(_, value)| value.clone()))
}

/// Evaluate `value` as a chain if it looks like one, else return it as-is.
///
/// A chain with no matching arm yields `null`.
pub fn eval_cond_or_literal(value: &Value, ctx: &EvalContext<'_>, qdata: Option<&QueryData>) -> PredicateResult<Value> {
    match value {
        Value::Array(chain) if is_cond_chain(value) => Ok(eval_cond(chain, ctx, qdata)?.unwrap_or(Value::Null)),
        _ => Ok(value.clone()),
    }
}

/// Evaluate `value` as a predicate if it is an object with a `predicate`
/// key, yielding a JSON boolean. Anything else is returned as-is.
pub fn eval_pred_or_literal(value: &Value, ctx: &EvalContext<'_>, qdata: Option<&QueryData>) -> PredicateResult<Value> {
    let is_predicate = value.as_object().is_some_and(|obj| obj.contains_key("predicate"));
    if !is_predicate {
        return Ok(value.clone());
    }
    let verdict = ctx.factory().build(value)?.is_satisfied(ctx, qdata)?;
    Ok(Value::Bool(verdict))
}
