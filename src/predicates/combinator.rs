//! AND / OR / NOT over child predicates.
//!
//! Evaluation short-circuits left to right: children after the deciding
//! one are never evaluated, so they can neither fail nor consume
//! randomness.

use crate::core::{PredicateResult, QueryData};

use super::eval::EvalContext;
use super::explain::{Explanation, ExplanationOptions, HelpAction, TimeRange};
use super::predicate::Predicate;

pub(crate) const AND_SEPARATOR: &str = ",\n";
pub(crate) const OR_SEPARATOR: &str = " OR\n";

/// True iff every child holds. Vacuously true.
pub(crate) fn all(children: &[Predicate], ctx: &EvalContext<'_>, qdata: Option<&QueryData>) -> PredicateResult<bool> {
    for child in children {
        if !child.is_satisfied(ctx, qdata)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// True iff some child holds. Vacuously false.
pub(crate) fn any(children: &[Predicate], ctx: &EvalContext<'_>, qdata: Option<&QueryData>) -> PredicateResult<bool> {
    for child in children {
        if child.is_satisfied(ctx, qdata)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Join the explanations of every unsatisfied child.
///
/// Children that are satisfied (or have nothing to say) are skipped.
/// Options merge left to right.
pub(crate) fn describe_unsatisfied(
    children: &[Predicate],
    ctx: &EvalContext<'_>,
    separator: &str,
) -> PredicateResult<Option<Explanation>> {
    let mut texts = Vec::new();
    let mut options = ExplanationOptions::default();
    for child in children {
        if let Some(detail) = child.describe_detail(ctx)? {
            texts.push(detail.text);
            options.merge(&detail.options);
        }
    }
    Ok(Some(Explanation {
        text: texts.join(separator),
        options,
    }))
}

/// `"NOT "` plus the child's text, keeping the child's options.
pub(crate) fn describe_not(child: &Predicate, ctx: &EvalContext<'_>) -> PredicateResult<Option<Explanation>> {
    let explanation = match child.describe_detail(ctx)? {
        Some(detail) => Explanation {
            text: format!("NOT {}", detail.text),
            options: detail.options,
        },
        None => Explanation::new("NOT unknown"),
    };
    Ok(Some(explanation))
}

/// First non-empty help among the children.
pub(crate) fn first_help(children: &[Predicate], ctx: &EvalContext<'_>) -> PredicateResult<Option<HelpAction>> {
    for child in children {
        if let Some(help) = child.help(ctx)? {
            return Ok(Some(help));
        }
    }
    Ok(None)
}

/// Help for OR: nothing while any child already holds.
pub(crate) fn first_help_unless_satisfied(
    children: &[Predicate],
    ctx: &EvalContext<'_>,
) -> PredicateResult<Option<HelpAction>> {
    if any(children, ctx, None)? {
        return Ok(None);
    }
    first_help(children, ctx)
}

/// Intersection of every child's range.
pub(crate) fn time_range_all(children: &[Predicate], ctx: &EvalContext<'_>) -> PredicateResult<TimeRange> {
    let mut range = TimeRange::UNBOUNDED;
    for child in children {
        range.narrow(child.time_range(ctx)?);
    }
    Ok(range)
}

/// Union of the ranges of the children that currently hold.
pub(crate) fn time_range_any(children: &[Predicate], ctx: &EvalContext<'_>) -> PredicateResult<TimeRange> {
    let mut range = TimeRange::UNBOUNDED;
    for child in children {
        if child.is_satisfied(ctx, None)? {
            range.widen(child.time_range(ctx)?);
        }
    }
    Ok(range)
}

/// Hardest child.
pub(crate) fn difficulty_all(children: &[Predicate]) -> f64 {
    children.iter().map(Predicate::difficulty).fold(0.0, f64::max)
}

/// Easiest child; infinite when there are none.
pub(crate) fn difficulty_any(children: &[Predicate]) -> f64 {
    children.iter().map(Predicate::difficulty).fold(f64::INFINITY, f64::min)
}
