//! Typed cond values, classified and built once at load time.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::core::{PredicateError, PredicateResult, QueryData};
use crate::predicates::{EvalContext, Predicate, PredicateFactory};

use super::is_cond_chain;

/// One `predicate => value` arm.
#[derive(Clone, Debug)]
pub struct CondArm<T> {
    pub predicate: Predicate,
    pub value: T,
}

/// Ordered arms; the first whose predicate holds selects its value.
#[derive(Clone, Debug)]
pub struct CondChain<T> {
    arms: Vec<CondArm<T>>,
}

impl<T> Default for CondChain<T> {
    fn default() -> Self {
        Self { arms: Vec::new() }
    }
}

impl<T> CondChain<T> {
    /// Create an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an arm.
    #[must_use]
    pub fn with_arm(mut self, predicate: Predicate, value: T) -> Self {
        self.arms.push(CondArm { predicate, value });
        self
    }

    /// The arms in evaluation order.
    #[must_use]
    pub fn arms(&self) -> &[CondArm<T>] {
        &self.arms
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.arms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arms.is_empty()
    }

    /// Value of the first arm whose predicate holds.
    pub fn evaluate(&self, ctx: &EvalContext<'_>, qdata: Option<&QueryData>) -> PredicateResult<Option<&T>> {
        for arm in &self.arms {
            if arm.predicate.is_satisfied(ctx, qdata)? {
                return Ok(Some(&arm.value));
            }
        }
        Ok(None)
    }
}

/// A config value that is either a literal or a cond chain.
#[derive(Clone, Debug)]
pub enum CondValue<T> {
    Literal(T),
    Chain(CondChain<T>),
}

impl<T> CondValue<T> {
    /// Resolve to a value. A chain with no matching arm gives `None`.
    pub fn evaluate(&self, ctx: &EvalContext<'_>, qdata: Option<&QueryData>) -> PredicateResult<Option<&T>> {
        match self {
            Self::Literal(value) => Ok(Some(value)),
            Self::Chain(chain) => chain.evaluate(ctx, qdata),
        }
    }

    #[must_use]
    pub fn is_chain(&self) -> bool {
        matches!(self, Self::Chain(_))
    }
}

impl<T: DeserializeOwned> CondValue<T> {
    /// Classify `config` with the cond-chain shape rule and build it.
    ///
    /// Every arm predicate is built immediately. An arm without a value
    /// slot decodes `null` into `T`.
    pub fn from_config(config: &Value, factory: &PredicateFactory<'_>) -> PredicateResult<Self> {
        let Value::Array(entries) = config else {
            return Ok(Self::Literal(decode_value(config)?));
        };
        if !is_cond_chain(config) {
            return Ok(Self::Literal(decode_value(config)?));
        }

        let mut chain = CondChain::new();
        for (index, entry) in entries.iter().enumerate() {
            let arm = entry
                .as_array()
                .filter(|arm| !arm.is_empty())
                .ok_or(PredicateError::MalformedCondChain { index })?;
            let predicate = factory.build(&arm[0])?;
            let value = decode_value(arm.get(1).unwrap_or(&Value::Null))?;
            chain = chain.with_arm(predicate, value);
        }
        Ok(Self::Chain(chain))
    }
}

fn decode_value<T: DeserializeOwned>(value: &Value) -> PredicateResult<T> {
    T::deserialize(value).map_err(|err| PredicateError::InvalidConfig {
        kind: "cond value".to_string(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameContext, Gamedata};
    use serde_json::json;

    struct Leveled(i64);

    impl GameContext for Leveled {
        fn now(&self) -> i64 {
            1_000
        }

        fn level(&self) -> i64 {
            self.0
        }
    }

    fn price_config() -> Value {
        json!([
            [{ "predicate": "PLAYER_LEVEL", "level": 10 }, 50],
            [{ "predicate": "ALWAYS_TRUE" }, 100]
        ])
    }

    #[test]
    fn test_literal() {
        let gamedata = Gamedata::new();
        let value: CondValue<i64> = CondValue::from_config(&json!(42), &PredicateFactory::new(&gamedata)).unwrap();
        assert!(!value.is_chain());

        let game = Leveled(1);
        let ctx = EvalContext::new(&game, &gamedata);
        assert_eq!(value.evaluate(&ctx, None).unwrap(), Some(&42));
    }

    #[test]
    fn test_literal_array() {
        let gamedata = Gamedata::new();
        let value: CondValue<Vec<i64>> =
            CondValue::from_config(&json!([1, 2, 3]), &PredicateFactory::new(&gamedata)).unwrap();
        assert!(!value.is_chain());
    }

    #[test]
    fn test_chain_selects_by_level() {
        let gamedata = Gamedata::new();
        let value: CondValue<i64> = CondValue::from_config(&price_config(), &PredicateFactory::new(&gamedata)).unwrap();
        assert!(value.is_chain());

        let veteran = Leveled(12);
        let ctx = EvalContext::new(&veteran, &gamedata);
        assert_eq!(value.evaluate(&ctx, None).unwrap(), Some(&50));

        let rookie = Leveled(2);
        let ctx = EvalContext::new(&rookie, &gamedata);
        assert_eq!(value.evaluate(&ctx, None).unwrap(), Some(&100));
    }

    #[test]
    fn test_empty_chain_selects_nothing() {
        let gamedata = Gamedata::new();
        let value: CondValue<i64> = CondValue::from_config(&json!([]), &PredicateFactory::new(&gamedata)).unwrap();
        assert!(value.is_chain());

        let game = Leveled(1);
        let ctx = EvalContext::new(&game, &gamedata);
        assert_eq!(value.evaluate(&ctx, None).unwrap(), None);
    }

    #[test]
    fn test_bad_arm_predicate_fails_at_load() {
        let gamedata = Gamedata::new();
        let result: PredicateResult<CondValue<i64>> =
            CondValue::from_config(&json!([[{ "predicate": "BOGUS" }, 1]]), &PredicateFactory::new(&gamedata));
        assert!(matches!(result, Err(PredicateError::UnknownKind { .. })));
    }

    #[test]
    fn test_value_type_mismatch() {
        let gamedata = Gamedata::new();
        let result: PredicateResult<CondValue<i64>> =
            CondValue::from_config(&json!("cheap"), &PredicateFactory::new(&gamedata));
        assert!(matches!(result, Err(PredicateError::InvalidConfig { .. })));
    }

    #[test]
    fn test_programmatic_chain() {
        let gamedata = Gamedata::new();
        let factory = PredicateFactory::new(&gamedata);
        let chain = CondChain::new()
            .with_arm(factory.build(&json!({ "predicate": "ALWAYS_FALSE" })).unwrap(), "no")
            .with_arm(factory.build(&json!({ "predicate": "ALWAYS_TRUE" })).unwrap(), "yes");
        assert_eq!(chain.len(), 2);

        let game = Leveled(1);
        let ctx = EvalContext::new(&game, &gamedata);
        assert_eq!(chain.evaluate(&ctx, None).unwrap(), Some(&"yes"));
    }
}
