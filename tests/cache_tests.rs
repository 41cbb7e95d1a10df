//! Quest cache tests.
//!
//! These tests verify memoization of recursive quest completion checks:
//! - Nothing is memoized outside an epoch
//! - Inside an epoch each quest goal is evaluated once
//! - Closing the epoch discards verdicts
//! - Claim checks bypass the cache

use game_predicates::cache::PredicateCache;
use game_predicates::core::{Gamedata, PredicateError, QuestSpec};
use game_predicates::games::simple::{SimplePlayer, SimplePlayerBuilder};
use game_predicates::predicates::{EvalContext, Predicate};
use serde_json::json;

fn gamedata() -> Gamedata {
    Gamedata::new()
        .with_quest(
            "first_strike",
            QuestSpec::new(json!({ "predicate": "ATTACKS_LAUNCHED", "number": 5 })),
        )
        .with_quest(
            "warlord",
            QuestSpec::new(json!({
                "predicate": "AND",
                "subpredicates": [
                    { "predicate": "QUEST_COMPLETED", "quest_name": "first_strike" },
                    { "predicate": "PLAYER_LEVEL", "level": 3 }
                ]
            })),
        )
        .with_quest(
            "claimed_only",
            QuestSpec::new(json!({ "predicate": "ALWAYS_TRUE" })).force_claim(),
        )
        .with_quest(
            "broken",
            QuestSpec::new(json!({ "predicate": "GAMEDATA_VAR", "name": "missing", "value": 1 })),
        )
}

fn quest(name: &str, gamedata: &Gamedata) -> Predicate {
    Predicate::build(&json!({ "predicate": "QUEST_COMPLETED", "quest_name": name }), gamedata).unwrap()
}

fn attacker() -> SimplePlayer {
    SimplePlayerBuilder::new().level(4).history("attacks_launched", 6).build()
}

// =============================================================================
// Epoch Lifecycle
// =============================================================================

#[test]
fn test_no_epoch_recomputes() {
    let gamedata = gamedata();
    let player = attacker();
    let cache = PredicateCache::new();
    let ctx = EvalContext::new(&player, &gamedata).with_cache(&cache);

    let pred = quest("first_strike", &gamedata);
    assert!(pred.is_satisfied(&ctx, None).unwrap());
    assert!(pred.is_satisfied(&ctx, None).unwrap());
    assert_eq!(player.history_reads(), 2);
    assert!(cache.is_empty());
}

#[test]
fn test_epoch_memoizes() {
    let gamedata = gamedata();
    let player = attacker();
    let cache = PredicateCache::new();
    let ctx = EvalContext::new(&player, &gamedata).with_cache(&cache);
    let pred = quest("first_strike", &gamedata);

    let epoch = cache.open_epoch().unwrap();
    assert!(pred.is_satisfied(&ctx, None).unwrap());
    assert_eq!(player.history_reads(), 1);

    assert!(pred.is_satisfied(&ctx, None).unwrap());
    assert_eq!(player.history_reads(), 1);
    assert_eq!(cache.lookup("first_strike"), Some(true));

    epoch.close();
    assert!(!cache.is_open());
    assert!(cache.is_empty());

    assert!(pred.is_satisfied(&ctx, None).unwrap());
    assert_eq!(player.history_reads(), 2);
}

#[test]
fn test_nested_quests_share_the_epoch() {
    let gamedata = gamedata();
    let player = attacker();
    let cache = PredicateCache::new();
    let ctx = EvalContext::new(&player, &gamedata).with_cache(&cache);

    let quest_list = [quest("first_strike", &gamedata), quest("warlord", &gamedata)];

    let _epoch = cache.open_epoch().unwrap();
    for pred in &quest_list {
        assert!(pred.is_satisfied(&ctx, None).unwrap());
    }
    // warlord reuses the first_strike verdict.
    assert_eq!(player.history_reads(), 1);
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_without_cache_nested_quests_recompute() {
    let gamedata = gamedata();
    let player = attacker();
    let ctx = EvalContext::new(&player, &gamedata);

    assert!(quest("first_strike", &gamedata).is_satisfied(&ctx, None).unwrap());
    assert!(quest("warlord", &gamedata).is_satisfied(&ctx, None).unwrap());
    assert_eq!(player.history_reads(), 2);
}

#[test]
fn test_epochs_do_not_nest() {
    let cache = PredicateCache::new();
    let _epoch = cache.open_epoch().unwrap();
    assert!(matches!(cache.open_epoch(), Err(PredicateError::EpochAlreadyOpen)));
}

#[test]
fn test_stale_verdict_until_close() {
    let gamedata = gamedata();
    let mut player = SimplePlayerBuilder::new().history("attacks_launched", 1).build();
    let cache = PredicateCache::new();
    let pred = quest("first_strike", &gamedata);

    let epoch = cache.open_epoch().unwrap();
    {
        let ctx = EvalContext::new(&player, &gamedata).with_cache(&cache);
        assert!(!pred.is_satisfied(&ctx, None).unwrap());
    }

    // Mutating state inside an epoch is a caller error: the old verdict sticks.
    player.set_history("attacks_launched", 10);
    {
        let ctx = EvalContext::new(&player, &gamedata).with_cache(&cache);
        assert!(!pred.is_satisfied(&ctx, None).unwrap());
    }

    drop(epoch);
    let ctx = EvalContext::new(&player, &gamedata).with_cache(&cache);
    assert!(pred.is_satisfied(&ctx, None).unwrap());
}

// =============================================================================
// Bypass and Errors
// =============================================================================

#[test]
fn test_claim_checks_bypass_cache() {
    let gamedata = gamedata();
    let player = attacker();
    let cache = PredicateCache::new();
    let ctx = EvalContext::new(&player, &gamedata).with_cache(&cache);

    let _epoch = cache.open_epoch().unwrap();

    let forced = quest("claimed_only", &gamedata);
    assert!(!forced.is_satisfied(&ctx, None).unwrap());
    assert!(!forced.is_satisfied(&ctx, None).unwrap());
    assert_eq!(player.quest_reads(), 2);

    let must_claim = Predicate::build(
        &json!({ "predicate": "QUEST_COMPLETED", "quest_name": "first_strike", "must_claim": true }),
        &gamedata,
    )
    .unwrap();
    assert!(!must_claim.is_satisfied(&ctx, None).unwrap());
    assert_eq!(player.history_reads(), 0);
    assert!(cache.is_empty());
}

#[test]
fn test_quest_active_is_not_memoized() {
    let gamedata = gamedata();
    let player = attacker();
    let cache = PredicateCache::new();
    let ctx = EvalContext::new(&player, &gamedata).with_cache(&cache);

    let _epoch = cache.open_epoch().unwrap();
    let active = Predicate::build(&json!({ "predicate": "QUEST_ACTIVE", "quest_name": "first_strike" }), &gamedata).unwrap();
    assert!(!active.is_satisfied(&ctx, None).unwrap());
    assert!(!active.is_satisfied(&ctx, None).unwrap());
    assert_eq!(player.history_reads(), 2);
    assert!(cache.is_empty());
}

#[test]
fn test_errors_are_not_memoized() {
    let gamedata = gamedata();
    let player = attacker();
    let cache = PredicateCache::new();
    let ctx = EvalContext::new(&player, &gamedata).with_cache(&cache);

    let _epoch = cache.open_epoch().unwrap();
    let pred = quest("broken", &gamedata);
    assert!(matches!(pred.is_satisfied(&ctx, None), Err(PredicateError::UnknownVar { .. })));
    assert_eq!(cache.lookup("broken"), None);
}
