//! Quest list refresh with and without an open cache epoch.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use game_predicates::cache::PredicateCache;
use game_predicates::core::{Gamedata, QuestSpec};
use game_predicates::games::simple::SimplePlayerBuilder;
use game_predicates::predicates::{EvalContext, Predicate};
use serde_json::json;

const CHAIN_LENGTH: usize = 12;

/// Quest `step_n` requires `step_{n-1}` plus a history threshold.
fn quest_chain() -> Gamedata {
    let mut gamedata = Gamedata::new().with_quest(
        "step_0",
        QuestSpec::new(json!({ "predicate": "ATTACKS_LAUNCHED", "number": 1 })),
    );
    for step in 1..CHAIN_LENGTH {
        gamedata = gamedata.with_quest(
            format!("step_{step}"),
            QuestSpec::new(json!({
                "predicate": "AND",
                "subpredicates": [
                    { "predicate": "QUEST_COMPLETED", "quest_name": format!("step_{}", step - 1) },
                    { "predicate": "ATTACKS_LAUNCHED", "number": step }
                ]
            })),
        );
    }
    gamedata
}

fn quest_cache_benchmark(c: &mut Criterion) {
    let gamedata = quest_chain();
    let player = SimplePlayerBuilder::new().history("attacks_launched", 100).build();
    let quests: Vec<Predicate> = (0..CHAIN_LENGTH)
        .map(|step| {
            Predicate::build(
                &json!({ "predicate": "QUEST_COMPLETED", "quest_name": format!("step_{step}") }),
                &gamedata,
            )
            .unwrap()
        })
        .collect();

    c.bench_function("quest_refresh_uncached", |b| {
        let ctx = EvalContext::new(&player, &gamedata);
        b.iter(|| {
            for quest in &quests {
                black_box(quest.is_satisfied(&ctx, None).unwrap());
            }
        })
    });

    c.bench_function("quest_refresh_epoch", |b| {
        let cache = PredicateCache::new();
        let ctx = EvalContext::new(&player, &gamedata).with_cache(&cache);
        b.iter(|| {
            let _epoch = cache.open_epoch().unwrap();
            for quest in &quests {
                black_box(quest.is_satisfied(&ctx, None).unwrap());
            }
        })
    });
}

criterion_group!(benches, quest_cache_benchmark);
criterion_main!(benches);
