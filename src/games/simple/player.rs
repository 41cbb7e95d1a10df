//! Simple player implementation.

use std::cell::Cell;

use rustc_hash::{FxHashMap, FxHashSet};
use serde_json::{Map, Value};

use crate::core::{Aura, Building, Cooldown, EntityId, GameContext};

#[derive(Clone, Debug)]
struct NamedCooldown {
    name: String,
    cooldown: Cooldown,
    data: Option<Map<String, Value>>,
}

impl NamedCooldown {
    fn matches(&self, name: &str, match_data: Option<&Map<String, Value>>) -> bool {
        if self.name != name {
            return false;
        }
        let Some(wanted) = match_data else {
            return true;
        };
        wanted
            .iter()
            .all(|(key, value)| self.data.as_ref().and_then(|data| data.get(key)) == Some(value))
    }
}

/// In-memory player state.
#[derive(Clone, Debug)]
pub struct SimplePlayer {
    now: i64,
    creation_time: i64,
    tutorial_complete: bool,
    level: i64,
    history: FxHashMap<String, i64>,
    completed_quests: FxHashSet<String>,
    auras: Vec<Aura>,
    cooldowns: Vec<NamedCooldown>,
    buildings: Vec<Building>,
    next_entity: u64,
    history_reads: Cell<usize>,
    quest_reads: Cell<usize>,
}

/// Builder for creating a SimplePlayer.
#[derive(Clone, Debug)]
pub struct SimplePlayerBuilder {
    player: SimplePlayer,
}

impl Default for SimplePlayerBuilder {
    fn default() -> Self {
        Self {
            player: SimplePlayer {
                now: 1_700_000_000,
                creation_time: -1,
                tutorial_complete: false,
                level: 1,
                history: FxHashMap::default(),
                completed_quests: FxHashSet::default(),
                auras: Vec::new(),
                cooldowns: Vec::new(),
                buildings: Vec::new(),
                next_entity: 1,
                history_reads: Cell::new(0),
                quest_reads: Cell::new(0),
            },
        }
    }
}

impl SimplePlayerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(mut self, now: i64) -> Self {
        self.player.now = now;
        self
    }

    pub fn created_at(mut self, time: i64) -> Self {
        self.player.creation_time = time;
        self
    }

    pub fn tutorial_complete(mut self) -> Self {
        self.player.tutorial_complete = true;
        self
    }

    pub fn level(mut self, level: i64) -> Self {
        self.player.level = level;
        self
    }

    pub fn history(mut self, key: impl Into<String>, value: i64) -> Self {
        self.player.history.insert(key.into(), value);
        self
    }

    pub fn completed_quest(mut self, quest: impl Into<String>) -> Self {
        self.player.completed_quests.insert(quest.into());
        self
    }

    pub fn aura(mut self, aura: Aura) -> Self {
        self.player.auras.push(aura);
        self
    }

    pub fn cooldown(self, name: impl Into<String>, start: i64, end: i64) -> Self {
        self.cooldown_with_data(name, start, end, None)
    }

    pub fn cooldown_with_data(
        mut self,
        name: impl Into<String>,
        start: i64,
        end: i64,
        data: Option<Map<String, Value>>,
    ) -> Self {
        self.player.cooldowns.push(NamedCooldown {
            name: name.into(),
            cooldown: Cooldown { start, end },
            data,
        });
        self
    }

    /// Add a finished building.
    pub fn building(mut self, spec: impl Into<String>) -> Self {
        self.player.add_building(spec, false);
        self
    }

    /// Add a building still under construction.
    pub fn building_under_construction(mut self, spec: impl Into<String>) -> Self {
        self.player.add_building(spec, true);
        self
    }

    /// Build the player.
    pub fn build(self) -> SimplePlayer {
        self.player
    }
}

impl SimplePlayer {
    /// Add a building and return its entity id.
    pub fn add_building(&mut self, spec: impl Into<String>, under_construction: bool) -> EntityId {
        let id = EntityId::new(self.next_entity);
        self.next_entity += 1;
        let mut building = Building::new(id, spec);
        building.under_construction = under_construction;
        self.buildings.push(building);
        id
    }

    /// Advance or rewind the clock.
    pub fn set_now(&mut self, now: i64) {
        self.now = now;
    }

    /// Overwrite a history counter.
    pub fn set_history(&mut self, key: impl Into<String>, value: i64) {
        self.history.insert(key.into(), value);
    }

    /// Mark a quest as claimed.
    pub fn complete_quest(&mut self, quest: impl Into<String>) {
        self.completed_quests.insert(quest.into());
    }

    /// How many times history has been read.
    pub fn history_reads(&self) -> usize {
        self.history_reads.get()
    }

    /// How many times the claimed-quest set has been read.
    pub fn quest_reads(&self) -> usize {
        self.quest_reads.get()
    }

    /// Zero the read counters.
    pub fn reset_counters(&self) {
        self.history_reads.set(0);
        self.quest_reads.set(0);
    }
}

impl GameContext for SimplePlayer {
    fn now(&self) -> i64 {
        self.now
    }

    fn creation_time(&self) -> i64 {
        self.creation_time
    }

    fn tutorial_complete(&self) -> bool {
        self.tutorial_complete
    }

    fn history(&self, key: &str) -> Option<i64> {
        self.history_reads.set(self.history_reads.get() + 1);
        self.history.get(key).copied()
    }

    fn has_completed_quest(&self, quest: &str) -> bool {
        self.quest_reads.set(self.quest_reads.get() + 1);
        self.completed_quests.contains(quest)
    }

    fn level(&self) -> i64 {
        self.level
    }

    fn auras(&self) -> &[Aura] {
        &self.auras
    }

    fn cooldown(&self, name: &str, match_data: Option<&Map<String, Value>>) -> Option<Cooldown> {
        self.cooldowns
            .iter()
            .find(|entry| entry.matches(name, match_data))
            .map(|entry| entry.cooldown)
    }

    fn buildings(&self) -> &[Building] {
        &self.buildings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_defaults() {
        let player = SimplePlayerBuilder::new().build();
        assert_eq!(player.level(), 1);
        assert!(!player.tutorial_complete());
        assert!(player.creation_time() < 0);
        assert!(player.buildings().is_empty());
    }

    #[test]
    fn test_history_reads_are_counted() {
        let player = SimplePlayerBuilder::new().history("attacks_launched", 4).build();
        assert_eq!(player.history("attacks_launched"), Some(4));
        assert_eq!(player.history("missing"), None);
        assert_eq!(player.history_reads(), 2);

        player.reset_counters();
        assert_eq!(player.history_reads(), 0);
    }

    #[test]
    fn test_buildings_get_distinct_ids() {
        let player = SimplePlayerBuilder::new()
            .building("barracks")
            .building_under_construction("barracks")
            .build();
        let buildings = player.buildings();
        assert_eq!(buildings.len(), 2);
        assert_ne!(buildings[0].id, buildings[1].id);
        assert!(buildings[1].under_construction);
    }

    #[test]
    fn test_cooldown_match_data() {
        let mut data = Map::new();
        data.insert("region".into(), json!("north"));
        let player = SimplePlayerBuilder::new()
            .cooldown_with_data("raid", 10, 20, Some(data.clone()))
            .build();

        assert!(player.cooldown("raid", None).is_some());
        assert!(player.cooldown("raid", Some(&data)).is_some());

        let mut other = Map::new();
        other.insert("region".into(), json!("south"));
        assert!(player.cooldown("raid", Some(&other)).is_none());
        assert!(player.cooldown("heal", None).is_none());
    }
}
