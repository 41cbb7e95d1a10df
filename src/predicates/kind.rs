//! The closed set of predicate kinds.
//!
//! Config objects name their kind with a string discriminator. That string
//! is resolved to a [`PredicateKind`] exactly once, at construction; every
//! later dispatch is an exhaustive `match`.

/// Predicate kind discriminator.
///
/// Several kinds share an implementation (the player history family), but
/// keep their own kind so descriptions use their own string templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PredicateKind {
    // === Combinators ===
    And,
    Or,
    Not,

    // === Constants ===
    AlwaysTrue,
    AlwaysFalse,
    Random,

    // === Player ===
    TutorialComplete,
    AccountCreationTime,
    PlayerLevel,
    PlayerHistory,
    AttacksLaunched,
    AttacksVictory,
    UnitsManufactured,
    LoggedInTimes,
    ResourcesHarvestedTotal,

    // === World ===
    BuildingQuantity,

    // === Quests ===
    QuestCompleted,
    QuestActive,

    // === Timed effects ===
    AuraActive,
    AuraInactive,
    CooldownActive,
    CooldownInactive,
    AbsoluteTime,

    // === Content indirection ===
    GamedataVar,
    Library,
}

impl PredicateKind {
    /// Every kind, in declaration order.
    pub const ALL: [PredicateKind; 25] = [
        Self::And,
        Self::Or,
        Self::Not,
        Self::AlwaysTrue,
        Self::AlwaysFalse,
        Self::Random,
        Self::TutorialComplete,
        Self::AccountCreationTime,
        Self::PlayerLevel,
        Self::PlayerHistory,
        Self::AttacksLaunched,
        Self::AttacksVictory,
        Self::UnitsManufactured,
        Self::LoggedInTimes,
        Self::ResourcesHarvestedTotal,
        Self::BuildingQuantity,
        Self::QuestCompleted,
        Self::QuestActive,
        Self::AuraActive,
        Self::AuraInactive,
        Self::CooldownActive,
        Self::CooldownInactive,
        Self::AbsoluteTime,
        Self::GamedataVar,
        Self::Library,
    ];

    /// The config discriminator string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::AlwaysTrue => "ALWAYS_TRUE",
            Self::AlwaysFalse => "ALWAYS_FALSE",
            Self::Random => "RANDOM",
            Self::TutorialComplete => "TUTORIAL_COMPLETE",
            Self::AccountCreationTime => "ACCOUNT_CREATION_TIME",
            Self::PlayerLevel => "PLAYER_LEVEL",
            Self::PlayerHistory => "PLAYER_HISTORY",
            Self::AttacksLaunched => "ATTACKS_LAUNCHED",
            Self::AttacksVictory => "ATTACKS_VICTORY",
            Self::UnitsManufactured => "UNITS_MANUFACTURED",
            Self::LoggedInTimes => "LOGGED_IN_TIMES",
            Self::ResourcesHarvestedTotal => "RESOURCES_HARVESTED_TOTAL",
            Self::BuildingQuantity => "BUILDING_QUANTITY",
            Self::QuestCompleted => "QUEST_COMPLETED",
            Self::QuestActive => "QUEST_ACTIVE",
            Self::AuraActive => "AURA_ACTIVE",
            Self::AuraInactive => "AURA_INACTIVE",
            Self::CooldownActive => "COOLDOWN_ACTIVE",
            Self::CooldownInactive => "COOLDOWN_INACTIVE",
            Self::AbsoluteTime => "ABSOLUTE_TIME",
            Self::GamedataVar => "GAMEDATA_VAR",
            Self::Library => "LIBRARY",
        }
    }

    /// Resolve a config discriminator. `None` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.as_str() == name)
    }

    /// Does this kind own child predicates?
    #[must_use]
    pub const fn is_combinator(self) -> bool {
        matches!(self, Self::And | Self::Or | Self::Not)
    }
}

impl std::fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_roundtrip() {
        for kind in PredicateKind::ALL {
            assert_eq!(PredicateKind::from_name(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = PredicateKind::ALL.iter().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), PredicateKind::ALL.len());
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(PredicateKind::from_name("NO_SUCH_KIND"), None);
        assert_eq!(PredicateKind::from_name("and"), None);
    }

    #[test]
    fn test_combinators() {
        assert!(PredicateKind::And.is_combinator());
        assert!(PredicateKind::Not.is_combinator());
        assert!(!PredicateKind::Library.is_combinator());
        assert_eq!(PredicateKind::QuestCompleted.to_string(), "QUEST_COMPLETED");
    }
}
