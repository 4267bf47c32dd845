//! Quest Definition Structures
//!
//! Raw structures deserialized from TOML quest files, and the resolved
//! objective kinds and rewards they turn into.

use serde::{Deserialize, Serialize};

use super::error::QuestError;
use super::objective::Objective;
use super::state::Quest;

/// A quest definition file
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuestFile {
    pub quest: RawQuest,
}

impl RawQuestFile {
    /// Parse a single-quest TOML document. Only syntax and shape are
    /// checked here; [`Quest::from_raw`] resolves and validates the rest.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Raw quest data as it appears in TOML
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuest {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// All non-optional objectives (true) or any single objective (false)
    #[serde(default = "default_require_all")]
    pub require_all_objectives: bool,
    /// Quests that must be completed before this one can be accepted
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub objectives: Vec<RawObjective>,
    #[serde(default)]
    pub rewards: Vec<RawReward>,
}

fn default_require_all() -> bool {
    true
}

/// Raw objective as it appears in TOML
#[derive(Debug, Clone, Deserialize)]
pub struct RawObjective {
    pub id: String,
    #[serde(rename = "type")]
    pub objective_type: String,
    pub target: String,
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub optional: bool,
}

fn default_count() -> u32 {
    1
}

/// Raw reward entry
#[derive(Debug, Clone, Deserialize)]
pub struct RawReward {
    pub id: String,
    #[serde(default = "default_count")]
    pub amount: u32,
}

// ============================================================================
// Resolved Structures
// ============================================================================

/// What an objective tracks, with the identifier events must match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectiveKind {
    /// See a specific dialogue
    Dialogue { dialogue_id: String },
    /// Collect X items of type Y
    CollectItem { item_id: String },
    /// Defeat X enemies of type Y
    DefeatEnemy { enemy_id: String },
    /// Reach a specific location
    ReachLocation { location_id: String },
    /// Interact with a specific object
    Interact { interactable_id: String },
}

impl ObjectiveKind {
    /// Build a kind from its TOML type name and target identifier
    pub fn from_parts(kind: &str, target: &str) -> Option<Self> {
        let target = target.to_string();
        match kind.to_lowercase().as_str() {
            "dialogue" | "talk" => Some(ObjectiveKind::Dialogue { dialogue_id: target }),
            "collect_item" | "collect" => Some(ObjectiveKind::CollectItem { item_id: target }),
            "defeat_enemy" | "kill" => Some(ObjectiveKind::DefeatEnemy { enemy_id: target }),
            "reach_location" | "reach" | "location" => {
                Some(ObjectiveKind::ReachLocation { location_id: target })
            }
            "interact" => Some(ObjectiveKind::Interact { interactable_id: target }),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectiveKind::Dialogue { .. } => "dialogue",
            ObjectiveKind::CollectItem { .. } => "collect_item",
            ObjectiveKind::DefeatEnemy { .. } => "defeat_enemy",
            ObjectiveKind::ReachLocation { .. } => "reach_location",
            ObjectiveKind::Interact { .. } => "interact",
        }
    }

    /// The dialogue/item/enemy/location/interactable identifier
    pub fn target(&self) -> &str {
        match self {
            ObjectiveKind::Dialogue { dialogue_id } => dialogue_id,
            ObjectiveKind::CollectItem { item_id } => item_id,
            ObjectiveKind::DefeatEnemy { enemy_id } => enemy_id,
            ObjectiveKind::ReachLocation { location_id } => location_id,
            ObjectiveKind::Interact { interactable_id } => interactable_id,
        }
    }

    /// Kinds that report numeric progress rather than done/not done
    pub fn is_countable(&self) -> bool {
        matches!(
            self,
            ObjectiveKind::CollectItem { .. } | ObjectiveKind::DefeatEnemy { .. }
        )
    }
}

/// A reward granted once when the quest completes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub reward_id: String,
    pub amount: u32,
}

impl Reward {
    pub fn new(reward_id: impl Into<String>, amount: u32) -> Self {
        Self {
            reward_id: reward_id.into(),
            amount,
        }
    }

    pub fn from_raw(raw: &RawReward) -> Self {
        Self::new(raw.id.clone(), raw.amount)
    }
}

impl Objective {
    pub fn from_raw(quest_id: &str, raw: &RawObjective) -> Result<Self, QuestError> {
        let kind = ObjectiveKind::from_parts(&raw.objective_type, &raw.target).ok_or_else(|| {
            QuestError::InvalidDefinition {
                quest_id: quest_id.to_string(),
                reason: format!(
                    "invalid objective type '{}' for objective '{}'",
                    raw.objective_type, raw.id
                ),
            }
        })?;

        Ok(Objective::new(raw.id.clone(), kind, raw.count, raw.description.clone())
            .optional(raw.optional))
    }
}

impl Quest {
    /// Create a Quest from raw TOML data. Structural checks (objective
    /// counts, duplicate ids) happen in [`Quest::validate`].
    pub fn from_raw(raw: &RawQuest) -> Result<Self, QuestError> {
        let mut quest = Quest::new(raw.id.clone(), raw.name.clone(), raw.description.clone())
            .require_all_objectives(raw.require_all_objectives);

        for objective in &raw.objectives {
            quest = quest.with_objective(Objective::from_raw(&raw.id, objective)?);
        }
        for prerequisite in &raw.prerequisites {
            quest = quest.with_prerequisite(prerequisite.clone());
        }
        for reward in &raw.rewards {
            quest = quest.with_reward(Reward::from_raw(reward));
        }

        Ok(quest)
    }
}
