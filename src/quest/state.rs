//! Quest State Tracking
//!
//! A quest's status machine, its completion policy, and progress queries.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::definition::Reward;
use super::error::QuestError;
use super::events::QuestEvent;
use super::objective::{Objective, ObjectiveOutcome};

/// Status of a quest
///
/// NotStarted -> Active -> Completed | Failed. Completed and Failed are terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestStatus {
    #[default]
    NotStarted,
    Active,
    Completed,
    Failed,
}

impl QuestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestStatus::NotStarted => "not_started",
            QuestStatus::Active => "active",
            QuestStatus::Completed => "completed",
            QuestStatus::Failed => "failed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "not_started" => Some(QuestStatus::NotStarted),
            "active" => Some(QuestStatus::Active),
            "completed" => Some(QuestStatus::Completed),
            "failed" => Some(QuestStatus::Failed),
            _ => None,
        }
    }
}

impl fmt::Display for QuestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An objective that changed while applying an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectiveChange {
    pub objective_id: String,
    pub outcome: ObjectiveOutcome,
}

/// A quest: static definition plus runtime status
#[derive(Debug, Clone, Serialize)]
pub struct Quest {
    id: String,
    name: String,
    description: String,
    objectives: Vec<Objective>,
    prerequisites: Vec<String>,
    rewards: Vec<Reward>,
    require_all_objectives: bool,
    status: QuestStatus,
    rewards_granted: bool,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl Quest {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            objectives: Vec::new(),
            prerequisites: Vec::new(),
            rewards: Vec::new(),
            require_all_objectives: true,
            status: QuestStatus::NotStarted,
            rewards_granted: false,
            started_at: None,
            completed_at: None,
        }
    }

    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objectives.push(objective);
        self
    }

    pub fn with_prerequisite(mut self, quest_id: impl Into<String>) -> Self {
        self.prerequisites.push(quest_id.into());
        self
    }

    pub fn with_reward(mut self, reward: Reward) -> Self {
        self.rewards.push(reward);
        self
    }

    pub fn require_all_objectives(mut self, require_all: bool) -> Self {
        self.require_all_objectives = require_all;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    pub fn prerequisites(&self) -> &[String] {
        &self.prerequisites
    }

    pub fn rewards(&self) -> &[Reward] {
        &self.rewards
    }

    pub fn requires_all_objectives(&self) -> bool {
        self.require_all_objectives
    }

    pub fn status(&self) -> QuestStatus {
        self.status
    }

    pub fn rewards_granted(&self) -> bool {
        self.rewards_granted
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Get objective by ID
    pub fn objective(&self, id: &str) -> Option<&Objective> {
        self.objectives.iter().find(|o| o.id() == id)
    }

    /// Structural checks run before a quest is registered
    pub fn validate(&self) -> Result<(), QuestError> {
        let invalid = |reason: String| QuestError::InvalidDefinition {
            quest_id: self.id.clone(),
            reason,
        };

        if self.id.is_empty() {
            return Err(invalid("quest id is empty".to_string()));
        }
        if self.objectives.is_empty() {
            return Err(invalid("quest has no objectives".to_string()));
        }

        let mut seen = HashSet::new();
        for objective in &self.objectives {
            if !seen.insert(objective.id()) {
                return Err(invalid(format!("duplicate objective id '{}'", objective.id())));
            }
            if objective.required_amount() == 0 {
                return Err(invalid(format!(
                    "objective '{}' requires an amount of zero",
                    objective.id()
                )));
            }
            if !objective.kind().is_countable() && objective.required_amount() != 1 {
                return Err(invalid(format!(
                    "{} objective '{}' must have a count of 1",
                    objective.kind().as_str(),
                    objective.id()
                )));
            }
        }

        // Would otherwise be complete the moment it starts
        if self.require_all_objectives && self.objectives.iter().all(|o| o.is_optional()) {
            return Err(invalid("every objective is optional".to_string()));
        }

        if self.prerequisites.iter().any(|p| p == &self.id) {
            return Err(invalid("quest lists itself as a prerequisite".to_string()));
        }

        Ok(())
    }

    /// Prerequisites that are not Completed according to `status_of`
    pub fn missing_prerequisites<F>(&self, status_of: F) -> Vec<String>
    where
        F: Fn(&str) -> QuestStatus,
    {
        self.prerequisites
            .iter()
            .filter(|p| status_of(p.as_str()) != QuestStatus::Completed)
            .cloned()
            .collect()
    }

    /// True iff every prerequisite is Completed
    pub fn can_start<F>(&self, status_of: F) -> bool
    where
        F: Fn(&str) -> QuestStatus,
    {
        self.prerequisites
            .iter()
            .all(|p| status_of(p.as_str()) == QuestStatus::Completed)
    }

    /// NotStarted -> Active, resetting every objective
    pub fn start<F>(&mut self, status_of: F) -> Result<(), QuestError>
    where
        F: Fn(&str) -> QuestStatus,
    {
        if self.status != QuestStatus::NotStarted {
            return Err(self.invalid_transition("start"));
        }
        let missing = self.missing_prerequisites(status_of);
        if !missing.is_empty() {
            return Err(QuestError::PrerequisitesNotMet {
                quest_id: self.id.clone(),
                missing,
            });
        }

        for objective in &mut self.objectives {
            objective.initialize();
        }
        self.status = QuestStatus::Active;
        self.started_at = Some(Utc::now());
        self.completed_at = None;
        Ok(())
    }

    /// Whether the completion policy holds right now. Always false unless Active.
    pub fn check_completion(&self) -> bool {
        if self.status != QuestStatus::Active {
            return false;
        }
        if self.require_all_objectives {
            self.objectives
                .iter()
                .filter(|o| !o.is_optional())
                .all(|o| o.is_completed())
        } else {
            self.objectives.iter().any(|o| o.is_completed())
        }
    }

    /// Active -> Completed.
    ///
    /// Returns `Ok(false)` without changing anything if already Completed.
    pub fn complete(&mut self) -> Result<bool, QuestError> {
        match self.status {
            QuestStatus::Completed => return Ok(false),
            QuestStatus::Active => {}
            _ => return Err(self.invalid_transition("complete")),
        }
        if !self.check_completion() {
            return Err(QuestError::PolicyNotSatisfied(self.id.clone()));
        }

        self.status = QuestStatus::Completed;
        self.completed_at = Some(Utc::now());
        Ok(true)
    }

    /// Active -> Failed
    pub fn fail(&mut self) -> Result<(), QuestError> {
        if self.status != QuestStatus::Active {
            return Err(self.invalid_transition("fail"));
        }
        self.status = QuestStatus::Failed;
        self.completed_at = Some(Utc::now());
        Ok(())
    }

    /// Completed non-optional objectives over all non-optional objectives.
    ///
    /// Quests whose objectives are all optional count every objective.
    pub fn completion_percentage(&self) -> f32 {
        let required: Vec<&Objective> =
            self.objectives.iter().filter(|o| !o.is_optional()).collect();
        let pool: Vec<&Objective> = if required.is_empty() {
            self.objectives.iter().collect()
        } else {
            required
        };

        if pool.is_empty() {
            return 0.0;
        }
        let done = pool.iter().filter(|o| o.is_completed()).count();
        done as f32 / pool.len() as f32
    }

    /// Progress text for each objective, in declaration order
    pub fn progress_text(&self) -> Vec<String> {
        self.objectives.iter().map(Objective::progress_text).collect()
    }

    /// Get duration in seconds (if started)
    pub fn duration_secs(&self) -> Option<i64> {
        self.started_at.map(|start| {
            let end = self.completed_at.unwrap_or_else(Utc::now);
            (end - start).num_seconds()
        })
    }

    /// Apply an event to matching objectives in declaration order.
    ///
    /// Stops at the first objective completion that satisfies the policy so
    /// the caller can complete the quest before anything else changes.
    /// Objectives are frozen unless the quest is Active.
    pub fn apply_event(&mut self, event: &QuestEvent) -> Result<Vec<ObjectiveChange>, QuestError> {
        let mut changes = Vec::new();
        if self.status != QuestStatus::Active {
            return Ok(changes);
        }
        if event.amount() == 0 {
            return Err(QuestError::InvalidAmount(event.event_type().to_string()));
        }

        for index in 0..self.objectives.len() {
            let outcome = self.objectives[index].apply(event)?;
            if outcome == ObjectiveOutcome::Unchanged {
                continue;
            }
            changes.push(ObjectiveChange {
                objective_id: self.objectives[index].id().to_string(),
                outcome,
            });
            if outcome.completed_objective() && self.check_completion() {
                break;
            }
        }

        Ok(changes)
    }

    /// Progress a single objective directly. Frozen unless Active.
    pub fn progress_objective(
        &mut self,
        objective_id: &str,
        amount: u32,
    ) -> Result<ObjectiveOutcome, QuestError> {
        if self.status != QuestStatus::Active {
            return Err(self.invalid_transition("progress objectives of"));
        }
        self.objective_mut(objective_id)?.update_progress(amount)
    }

    /// Complete a single objective directly. Frozen unless Active.
    pub fn complete_objective(&mut self, objective_id: &str) -> Result<ObjectiveOutcome, QuestError> {
        if self.status != QuestStatus::Active {
            return Err(self.invalid_transition("complete objectives of"));
        }
        Ok(self.objective_mut(objective_id)?.complete())
    }

    /// Record that rewards went out; returns false if they already had
    pub(crate) fn mark_rewards_granted(&mut self) -> bool {
        !std::mem::replace(&mut self.rewards_granted, true)
    }

    fn objective_mut(&mut self, objective_id: &str) -> Result<&mut Objective, QuestError> {
        let quest_id = &self.id;
        self.objectives
            .iter_mut()
            .find(|o| o.id() == objective_id)
            .ok_or_else(|| QuestError::ObjectiveNotFound {
                quest_id: quest_id.clone(),
                objective_id: objective_id.to_string(),
            })
    }

    fn invalid_transition(&self, action: &'static str) -> QuestError {
        QuestError::InvalidTransition {
            quest_id: self.id.clone(),
            from: self.status,
            action,
        }
    }
}
