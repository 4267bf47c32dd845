//! Objective Progress
//!
//! A single trackable unit of progress inside a quest.

use serde::Serialize;

use super::definition::ObjectiveKind;
use super::error::QuestError;
use super::events::QuestEvent;

/// What a progress or completion call did to an objective
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveOutcome {
    /// Already completed, or the event did not concern this objective
    Unchanged,
    /// Progress was added; `completed` is set when it reached the requirement
    Progressed {
        current: u32,
        required: u32,
        completed: bool,
    },
    /// Completed directly, without counting
    Completed,
}

impl ObjectiveOutcome {
    /// True if the call moved the objective from incomplete to complete
    pub fn completed_objective(&self) -> bool {
        matches!(
            self,
            ObjectiveOutcome::Completed | ObjectiveOutcome::Progressed { completed: true, .. }
        )
    }
}

/// A quest objective and its progress
#[derive(Debug, Clone, Serialize)]
pub struct Objective {
    id: String,
    kind: ObjectiveKind,
    description: String,
    required_amount: u32,
    current_amount: u32,
    completed: bool,
    optional: bool,
}

impl Objective {
    /// `required_amount` is checked when the owning quest is registered
    pub fn new(
        id: impl Into<String>,
        kind: ObjectiveKind,
        required_amount: u32,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            description: description.into(),
            required_amount,
            current_amount: 0,
            completed: false,
            optional: false,
        }
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &ObjectiveKind {
        &self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn current_amount(&self) -> u32 {
        self.current_amount
    }

    pub fn required_amount(&self) -> u32 {
        self.required_amount
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Reset progress; called whenever the owning quest becomes active
    pub fn initialize(&mut self) {
        self.current_amount = 0;
        self.completed = false;
    }

    /// Add progress, completing the objective once the requirement is met
    pub fn update_progress(&mut self, amount: u32) -> Result<ObjectiveOutcome, QuestError> {
        if amount == 0 {
            return Err(QuestError::InvalidAmount(self.id.clone()));
        }
        if self.completed {
            return Ok(ObjectiveOutcome::Unchanged);
        }

        self.current_amount = self.current_amount.saturating_add(amount);
        let completed = self.current_amount >= self.required_amount;
        if completed {
            self.complete();
        }

        Ok(ObjectiveOutcome::Progressed {
            current: self.current_amount,
            required: self.required_amount,
            completed,
        })
    }

    /// Mark as complete regardless of count
    pub fn complete(&mut self) -> ObjectiveOutcome {
        if self.completed {
            return ObjectiveOutcome::Unchanged;
        }
        self.completed = true;
        self.current_amount = self.required_amount;
        ObjectiveOutcome::Completed
    }

    /// Apply a gameplay event if it targets this objective.
    ///
    /// Countable kinds add the event's amount, the rest complete outright.
    pub fn apply(&mut self, event: &QuestEvent) -> Result<ObjectiveOutcome, QuestError> {
        if self.completed || !event.targets(&self.kind) {
            return Ok(ObjectiveOutcome::Unchanged);
        }
        if self.kind.is_countable() {
            self.update_progress(event.amount())
        } else {
            Ok(self.complete())
        }
    }

    /// Human readable progress, e.g. "Collect keys: 2/3"
    pub fn progress_text(&self) -> String {
        let label = if self.description.is_empty() {
            self.id.as_str()
        } else {
            self.description.as_str()
        };

        if self.kind.is_countable() {
            format!("{}: {}/{}", label, self.current_amount, self.required_amount)
        } else if self.completed {
            format!("{}: Completed", label)
        } else {
            format!("{}: Not completed", label)
        }
    }
}
