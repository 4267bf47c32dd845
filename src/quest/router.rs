//! Objective Router
//!
//! Entry points for gameplay systems. Each event fans out to every matching,
//! unfinished objective of every active quest.

use tracing::{debug, warn};

use super::error::QuestError;
use super::events::QuestEvent;
use super::registry::QuestManager;

/// Routes gameplay events into a [`QuestManager`]
pub struct ObjectiveRouter<'a> {
    manager: &'a mut QuestManager,
}

impl<'a> ObjectiveRouter<'a> {
    pub fn new(manager: &'a mut QuestManager) -> Self {
        Self { manager }
    }

    pub fn notify_dialogue(&mut self, dialogue_id: &str) -> Result<usize, QuestError> {
        self.dispatch(&QuestEvent::DialogueSeen {
            dialogue_id: dialogue_id.to_string(),
        })
    }

    pub fn notify_item_collected(&mut self, item_id: &str, amount: u32) -> Result<usize, QuestError> {
        self.dispatch(&QuestEvent::ItemCollected {
            item_id: item_id.to_string(),
            count: amount,
        })
    }

    pub fn notify_enemy_defeated(&mut self, enemy_id: &str, amount: u32) -> Result<usize, QuestError> {
        self.dispatch(&QuestEvent::EnemyDefeated {
            enemy_id: enemy_id.to_string(),
            count: amount,
        })
    }

    pub fn notify_location_reached(&mut self, location_id: &str) -> Result<usize, QuestError> {
        self.dispatch(&QuestEvent::LocationReached {
            location_id: location_id.to_string(),
        })
    }

    pub fn notify_interaction(&mut self, interactable_id: &str) -> Result<usize, QuestError> {
        self.dispatch(&QuestEvent::Interaction {
            interactable_id: interactable_id.to_string(),
        })
    }

    /// Apply an event to every active quest in registration order, returning
    /// how many objectives changed.
    ///
    /// Within a quest every matching unfinished objective is updated until
    /// one completion satisfies the quest's completion rule. The quest then
    /// completes immediately and its remaining objectives are left as they
    /// were, so a single event may not reach every matching objective.
    pub fn dispatch(&mut self, event: &QuestEvent) -> Result<usize, QuestError> {
        if event.amount() == 0 {
            let err = QuestError::InvalidAmount(event.event_type().to_string());
            warn!("Rejected {} event: {}", event.event_type(), err);
            return Err(err);
        }

        let mut updated = 0;
        for idx in self.manager.active_indices() {
            updated += self.manager.apply_event_to(idx, event)?;
        }

        debug!("{} event updated {} objective(s)", event.event_type(), updated);
        Ok(updated)
    }
}
