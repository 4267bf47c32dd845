//! Quest Event Types
//!
//! Inbound gameplay events that drive objective progress, and the outbound
//! notifications observers receive when quests change.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;

use super::definition::{ObjectiveKind, Reward};
use super::state::Quest;

/// Gameplay events that can trigger quest progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestEvent {
    /// A dialogue was seen through
    DialogueSeen { dialogue_id: String },

    /// Items were picked up
    ItemCollected {
        item_id: String,
        #[serde(default = "default_count")]
        count: u32,
    },

    /// Enemies were defeated
    EnemyDefeated {
        enemy_id: String,
        #[serde(default = "default_count")]
        count: u32,
    },

    /// A location trigger was entered
    LocationReached { location_id: String },

    /// An interactable object was used
    Interaction { interactable_id: String },
}

fn default_count() -> u32 {
    1
}

impl QuestEvent {
    /// Whether this event concerns objectives of the given kind and target
    pub fn targets(&self, kind: &ObjectiveKind) -> bool {
        match (self, kind) {
            (
                QuestEvent::DialogueSeen { dialogue_id },
                ObjectiveKind::Dialogue { dialogue_id: target },
            ) => dialogue_id == target,
            (
                QuestEvent::ItemCollected { item_id, .. },
                ObjectiveKind::CollectItem { item_id: target },
            ) => item_id == target,
            (
                QuestEvent::EnemyDefeated { enemy_id, .. },
                ObjectiveKind::DefeatEnemy { enemy_id: target },
            ) => enemy_id == target,
            (
                QuestEvent::LocationReached { location_id },
                ObjectiveKind::ReachLocation { location_id: target },
            ) => location_id == target,
            (
                QuestEvent::Interaction { interactable_id },
                ObjectiveKind::Interact { interactable_id: target },
            ) => interactable_id == target,
            _ => false,
        }
    }

    /// Progress carried by the event (1 for single-step events)
    pub fn amount(&self) -> u32 {
        match self {
            QuestEvent::ItemCollected { count, .. } | QuestEvent::EnemyDefeated { count, .. } => {
                *count
            }
            QuestEvent::DialogueSeen { .. }
            | QuestEvent::LocationReached { .. }
            | QuestEvent::Interaction { .. } => 1,
        }
    }

    /// Get event type as string (for logging/debugging)
    pub fn event_type(&self) -> &'static str {
        match self {
            QuestEvent::DialogueSeen { .. } => "dialogue_seen",
            QuestEvent::ItemCollected { .. } => "item_collected",
            QuestEvent::EnemyDefeated { .. } => "enemy_defeated",
            QuestEvent::LocationReached { .. } => "location_reached",
            QuestEvent::Interaction { .. } => "interaction",
        }
    }
}

/// Change notifications emitted by the quest manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "notification", rename_all = "snake_case")]
pub enum QuestNotification {
    Accepted { quest_id: String },
    Completed { quest_id: String },
    Failed { quest_id: String },
    Updated { quest_id: String },
    ObjectiveUpdated {
        quest_id: String,
        objective_id: String,
        current: u32,
        required: u32,
    },
    ObjectiveCompleted {
        quest_id: String,
        objective_id: String,
    },
}

impl QuestNotification {
    pub fn quest_id(&self) -> &str {
        match self {
            QuestNotification::Accepted { quest_id }
            | QuestNotification::Completed { quest_id }
            | QuestNotification::Failed { quest_id }
            | QuestNotification::Updated { quest_id }
            | QuestNotification::ObjectiveUpdated { quest_id, .. }
            | QuestNotification::ObjectiveCompleted { quest_id, .. } => quest_id,
        }
    }
}

/// Receives every notification, in emission order, with the quest as it is
/// right after the change.
pub trait QuestObserver {
    fn on_notification(&mut self, notification: &QuestNotification, quest: &Quest);
}

impl<F> QuestObserver for F
where
    F: FnMut(&QuestNotification, &Quest),
{
    fn on_notification(&mut self, notification: &QuestNotification, quest: &Quest) {
        self(notification, quest)
    }
}

/// Forwards notifications into an unbounded channel
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<QuestNotification>,
}

impl ChannelObserver {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<QuestNotification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl QuestObserver for ChannelObserver {
    fn on_notification(&mut self, notification: &QuestNotification, _quest: &Quest) {
        if self.tx.send(notification.clone()).is_err() {
            debug!(
                "Notification receiver dropped, discarding {:?} for '{}'",
                notification,
                notification.quest_id()
            );
        }
    }
}

/// Hands out quest rewards; called exactly once per completed quest
pub trait RewardDistributor {
    fn distribute(&mut self, quest: &Quest, rewards: &[Reward]);
}

impl<F> RewardDistributor for F
where
    F: FnMut(&Quest, &[Reward]),
{
    fn distribute(&mut self, quest: &Quest, rewards: &[Reward]) {
        self(quest, rewards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_targets() {
        let event = QuestEvent::EnemyDefeated { enemy_id: "wolf".into(), count: 2 };
        assert!(event.targets(&ObjectiveKind::DefeatEnemy { enemy_id: "wolf".into() }));
        assert!(!event.targets(&ObjectiveKind::DefeatEnemy { enemy_id: "bear".into() }));
        assert!(!event.targets(&ObjectiveKind::CollectItem { item_id: "wolf".into() }));
        assert_eq!(event.amount(), 2);
        assert_eq!(event.event_type(), "enemy_defeated");
    }

    #[test]
    fn test_event_json_defaults_count() {
        let event: QuestEvent =
            serde_json::from_str(r#"{"type":"item_collected","item_id":"key"}"#).unwrap();
        assert_eq!(event, QuestEvent::ItemCollected { item_id: "key".into(), count: 1 });
    }

    #[test]
    fn test_notification_quest_id() {
        let notifications = [
            QuestNotification::Accepted { quest_id: "q".into() },
            QuestNotification::Failed { quest_id: "q".into() },
            QuestNotification::ObjectiveUpdated {
                quest_id: "q".into(),
                objective_id: "o".into(),
                current: 1,
                required: 2,
            },
            QuestNotification::ObjectiveCompleted { quest_id: "q".into(), objective_id: "o".into() },
        ];
        for notification in &notifications {
            assert_eq!(notification.quest_id(), "q");
        }
    }

    #[test]
    fn test_channel_observer_survives_dropped_receiver() {
        let (mut observer, rx) = ChannelObserver::new();
        drop(rx);
        let quest = Quest::new("q", "Quest", "");
        observer.on_notification(&QuestNotification::Updated { quest_id: "q".into() }, &quest);
    }

    #[test]
    fn test_channel_observer_forwards() {
        let (mut observer, mut rx) = ChannelObserver::new();
        let quest = Quest::new("q", "Quest", "");
        let notification = QuestNotification::Accepted { quest_id: "q".into() };

        observer.on_notification(&notification, &quest);
        assert_eq!(rx.try_recv().unwrap(), notification);
        assert!(rx.try_recv().is_err());
    }
}
