//! Quest System Module
//!
//! Quest definitions loaded from TOML, a registry owning their runtime
//! state, and a router that turns gameplay events into objective progress.

pub mod definition;
pub mod error;
pub mod events;
pub mod objective;
pub mod registry;
pub mod router;
pub mod state;

pub use definition::{ObjectiveKind, RawQuestFile, Reward};
pub use error::{DefinitionError, QuestError};
pub use events::{ChannelObserver, QuestEvent, QuestNotification, QuestObserver, RewardDistributor};
pub use objective::{Objective, ObjectiveOutcome};
pub use registry::QuestManager;
pub use router::ObjectiveRouter;
pub use state::{Quest, QuestStatus};
