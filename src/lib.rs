pub mod config;
pub mod error;
pub mod game;
pub mod metrics;
pub mod word_pair;
pub mod words_repo;

pub use crate::game::actor::{GameActor, GameEvent, GameState};
pub use crate::game::actor_client::{GameClient, GameEventReceiver};
pub use crate::word_pair::WordPair;
pub use crate::words_repo::{JsonFileWordsRepo, WordsRepo};
