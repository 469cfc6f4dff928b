use thiserror::Error;

use crate::game::game_fsm::GameFsmState;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("No challenge is in play. ActualState: '{0}'.")]
    NoChallengeInPlay(GameFsmState),
    #[error("The vocabulary has not been loaded, there is no round to play.")]
    VocabularyNotLoaded,
}
