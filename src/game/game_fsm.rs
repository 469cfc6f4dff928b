use std::fmt;

use rust_fsm::state_machine;

/*
 * Loading: waiting for the word source to respond
 * Ready: a round is being played
 * RoundEnded: the lives (or the words) ran out, waiting for a reset
 */
state_machine! {
    derive(Debug, Clone, PartialEq)
    pub GameFsm(Loading)

    Loading => {
        WordsLoaded => Ready
    },
    Ready => {
        RoundFinished => RoundEnded,
        NewRound => Ready,
    },
    RoundEnded => {
        NewRound => Ready,
    }
}

impl fmt::Display for GameFsmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
