pub mod actor;
pub mod actor_client;
pub mod game_fsm;
pub mod sampler;

use rust_fsm::StateMachine;

use crate::error::domain_error::DomainError;
use crate::error::Error;
use crate::game::game_fsm::{GameFsm, GameFsmInput, GameFsmState};
use crate::game::sampler::{RandomSampler, Sampler};
use crate::word_pair::WordPair;

/// A state change the presentation sink has to be told about, in emission
/// order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notification {
    StateChanged,
    NextChallenge,
    RoundEnded,
}

/// The round state machine: owns the word pool, adjudicates guesses and keeps
/// the life/score bookkeeping. Every mutating operation returns the ordered
/// notifications it produced, so the caller can forward them to the sink.
pub struct Game {
    all_words: Vec<WordPair>,
    remaining_words: Vec<WordPair>,
    current_challenge: Option<WordPair>,
    remaining_lives: u8,
    correct_count: u32,
    wrong_count: u32,
    unanswered_count: u32,
    starting_lives: u8,
    starts_on_data_arrival: bool,
    fsm: StateMachine<GameFsm>,
    sampler: Box<dyn Sampler>,
}

impl Game {
    pub const DEFAULT_STARTING_LIVES: u8 = 5;

    // A 2-in-5 chance of dropping the true translation instead of a distractor.
    const TRUE_MATCH_BOUND: usize = 5;
    const TRUE_MATCH_SENTINEL: usize = 2;

    pub fn new(starting_lives: u8) -> Self {
        Game::with_sampler(starting_lives, Box::new(RandomSampler))
    }

    pub fn with_sampler(starting_lives: u8, sampler: Box<dyn Sampler>) -> Self {
        Self {
            all_words: Vec::default(),
            remaining_words: Vec::default(),
            current_challenge: None,
            remaining_lives: starting_lives,
            correct_count: 0,
            wrong_count: 0,
            unanswered_count: 0,
            starting_lives,
            starts_on_data_arrival: false,
            fsm: StateMachine::default(),
            sampler,
        }
    }

    pub fn state(&self) -> &GameFsmState {
        self.fsm.state()
    }

    pub fn current_challenge(&self) -> Option<&WordPair> {
        self.current_challenge.as_ref()
    }

    pub fn challenge_prompt(&self) -> Option<&str> {
        self.current_challenge.as_ref().map(|word| word.prompt.as_str())
    }

    pub fn remaining_words(&self) -> &[WordPair] {
        &self.remaining_words
    }

    pub fn remaining_lives(&self) -> u8 {
        self.remaining_lives
    }

    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    pub fn wrong_count(&self) -> u32 {
        self.wrong_count
    }

    pub fn unanswered_count(&self) -> u32 {
        self.unanswered_count
    }

    /// Starts emitting challenges, or latches the start until the word source
    /// responds.
    pub fn start_game(&mut self) -> Vec<Notification> {
        match self.state() {
            GameFsmState::Ready => {
                vec![Notification::StateChanged, Notification::NextChallenge]
            }
            GameFsmState::Loading => {
                self.starts_on_data_arrival = true;
                Vec::new()
            }
            GameFsmState::RoundEnded => {
                log::debug!("Received a StartGame after the round ended, waiting for a reset.");
                Vec::new()
            }
        }
    }

    /// Installs the vocabulary delivered by the word source and draws the
    /// initial challenge. An empty vocabulary keeps the game in `Loading`.
    pub fn on_words_loaded(&mut self, words: Vec<WordPair>) -> Result<Vec<Notification>, Error> {
        if words.is_empty() {
            log::error!("The word source delivered an empty vocabulary. The game cannot start.");
            return Ok(Vec::new());
        }

        self.process_event(&GameFsmInput::WordsLoaded)?;
        self.all_words = words;
        self.remaining_words = self.all_words.clone();
        self.current_challenge = None;
        self.draw_challenge();

        if self.starts_on_data_arrival {
            self.starts_on_data_arrival = false;
            Ok(vec![Notification::StateChanged, Notification::NextChallenge])
        } else {
            Ok(Vec::new())
        }
    }

    /// Picks the text to show next: a 2-in-5 chance of the true translation of
    /// the current challenge, otherwise the translation of another remaining
    /// word. With a drained pool only the true translation is left to show.
    pub fn next_challenge_text(&mut self) -> Result<String, Error> {
        let challenge = self
            .current_challenge
            .clone()
            .ok_or_else(|| self.no_challenge_in_play())?;

        if self.remaining_words.is_empty()
            || self.sampler.pick(Game::TRUE_MATCH_BOUND) == Game::TRUE_MATCH_SENTINEL
        {
            return Ok(challenge.target);
        }

        let index = self.sampler.pick(self.remaining_words.len());
        Ok(self.remaining_words[index].target.clone())
    }

    /// The player rejected the shown translation. A penalty only when the
    /// translation was a true match for the current challenge.
    pub fn submit_wrong(&mut self, shown_text: &str) -> Result<Vec<Notification>, Error> {
        if self.round_has_ended() {
            self.log_ignored_adjudication("SubmitWrong");
            return Ok(Vec::new());
        }
        let challenge = self
            .current_challenge
            .clone()
            .ok_or_else(|| self.no_challenge_in_play())?;
        self.discard(shown_text);

        let mut notifications = Vec::new();
        if challenge.target == shown_text {
            self.remaining_lives = self.remaining_lives.saturating_sub(1);
            self.wrong_count += 1;
            self.replace_challenge();
            notifications.push(Notification::StateChanged);
        }
        self.push_outcome(&mut notifications)?;
        Ok(notifications)
    }

    /// The player accepted the shown translation. A score when it was a true
    /// match, a penalty when it was a distractor.
    pub fn submit_correct(&mut self, shown_text: &str) -> Result<Vec<Notification>, Error> {
        if self.round_has_ended() {
            self.log_ignored_adjudication("SubmitCorrect");
            return Ok(Vec::new());
        }
        let challenge = self
            .current_challenge
            .clone()
            .ok_or_else(|| self.no_challenge_in_play())?;
        self.discard(shown_text);

        if challenge.target == shown_text {
            self.correct_count += 1;
            self.replace_challenge();
        } else {
            self.remaining_lives = self.remaining_lives.saturating_sub(1);
            self.wrong_count += 1;
        }

        let mut notifications = vec![Notification::StateChanged];
        self.push_outcome(&mut notifications)?;
        Ok(notifications)
    }

    /// The challenge expired without an answer. The challenge stays in play.
    pub fn timeout(&mut self) -> Result<Vec<Notification>, Error> {
        if self.round_has_ended() {
            self.log_ignored_adjudication("Timeout");
            return Ok(Vec::new());
        }
        if self.current_challenge.is_none() {
            return Err(self.no_challenge_in_play());
        }

        self.unanswered_count += 1;
        self.remaining_lives = self.remaining_lives.saturating_sub(1);

        let mut notifications = vec![Notification::StateChanged];
        self.push_outcome(&mut notifications)?;
        Ok(notifications)
    }

    /// Starts a new round over the full vocabulary.
    pub fn reset(&mut self) -> Result<Vec<Notification>, Error> {
        if self.all_words.is_empty() {
            return Err(Error::Domain(DomainError::VocabularyNotLoaded));
        }

        self.process_event(&GameFsmInput::NewRound)?;
        self.remaining_lives = self.starting_lives;
        self.correct_count = 0;
        self.wrong_count = 0;
        self.unanswered_count = 0;
        self.remaining_words = self.all_words.clone();
        self.draw_challenge();
        Ok(vec![Notification::StateChanged, Notification::NextChallenge])
    }

    fn round_has_ended(&self) -> bool {
        self.state() == &GameFsmState::RoundEnded
    }

    fn log_ignored_adjudication(&self, command: &str) {
        log::debug!("Ignoring a '{command}', the round has already ended.");
    }

    fn no_challenge_in_play(&self) -> Error {
        Error::Domain(DomainError::NoChallengeInPlay(self.state().clone()))
    }

    // Sets the challenge aside from the pool. The pool must not be empty.
    fn draw_challenge(&mut self) {
        debug_assert!(!self.remaining_words.is_empty());
        let index = self.sampler.pick(self.remaining_words.len());
        self.current_challenge = Some(self.remaining_words.remove(index));
    }

    // Draws the next challenge after a resolution, or clears it when the pool
    // has been drained.
    fn replace_challenge(&mut self) {
        if self.remaining_words.is_empty() {
            self.current_challenge = None;
        } else {
            self.draw_challenge();
        }
    }

    // Appends the closing notification: the next challenge while the round is
    // still on, the terminal one once the lives or the words ran out.
    fn push_outcome(&mut self, notifications: &mut Vec<Notification>) -> Result<(), Error> {
        if self.remaining_lives < 1 || self.current_challenge.is_none() {
            self.process_event(&GameFsmInput::RoundFinished)?;
            notifications.push(Notification::RoundEnded);
        } else {
            notifications.push(Notification::NextChallenge);
        }
        Ok(())
    }

    // Removes the pool entry whose translation was shown to the player.
    fn discard(&mut self, shown_text: &str) {
        if let Some(index) = self
            .remaining_words
            .iter()
            .position(|word| word.target == shown_text)
        {
            self.remaining_words.remove(index);
        }
    }

    fn process_event(&mut self, event: &GameFsmInput) -> Result<(), Error> {
        match self.fsm.consume(event) {
            Ok(_) => Ok(()),
            Err(error) => Err(Error::log_and_create_internal(&format!(
                "The fsm in state {:?} can't transition with an event {:?}. Error: '{error}'.",
                self.fsm.state(),
                event
            ))),
        }
    }
}
