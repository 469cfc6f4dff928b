use tokio::sync::oneshot::error::RecvError;
use tokio::sync::oneshot::{Receiver as OneshotReceiver, Sender as OneshotSender};
use tokio::sync::{
    broadcast, mpsc,
    mpsc::{Receiver, Sender},
};

use crate::config::GameSettings;
use crate::error::Error;
use crate::game::actor_client::GameClient;
use crate::game::game_fsm::GameFsmState;
use crate::game::{Game, Notification};
use crate::metrics::{ACTIVE_GAMES, FINISHED_ROUNDS};
use crate::words_repo::{WordsRepo, WordsResult};

/// Owns the [`Game`] and serializes every operation on it: commands arrive on
/// an mpsc channel, notifications leave on a broadcast channel, and the word
/// source responds on a single-shot channel that may resolve before or after
/// the StartGame command.
pub struct GameActor {
    game: Game,
    game_rx: Receiver<GameCommand>,
    broadcast_tx: broadcast::Sender<GameEvent>,
}

impl GameActor {
    pub fn spawn(settings: &GameSettings, words_repo: &dyn WordsRepo) -> GameClient {
        let game = Game::new(settings.starting_lives);
        let (game_tx, game_rx): (Sender<GameCommand>, Receiver<GameCommand>) =
            mpsc::channel(settings.command_channel_capacity);
        let (broadcast_tx, _): (
            broadcast::Sender<GameEvent>,
            broadcast::Receiver<GameEvent>,
        ) = broadcast::channel(settings.event_channel_capacity);
        let words_rx = words_repo.fetch_words();

        tokio::spawn(
            GameActor {
                game,
                game_rx,
                broadcast_tx: broadcast_tx.clone(),
            }
            .start(words_rx),
        );

        GameClient::new(game_tx, broadcast_tx)
    }

    async fn start(mut self, words_rx: OneshotReceiver<WordsResult>) {
        ACTIVE_GAMES.inc();

        let mut pending_fetch = Some(words_rx);

        loop {
            match pending_fetch.as_mut() {
                Some(fetch) => {
                    tokio::select! {
                        response = fetch => {
                            pending_fetch = None;
                            self.handle_words_response(response);
                        }
                        command = self.game_rx.recv() => {
                            if self.handle_command_or_stop(command) {
                                break;
                            }
                        }
                    }
                }
                None => {
                    let command = self.game_rx.recv().await;
                    if self.handle_command_or_stop(command) {
                        break;
                    }
                }
            }
        }

        ACTIVE_GAMES.dec();
    }

    fn handle_words_response(&mut self, response: Result<WordsResult, RecvError>) {
        // A failed fetch degrades to an empty vocabulary: the game stays in
        // Loading and no error crosses the notification interface.
        let words = match response {
            Ok(Ok(words)) => words,
            Ok(Err(error)) => {
                log::error!("The word source failed, continuing with an empty vocabulary. Error: '{error}'.");
                Vec::new()
            }
            Err(error) => {
                log::error!("The word source dropped its response channel, continuing with an empty vocabulary. Error: '{error}'.");
                Vec::new()
            }
        };

        match self.game.on_words_loaded(words) {
            Ok(notifications) => self.publish(notifications),
            Err(error) => log::error!("Could not apply the loaded words. Error: '{error}'."),
        }
    }

    // Returns true when the command channel has been dropped.
    fn handle_command_or_stop(&mut self, command: Option<GameCommand>) -> bool {
        match command {
            None => {
                log::info!("Game channel has been dropped. Stopping game actor.");
                true
            }
            Some(command) => {
                self.handle_command(command);
                false
            }
        }
    }

    fn handle_command(&mut self, command: GameCommand) {
        let result = match command {
            GameCommand::StartGame => Ok(self.game.start_game()),
            GameCommand::SubmitCorrect { text } => self.game.submit_correct(&text),
            GameCommand::SubmitWrong { text } => self.game.submit_wrong(&text),
            GameCommand::Timeout => self.game.timeout(),
            GameCommand::Reset { response_tx } => {
                let result = self.game.reset();
                let response = result.as_ref().map(|_| ()).map_err(Clone::clone);
                if response_tx.send(response).is_err() {
                    log::debug!("The reset requester went away before the response was sent.");
                }
                result
            }
        };

        match result {
            Ok(notifications) => self.publish(notifications),
            Err(error) => log::error!("Could not process the game command. Error: '{error}'."),
        }
    }

    fn publish(&mut self, notifications: Vec<Notification>) {
        for notification in notifications {
            let event = match notification {
                Notification::StateChanged => GameEvent::StateChanged {
                    state: self.snapshot(),
                },
                Notification::RoundEnded => {
                    FINISHED_ROUNDS.inc();
                    GameEvent::RoundEnded {
                        state: self.snapshot(),
                    }
                }
                Notification::NextChallenge => match self.game.next_challenge_text() {
                    Ok(text) => GameEvent::NextChallenge { text },
                    Err(error) => {
                        log::error!("Could not pick the next challenge text. Error: '{error}'.");
                        continue;
                    }
                },
            };

            if self.broadcast_tx.send(event).is_err() {
                log::debug!("No presentation sink is subscribed, dropping the game event.");
            }
        }
    }

    fn snapshot(&self) -> GameState {
        GameState {
            state: self.game.state().clone(),
            challenge_prompt: self.game.challenge_prompt().map(str::to_string),
            remaining_lives: self.game.remaining_lives(),
            correct_count: self.game.correct_count(),
            wrong_count: self.game.wrong_count(),
            unanswered_count: self.game.unanswered_count(),
        }
    }
}

#[derive(Debug)]
pub enum GameCommand {
    StartGame,
    SubmitCorrect {
        text: String,
    },
    SubmitWrong {
        text: String,
    },
    Timeout,
    Reset {
        response_tx: OneshotSender<Result<(), Error>>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    StateChanged { state: GameState },
    NextChallenge { text: String },
    RoundEnded { state: GameState },
}

/// Snapshot of the round shipped to the presentation sink.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub state: GameFsmState,
    pub challenge_prompt: Option<String>,
    pub remaining_lives: u8,
    pub correct_count: u32,
    pub wrong_count: u32,
    pub unanswered_count: u32,
}
