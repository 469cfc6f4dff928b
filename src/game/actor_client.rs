use tokio::sync::broadcast;
use tokio::sync::mpsc::Sender;
use tokio::sync::oneshot::{self, Receiver as OneshotReceiver, Sender as OneshotSender};

use crate::error::Error;
use crate::game::actor::{GameCommand, GameEvent};

#[derive(Clone, Debug)]
pub struct GameClient {
    game_tx: Sender<GameCommand>,
    broadcast_tx: broadcast::Sender<GameEvent>,
}

impl GameClient {
    pub(super) fn new(
        game_tx: Sender<GameCommand>,
        broadcast_tx: broadcast::Sender<GameEvent>,
    ) -> Self {
        GameClient {
            game_tx,
            broadcast_tx,
        }
    }

    /// Subscribes a presentation sink to the game notifications. Only events
    /// emitted after the subscription are delivered.
    pub fn subscribe(&self) -> GameEventReceiver {
        GameEventReceiver {
            broadcast_rx: self.broadcast_tx.subscribe(),
        }
    }

    pub async fn start_game(&self) -> Result<(), Error> {
        self.send(GameCommand::StartGame, "StartGame").await
    }

    pub async fn submit_correct(&self, text: &str) -> Result<(), Error> {
        self.send(
            GameCommand::SubmitCorrect {
                text: text.to_string(),
            },
            "SubmitCorrect",
        )
        .await
    }

    pub async fn submit_wrong(&self, text: &str) -> Result<(), Error> {
        self.send(
            GameCommand::SubmitWrong {
                text: text.to_string(),
            },
            "SubmitWrong",
        )
        .await
    }

    pub async fn timeout(&self) -> Result<(), Error> {
        self.send(GameCommand::Timeout, "Timeout").await
    }

    pub async fn reset(&self) -> Result<(), Error> {
        let (tx, rx): (
            OneshotSender<Result<(), Error>>,
            OneshotReceiver<Result<(), Error>>,
        ) = oneshot::channel();

        self.send(GameCommand::Reset { response_tx: tx }, "Reset")
            .await?;

        match rx.await {
            Ok(result) => result,
            Err(_) => Err(Error::log_and_create_internal(
                "Sent a GameCommand::Reset to the Game, but the Game channel died.",
            )),
        }
    }

    async fn send(&self, command: GameCommand, name: &str) -> Result<(), Error> {
        self.game_tx.send(command).await.map_err(|error| {
            Error::log_and_create_internal(&format!(
                "Tried to send GameCommand::{name} but the GameActor is not listening. Error: '{error}'."
            ))
        })
    }
}

pub struct GameEventReceiver {
    broadcast_rx: broadcast::Receiver<GameEvent>,
}

impl GameEventReceiver {
    pub async fn next(&mut self) -> Result<GameEvent, Error> {
        self.broadcast_rx.recv().await.map_err(|error| {
            Error::log_and_create_internal(&format!(
                "The broadcast channel with the Game has been closed. Error: '{error}'."
            ))
        })
    }
}
