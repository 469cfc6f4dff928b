use std::sync::Mutex;
use std::time::Duration;

use once_cell::sync::Lazy;
use tokio::sync::oneshot;
use tokio::sync::oneshot::Receiver as OneshotReceiver;
use tokio::time;

use fallingwords::config::GameSettings;
use fallingwords::game::actor::{GameActor, GameEvent};
use fallingwords::game::actor_client::{GameClient, GameEventReceiver};
use fallingwords::word_pair::WordPair;
use fallingwords::words_repo::{WordsRepo, WordsResult};

static LOGGER: Lazy<()> = Lazy::new(|| {
    std_logger::Config::logfmt().init();
});

pub fn words() -> Vec<WordPair> {
    vec![
        WordPair::new("primary school", "escuela primaria"),
        WordPair::new("teacher", "profesor / profesora"),
        WordPair::new("pupil", "alumno / alumna"),
        WordPair::new("holidays", "vacaciones"),
        WordPair::new("class", "curso"),
        WordPair::new("bell", "timbre"),
    ]
}

/// Word source double serving a single canned response, optionally delayed.
pub struct StubWordsRepo {
    response: Mutex<Option<WordsResult>>,
    delay: Duration,
}

impl StubWordsRepo {
    pub fn new(response: WordsResult) -> Self {
        StubWordsRepo::with_delay(response, Duration::ZERO)
    }

    pub fn with_delay(response: WordsResult, delay: Duration) -> Self {
        StubWordsRepo {
            response: Mutex::new(Some(response)),
            delay,
        }
    }
}

impl WordsRepo for StubWordsRepo {
    fn fetch_words(&self) -> OneshotReceiver<WordsResult> {
        let (tx, rx) = oneshot::channel();
        let response = self
            .response
            .lock()
            .unwrap()
            .take()
            .expect("the stub words repo only serves one fetch");
        let delay = self.delay;

        tokio::spawn(async move {
            time::sleep(delay).await;
            let _ = tx.send(response);
        });

        rx
    }
}

pub fn spawn_game(words_repo: &dyn WordsRepo) -> (GameClient, GameEventReceiver) {
    Lazy::force(&LOGGER);
    let client = GameActor::spawn(&GameSettings::default(), words_repo);
    let events = client.subscribe();
    (client, events)
}

pub async fn next_event(events: &mut GameEventReceiver) -> GameEvent {
    time::timeout(Duration::from_secs(5), events.next())
        .await
        .expect("Timed out while waiting for a game event.")
        .expect("The game event channel was closed.")
}

pub async fn expect_no_event(events: &mut GameEventReceiver) {
    let result = time::timeout(Duration::from_millis(200), events.next()).await;
    assert!(
        result.is_err(),
        "Expected no game event, got '{:?}'.",
        result
    );
}
