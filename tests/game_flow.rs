mod helpers;

use std::time::Duration;

use tokio::time;

use fallingwords::error::domain_error::DomainError;
use fallingwords::error::external_error::ExternalError;
use fallingwords::error::Error;
use fallingwords::game::actor::GameEvent;
use fallingwords::game::actor_client::GameEventReceiver;
use fallingwords::game::game_fsm::GameFsmState;

use crate::helpers::{expect_no_event, next_event, spawn_game, words, StubWordsRepo};

#[tokio::test]
async fn the_game_starts_once_the_words_arrive() {
    let repo = StubWordsRepo::with_delay(Ok(words()), Duration::from_millis(100));
    let (client, mut events) = spawn_game(&repo);

    client.start_game().await.unwrap();

    let state = expect_state_changed(&mut events).await;
    assert_eq!(state.state, GameFsmState::Ready);
    assert_eq!(state.remaining_lives, 5);
    assert!(state.challenge_prompt.is_some());

    let text = expect_next_challenge(&mut events).await;
    assert!(words().iter().any(|word| word.target == text));
}

#[tokio::test]
async fn the_game_starts_immediately_when_the_words_are_already_loaded() {
    let repo = StubWordsRepo::new(Ok(words()));
    let (client, mut events) = spawn_game(&repo);
    // let the fetch resolve before starting
    time::sleep(Duration::from_millis(50)).await;

    client.start_game().await.unwrap();

    let state = expect_state_changed(&mut events).await;
    assert_eq!(state.state, GameFsmState::Ready);
    expect_next_challenge(&mut events).await;
}

#[tokio::test]
async fn the_round_ends_when_the_lives_run_out() {
    let repo = StubWordsRepo::new(Ok(words()));
    let (client, mut events) = spawn_game(&repo);
    client.start_game().await.unwrap();
    expect_state_changed(&mut events).await;
    expect_next_challenge(&mut events).await;

    for lost in 1..=4 {
        client.timeout().await.unwrap();
        let state = expect_state_changed(&mut events).await;
        assert_eq!(state.remaining_lives, 5 - lost);
        expect_next_challenge(&mut events).await;
    }

    client.timeout().await.unwrap();
    let state = expect_state_changed(&mut events).await;
    assert_eq!(state.remaining_lives, 0);
    assert_eq!(state.unanswered_count, 5);
    match next_event(&mut events).await {
        GameEvent::RoundEnded { state } => assert_eq!(state.state, GameFsmState::RoundEnded),
        event => panic!("Expected a RoundEnded event, got '{:?}'.", event),
    }
    expect_no_event(&mut events).await;

    // a late timer expiry from the sink is ignored
    client.timeout().await.unwrap();
    expect_no_event(&mut events).await;
}

#[tokio::test]
async fn reset_starts_a_new_round_after_the_round_ended() {
    let repo = StubWordsRepo::new(Ok(words()));
    let (client, mut events) = spawn_game(&repo);
    client.start_game().await.unwrap();
    expect_state_changed(&mut events).await;
    expect_next_challenge(&mut events).await;
    for _ in 0..5 {
        client.timeout().await.unwrap();
    }
    drain_until_round_ended(&mut events).await;

    client.reset().await.unwrap();

    let state = expect_state_changed(&mut events).await;
    assert_eq!(state.state, GameFsmState::Ready);
    assert_eq!(state.remaining_lives, 5);
    assert_eq!(state.unanswered_count, 0);
    expect_next_challenge(&mut events).await;
}

#[tokio::test]
async fn a_perfect_player_drains_the_pool_without_losing_lives() {
    let repo = StubWordsRepo::new(Ok(words()));
    let (client, mut events) = spawn_game(&repo);
    client.start_game().await.unwrap();
    let mut state = expect_state_changed(&mut events).await;

    loop {
        match next_event(&mut events).await {
            GameEvent::NextChallenge { text } => {
                let shown = words()
                    .into_iter()
                    .find(|word| word.target == text)
                    .expect("the shown text always comes from the vocabulary");
                if Some(shown.prompt.as_str()) == state.challenge_prompt.as_deref() {
                    client.submit_correct(&text).await.unwrap();
                } else {
                    client.submit_wrong(&text).await.unwrap();
                }
            }
            GameEvent::StateChanged { state: new_state } => {
                assert_eq!(new_state.remaining_lives, 5);
                assert_eq!(new_state.wrong_count, 0);
                state = new_state;
            }
            GameEvent::RoundEnded { state } => {
                assert_eq!(state.remaining_lives, 5);
                assert!(state.correct_count >= 1);
                break;
            }
        }
    }
}

#[tokio::test]
async fn a_failed_fetch_leaves_the_game_unstartable() {
    let repo = StubWordsRepo::new(Err(ExternalError::WordListUnavailable(
        "the word list is gone".to_string(),
    )));
    let (client, mut events) = spawn_game(&repo);

    client.start_game().await.unwrap();

    expect_no_event(&mut events).await;
    assert_eq!(
        client.reset().await,
        Err(Error::Domain(DomainError::VocabularyNotLoaded))
    );
}

async fn expect_state_changed(events: &mut GameEventReceiver) -> fallingwords::game::actor::GameState {
    match next_event(events).await {
        GameEvent::StateChanged { state } => state,
        event => panic!("Expected a StateChanged event, got '{:?}'.", event),
    }
}

async fn expect_next_challenge(events: &mut GameEventReceiver) -> String {
    match next_event(events).await {
        GameEvent::NextChallenge { text } => text,
        event => panic!("Expected a NextChallenge event, got '{:?}'.", event),
    }
}

async fn drain_until_round_ended(events: &mut GameEventReceiver) {
    loop {
        if let GameEvent::RoundEnded { .. } = next_event(events).await {
            return;
        }
    }
}
