use lazy_static::lazy_static;
use prometheus::{IntCounter, IntGauge, Registry};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();
    pub static ref ACTIVE_GAMES: IntGauge =
        IntGauge::new("fallingwords_active_games", "Active ongoing games")
            .expect("metric cannot be created");
    pub static ref FINISHED_ROUNDS: IntCounter = IntCounter::new(
        "fallingwords_finished_rounds",
        "Rounds played until the lives or the words ran out"
    )
    .expect("metric cannot be created");
}

pub fn register_metrics() {
    REGISTRY
        .register(Box::new(ACTIVE_GAMES.clone()))
        .expect("collector cannot be registered");

    REGISTRY
        .register(Box::new(FINISHED_ROUNDS.clone()))
        .expect("collector cannot be registered");
}

#[cfg(test)]
mod tests {
    use super::{register_metrics, REGISTRY};

    #[test]
    fn metrics_can_be_registered_and_gathered() {
        register_metrics();

        assert_eq!(REGISTRY.gather().len(), 2);
    }
}
