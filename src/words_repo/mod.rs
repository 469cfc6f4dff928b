use std::path::{Path, PathBuf};

use tokio::sync::oneshot;
use tokio::sync::oneshot::Receiver as OneshotReceiver;

use crate::error::external_error::ExternalError;
use crate::word_pair::WordPair;

pub type WordsResult = Result<Vec<WordPair>, ExternalError>;

/// The word source boundary: supplies the full vocabulary, exactly one
/// response per call.
pub trait WordsRepo: Send + Sync {
    fn fetch_words(&self) -> OneshotReceiver<WordsResult>;
}

/// Reads the vocabulary from a bundled JSON word list, an array of records
/// with `text_eng`/`text_spa` fields.
pub struct JsonFileWordsRepo {
    path: PathBuf,
}

impl JsonFileWordsRepo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileWordsRepo { path: path.into() }
    }

    async fn load(path: &Path) -> WordsResult {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|error| ExternalError::WordListUnavailable(error.to_string()))?;
        serde_json::from_str(&contents)
            .map_err(|error| ExternalError::UnprocessableWordList(error.to_string()))
    }
}

impl WordsRepo for JsonFileWordsRepo {
    fn fetch_words(&self) -> OneshotReceiver<WordsResult> {
        let (tx, rx) = oneshot::channel();
        let path = self.path.clone();

        tokio::spawn(async move {
            if tx.send(JsonFileWordsRepo::load(&path).await).is_err() {
                log::debug!("The game went away before the word list fetch finished.");
            }
        });

        rx
    }
}
