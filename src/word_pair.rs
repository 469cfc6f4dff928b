use serde::Deserialize;

/// A prompt/translation vocabulary pair.
///
/// The serde names match the persisted word list format, where the prompt is
/// stored as `text_eng` and the translation to judge as `text_spa`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct WordPair {
    #[serde(rename = "text_eng")]
    pub prompt: String,
    #[serde(rename = "text_spa")]
    pub target: String,
}

impl WordPair {
    pub fn new(prompt: &str, target: &str) -> Self {
        WordPair {
            prompt: prompt.to_string(),
            target: target.to_string(),
        }
    }
}
