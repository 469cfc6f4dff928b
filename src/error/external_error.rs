use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ExternalError {
    #[error("The word list could not be read. Error: '{0}'.")]
    WordListUnavailable(String),
    #[error("Received a bad formatted word list. Error: '{0}'.")]
    UnprocessableWordList(String),
}
