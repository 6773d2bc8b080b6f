// Error types. Every variant states *where* things went wrong.
use thiserror::Error;

/// Window failures. These are the only fatal errors; they bubble up to `main`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("window init error: {0}")]
    WindowInit(String), // Creating the window failed
    #[error("window update error: {0}")]
    WindowUpdate(String), // Updating the window buffer failed
}

/// Why a joke fetch failed. Never fatal: the card turns it into a toast.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("joke service returned status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("joke service reported an error: {0}")]
    Api(String),
    #[error("could not decode joke response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("joke response has no `joke` field")]
    MissingJoke,
}
