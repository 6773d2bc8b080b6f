// Joke fetching. The HTTP call runs on the tokio runtime; outcomes come back to the
// window loop through a channel so a slow network never freezes the card.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tokio::runtime::Handle;

use crate::error::FetchError;

/// Single-line programming jokes only.
pub const DEFAULT_ENDPOINT: &str = "https://v2.jokeapi.dev/joke/Programming?type=single";

/// Anything that can produce one joke per call.
#[async_trait]
pub trait JokeSource: Send + Sync {
    async fn fetch_joke(&self) -> Result<String, FetchError>;
}

/// JokeAPI over HTTP. One GET per call, no retries, no timeout.
#[derive(Clone)]
pub struct JokeApi {
    client: Client,
    endpoint: String,
}

impl JokeApi {
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { client: Client::new(), endpoint: endpoint.into() }
    }
}

#[async_trait]
impl JokeSource for JokeApi {
    async fn fetch_joke(&self) -> Result<String, FetchError> {
        let response = self.client.get(&self.endpoint).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status()));
        }
        let body = response.text().await?;
        parse_joke(&body)
    }
}

#[derive(Debug, Deserialize)]
struct JokeResponse {
    #[serde(default)]
    error: bool,
    joke: Option<String>,
    message: Option<String>,
}

/// Pull the `joke` string out of a JokeAPI body.
pub fn parse_joke(body: &str) -> Result<String, FetchError> {
    let parsed: JokeResponse = serde_json::from_str(body)?;
    if parsed.error {
        return Err(FetchError::Api(
            parsed.message.unwrap_or_else(|| "unknown error".to_string()),
        ));
    }
    parsed.joke.ok_or(FetchError::MissingJoke)
}

/// Identifies one fetch request; later requests get larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FetchTicket(pub u64);

#[derive(Debug)]
pub struct FetchOutcome {
    pub ticket: FetchTicket,
    pub result: Result<String, FetchError>,
}

/// Bridges the async source and the single-threaded window loop.
pub struct JokeLoader {
    runtime: Handle,
    source: Arc<dyn JokeSource>,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
}

impl JokeLoader {
    pub fn new(runtime: Handle, source: Arc<dyn JokeSource>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { runtime, source, tx, rx }
    }

    /// Start a fetch in the background. Earlier fetches are not cancelled.
    pub fn request(&self, ticket: FetchTicket) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = source.fetch_joke().await;
            if tx.send(FetchOutcome { ticket, result }).is_err() {
                log::debug!("fetch {ticket:?} finished after the card went away");
            }
        });
    }

    /// Next finished fetch, if any. Never blocks.
    pub fn poll(&self) -> Option<FetchOutcome> {
        self.rx.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct Canned(&'static str);

    #[async_trait]
    impl JokeSource for Canned {
        async fn fetch_joke(&self) -> Result<String, FetchError> {
            parse_joke(self.0)
        }
    }

    #[test]
    fn parses_single_joke() {
        let body = r#"{"error":false,"category":"Programming","type":"single",
            "joke":"There are 10 kinds of people.","id":1,"safe":true,"lang":"en"}"#;
        assert_eq!(parse_joke(body).unwrap(), "There are 10 kinds of people.");
    }

    #[test]
    fn api_error_body_is_an_error() {
        let body = r#"{"error":true,"message":"No matching joke found"}"#;
        match parse_joke(body) {
            Err(FetchError::Api(msg)) => assert_eq!(msg, "No matching joke found"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn missing_joke_field_is_an_error() {
        let body = r#"{"error":false,"setup":"a","delivery":"b"}"#;
        assert!(matches!(parse_joke(body), Err(FetchError::MissingJoke)));
    }

    #[test]
    fn non_string_joke_or_garbage_is_a_decode_error() {
        assert!(matches!(parse_joke(r#"{"joke":42}"#), Err(FetchError::Decode(_))));
        assert!(matches!(parse_joke("<html>"), Err(FetchError::Decode(_))));
    }

    #[tokio::test]
    async fn source_trait_object_is_usable() {
        let source: Arc<dyn JokeSource> = Arc::new(Canned(r#"{"joke":"hi"}"#));
        assert_eq!(source.fetch_joke().await.unwrap(), "hi");
    }

    #[test]
    fn loader_delivers_outcome_with_its_ticket() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let loader = JokeLoader::new(rt.handle().clone(), Arc::new(Canned(r#"{"joke":"ok"}"#)));
        assert!(loader.poll().is_none());

        loader.request(FetchTicket(3));
        let outcome = loader.rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(outcome.ticket, FetchTicket(3));
        assert_eq!(outcome.result.unwrap(), "ok");
    }

    #[test]
    fn loader_reports_failures_too() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let loader = JokeLoader::new(rt.handle().clone(), Arc::new(Canned("nope")));
        loader.request(FetchTicket(1));
        let outcome = loader.rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(outcome.result.is_err());
    }
}
