// src/crawl/page.rs
// =============================================================================
// One unit of crawl work: wait a random moment, GET the page, extract the
// question title.
//
// The outcome keeps the reason a title is missing (page had no match vs.
// request failed) so callers and tests can tell them apart, even though both
// end up as an empty cell in the output file.
// =============================================================================

use std::time::Duration;

use rand::Rng;
use reqwest::Client;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::extract::ExtractionChain;

/// What happened to one page URL.
#[derive(Debug)]
pub enum FieldOutcome {
    /// The extraction chain matched and produced text
    Extracted(String),
    /// The page loaded but the chain found nothing
    NotFound,
    /// The request failed or returned a non-2xx status
    Failed(FetchError),
}

impl FieldOutcome {
    /// The value written to the `question` column.
    pub fn question(&self) -> Option<&str> {
        match self {
            FieldOutcome::Extracted(text) => Some(text),
            FieldOutcome::NotFound | FieldOutcome::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FieldOutcome::Failed(_))
    }
}

/// Uniformly random pause before each page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jitter {
    pub min: Duration,
    pub max: Duration,
}

impl Jitter {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    /// No pause at all
    #[cfg(test)]
    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Draws a delay in `[min, max]`.
    pub fn sample(&self) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        let secs = rand::thread_rng().gen_range(self.min.as_secs_f64()..=self.max.as_secs_f64());
        Duration::from_secs_f64(secs)
    }
}

impl Default for Jitter {
    fn default() -> Self {
        Self::new(Duration::from_millis(500), Duration::from_millis(1500))
    }
}

/// Sleeps for a jittered delay, fetches `url` once and runs `chain` on the body.
///
/// Never fails: request errors and non-2xx statuses are logged and returned
/// as [`FieldOutcome::Failed`].
pub async fn fetch_field(client: &Client, url: &str, jitter: Jitter, chain: &ExtractionChain) -> FieldOutcome {
    let delay = jitter.sample();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    match fetch_html(client, url).await {
        Ok(html) => match chain.extract(&html) {
            Some(text) if !text.is_empty() => FieldOutcome::Extracted(text),
            _ => {
                debug!(url, "no question found on page");
                FieldOutcome::NotFound
            }
        },
        Err(e) => {
            warn!(status = ?e.status(), "Error crawling URL {}: {}", url, e);
            FieldOutcome::Failed(e)
        }
    }
}

// Fetches a page and returns its body, treating non-2xx as an error
async fn fetch_html(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    Ok(response.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Instant;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

    const PAGE: &str = r#"<div class="qa-main-heading"><h1><a href="/q/1">
        <span itemprop="name">What is a monad?</span></a></h1></div>"#;

    #[test]
    fn test_jitter_stays_in_range() {
        let jitter = Jitter::default();
        for _ in 0..200 {
            let d = jitter.sample();
            assert!(d >= Duration::from_millis(500) && d <= Duration::from_millis(1500), "{d:?}");
        }
    }

    #[test]
    fn test_degenerate_jitter() {
        assert_eq!(Jitter::none().sample(), Duration::ZERO);
        let fixed = Jitter::new(Duration::from_millis(20), Duration::from_millis(20));
        assert_eq!(fixed.sample(), Duration::from_millis(20));
    }

    #[test]
    fn test_outcome_question() {
        assert_eq!(FieldOutcome::Extracted("q".into()).question(), Some("q"));
        assert_eq!(FieldOutcome::NotFound.question(), None);
        let failed = FieldOutcome::Failed(FetchError::Join("boom".into()));
        assert_eq!(failed.question(), None);
        assert!(failed.is_failed());
    }

    #[tokio::test]
    async fn test_fetch_extracts_question() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/q/1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
            .mount(&server)
            .await;

        let url = format!("{}/q/1", server.uri());
        let outcome = fetch_field(&Client::new(), &url, Jitter::none(), &ExtractionChain::default()).await;
        assert_eq!(outcome.question(), Some("What is a monad?"));
    }

    #[tokio::test]
    async fn test_page_without_chain_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>redesigned</body></html>"))
            .mount(&server)
            .await;

        let url = format!("{}/q/2", server.uri());
        let outcome = fetch_field(&Client::new(), &url, Jitter::none(), &ExtractionChain::default()).await;
        assert!(matches!(outcome, FieldOutcome::NotFound));
    }

    // Remembers when the request reached the server
    struct ArrivedAt(Arc<Mutex<Option<Instant>>>);

    impl Respond for ArrivedAt {
        fn respond(&self, _request: &Request) -> ResponseTemplate {
            *self.0.lock().unwrap() = Some(Instant::now());
            ResponseTemplate::new(200).set_body_string(PAGE)
        }
    }

    #[tokio::test]
    async fn test_pause_happens_before_request() {
        let server = MockServer::start().await;
        let arrived = Arc::new(Mutex::new(None));
        Mock::given(method("GET"))
            .respond_with(ArrivedAt(Arc::clone(&arrived)))
            .mount(&server)
            .await;

        let pause = Duration::from_millis(150);
        let url = format!("{}/q/4", server.uri());
        let started = Instant::now();
        let outcome = fetch_field(&Client::new(), &url, Jitter::new(pause, pause), &ExtractionChain::default()).await;

        assert_eq!(outcome.question(), Some("What is a monad?"));
        let arrived = arrived.lock().unwrap().expect("request never arrived");
        assert!(arrived - started >= pause, "request sent after {:?}", arrived - started);
    }

    #[tokio::test]
    async fn test_server_error_is_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string(PAGE))
            .mount(&server)
            .await;

        let url = format!("{}/q/3", server.uri());
        let outcome = fetch_field(&Client::new(), &url, Jitter::none(), &ExtractionChain::default()).await;
        match outcome {
            FieldOutcome::Failed(e) => assert_eq!(e.status().map(|s| s.as_u16()), Some(500)),
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
