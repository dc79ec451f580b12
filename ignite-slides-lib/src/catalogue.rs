use std::time::Duration;

use serde::Deserialize;

use crate::error::FetchError;

const API_URL: &str = "https://api-v2.ignite.microsoft.com/api/session/all/en-US";

/// The Medius CDN rejects requests without browser-looking headers with
/// HTTP 403, so every deck download carries these.
pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub(crate) const WEB_ORIGIN: &str = "https://ignite.microsoft.com/";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One catalogue entry describing a conference talk.
///
/// The API returns many more fields; only the ones this tool consumes are
/// modeled, the rest are ignored during deserialization.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SessionRecord {
    #[serde(default, rename = "sessionCode")]
    pub session_code: String,

    #[serde(default)]
    pub title: String,

    /// Absolute URL of the PowerPoint deck, when the session provides one.
    #[serde(default, rename = "slideDeck")]
    pub slide_deck: Option<String>,
}

impl SessionRecord {
    /// True when the session exposes a non-empty slide deck URL.
    pub fn has_deck(&self) -> bool {
        self.slide_deck.as_deref().is_some_and(|u| !u.is_empty())
    }
}

/// HTTP client for the Ignite session catalogue and the deck CDN.
pub struct CatalogueClient {
    http: reqwest::Client,
    endpoint: String,
}

impl CatalogueClient {
    /// Create a client against the public Ignite catalogue endpoint.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_endpoint(API_URL)
    }

    /// Create a client against a custom catalogue endpoint. Tests point
    /// this at a local mock server.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// Fetch the full session list.
    ///
    /// The catalogue is the unit of work; any failure here is fatal to the
    /// run and is propagated to the caller.
    pub async fn fetch_sessions(&self) -> Result<Vec<SessionRecord>, FetchError> {
        let resp = self.http.get(&self.endpoint).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let text = resp.text().await?;
        let sessions: Vec<SessionRecord> = serde_json::from_str(&text)?;
        Ok(sessions)
    }

    /// GET a deck URL with the browser headers the CDN requires.
    pub(crate) async fn get_deck(&self, url: &str) -> Result<reqwest::Response, reqwest::Error> {
        self.http
            .get(url)
            .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
            .header(reqwest::header::REFERER, WEB_ORIGIN)
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_has_deck() {
        let mut session = SessionRecord::default();
        assert!(!session.has_deck());

        session.slide_deck = Some(String::new());
        assert!(!session.has_deck());

        session.slide_deck = Some("https://medius.example/deck.pptx".to_string());
        assert!(session.has_deck());
    }

    #[tokio::test]
    async fn test_fetch_sessions_ignores_unknown_fields() {
        let server = MockServer::start().await;
        let body = serde_json::json!([
            {
                "sessionCode": "BRK241",
                "title": "Intro to Azure",
                "slideDeck": "https://medius.example/brk241.pptx",
                "speakers": ["someone"],
                "durationInMinutes": 45
            },
            {
                "title": "Untracked session"
            }
        ]);
        Mock::given(method("GET"))
            .and(path("/catalogue"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let client = CatalogueClient::with_endpoint(format!("{}/catalogue", server.uri())).unwrap();
        let sessions = client.fetch_sessions().await.unwrap();

        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].session_code, "BRK241");
        assert!(sessions[0].has_deck());
        assert_eq!(sessions[1].session_code, "");
        assert!(!sessions[1].has_deck());
    }

    #[tokio::test]
    async fn test_fetch_sessions_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/catalogue"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = CatalogueClient::with_endpoint(format!("{}/catalogue", server.uri())).unwrap();
        let err = client.fetch_sessions().await.unwrap_err();
        assert!(matches!(err, FetchError::Status(503)));
    }

    #[tokio::test]
    async fn test_fetch_sessions_unparsable_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/catalogue"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = CatalogueClient::with_endpoint(format!("{}/catalogue", server.uri())).unwrap();
        let err = client.fetch_sessions().await.unwrap_err();
        assert!(matches!(err, FetchError::Json(_)));
    }
}
