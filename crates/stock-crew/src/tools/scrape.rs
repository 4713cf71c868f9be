//! Visible-text scraping of web pages

use agent_core::Result as AgentResult;
use agent_llm::tools::schema;
use agent_tools::{Tool, parse_params};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Node};
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::SCRAPE_WEBSITE;
use crate::error::{Result, StockError};

const USER_AGENT: &str = "Mozilla/5.0 (compatible; stock-crew/0.1)";

/// Elements whose text never reaches the reader
const HIDDEN_ELEMENTS: [&str; 6] = ["head", "script", "style", "noscript", "svg", "template"];

/// Visible text of an HTML document, whitespace collapsed
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut words = Vec::new();
    for node in document.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if !hidden {
            words.extend(text.split_whitespace());
        }
    }
    words.join(" ")
}

/// Cut to at most `max_chars` characters; true when something was dropped
fn truncate(text: &str, max_chars: usize) -> (String, bool) {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => (text[..end].to_string(), true),
        None => (text.to_string(), false),
    }
}

/// Fetches a page and returns its readable text
pub struct ScrapeTool {
    client: Client,
    max_chars: usize,
}

#[derive(Debug, Deserialize)]
struct ScrapeParams {
    #[serde(alias = "website_url")]
    url: String,
}

impl ScrapeTool {
    pub fn new(timeout: Duration, max_chars: usize) -> Result<Self> {
        Ok(Self {
            client: Client::builder().user_agent(USER_AGENT).timeout(timeout).build()?,
            max_chars,
        })
    }

    async fn scrape(&self, url: &str) -> Result<(String, bool)> {
        let url = Url::parse(url).map_err(|e| StockError::ApiError(format!("invalid URL '{url}': {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(StockError::ApiError(format!("unsupported scheme '{}'", url.scheme())));
        }

        let response = self.client.get(url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(StockError::ApiError(format!("HTTP {} from {url}", response.status())));
        }
        let body = response.text().await?;
        let text = visible_text(&body);
        debug!(%url, chars = text.len(), "scraped page");
        Ok(truncate(&text, self.max_chars))
    }
}

#[async_trait]
impl Tool for ScrapeTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let params: ScrapeParams = parse_params(SCRAPE_WEBSITE, params)?;

        match self.scrape(&params.url).await {
            Ok((content, truncated)) => Ok(json!({
                "url": params.url,
                "content": content,
                "truncated": truncated,
            })),
            Err(e) => {
                warn!(url = %params.url, error = %e, "scrape failed");
                Ok(Value::String(format!("Error scraping {}: {e}", params.url)))
            }
        }
    }

    fn name(&self) -> &str {
        SCRAPE_WEBSITE
    }

    fn description(&self) -> &str {
        "Reads a web page and returns its visible text content. Input: url."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({ "url": schema::string("Absolute http(s) URL of the page") }),
            &["url"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_text() {
        let html = r#"<html><head><title>T</title><style>p{color:red}</style></head>
            <body><!-- nav --><script>var x = "<b>";</script>
            <h1>Tata&nbsp;Motors</h1><p>Q4 profit &amp; revenue   up</p></body></html>"#;
        assert_eq!(visible_text(html), "Tata Motors Q4 profit & revenue up");
    }

    #[test]
    fn test_entities_are_decoded() {
        let html = "<p>Tata&#8217;s Q4 &mdash; profit &euro;5 &#x27;up&#x27;</p>";
        assert_eq!(visible_text(html), "Tata\u{2019}s Q4 \u{2014} profit \u{20ac}5 'up'");
    }

    #[test]
    fn test_noscript_is_hidden() {
        let html = "<body><noscript>Enable JavaScript</noscript><div>Results <b>beat</b></div></body>";
        assert_eq!(visible_text(html), "Results beat");
    }

    #[test]
    fn test_truncate_on_char_boundary() {
        assert_eq!(truncate("héllo", 2), ("hé".to_string(), true));
        assert_eq!(truncate("abc", 3), ("abc".to_string(), false));
    }

    #[tokio::test]
    async fn test_bad_url_is_reported_not_raised() {
        let tool = ScrapeTool::new(Duration::from_secs(1), 100).unwrap();
        let result = tool.execute(json!({"url": "ftp://example.com"})).await.unwrap();
        assert!(result.as_str().unwrap().starts_with("Error scraping ftp://example.com"));

        assert!(tool.execute(json!({})).await.is_err());
    }
}
