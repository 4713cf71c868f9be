//! Keyword sentiment scoring over news articles

use agent_core::{Error, Result as AgentResult};
use agent_llm::tools::schema;
use agent_tools::{Tool, parse_params};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use super::ANALYZE_SENTIMENT;
use crate::model::{NewsItem, ScoredArticle, SentimentReport};

pub const POSITIVE_KEYWORDS: [&str; 17] = [
    "buy",
    "strong",
    "growth",
    "positive",
    "outperform",
    "upgrade",
    "bullish",
    "profit",
    "gain",
    "beat",
    "raise",
    "strong buy",
    "overweight",
    "earnings beat",
    "revenue growth",
    "profitability",
    "innovation",
];

pub const NEGATIVE_KEYWORDS: [&str; 18] = [
    "sell",
    "weak",
    "decline",
    "negative",
    "underperform",
    "downgrade",
    "bearish",
    "loss",
    "drop",
    "miss",
    "cut",
    "reduce",
    "underweight",
    "earnings miss",
    "layoff",
    "lawsuit",
    "investigation",
    "declining",
];

const SUMMARY_TITLE_CHARS: usize = 100;

fn count_keywords(text: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| text.contains(*k)).count()
}

fn bucket(score: i64) -> &'static str {
    match score.signum() {
        1 => "positive",
        -1 => "negative",
        _ => "neutral",
    }
}

/// Score one article: distinct positive minus distinct negative keywords
/// found as substrings of the lower-cased title and body
pub fn score_article(item: &NewsItem) -> ScoredArticle {
    let text = format!("{} {}", item.title, item.body).to_lowercase();
    let positive = count_keywords(&text, &POSITIVE_KEYWORDS);
    let negative = count_keywords(&text, &NEGATIVE_KEYWORDS);

    ScoredArticle {
        title: if item.title.is_empty() {
            "No title".to_string()
        } else {
            item.title.clone()
        },
        date: item.date.clone(),
        source: item.source.clone(),
        url: item.url.clone(),
        sentiment_score: i64::try_from(positive).unwrap_or(i64::MAX)
            - i64::try_from(negative).unwrap_or(i64::MAX),
        positive_keywords: positive,
        negative_keywords: negative,
    }
}

/// Aggregate sentiment over a batch; deterministic for a given input
pub fn analyze(items: &[NewsItem]) -> SentimentReport {
    if items.is_empty() {
        return SentimentReport::empty();
    }

    let detailed: Vec<ScoredArticle> = items.iter().map(score_article).collect();
    let summaries = items
        .iter()
        .zip(&detailed)
        .filter(|(_, scored)| scored.sentiment_score.abs() >= 1)
        .map(|(item, scored)| {
            let title: String = item.title.to_lowercase().chars().take(SUMMARY_TITLE_CHARS).collect();
            format!(
                "{title}... ({}, score: {}, {})",
                bucket(scored.sentiment_score),
                scored.sentiment_score,
                item.source
            )
        })
        .collect();

    let total: i64 = detailed.iter().map(|a| a.sentiment_score).sum();
    let count_where = |f: fn(i64) -> bool| detailed.iter().filter(|a| f(a.sentiment_score)).count();

    #[allow(clippy::cast_precision_loss)]
    let average = total as f64 / detailed.len() as f64;

    SentimentReport {
        sentiment_score: average,
        news_summaries: summaries,
        total_articles: Some(detailed.len()),
        positive_articles: Some(count_where(|s| s > 0)),
        negative_articles: Some(count_where(|s| s < 0)),
        neutral_articles: Some(count_where(|s| s == 0)),
        detailed_news: detailed,
    }
}

/// Accepts a bare array, a `{"news": [...]}` object as returned by
/// `get_news`, or either of those encoded as a JSON string
fn news_items(value: Value) -> AgentResult<Vec<NewsItem>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::String(text) => news_items(serde_json::from_str(&text)?),
        Value::Object(mut object) => match object.remove("news") {
            Some(inner) => news_items(inner),
            None => Ok(vec![serde_json::from_value(Value::Object(object))?]),
        },
        Value::Array(_) => Ok(serde_json::from_value(value)?),
        other => Err(Error::ProcessingFailed(format!(
            "news_items must be a list of articles, got {other}"
        ))),
    }
}

#[derive(Debug, Deserialize)]
struct SentimentParams {
    #[serde(default, alias = "news", alias = "news_data")]
    news_items: Value,
}

/// Stateless keyword scorer
pub struct SentimentTool;

#[async_trait]
impl Tool for SentimentTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let params: SentimentParams = parse_params(ANALYZE_SENTIMENT, params)?;
        let items = news_items(params.news_items)?;
        Ok(serde_json::to_value(analyze(&items))?)
    }

    fn name(&self) -> &str {
        ANALYZE_SENTIMENT
    }

    fn description(&self) -> &str {
        "Analyzes sentiment of news articles using financial keyword counts. Input: news_items, \
         a list of articles with title, body, date, source and url (the output of get_news)."
    }

    fn input_schema(&self) -> Value {
        let article = schema::object(
            json!({
                "title": schema::string("Headline"),
                "body": schema::string("Article text or snippet"),
                "date": schema::string("Publication date"),
                "source": schema::string("Publisher domain"),
                "url": schema::string("Article URL"),
            }),
            &["title"],
        );
        schema::object(
            json!({ "news_items": schema::array("Articles to score", article) }),
            &["news_items"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, body: &str) -> NewsItem {
        NewsItem {
            title: title.into(),
            body: body.into(),
            date: "2024-05-10".into(),
            source: "reuters.com".into(),
            url: "https://reuters.com/a".into(),
        }
    }

    #[test]
    fn test_single_positive_keyword() {
        let report = analyze(&[item("Shares rally", "Investors see a gain today")]);
        assert_eq!(report.detailed_news[0].sentiment_score, 1);
        assert!((report.sentiment_score - 1.0).abs() < f64::EPSILON);
        assert_eq!(report.positive_articles, Some(1));
        assert_eq!(report.news_summaries, ["shares rally... (positive, score: 1, reuters.com)"]);
    }

    #[test]
    fn test_balanced_counts_are_neutral() {
        let report = analyze(&[item("Profit rises", "but a lawsuit looms")]);
        assert_eq!(report.detailed_news[0].positive_keywords, 1);
        assert_eq!(report.detailed_news[0].negative_keywords, 1);
        assert_eq!(report.detailed_news[0].sentiment_score, 0);
        assert_eq!(report.neutral_articles, Some(1));
        assert!(report.news_summaries.is_empty());
    }

    #[test]
    fn test_duplicate_keyword_counts_once() {
        let report = analyze(&[item("Outperform", "")]);
        assert_eq!(report.detailed_news[0].positive_keywords, 1);
    }

    #[test]
    fn test_overlapping_keywords_each_count() {
        // "strong buy" also contains "strong" and "buy"
        let scored = score_article(&item("Analysts say strong buy", ""));
        assert_eq!(scored.positive_keywords, 3);
    }

    #[test]
    fn test_order_independence() {
        let a = item("Upgrade to overweight", "");
        let b = item("Layoff announced", "amid investigation");
        let c = item("Quiet day", "");
        let forward = analyze(&[a.clone(), b.clone(), c.clone()]);
        let backward = analyze(&[c, b, a]);

        assert_eq!(forward.sentiment_score, backward.sentiment_score);
        assert_eq!(forward.positive_articles, backward.positive_articles);
        assert_eq!(forward.negative_articles, backward.negative_articles);
        assert_eq!(forward.total_articles, Some(3));
    }

    #[test]
    fn test_empty_input() {
        let value = serde_json::to_value(analyze(&[])).unwrap();
        assert_eq!(
            value,
            json!({"sentiment_score": 0.0, "news_summaries": [], "detailed_news": []})
        );
    }

    #[test]
    fn test_summary_title_truncated() {
        let long = "Growth ".repeat(30);
        let report = analyze(&[item(&long, "")]);
        let summary = &report.news_summaries[0];
        assert!(summary.starts_with(&long.to_lowercase()[..100]));
        assert!(summary.contains("... (positive"));
    }

    #[tokio::test]
    async fn test_tool_accepts_get_news_output() {
        let news = json!({"news": [{"title": "Bullish outlook", "body": "", "source": "x.com"}]});
        let report = SentimentTool
            .execute(json!({ "news_items": news }))
            .await
            .unwrap();
        assert_eq!(report["total_articles"], 1);
        assert_eq!(report["positive_articles"], 1);

        let aliased = SentimentTool
            .execute(json!({ "news": [{"title": "Downgrade"}] }))
            .await
            .unwrap();
        assert_eq!(aliased["negative_articles"], 1);

        assert!(SentimentTool.execute(json!({ "news_items": 5 })).await.is_err());
    }
}
