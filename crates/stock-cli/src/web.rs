//! Minimal web form in front of the crew

use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use minijinja::{AutoEscape, Environment};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use stock_crew::{RiskTolerance, StockCrew};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

const TITLE: &str = "Multi-Agent Stock Analysis and Recommendation";
const DEFAULT_TICKER: &str = "TATAMOTORS";
const PAGE: &str = "page.html";

#[derive(Clone)]
pub struct AppState {
    crew: Arc<StockCrew>,
    templates: Arc<Environment<'static>>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeForm {
    pub ticker: String,
    pub risk: String,
}

#[derive(Debug, Serialize)]
struct RiskOption {
    label: &'static str,
    selected: bool,
}

/// Context for the form page
#[derive(Debug, Serialize)]
pub struct Page {
    title: &'static str,
    ticker: String,
    risks: Vec<RiskOption>,
    report: Option<String>,
    error: Option<String>,
}

impl Page {
    pub fn new(ticker: impl Into<String>, risk: RiskTolerance) -> Self {
        Self {
            title: TITLE,
            ticker: ticker.into(),
            risks: RiskTolerance::ALL
                .iter()
                .map(|r| RiskOption {
                    label: r.label(),
                    selected: *r == risk,
                })
                .collect(),
            report: None,
            error: None,
        }
    }

    pub fn with_report(mut self, report: impl Into<String>) -> Self {
        self.report = Some(report.into());
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

/// Page templates with HTML autoescaping on every value
pub fn templates() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::Html);
    env.add_template(PAGE, include_str!("../templates/page.html"))?;
    Ok(env)
}

pub fn router(crew: Arc<StockCrew>) -> Result<Router, minijinja::Error> {
    let state = AppState {
        crew,
        templates: Arc::new(templates()?),
    };
    Ok(Router::new()
        .route("/", get(index))
        .route("/analyze", get(index).post(analyze))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

pub async fn serve(addr: SocketAddr, crew: Arc<StockCrew>) -> anyhow::Result<()> {
    let app = router(crew)?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn render_page(templates: &Environment<'static>, status: StatusCode, page: &Page) -> Response {
    match templates.get_template(PAGE).and_then(|t| t.render(page)) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!(error = %e, "template render failed");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Template error: {e}")).into_response()
        }
    }
}

async fn index(State(state): State<AppState>) -> Response {
    render_page(&state.templates, StatusCode::OK, &Page::new(DEFAULT_TICKER, RiskTolerance::Neutral))
}

async fn health() -> &'static str {
    "ok"
}

/// Runs the whole crew before responding
async fn analyze(State(state): State<AppState>, Form(form): Form<AnalyzeForm>) -> Response {
    let ticker = form.ticker.trim().to_string();
    let risk = match form.risk.parse::<RiskTolerance>() {
        Ok(risk) => risk,
        Err(e) => {
            let page = Page::new(ticker, RiskTolerance::Neutral).with_error(e.to_string());
            return render_page(&state.templates, StatusCode::BAD_REQUEST, &page);
        }
    };
    if ticker.is_empty() {
        let page = Page::new(DEFAULT_TICKER, risk).with_error("Please enter a ticker symbol.");
        return render_page(&state.templates, StatusCode::BAD_REQUEST, &page);
    }

    info!(%ticker, %risk, "web analysis requested");
    let page = match state.crew.analyze_stock(&ticker, risk).await {
        Ok(report) => Page::new(ticker, risk).with_report(report.report),
        Err(e) => {
            error!(%ticker, error = %e, "web analysis failed");
            Page::new(ticker, risk).with_error(format!("Error during analysis: {e}"))
        }
    };
    render_page(&state.templates, StatusCode::OK, &page)
}
