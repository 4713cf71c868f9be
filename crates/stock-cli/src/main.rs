//! Command-line interface for the stock recommendation crew
//!
//! ```bash
//! export OPENAI_API_KEY=...
//! export TAVILY_API_KEY=...
//! stock-crew analyze --ticker TATAMOTORS.NS --risk averse
//! stock-crew serve --addr 127.0.0.1:8080
//! ```

mod progress;
mod report;
mod web;

use agent_utils::{LogFormat, init_tracing, load_dotenv};
use clap::{Parser, Subcommand, ValueEnum};
use std::net::SocketAddr;
use std::sync::Arc;
use stock_crew::{RiskTolerance, StockConfig, StockCrew};
use tracing::info;

use crate::progress::ConsoleProgress;

#[derive(Parser, Debug)]
#[command(name = "stock-crew")]
#[command(about = "Multi-agent BUY/SELL stock recommendations", long_about = None)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the four-agent analysis for one ticker and print the report
    Analyze {
        #[arg(short, long, default_value = "TATAMOTORS")]
        ticker: String,

        #[arg(short, long, value_enum, default_value_t = RiskArg::Neutral)]
        risk: RiskArg,
    },
    /// Serve the web form
    Serve {
        #[arg(short, long, default_value = "127.0.0.1:8080")]
        addr: SocketAddr,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RiskArg {
    Averse,
    Neutral,
    Seeking,
}

impl From<RiskArg> for RiskTolerance {
    fn from(arg: RiskArg) -> Self {
        match arg {
            RiskArg::Averse => Self::Averse,
            RiskArg::Neutral => Self::Neutral,
            RiskArg::Seeking => Self::Seeking,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    let cli = Cli::parse();
    let format = if cli.json_logs { LogFormat::Json } else { LogFormat::Pretty };
    init_tracing("warn,stock_crew=info,stock_cli=info", format);

    let command = cli.command.unwrap_or(Commands::Analyze {
        ticker: "TATAMOTORS".to_string(),
        risk: RiskArg::Neutral,
    });

    match command {
        Commands::Analyze { ticker, risk } => analyze(&ticker, risk.into()).await,
        Commands::Serve { addr } => {
            let crew = StockCrew::from_config(StockConfig::from_env()?)?;
            info!(%addr, model = %crew.config().model, "starting web front end");
            web::serve(addr, Arc::new(crew)).await
        }
    }
}

/// Analysis failures are reported on stdout and do not change the exit status
async fn analyze(ticker: &str, risk: RiskTolerance) -> anyhow::Result<()> {
    println!("Starting analysis for {ticker} with {risk} risk tolerance...");

    let progress = Arc::new(ConsoleProgress);
    let result = match StockConfig::from_env() {
        Ok(config) => match StockCrew::builder(config)
            .crew_events(progress.clone())
            .executor_events(progress)
            .build()
        {
            Ok(crew) => crew.analyze_stock(ticker, risk).await,
            Err(e) => Err(e),
        },
        Err(e) => Err(e),
    };

    match result {
        Ok(analysis) => report::print_report(&analysis),
        Err(e) => report::print_failure(&e),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["stock-crew", "analyze"]);
        match cli.command {
            Some(Commands::Analyze { ticker, risk }) => {
                assert_eq!(ticker, "TATAMOTORS");
                assert_eq!(RiskTolerance::from(risk), RiskTolerance::Neutral);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_risk_and_serve() {
        let cli = Cli::parse_from(["stock-crew", "analyze", "--ticker", "INFY", "--risk", "seeking"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Analyze { risk: RiskArg::Seeking, .. })
        ));

        let cli = Cli::parse_from(["stock-crew", "--json-logs", "serve", "--addr", "0.0.0.0:9000"]);
        assert!(cli.json_logs);
        assert!(matches!(cli.command, Some(Commands::Serve { addr }) if addr.port() == 9000));

        assert!(Cli::try_parse_from(["stock-crew", "analyze", "--risk", "reckless"]).is_err());
    }
}
