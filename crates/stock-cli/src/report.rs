//! Terminal rendering of an analysis report

use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use stock_crew::{AnalysisReport, StockError};

use crate::progress::preview;

const BANNER_WIDTH: usize = 50;

pub fn banner() -> String {
    "=".repeat(BANNER_WIDTH)
}

/// One row per task with a one-line excerpt of its output
pub fn summary_table(report: &AnalysisReport) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Task", "Agent", "Excerpt"]);

    for (i, task) in report.tasks.iter().enumerate() {
        let first_line = task.output.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
        table.add_row(vec![
            (i + 1).to_string(),
            task.task_id.clone(),
            task.agent.clone(),
            preview(first_line.trim(), 60),
        ]);
    }
    table
}

pub fn print_report(report: &AnalysisReport) {
    println!("\n{}", banner());
    println!("FINAL ANALYSIS RESULT");
    println!("{}", banner());
    println!("{}", report.report);
    println!("\n{}", summary_table(report));
    println!(
        "Ticker: {}  Risk tolerance: {}  Consensus reached: {}  Run: {}",
        report.ticker,
        report.risk_tolerance,
        if report.consensus_reached { "yes" } else { "no" },
        report.run_id
    );
}

pub fn print_failure(error: &StockError) {
    println!("Error during analysis: {error}");
    println!("This might be due to API limitations:");
    println!("  - check OPENAI_API_KEY and the model endpoint");
    println!("  - set TAVILY_API_KEY or SERPER_API_KEY for news search");
    println!("  - market data providers may throttle or lack data for this ticker");
}
