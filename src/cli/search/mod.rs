//! Search command - type a query per line, results print after a quiet period
//!
//! A line is free text matched against template names and descriptions, with
//! optional `purpose=`, `session=` and `child_type=` tokens for exact tag
//! matches (the Korean keys `용도=`, `회기=`, `아동유형=` work too).

use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::config::AppConfig;
use crate::domain::TemplateFilter;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::search::{Debouncer, SearchDispatcher, SearchSnapshot};

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Quiet period in milliseconds, overrides `search.debounce_ms`
    #[arg(long)]
    pub debounce_ms: Option<u64>,
}

pub async fn run(args: SearchArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_logging(&config.logging)?;

    let delay = args
        .debounce_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.search.debounce());

    let state = crate::create_app_state_with_config(&config).await?;
    let dispatcher = SearchDispatcher::new(Arc::clone(&state.template_service), Debouncer::new(delay));
    let mut watcher = dispatcher.subscribe();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_sequence = dispatcher.search(TemplateFilter::default());
    let mut shown = 0;
    let mut input_closed = false;

    loop {
        tokio::select! {
            line = lines.next_line(), if !input_closed => {
                match line? {
                    Some(line) => {
                        let filter = parse_query(&line);
                        debug!(filter = ?filter, "Query entered");
                        last_sequence = dispatcher.search(filter);
                    }
                    None if shown >= last_sequence => break,
                    None => input_closed = true,
                }
            }
            changed = watcher.changed() => {
                if changed.is_err() {
                    break;
                }

                let snapshot = watcher.borrow_and_update().clone();
                print_snapshot(&snapshot);
                shown = snapshot.sequence;

                if input_closed && shown >= last_sequence {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Parse one input line into a filter
pub fn parse_query(line: &str) -> TemplateFilter {
    let mut filter = TemplateFilter::default();
    let mut words = Vec::new();

    for token in line.split_whitespace() {
        match token.split_once('=') {
            Some(("purpose" | "용도", value)) => filter.purpose = Some(value.to_string()),
            Some(("session" | "회기", value)) => filter.session = Some(value.to_string()),
            Some(("child_type" | "아동유형", value)) => filter.child_type = Some(value.to_string()),
            _ => words.push(token),
        }
    }

    if !words.is_empty() {
        filter.search = Some(words.join(" "));
    }

    filter
}

fn print_snapshot(snapshot: &SearchSnapshot) {
    if let Some(ref error) = snapshot.error {
        println!("[#{}] search failed: {}", snapshot.sequence, error);
        return;
    }

    println!("[#{}] {} template(s)", snapshot.sequence, snapshot.templates.len());

    for template in &snapshot.templates {
        let variables = template.variables();
        println!(
            "  {}  {} ({} variable(s))",
            template.id(),
            template.name(),
            variables.len()
        );
    }
}
