//! CLI command implementations
//!
//! Every command builds its own in-memory dataset from the configuration,
//! runs, and prints one JSON document.

use std::path::Path;
use std::sync::Arc;

use serde_json::json;

use crate::config::RosterConfig;
use crate::http_server::HttpServer;
use crate::observability::{log_event, log_event_with_fields, Event};
use crate::search::{parse_sort, PageRequest, SearchService};
use crate::seed::seed_demo;
use crate::store::InMemoryStore;

use super::args::{AssignmentArgs, Command, FilterArgs};
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(config.as_deref(), port),
        Command::Search {
            config,
            filter,
            offset,
            limit,
            sort,
        } => search(config.as_deref(), &filter, offset, limit, sort.as_deref()),
        Command::Stats { config, filter } => stats(config.as_deref(), &filter),
        Command::BulkUpdate {
            config,
            filter,
            assignments,
        } => bulk_update(config.as_deref(), &filter, &assignments),
        Command::BulkDelete { config, filter } => bulk_delete(config.as_deref(), &filter),
    }
}

/// Loads configuration and builds a seeded search service
fn boot(config_path: Option<&Path>) -> CliResult<(RosterConfig, SearchService<Arc<InMemoryStore>>)> {
    log_event(Event::BootStart);

    let config = RosterConfig::load_or_default(config_path)?;
    let source = config_path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<defaults>".to_string());
    log_event_with_fields(Event::ConfigLoaded, &[("source", &source)]);

    let store = Arc::new(InMemoryStore::new());
    if config.seed.enabled {
        seed_demo(&store, config.seed.members)
            .map_err(|e| CliError::Boot(format!("seeding failed: {}", e)))?;
    }

    let service = SearchService::with_limits(store, config.paging);
    Ok((config, service))
}

/// Seed the dataset and serve HTTP until the server stops
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let (mut config, service) = boot(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
        config.validate()?;
    }

    let server = HttpServer::new(config.http.clone(), service);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Boot(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::Boot(format!("HTTP server failed: {}", e)))
    })?;

    log_event(Event::ShutdownComplete);
    Ok(())
}

/// One paged search
pub fn search(
    config_path: Option<&Path>,
    filter: &FilterArgs,
    offset: i64,
    limit: Option<i64>,
    sort: Option<&str>,
) -> CliResult<()> {
    let (_, service) = boot(config_path)?;

    let limit = match limit {
        Some(limit) => limit,
        None => i64::try_from(service.limits().default).unwrap_or(i64::MAX),
    };
    let page = PageRequest {
        offset,
        limit,
        sort: match sort {
            Some(spec) => parse_sort(spec)?,
            None => Vec::new(),
        },
    };

    let result = service.search(&filter.to_filter(), &page)?;
    write_response(serde_json::to_value(&result)?)
}

/// Age statistics and per-team averages
pub fn stats(config_path: Option<&Path>, filter: &FilterArgs) -> CliResult<()> {
    let (_, service) = boot(config_path)?;
    let filter = filter.to_filter();

    let ages = service.age_stats(&filter)?;
    let teams = service.team_age_averages(&filter)?;
    write_response(json!({ "ages": ages, "teams": teams }))
}

/// Bulk update, then a fresh read of the rows that still match
pub fn bulk_update(
    config_path: Option<&Path>,
    filter: &FilterArgs,
    assignments: &AssignmentArgs,
) -> CliResult<()> {
    let (_, service) = boot(config_path)?;
    let condition = service.condition_for(&filter.to_filter())?;

    let affected = service.bulk_update(&condition, &assignments.to_assignments())?;
    log_event_with_fields(
        Event::BulkUpdateApplied,
        &[("affected", &affected.to_string()), ("condition", &condition.to_string())],
    );

    // Earlier reads are stale; list everything again
    let rows = service.list(&Default::default())?;
    write_response(json!({ "affected": affected, "rows": rows }))
}

/// Bulk delete, reporting the remaining member count
pub fn bulk_delete(config_path: Option<&Path>, filter: &FilterArgs) -> CliResult<()> {
    let (_, service) = boot(config_path)?;
    let condition = service.condition_for(&filter.to_filter())?;

    let deleted = service.bulk_delete(&condition)?;
    log_event_with_fields(
        Event::BulkDeleteApplied,
        &[("affected", &deleted.to_string()), ("condition", &condition.to_string())],
    );

    let remaining = service.store().member_count()?;
    write_response(json!({ "deleted": deleted, "remaining": remaining }))
}
