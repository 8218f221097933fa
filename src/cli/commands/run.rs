//! Implementation of the `cadence run` command.
//!
//! The single entry point the external scheduler invokes once per day. The
//! engine itself never consults the wall clock; "today" is resolved here,
//! in UTC, unless an explicit date is given.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::Args;

use crate::adapters::sqlite::{
    initialize_database, SqliteDefinitionRepository, SqliteExceptionStore,
    SqliteInstanceRepository, SqliteNotificationSink, SqlitePersonnelDirectory,
};
use crate::cli::output::{output, CommandOutput};
use crate::config::ConfigLoader;
use crate::domain::models::run_report::RunReport;
use crate::services::materializer::{Materializer, MaterializerConfig};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Calendar date to materialize (YYYY-MM-DD); defaults to today (UTC)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, serde::Serialize)]
pub struct RunOutput {
    pub report: RunReport,
}

impl CommandOutput for RunOutput {
    fn to_human(&self) -> String {
        let r = &self.report;
        let date = r
            .run_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let mut lines = vec![
            format!("Materialization run for {}", date),
            String::new(),
            format!("  Definitions evaluated:  {}", r.definitions_evaluated),
            format!("  Definitions due:        {}", r.definitions_due),
            format!("  Skipped (skip date):    {}", r.definitions_skipped),
            format!("  Instances created:      {}", r.instances_created),
            format!("  Assignees suppressed:   {}", r.assignees_suppressed),
            format!("  Already materialized:   {}", r.already_materialized),
            format!("  Notifications sent:     {}", r.notifications_sent),
            format!("  Notifications failed:   {}", r.notifications_failed),
        ];

        if r.has_errors() {
            lines.push(String::new());
            lines.push(format!("Errors ({}):", r.errors.len()));
            for err in &r.errors {
                match err.personnel_id {
                    Some(personnel_id) => lines.push(format!(
                        "  - definition {} / assignee {}: {}",
                        err.definition_id, personnel_id, err.message
                    )),
                    None => lines.push(format!(
                        "  - definition {}: {}",
                        err.definition_id, err.message
                    )),
                }
            }
        }

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: RunArgs, json_mode: bool) -> Result<()> {
    let config = ConfigLoader::load()?;

    let pool = initialize_database(&config.database.url())
        .await
        .context("Failed to initialize database. Run 'cadence init' first.")?;

    let materializer = Materializer::new(
        Arc::new(SqliteDefinitionRepository::new(pool.clone())),
        Arc::new(SqlitePersonnelDirectory::new(pool.clone())),
        Arc::new(SqliteExceptionStore::new(pool.clone())),
        Arc::new(SqliteInstanceRepository::new(pool.clone())),
        Arc::new(SqliteNotificationSink::new(pool.clone())),
        MaterializerConfig::from(&config.materializer),
    );

    let date = args.date.unwrap_or_else(|| Utc::now().date_naive());
    let report = materializer.run(date).await?;

    output(&RunOutput { report }, json_mode);
    Ok(())
}
