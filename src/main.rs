mod canvas;
mod model;
mod pipeline;
mod report;
mod tracing;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::canvas::client::CanvasClient;
use crate::canvas::transport::HttpTransport;
use crate::canvas::{ClientConfig, ConfigError};
use crate::model::ids::EntityId;
use crate::model::thresholds::{GroupingMode, NullScorePolicy};
use crate::pipeline::stage6_report::write_reports;
use crate::pipeline::{RunError, RunOptions, RunOutcome, run_course};
use crate::report::text::render_report_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GroupingArg {
    /// One table per outcome with results
    Outcomes,
    /// One table per competency group (CD/CP/CG titles)
    Groups,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum NullScoresArg {
    /// Leave null scores out of the mean
    Exclude,
    /// Count null scores as 0.0
    Zero,
}

#[derive(Parser, Debug)]
#[command(name = "canvas-masteryqc")]
#[command(about = "Mastery category distributions for Canvas course outcomes", long_about = None)]
#[command(version)]
struct Cli {
    /// Canvas course id
    #[arg(long, env = "CANVAS_COURSE_ID")]
    course_id: Option<String>,

    /// Canvas API token
    #[arg(long, env = "CANVAS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Canvas base URL, e.g. https://canvas.example.edu
    #[arg(long, env = "CANVAS_BASE_URL")]
    base_url: Option<String>,

    /// Report grouping
    #[arg(long, value_enum, default_value = "groups")]
    grouping: GroupingArg,

    /// Also show one table per outcome inside each competency group
    #[arg(long)]
    details: bool,

    /// How scores without a numeric percent are handled
    #[arg(long, value_enum, default_value = "exclude")]
    null_scores: NullScoresArg,

    /// List every student's mean and category (students.tsv)
    #[arg(long)]
    students: bool,

    /// Look up student display names (one request per student)
    #[arg(long, requires = "students")]
    resolve_names: bool,

    /// Write report.txt, summary.json and report.html to this directory
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone)]
struct RunConfig {
    client: ClientConfig,
    course_id: EntityId,
    options: RunOptions,
    out_dir: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    tracing::init_logging(cli.verbose);
    if let Err(err) = run(&cli) {
        eprintln!("{err}");
        std::process::exit(exit_code(&err));
    }
}

fn run(cli: &Cli) -> Result<(), RunError> {
    let config = build_config(cli)?;
    crate::info!(
        "course {} at {} (grouping={}, null scores={})",
        config.course_id,
        config.client.base_url(),
        config.options.grouping.name(),
        config.options.null_policy.name()
    );

    let transport = HttpTransport::new(config.client.clone())?;
    let client = CanvasClient::new(transport, config.course_id.clone());

    match run_course(&client, &config.options)? {
        RunOutcome::Empty(reason) => {
            crate::warn!("{}", reason.message());
        }
        RunOutcome::Report(data) => {
            print!("{}", render_report_text(&data));
            if let Some(dir) = &config.out_dir {
                write_reports(&data, dir)?;
            }
        }
    }
    Ok(())
}

fn build_config(cli: &Cli) -> Result<RunConfig, ConfigError> {
    let course_id = cli
        .course_id
        .as_deref()
        .and_then(EntityId::new)
        .ok_or(ConfigError::MissingCourseId)?;
    let token = cli.token.as_deref().ok_or(ConfigError::MissingToken)?;
    let base_url = cli.base_url.as_deref().ok_or(ConfigError::MissingBaseUrl)?;
    let client = ClientConfig::new(base_url, token)?;

    Ok(RunConfig {
        client,
        course_id,
        options: RunOptions {
            grouping: match cli.grouping {
                GroupingArg::Outcomes => GroupingMode::Outcomes,
                GroupingArg::Groups => GroupingMode::Groups,
            },
            details: cli.details,
            null_policy: match cli.null_scores {
                NullScoresArg::Exclude => NullScorePolicy::Exclude,
                NullScoresArg::Zero => NullScorePolicy::CoerceZero,
            },
            students: cli.students,
            resolve_names: cli.resolve_names,
        },
        out_dir: cli.out.clone(),
    })
}

fn exit_code(err: &RunError) -> i32 {
    match err {
        RunError::Config(_) => 2,
        _ => 1,
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
