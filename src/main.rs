use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use degree_planner::catalog::{load_fixtures, InMemoryCatalogGateway};
use degree_planner::editor;
use degree_planner::error::PlannerError;
use degree_planner::parser::{EditInputDocument, EditOutputDocument, PlanInputDocument, PlanOutputDocument, TechBreadthInputDocument};
use degree_planner::planner;
use degree_planner::reporter::{render, ReportFormat};
use degree_planner::tech_breadth::rank_tech_breadth;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{Read, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "degree-planner")]
#[command(about = "Requisite-aware academic degree planner, schedule editor, and tech-breadth optimizer")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Place required courses into terms and select earliest-term sections.
    Plan {
        /// Directory of catalog fixture JSON files (subjects/courses/sections).
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Read the request document from this file instead of stdin.
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Write the response document to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Suppress stderr progress reporting.
        #[arg(short, long)]
        quiet: bool,
    },

    /// Apply one move/swap/change-section mutation to an existing schedule.
    Edit {
        #[arg(long)]
        catalog: Option<PathBuf>,

        #[arg(short, long)]
        input: Option<PathBuf>,

        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long)]
        quiet: bool,
    },

    /// Rank tech-breadth elective candidates by missing-prerequisite count.
    TechBreadth {
        #[arg(long)]
        catalog: Option<PathBuf>,

        #[arg(short, long)]
        input: Option<PathBuf>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render a planner response document as human-readable text or markdown.
    Report {
        /// Path to a planner response JSON document.
        #[arg(short, long)]
        schedule: PathBuf,

        /// Output format: text, markdown, or json.
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Plan {
            catalog,
            input,
            output,
            quiet,
        } => run_plan(catalog.as_deref(), input.as_deref(), output.as_deref(), quiet),
        Commands::Edit {
            catalog,
            input,
            output,
            quiet,
        } => run_edit(catalog.as_deref(), input.as_deref(), output.as_deref(), quiet),
        Commands::TechBreadth { catalog, input, output } => {
            run_tech_breadth(catalog.as_deref(), input.as_deref(), output.as_deref())
        }
        Commands::Report { schedule, format } => run_report(&schedule, &format),
    }
}

/// Build the fixture-backed gateway from `--catalog <dir>`. Per the
/// environment-variable contract, `CATALOG_URL`/`CATALOG_KEY` without
/// `--catalog` is rejected — no network-backed gateway exists in this core.
fn build_gateway(catalog_dir: Option<&std::path::Path>) -> Result<InMemoryCatalogGateway> {
    match catalog_dir {
        Some(dir) => {
            let data = load_fixtures(dir).with_context(|| format!("loading catalog fixtures from {}", dir.display()))?;
            Ok(InMemoryCatalogGateway::new(data))
        }
        None => {
            if std::env::var("CATALOG_URL").is_ok() || std::env::var("CATALOG_KEY").is_ok() {
                Err(PlannerError::InputError(
                    "CATALOG_URL/CATALOG_KEY were set but only the fixture-backed gateway (--catalog <dir>) is implemented in this core".to_string(),
                )
                .into())
            } else {
                Err(PlannerError::InputError("no catalog source given; pass --catalog <dir>".to_string()).into())
            }
        }
    }
}

fn read_input(input: Option<&std::path::Path>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading input file {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("reading request document from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(output: Option<&std::path::Path>, body: &str) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, body).with_context(|| format!("writing output file {}", path.display())),
        None => {
            let mut stdout = std::io::stdout();
            stdout.write_all(body.as_bytes())?;
            stdout.write_all(b"\n")?;
            Ok(())
        }
    }
}

fn progress_spinner(quiet: bool, message: &str) -> Option<ProgressBar> {
    if quiet {
        return None;
    }
    let bar = ProgressBar::new_spinner();
    bar.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg}").unwrap());
    bar.set_message(message.to_string());
    bar.enable_steady_tick(std::time::Duration::from_millis(100));
    Some(bar)
}

fn finish_spinner(bar: Option<ProgressBar>, message: &str) {
    if let Some(bar) = bar {
        bar.finish_with_message(message.to_string());
    }
}

fn run_plan(catalog: Option<&std::path::Path>, input: Option<&std::path::Path>, output: Option<&std::path::Path>, quiet: bool) -> Result<()> {
    let gateway = build_gateway(catalog)?;
    let body = read_input(input)?;
    let doc: PlanInputDocument = serde_json::from_str(&body).context("parsing planner request document")?;
    let request = doc.into_request()?;

    let spinner = progress_spinner(quiet, "planning schedule...");
    let outcome = planner::plan(&gateway, &request)?;
    finish_spinner(spinner, &format!("{} schedule planned", "done:".green().bold()));

    let response = PlanOutputDocument::from(outcome);
    let json = serde_json::to_string_pretty(&response)?;
    write_output(output, &json)
}

fn run_edit(catalog: Option<&std::path::Path>, input: Option<&std::path::Path>, output: Option<&std::path::Path>, quiet: bool) -> Result<()> {
    let gateway = build_gateway(catalog)?;
    let body = read_input(input)?;
    let doc: EditInputDocument = serde_json::from_str(&body).context("parsing editor request document")?;
    let (schedule, transcript, config, operation) = doc.into_parts()?;

    let spinner = progress_spinner(quiet, "applying edit...");
    let result = editor::apply(&gateway, &schedule, &transcript, &config, &operation)?;
    let label = if result.success {
        format!("{} edit applied", "done:".green().bold())
    } else {
        format!("{} edit rejected: {}", "warn:".yellow().bold(), result.message)
    };
    finish_spinner(spinner, &label);

    let response = EditOutputDocument::from(result);
    let json = serde_json::to_string_pretty(&response)?;
    write_output(output, &json)
}

fn run_tech_breadth(catalog: Option<&std::path::Path>, input: Option<&std::path::Path>, output: Option<&std::path::Path>) -> Result<()> {
    let gateway = build_gateway(catalog)?;
    let body = read_input(input)?;
    let doc: TechBreadthInputDocument = serde_json::from_str(&body).context("parsing tech-breadth request document")?;
    let request = doc.into_request();

    let ranked = rank_tech_breadth(&gateway, &request)?;
    let json = serde_json::to_string_pretty(&ranked)?;
    write_output(output, &json)
}

fn run_report(schedule_path: &std::path::Path, format: &str) -> Result<()> {
    let body = std::fs::read_to_string(schedule_path).with_context(|| format!("reading {}", schedule_path.display()))?;
    let doc: PlanOutputDocument = serde_json::from_str(&body).context("parsing planner response document")?;

    let parsed_format: ReportFormat = format.parse().map_err(PlannerError::InputError)?;
    let rendered = render(&doc.schedule, parsed_format)?;
    print!("{rendered}");
    if let Some(note) = doc.note {
        println!("\n{} {}", "note:".yellow().bold(), note);
    }
    Ok(())
}
