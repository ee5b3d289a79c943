use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use colored::Colorize;
use tracing::{debug, info};

use astcheck_compare::{CompareError, Comparator};
use astcheck_report::DivergenceReporter;
use astcheck_types::{render, resolve, PathTrace, TreeValue, DEFAULT_MAX_NESTING};

use crate::cli::*;
use crate::config::CheckConfig;

/// Result of a command, mapped to the process exit status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Failure => ExitCode::FAILURE,
        }
    }
}

pub fn run_command(cli: Cli) -> anyhow::Result<Outcome> {
    match cli.command {
        Command::Compare(args) => cmd_compare(args, &cli.format),
        Command::Locate(args) => cmd_locate(args, &cli.format),
    }
}

/// Load a JSON tree. Nesting up to `max_nesting` levels is accepted.
fn read_tree(path: &Path, max_nesting: usize) -> anyhow::Result<TreeValue> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let tree = TreeValue::from_json_slice_with_limit(&bytes, max_nesting)
        .with_context(|| format!("parsing {}", path.display()))?;
    debug!(path = %path.display(), bytes = bytes.len(), "loaded tree");
    Ok(tree)
}

fn cmd_compare(args: CompareArgs, format: &OutputFormat) -> anyhow::Result<Outcome> {
    let config = CheckConfig::load_or_default(args.config.as_deref())?.apply_args(&args);
    // Parse past the comparator's limit so over-deep trees surface as
    // DepthLimitExceeded with context rather than as a parse error.
    let max_nesting = config
        .compare
        .max_depth
        .max(DEFAULT_MAX_NESTING)
        .saturating_add(1);
    let reference = read_tree(&args.reference, max_nesting)?;
    let target = read_tree(&args.target, max_nesting)?;

    info!(
        reference = %args.reference.display(),
        target = %args.target.display(),
        ignored = ?config.compare.ignored_keys,
        "comparing trees"
    );
    let comparator = Comparator::new(config.compare);
    let reporter = DivergenceReporter::new(config.report);
    let labels = reporter.options();

    let error = match comparator.check(&reference, &target) {
        Ok(()) => {
            match format {
                OutputFormat::Text => println!(
                    "{} {} conforms to {}",
                    "✓".green().bold(),
                    labels.target_label.bold(),
                    labels.reference_label.bold()
                ),
                OutputFormat::Json => println!("{}", serde_json::json!({ "status": "conforms" })),
            }
            return Ok(Outcome::Success);
        }
        Err(error) => error,
    };

    let text = reporter.report_error(&error, &reference, &target);
    match format {
        OutputFormat::Text => {
            let headline = match &error {
                CompareError::Diverged(_) => "divergence",
                CompareError::DepthLimitExceeded { .. } => "depth limit exceeded",
            };
            println!(
                "{} {} {} from {}",
                "✗".red().bold(),
                labels.target_label.bold(),
                headline.red(),
                labels.reference_label.bold()
            );
            println!("{text}");
        }
        OutputFormat::Json => {
            let body = match &error {
                CompareError::Diverged(divergence) => serde_json::json!({
                    "status": "diverged",
                    "divergence": divergence,
                    "report": text,
                }),
                CompareError::DepthLimitExceeded { path, limit } => serde_json::json!({
                    "status": "depth_limit_exceeded",
                    "path": path,
                    "limit": limit,
                    "report": text,
                }),
            };
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }
    Ok(Outcome::Failure)
}

fn cmd_locate(args: LocateArgs, format: &OutputFormat) -> anyhow::Result<Outcome> {
    let tree = read_tree(&args.tree, DEFAULT_MAX_NESTING)?;
    let path: PathTrace = args.path.parse()?;
    let anchor = path.ancestor(args.trim);

    let Some(subtree) = resolve(&tree, &path, args.trim) else {
        eprintln!("{} path {} not found", "✗".red().bold(), anchor.to_dotted().yellow());
        return Ok(Outcome::Failure);
    };

    match format {
        OutputFormat::Text => println!("{}", render(subtree, args.depth)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(subtree)?),
    }
    Ok(Outcome::Success)
}
