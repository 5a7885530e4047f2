//! Command handlers

use apuntar::{
    create_error_from_validation_result, format_target, ActionType, ApuntarError, ElementNode,
    ReportFormat, Target, Validator,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::commands::{Cli, Commands, SuggestArgs, TreeTargetArgs, ValidateArgs};
use crate::config::{CliConfig, Verbosity};
use crate::error::CliResult;
use crate::output::{render_suggestions_table, OutputFormat, Printer};
use crate::snapshot::load_tree;

/// Whether the checked target passed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Target passed
    Passed,
    /// Target failed; a report was printed
    Failed,
}

/// Build configuration from global flags, the config file and overrides
pub fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let mut config = CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(cli.color.clone().into());

    if let Some(path) = &cli.config {
        config = config.with_engine_file(path)?;
    }
    if let Some(viewport) = &cli.viewport {
        config = config.with_viewport_flag(viewport)?;
    }
    if let Commands::Suggest(args) = &cli.command {
        config = config.with_suggestion_overrides(args.max, args.min_similarity);
    }
    Ok(config)
}

/// Dispatch a parsed command
pub fn run(cli: &Cli, config: &CliConfig) -> CliResult<Outcome> {
    let printer = Printer::new(config.color.should_color(), config.verbosity.is_quiet());
    let validator = Validator::new(config.engine.clone());
    if config.verbosity.is_verbose() {
        let engine = &config.engine;
        printer.info(&format!(
            "Viewport {}x{}, up to {} suggestions at {}% similarity or better",
            engine.viewport.width,
            engine.viewport.height,
            engine.suggestions.max_suggestions,
            engine.suggestions.min_similarity
        ));
    }

    match &cli.command {
        Commands::Validate(args) => run_validate(&validator, &printer, args),
        Commands::Resolve(args) => run_resolve(&validator, &printer, args),
        Commands::Check(args) => run_check(&validator, &printer, args),
        Commands::Suggest(args) => run_suggest(&validator, &printer, args),
    }
}

fn load_input(args: &TreeTargetArgs) -> CliResult<(ElementNode, Target)> {
    let target: Target = args.target.parse()?;
    let tree = load_tree(&args.tree)?;
    info!(selector = %target, tree = %args.tree.display(), "loaded input");
    Ok((tree, target))
}

fn to_json<T: Serialize>(value: &T) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(value).map_err(ApuntarError::from)?)
}

/// Validate a target for an action and render a report on failure
pub fn run_validate(validator: &Validator, printer: &Printer, args: &ValidateArgs) -> CliResult<Outcome> {
    let (tree, target) = load_input(&args.input)?;
    let action = ActionType::from(args.action.as_str());
    if let ActionType::Other(name) = &action {
        warn!(action = %name, "unknown action, validating with the default policy");
    }

    let result = validator.validate_for_action(&target, &tree, &action);
    if result.valid {
        let message = result.message.unwrap_or_else(|| format!("{target} is valid"));
        printer.success(&format!("{action}: {message}"));
        return Ok(Outcome::Passed);
    }

    let mut error = create_error_from_validation_result(&result, &target)?;
    if let Some(path) = &args.screenshot {
        error = error.with_screenshot(path);
    }
    printer.result(&ReportFormat::from(args.format).render(&error)?);
    Ok(Outcome::Failed)
}

/// Resolve a target and print the element
pub fn run_resolve(validator: &Validator, printer: &Printer, args: &TreeTargetArgs) -> CliResult<Outcome> {
    let (tree, target) = load_input(args)?;
    match validator.resolve(&target, &tree) {
        Some(element) => {
            printer.result(&to_json(element)?);
            Ok(Outcome::Passed)
        }
        None => {
            printer.failure(&format!("No element matches {}", format_target(&target)));
            Ok(Outcome::Failed)
        }
    }
}

/// Resolve a target and print its hittability verdict
pub fn run_check(validator: &Validator, printer: &Printer, args: &TreeTargetArgs) -> CliResult<Outcome> {
    let (tree, target) = load_input(args)?;
    let Some(element) = validator.resolve(&target, &tree) else {
        printer.failure(&format!("No element matches {}", format_target(&target)));
        return Ok(Outcome::Failed);
    };

    let result = validator.check_hittable(element, &tree);
    printer.result(&to_json(&result)?);
    Ok(if result.hittable {
        Outcome::Passed
    } else {
        Outcome::Failed
    })
}

#[derive(Serialize)]
struct SuggestionRow<'a> {
    target: String,
    similarity: u8,
    reason: &'a str,
    element: &'a ElementNode,
}

/// Rank alternatives for a target
pub fn run_suggest(validator: &Validator, printer: &Printer, args: &SuggestArgs) -> CliResult<Outcome> {
    let (tree, target) = load_input(&args.input)?;
    let suggestions = validator.suggest(&target, &tree);

    match OutputFormat::from(args.format) {
        OutputFormat::Text => printer.result(&render_suggestions_table(&suggestions, printer.use_color)),
        OutputFormat::Json => {
            let rows: Vec<SuggestionRow<'_>> = suggestions
                .iter()
                .map(|s| SuggestionRow {
                    target: format_target(&s.target),
                    similarity: s.similarity,
                    reason: &s.reason,
                    element: &s.element,
                })
                .collect();
            printer.result(&to_json(&rows)?);
        }
    }
    Ok(Outcome::Passed)
}
