//! Command dispatch and rendering

use std::io;
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::services::{InterviewOutcome, Transcript, TreeSource};
use crate::application::AnswerVocabulary;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::{output, render};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{Questionnaire, TraversalSession};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Some(Commands::Completion { shell }) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let local_dir = resolve_local_dir(cli)?;
    let mut settings = Settings::load(Some(local_dir.as_path()))?;
    if let Some(tree) = &cli.tree {
        settings.tree = Some(tree.clone());
    }
    if !settings.color {
        colored::control::set_override(false);
    }
    debug!("settings: {:?}", settings);

    let container = ServiceContainer::new(settings);
    match &cli.command {
        None => cmd_run(&container, false),
        Some(Commands::Run { once }) => cmd_run(&container, *once),
        Some(Commands::Replay { answers }) => cmd_replay(&container, answers),
        Some(Commands::Check) => cmd_check(&container),
        Some(Commands::Show) => cmd_show(&container),
        Some(Commands::Config { command }) => cmd_config(&container, &local_dir, command),
        Some(Commands::Info) => cmd_info(&container, &local_dir),
        Some(Commands::Completion { .. }) => Ok(()),
    }
}

fn resolve_local_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.dir {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir()
            .map_err(|e| CliError::Infra(InfraError::io("determine current directory", e))),
    }
}

fn tree_source(container: &ServiceContainer) -> TreeSource {
    TreeSource::from_option(container.settings.tree.as_deref())
}

fn load_questionnaire(container: &ServiceContainer) -> CliResult<Questionnaire> {
    let source = tree_source(container);
    Ok(container.questionnaire.load(&source)?)
}

fn render_heading(questionnaire: &Questionnaire) {
    output::header(&questionnaire.title);
    if let Some(tagline) = &questionnaire.tagline {
        output::info(tagline);
    }
    println!();
}

fn render_transcript(transcript: &Transcript) {
    for step in &transcript.steps {
        output::answered(step.number, &step.prompt, step.answer);
    }
    if let Some(result) = &transcript.result {
        output::classification(&result.label, &result.description);
    }
}

#[instrument(skip(container))]
fn cmd_run(container: &ServiceContainer, once: bool) -> CliResult<()> {
    let questionnaire = load_questionnaire(container)?;
    render_heading(&questionnaire);

    let mut session = TraversalSession::new(&questionnaire.tree);
    loop {
        match container.interview.interview(&mut session)? {
            InterviewOutcome::Abandoned => {
                println!();
                output::warning("input ended before a result was reached");
                return Ok(());
            }
            InterviewOutcome::Completed => {
                if let Some(result) = session.result() {
                    output::classification(&result.label, &result.description);
                }
            }
        }

        println!();
        if once || !container.interview.confirm("もう一度?")? {
            return Ok(());
        }
        session.reset();
        println!();
    }
}

#[instrument(skip(container))]
fn cmd_replay(container: &ServiceContainer, answers: &[String]) -> CliResult<()> {
    let vocabulary = AnswerVocabulary::from_settings(&container.settings);
    let values = parse_answers(&vocabulary, answers)?;

    let questionnaire = load_questionnaire(container)?;
    let transcript = container.questionnaire.replay(&questionnaire, &values)?;

    render_heading(&questionnaire);
    render_transcript(&transcript);
    if !transcript.is_complete() {
        println!();
        output::warning(&format!(
            "no result yet, path so far: {}",
            transcript.path().iter().join(" → ")
        ));
    }
    Ok(())
}

/// Map replay tokens onto answers, rejecting the first unknown token.
fn parse_answers(vocabulary: &AnswerVocabulary, answers: &[String]) -> CliResult<Vec<bool>> {
    answers
        .iter()
        .map(|token| {
            vocabulary.parse(token).ok_or_else(|| {
                CliError::InvalidArgs(format!(
                    "'{}' is not an answer, expected {}",
                    token,
                    vocabulary.hint()
                ))
            })
        })
        .collect()
}

#[instrument(skip(container))]
fn cmd_check(container: &ServiceContainer) -> CliResult<()> {
    let source = tree_source(container);
    let questionnaire = container.questionnaire.load(&source)?;
    let report = container.questionnaire.check(&questionnaire);

    output::header(&format!("{} ({})", questionnaire.title, source));
    output::detail(&format!("questions: {}", report.question_count));
    output::detail(&format!("results:   {}", report.result_labels.iter().join(", ")));
    if let Some(longest) = report.longest_walk {
        output::detail(&format!("longest walk: {} questions", longest));
    }

    if report.is_clean() {
        output::success("all questions reachable, no loops");
        return Ok(());
    }
    let mut problems = Vec::new();
    if !report.unreachable.is_empty() {
        let listed = report.unreachable.iter().map(|i| format!("#{}", i)).join(", ");
        output::failure(&format!("unreachable questions: {}", listed));
        problems.push(format!("{} unreachable", report.unreachable.len()));
    }
    if let Some(idx) = report.cycle_at {
        output::failure(&format!("loop through question #{}", idx));
        problems.push(format!("loop at #{}", idx));
    }
    Err(CliError::CheckFailed(problems.join(", ")))
}

#[instrument(skip(container))]
fn cmd_show(container: &ServiceContainer) -> CliResult<()> {
    let questionnaire = load_questionnaire(container)?;
    output::header(&questionnaire.title);
    output::info(&render::to_display_tree(&questionnaire.tree));
    Ok(())
}

fn cmd_config(
    container: &ServiceContainer,
    local_dir: &std::path::Path,
    command: &ConfigCommands,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::action("global", &"(no config directory)"),
            }
            output::action("local", &local_config_path(local_dir).display());
        }
        ConfigCommands::Template => {
            output::info(&Settings::template());
        }
    }
    Ok(())
}

fn cmd_info(container: &ServiceContainer, local_dir: &std::path::Path) -> CliResult<()> {
    let source = tree_source(container);
    output::action("version", &env!("CARGO_PKG_VERSION"));
    output::action("tree", &source);
    if let Some(path) = global_config_path() {
        output::action("global config", &path.display());
    }
    output::action("local config", &local_config_path(local_dir).display());

    match container.questionnaire.load(&source) {
        Ok(questionnaire) => {
            output::action("title", &questionnaire.title);
            output::action("questions", &questionnaire.tree.len());
        }
        Err(e) => output::error(&e),
    }
    Ok(())
}
