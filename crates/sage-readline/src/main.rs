use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::{Result, bail};
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use sage_application::{ChatService, DocumentQaService, LearningPathService};
use sage_core::SageError;
use sage_core::config::AppConfig;
use sage_core::plan::{
    LearningPath, LearningPathRequest, MAX_DURATION_WEEKS, MAX_HOURS_PER_WEEK, MIN_DURATION_WEEKS,
    MIN_HOURS_PER_WEEK,
};
use sage_core::session::Conversation;
use sage_infrastructure::ConfigStorage;
use sage_interaction::{CompletionProvider, GroqApiProvider};

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: vec![
                "/ask".to_string(),
                "/learn".to_string(),
                "/new".to_string(),
                "/help".to_string(),
            ],
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// The main entry point for the SAGE REPL.
///
/// Startup order matters: configuration is loaded first, then the provider.
/// A missing API key is fatal and the interactive loop never starts.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // ===== Configuration =====
    let config = match ConfigStorage::new().and_then(|storage| storage.load_or_default()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!(
                "{}",
                format!("Warning: could not read config.toml ({err}); using defaults").yellow()
            );
            AppConfig::default()
        }
    };

    let provider = match GroqApiProvider::try_from_env() {
        Ok(provider) => provider,
        Err(err) => {
            eprintln!("{}", err.to_string().red().bold());
            eprintln!(
                "{}",
                "Add an API key to ~/.config/sage/secret.json or set GROQ_API_KEY.".red()
            );
            bail!("missing provider credentials");
        }
    };
    let provider: Arc<dyn CompletionProvider> = Arc::new(provider);

    // ===== Services =====
    let chat = ChatService::new(provider.clone(), config.chat.clone());
    let learning_path = LearningPathService::new(provider.clone(), config.learning_path.clone());
    let document_qa = DocumentQaService::new(provider.clone(), config.document_qa.clone());

    // ===== REPL Setup =====
    let helper = CliHelper::new();
    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== SAGE ===".bright_magenta().bold());
    println!(
        "{}",
        format!("Connected to {}.", provider.describe()).bright_black()
    );
    println!(
        "{}",
        "Chat by typing a message. '/ask <question>' for document QA, '/learn' for a learning path, '/help' for all commands."
            .bright_black()
    );
    println!();

    // The conversation is owned here and handed to the chat service per turn.
    let mut conversation = Conversation::new();

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                if trimmed == "/help" {
                    print_help();
                    continue;
                }

                if trimmed == "/new" {
                    conversation = Conversation::new();
                    println!("{}", "Started a new conversation.".bright_green());
                    continue;
                }

                if trimmed == "/ask" || trimmed.starts_with("/ask ") {
                    let question = trimmed.strip_prefix("/ask").unwrap_or_default();
                    handle_question(&document_qa, question).await;
                    continue;
                }

                if trimmed == "/learn" {
                    handle_learning_path(&mut rl, &learning_path).await?;
                    continue;
                }

                if trimmed.starts_with('/') {
                    println!("{}", "Unknown command".bright_black());
                    continue;
                }

                handle_chat(&chat, &mut conversation, trimmed).await;
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}

/// Sends one chat turn and renders the reply. The interface blocks until the
/// remote call returns.
async fn handle_chat(chat: &ChatService, conversation: &mut Conversation, input: &str) {
    println!("{}", format!("> {}", input).green());

    match chat.send_message(conversation, input).await {
        Ok(reply) => {
            for line in reply.lines() {
                println!("{}", line.bright_blue());
            }
            println!();
        }
        Err(err) => print_error(&err),
    }
}

/// Runs a question through the document-QA pipeline.
async fn handle_question(service: &DocumentQaService, question: &str) {
    let question = question.trim();
    if question.is_empty() {
        println!("{}", "Please enter a question: /ask <question>".yellow());
        return;
    }

    println!("{}", "Processing your question...".bright_black());

    match service.answer(question).await {
        Ok(outcome) => {
            println!("{}", format!("[route: {}]", outcome.route).bright_magenta());
            for record in &outcome.transcript {
                if record.step != "answer" {
                    println!("{}", format!("  {} ✓", record.step).bright_black());
                }
            }
            for line in outcome.answer.lines() {
                println!("{}", line.bright_blue());
            }
            println!();
        }
        Err(err) => print_error(&err),
    }
}

/// Walks the learning-path form and renders the generated plan.
async fn handle_learning_path(
    rl: &mut Editor<CliHelper, DefaultHistory>,
    service: &LearningPathService,
) -> Result<()> {
    println!("{}", "Learning path setup (CTRL-C cancels)".bright_yellow());

    let Some(topic) = prompt_text(rl, "What topic would you like to learn? ", true)? else {
        return Ok(());
    };
    let Some(focus) = prompt_text(rl, "Any specific aspect to focus on? (optional) ", false)?
    else {
        return Ok(());
    };
    let Some(duration_weeks) =
        prompt_number(rl, "Duration (weeks)", MIN_DURATION_WEEKS, MAX_DURATION_WEEKS)?
    else {
        return Ok(());
    };
    let Some(hours_per_week) =
        prompt_number(rl, "Hours per week", MIN_HOURS_PER_WEEK, MAX_HOURS_PER_WEEK)?
    else {
        return Ok(());
    };

    let request = LearningPathRequest {
        topic,
        focus,
        duration_weeks,
        hours_per_week,
    };

    println!("{}", "Creating your personalized learning path...".bright_black());

    match service.generate(&request).await {
        Ok(plan) => display_learning_path(&plan),
        Err(err) => print_error(&err),
    }

    Ok(())
}

/// Reads a line of text. Returns `None` when the user cancels with
/// CTRL-C/CTRL-D. Required fields re-prompt on empty input.
fn prompt_text(
    rl: &mut Editor<CliHelper, DefaultHistory>,
    label: &str,
    required: bool,
) -> Result<Option<String>> {
    loop {
        match rl.readline(label) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() && required {
                    println!("{}", "This field is required.".yellow());
                    continue;
                }
                return Ok(Some(trimmed.to_string()));
            }
            Err(rustyline::error::ReadlineError::Interrupted)
            | Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "Cancelled.".yellow());
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        }
    }
}

/// Reads a bounded number, re-prompting until the input parses and is within
/// range. Returns `None` when the user cancels.
fn prompt_number(
    rl: &mut Editor<CliHelper, DefaultHistory>,
    label: &str,
    min: u32,
    max: u32,
) -> Result<Option<u32>> {
    loop {
        match rl.readline(&format!("{} [{}-{}]: ", label, min, max)) {
            Ok(line) => match line.trim().parse::<u32>() {
                Ok(value) if (min..=max).contains(&value) => return Ok(Some(value)),
                Ok(value) => {
                    println!(
                        "{}",
                        format!("{} must be between {} and {}, got {}.", label, min, max, value)
                            .yellow()
                    );
                }
                Err(_) => {
                    println!("{}", "Please enter a whole number.".yellow());
                }
            },
            Err(rustyline::error::ReadlineError::Interrupted)
            | Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "Cancelled.".yellow());
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        }
    }
}

/// Renders the plan: overview metrics, the weekly schedule, and the
/// recommendations block.
fn display_learning_path(plan: &LearningPath) {
    println!();
    println!("{}", "Your Customized Learning Path".bright_magenta().bold());
    println!(
        "{}",
        format!(
            "Total Weeks: {}   Hours per Week: {}   Total Hours: {}",
            plan.total_weeks, plan.hours_per_week, plan.total_hours
        )
        .bold()
    );
    println!();

    println!("{}", "Weekly Schedule".bright_magenta());
    for week in &plan.weeks {
        println!("{}", format!("Week {}", week.week).bright_yellow());
        println!("  Focus: {}", week.focus);
        println!("  Activities:");
        for activity in &week.activities {
            println!("    - {} ({:.1} hours)", activity.label, activity.hours);
        }
    }
    println!();

    println!("{}", "Learning Recommendations".bright_magenta());
    println!(
        "  - Break your {} weekly hours into ~{:.1} hour study blocks",
        plan.hours_per_week,
        plan.study_block_hours()
    );
    if plan.focus.is_empty() {
        println!(
            "  - Balance {} fundamentals with regular practice",
            plan.topic
        );
    } else {
        println!("  - Balance {} fundamentals and {}", plan.topic, plan.focus);
    }
    println!("  - Include regular practice and project work");
    println!();
}

/// Validation problems are warnings; everything else is an error.
fn print_error(err: &SageError) {
    if err.is_validation() {
        println!("{}", format!("Warning: {}", err).yellow());
    } else if err.is_retryable() {
        println!("{}", format!("Error: {} (you can try again)", err).red());
    } else {
        println!("{}", format!("Error: {}", err).red());
    }
}

fn print_help() {
    println!("{}", "Commands:".bright_yellow());
    println!("  /ask <question>  Answer a question through the document-QA pipeline");
    println!("  /learn           Generate a learning path");
    println!("  /new             Start a fresh conversation");
    println!("  /help            Show this help");
    println!("  quit             Exit");
}
