//! Interactive chat REPL.

use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use claimclear_application::{DashboardService, Submission};
use claimclear_core::config::RootConfig;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tokio::sync::broadcast::error::RecvError;

use super::render::{format_profile, format_reference, format_state, print_event, print_message};

const SLASH_COMMANDS: [&str; 3] = ["/download", "/state", "/quit"];

/// Completion, highlighting and hints for slash commands.
#[derive(Clone)]
struct ChatHelper {
    commands: Vec<String>,
}

impl ChatHelper {
    fn new() -> Self {
        Self {
            commands: SLASH_COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn matching<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a String> + 'a {
        self.commands.iter().filter(move |cmd| cmd.starts_with(prefix))
    }
}

impl Helper for ChatHelper {}

impl Completer for ChatHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with('/') {
            return Ok((0, vec![]));
        }

        let candidates = self
            .matching(line)
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for ChatHelper {
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

impl Hinter for ChatHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return None;
        }
        self.matching(line)
            .find(|cmd| cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for ChatHelper {}

enum Command {
    Download,
    State,
    Quit,
}

/// Any other line, including unrecognised `/...` text, is a question.
fn parse_command(line: &str) -> Option<Command> {
    match line {
        "/download" => Some(Command::Download),
        "/state" => Some(Command::State),
        "/quit" | "/exit" => Some(Command::Quit),
        _ => None,
    }
}

/// Runs the chat REPL until `/quit` or end of input.
pub async fn run(config: &RootConfig) -> Result<()> {
    let dashboard = DashboardService::from_config(config);
    let profile = dashboard.profile().await?;
    let initials = profile.initials();
    let conversation = dashboard.conversation().clone();

    println!("{}", "=== ClaimClear ===".bright_magenta().bold());
    println!("{}", format_profile(&profile).bright_black());
    println!(
        "{}",
        "Ask about your claim, '/download' for the evidence package, '/state' for status, '/quit' to exit."
            .bright_black()
    );
    println!();

    for message in &conversation.current_state().await.messages {
        print_message(message, &initials);
    }

    // Everything after the greeting arrives as events
    let mut events = conversation.subscribe();
    let printer_initials = initials.clone();
    let printer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => print_event(&event, &printer_initials),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Chat view fell behind, some events were skipped");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let mut rl = Editor::new()?;
    rl.set_helper(Some(ChatHelper::new()));
    let prompt = format!("{}> ", initials);

    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();

                match parse_command(trimmed) {
                    Some(Command::Quit) => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Some(Command::Download) => match conversation.download_artifact().await {
                        Ok(reference) => println!("{}", format_reference(&reference).bright_green()),
                        Err(err) if err.is_artifact_unavailable() => {
                            println!("{}", "Evidence package unavailable".yellow());
                        }
                        Err(err) => eprintln!("{}", format!("Error: {}", err).red()),
                    },
                    Some(Command::State) => {
                        println!("{}", format_state(&conversation.current_state().await));
                    }
                    None => {
                        if trimmed.is_empty() {
                            continue;
                        }
                        let _ = rl.add_history_entry(line.as_str());

                        conversation.set_pending_input(line.as_str()).await;
                        match conversation.submit_pending().await {
                            Ok(Submission::Accepted(ticket)) => {
                                tracing::debug!(cycle = ticket.cycle.value(), "Submitted");
                            }
                            Ok(Submission::Ignored) => {}
                            Err(err) => eprintln!("{}", format!("{}", err).red()),
                        }
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type '/quit' to exit.".yellow());
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

    printer.abort();
    Ok(())
}
