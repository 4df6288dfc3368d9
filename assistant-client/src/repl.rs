//! Interactive loop: plain lines are questions, `/` lines are commands.

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Editor, Input};

use crate::{
    api_client::AssistantApi,
    context_panel::{ContextPanel, UpdateOutcome},
    session::{ChatMessage, ChatSession, Role},
};

const HELP: &str = "\
Commands:
  /context       show the cached company context
  /edit          edit the context in $EDITOR and save it
  /set <text>    replace the context with <text>
  /clear         clear the chat history
  /help          show this help
  /quit          exit
Anything else is sent as a question.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ask(String),
    ShowContext,
    Edit,
    Set(String),
    Clear,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Command::Ask(line.to_string());
        };
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((n, a)) => (n, a.trim()),
            None => (rest, ""),
        };
        match name.to_ascii_lowercase().as_str() {
            "context" => Command::ShowContext,
            "edit" => Command::Edit,
            "set" => Command::Set(arg.to_string()),
            "clear" => Command::Clear,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => Command::Unknown(name.to_string()),
        }
    }
}

/// Runs until `/quit` or end of input.
pub async fn run(api: &dyn AssistantApi) -> Result<()> {
    println!("{}", "AI Onboarding Assistant".bold());
    println!("{}", "Ask questions about company policies. Type /help for commands.".dimmed());

    let mut session = ChatSession::new();
    let mut panel = ContextPanel::load(api).await;
    if let Some(w) = panel.warning() {
        println!("{}", w.yellow());
    }

    loop {
        let line: String = match Input::new()
            .with_prompt("you")
            .allow_empty(true)
            .interact_text()
        {
            Ok(l) => l,
            // Closed stdin ends the session.
            Err(_) => break,
        };

        match Command::parse(&line) {
            Command::Empty => continue,
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::Clear => {
                session.clear();
                println!("{}", "Chat history cleared.".dimmed());
            }
            Command::ShowContext => match panel.cached() {
                Some(c) => println!("{c}"),
                None => println!("{}", "No context loaded.".yellow()),
            },
            Command::Set(text) => update_context(api, &mut panel, &text).await,
            Command::Edit => match Editor::new().edit(panel.editor_value()) {
                Ok(Some(text)) => update_context(api, &mut panel, &text).await,
                Ok(None) => println!("{}", "Edit cancelled.".dimmed()),
                Err(e) => println!("{}", format!("Could not open editor: {e}").red()),
            },
            Command::Unknown(name) => {
                println!("{}", format!("Unknown command /{name}. Type /help.").yellow())
            }
            Command::Ask(question) => {
                eprintln!("{}", "Thinking...".dimmed());
                let reply = session.submit(api, &question).await;
                print_message(reply);
            }
        }
    }

    Ok(())
}

/// Asks one question outside the loop; prints the reply the same way.
pub async fn ask_once(api: &dyn AssistantApi, question: &str) -> bool {
    let mut session = ChatSession::new();
    let reply = session.submit(api, question).await;
    print_message(reply);
    !reply.is_error
}

async fn update_context(api: &dyn AssistantApi, panel: &mut ContextPanel, text: &str) {
    eprintln!("{}", "Updating context...".dimmed());
    match panel.submit(api, text).await {
        UpdateOutcome::Updated => println!("{}", "Context updated successfully!".green()),
        UpdateOutcome::Rejected(w) => println!("{}", w.yellow()),
        UpdateOutcome::Failed(e) => println!("{}", e.red()),
    }
}

fn print_message(msg: &ChatMessage) {
    let label = match msg.role {
        Role::User => "you".bold(),
        Role::Assistant => "assistant".cyan().bold(),
    };
    if msg.is_error {
        println!("{label}: {}", msg.content.red());
    } else {
        println!("{label}: {}", msg.content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_and_questions() {
        assert_eq!(Command::parse("   "), Command::Empty);
        assert_eq!(
            Command::parse(" How many PTO days? "),
            Command::Ask("How many PTO days?".into())
        );
        assert_eq!(
            Command::parse("/set PTO policy: 20 days/year."),
            Command::Set("PTO policy: 20 days/year.".into())
        );
        assert_eq!(Command::parse("/set"), Command::Set(String::new()));
        assert_eq!(Command::parse("/CLEAR"), Command::Clear);
        assert_eq!(Command::parse("/exit"), Command::Quit);
        assert_eq!(Command::parse("/nope"), Command::Unknown("nope".into()));
    }
}
