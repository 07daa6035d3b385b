use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use ottochat_chat::{default_starters, ChatSession, SessionConfig};
use ottochat_logging::{get_logs_dir, ConversationLogger};
use ottochat_models::{ContactMethod, FormField, Role};

use crate::cli::Cli;

/// Starter chips are offered only while the conversation is this young
const STARTER_WINDOW: usize = 4;

/// Run the widget as an interactive terminal session.
pub async fn run_repl_mode(cli: &Cli) -> Result<()> {
    println!("{}", "🤖 Otto - Fluxstream's AI assistant".bright_cyan().bold());
    println!(
        "{}",
        "Type 'exit' or 'quit' to leave. A number picks a conversation starter.\n".bright_black()
    );

    let mut config = SessionConfig::default();
    if let Some(url) = &cli.assistant_url {
        config.assistant_url = url.clone();
    }
    if let Some(url) = &cli.webhook_url {
        config.webhook_url = url.clone();
    }
    config.greeting_seed = cli.seed;

    let mut session = ChatSession::new(config);

    if !cli.no_log {
        match setup_logger().await {
            Ok(logger) => {
                println!(
                    "{}",
                    format!("Transcript: {}", logger.file_path().display()).bright_black()
                );
                session.set_logger(logger);
            }
            Err(e) => eprintln!("{} Transcript logging disabled: {:#}", "⚠️".yellow(), e),
        }
    }

    let starters = default_starters();
    let mut rendered = 0;

    show_typing();
    session.initialize().await;
    rendered = render_new_messages(&session, rendered);

    let mut rl = DefaultEditor::new()?;

    loop {
        if session.is_contact_form_active() {
            run_contact_form(&mut rl, &mut session).await?;
            rendered = render_new_messages(&session, rendered);
            continue;
        }

        if session.messages().len() < STARTER_WINDOW {
            show_starters(&starters);
        }

        let readline = rl.readline(&"you> ".bright_green().to_string());
        match readline {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                if line == "exit" || line == "quit" {
                    break;
                }
                let _ = rl.add_history_entry(&line);

                // A bare number picks a starter while the chips are shown
                if session.messages().len() < STARTER_WINDOW {
                    if let Ok(choice) = line.parse::<usize>() {
                        if (1..=starters.len()).contains(&choice) {
                            show_typing();
                            session.select_conversation_starter(&starters[choice - 1]).await;
                            rendered = render_new_messages(&session, rendered);
                            continue;
                        }
                    }
                }

                show_typing();
                session.submit_user_message(&line).await;
                rendered = render_new_messages(&session, rendered);
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Error: {}", e);
                break;
            }
        }
    }

    session.close();
    println!("{}", "\n👋 Thanks for stopping by Fluxstream!".bright_cyan());
    Ok(())
}

async fn setup_logger() -> Result<ConversationLogger> {
    let logs_dir = get_logs_dir()?;
    ConversationLogger::new(&logs_dir).await
}

/// Walk the user through the inline contact form, field by field, then
/// submit. If validation fails the session keeps the form open and the
/// caller loops back in here.
async fn run_contact_form(rl: &mut DefaultEditor, session: &mut ChatSession) -> Result<()> {
    println!("{}", "-- Contact form --".bright_black());

    let name = rl.readline("  Name: ")?;
    session.update_form_field(FormField::Name, name.trim());

    let method = rl.readline("  Contact method (email/phone) [email]: ")?;
    session.update_form_field(FormField::ContactMethod, method.trim());

    let details_prompt = match session.contact_form().contact_method {
        ContactMethod::Email => "  Email address: ",
        ContactMethod::Phone => "  Phone number: ",
    };
    let details = rl.readline(details_prompt)?;
    session.update_form_field(FormField::ContactDetails, details.trim());

    let message = rl.readline("  Message for Reid: ")?;
    session.update_form_field(FormField::Message, message.trim());

    show_typing();
    session.submit_contact_form().await;
    Ok(())
}

fn show_starters(starters: &[ottochat_chat::ConversationStarter]) {
    let chips = starters
        .iter()
        .enumerate()
        .map(|(i, s)| format!("[{}] {}", i + 1, s.display_text))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", chips.bright_blue());
}

fn render_new_messages(session: &ChatSession, rendered: usize) -> usize {
    for msg in &session.messages()[rendered..] {
        match msg.role {
            Role::Assistant if msg.is_form => {
                println!("{}", "otto> [contact form opens below]".bright_magenta());
            }
            Role::Assistant => println!("{} {}", "otto>".bright_magenta(), msg.content),
            // The user's own line is already on screen
            Role::User => {}
        }
    }
    session.messages().len()
}

fn show_typing() {
    println!("{}", "otto is typing...".bright_black());
}
