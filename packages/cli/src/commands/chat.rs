// ABOUTME: Interactive chat session command
// ABOUTME: Runs the REPL loop, slash commands, and the document request form flow

use colored::Colorize;
use inquire::{Confirm, CustomType, MultiSelect, Text};
use tokio::time::{self, MissedTickBehavior};

use baac_chat::{Catalog, ChatController, CopiesOutcome, SubmitControl};
use baac_client::BaacClient;
use baac_config::Config;

use crate::input::LineReader;
use crate::surface::TerminalSurface;

use super::{chats, limits};

pub async fn run(client: BaacClient, config: &Config, guest: bool) -> anyhow::Result<()> {
    let signed_in = !guest && config.session_user.is_some();
    print_banner(&client, config, signed_in);

    let surface = TerminalSurface::new(signed_in);
    let mut ctrl = ChatController::new(client, surface);
    ctrl.start().await;

    println!("{}", "Type /help for commands, /quit to exit.".dimmed());
    println!();

    let mut reader = LineReader::spawn();
    let mut rollover = time::interval(config.rollover_poll);
    rollover.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick resolves immediately; consume it before the loop.
    rollover.tick().await;

    let prompt = format!("{} ", "you>".cyan().bold());
    loop {
        tokio::select! {
            line = reader.read_line(&prompt) => {
                let Some(line) = line else { break };
                if !handle_line(&mut ctrl, &line).await {
                    break;
                }
            }
            _ = rollover.tick() => {
                ctrl.check_day_rollover().await;
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}

fn print_banner(client: &BaacClient, config: &Config, signed_in: bool) {
    println!(
        "{}",
        "BAAC - Barangay Amungan Assistant Chatbot".green().bold()
    );
    println!("{} {}", "Server:".dimmed(), client.base_url());
    let session = if signed_in {
        match &config.session_user {
            Some(user) => format!("signed in as {user}"),
            None => "signed in".to_string(),
        }
    } else {
        "guest (document requests locked)".to_string()
    };
    println!("{} {}", "Session:".dimmed(), session);
    println!();
}

/// Returns `false` when the session should end.
async fn handle_line(ctrl: &mut ChatController<TerminalSurface>, line: &str) -> bool {
    let line = line.trim();
    if line.is_empty() {
        return true;
    }
    if let Some(rest) = line.strip_prefix('/') {
        let mut parts = rest.splitn(2, char::is_whitespace);
        let command = parts.next().unwrap_or("");
        let argument = parts.next().unwrap_or("").trim();
        return run_command(ctrl, command, argument).await;
    }
    ctrl.submit_prompt(line).await;
    true
}

async fn run_command(
    ctrl: &mut ChatController<TerminalSurface>,
    command: &str,
    argument: &str,
) -> bool {
    match command {
        "help" => print_help(),
        "quit" | "exit" => return false,
        "new" => ctrl.create_chat().await,
        "chats" => {
            ctrl.reload_chats().await;
            if ctrl.chats().is_empty() {
                println!("No chat history found.");
                println!(
                    "{}",
                    "Start a new conversation to create your first chat.".dimmed()
                );
            } else {
                println!("{}", chats::render_table(ctrl.chats()));
            }
        }
        "open" => match argument.parse::<i64>() {
            Ok(chat_id) => ctrl.load_chat(chat_id).await,
            Err(_) => println!("{}", "Usage: /open <chat id>".yellow()),
        },
        "rename" => match ctrl.current_chat() {
            None => println!("{}", "Please select a chat first".yellow()),
            Some(chat_id) => {
                if argument.is_empty() {
                    println!("{}", "Usage: /rename <new title>".yellow());
                } else {
                    ctrl.rename_chat(chat_id, argument).await;
                }
            }
        },
        "delete" => {
            let target = if argument.is_empty() {
                ctrl.current_chat()
            } else {
                argument.parse().ok()
            };
            match target {
                Some(chat_id) => delete_with_confirmation(ctrl, chat_id).await,
                None => println!("{}", "Usage: /delete <chat id>".yellow()),
            }
        }
        "form" => form_flow(ctrl, argument).await,
        "limits" => {
            ctrl.refresh_limits().await;
            println!("{}", limits::render_table(ctrl.catalog(), ctrl.ledger()));
        }
        other => println!("Unknown command '/{other}'. Type /help for the list."),
    }
    true
}

async fn delete_with_confirmation(ctrl: &mut ChatController<TerminalSurface>, chat_id: i64) {
    let confirmed =
        Confirm::new("Are you sure you want to delete this chat? This action cannot be undone.")
            .with_default(false)
            .prompt()
            .unwrap_or(false);
    if confirmed {
        ctrl.delete_chat(chat_id).await;
    }
}

/// Walks the document request form: selection, copies, purposes, date,
/// then a final confirmation mirroring the submit control.
async fn form_flow(ctrl: &mut ChatController<TerminalSurface>, argument: &str) {
    let preselected = if argument.is_empty() {
        Vec::new()
    } else {
        vec![argument.to_lowercase()]
    };
    ctrl.open_form(&preselected).await;
    if ctrl.form().is_none() {
        // Guests get the auth card instead of a form.
        return;
    }
    if !choose_documents(ctrl) {
        return;
    }
    if !collect_details(ctrl) {
        return;
    }
    review_and_submit(ctrl).await;
}

fn choose_documents(ctrl: &mut ChatController<TerminalSurface>) -> bool {
    let docs = ctrl.catalog().entries().to_vec();
    let mut labels = Vec::new();
    let mut names = Vec::new();
    let mut defaults = Vec::new();
    for doc in &docs {
        if ctrl.ledger().is_exhausted(doc.name) {
            println!(
                "{}",
                format!(
                    "⏰ {} - daily limit reached, available tomorrow",
                    doc.display_name
                )
                .dimmed()
            );
            continue;
        }
        if ctrl.form().is_some_and(|form| form.is_selected(doc.name)) {
            defaults.push(names.len());
        }
        labels.push(format!("{} {}", doc.icon, doc.display_name));
        names.push(doc.name);
    }
    if names.is_empty() {
        println!("{}", "Daily limit reached. Available tomorrow.".yellow());
        ctrl.close_form();
        return false;
    }

    let chosen = match MultiSelect::new("Documents to request:", labels.clone())
        .with_default(&defaults)
        .prompt()
    {
        Ok(chosen) => chosen,
        Err(_) => return cancel(ctrl),
    };

    for (index, name) in names.iter().enumerate() {
        let wanted = chosen.contains(&labels[index]);
        let selected = ctrl.form().is_some_and(|form| form.is_selected(name));
        if wanted != selected {
            ctrl.toggle_document(name);
        }
    }
    true
}

fn collect_details(ctrl: &mut ChatController<TerminalSurface>) -> bool {
    let names: Vec<String> = ctrl
        .form()
        .map(|form| form.drafts().iter().map(|draft| draft.name.clone()).collect())
        .unwrap_or_default();
    if names.is_empty() {
        return cancel(ctrl);
    }

    for name in &names {
        let display = document_label(name);

        let max = ctrl.ledger().max_copies(name);
        if max > 1 {
            loop {
                let copies = match CustomType::<u32>::new(&format!("Copies of {display}:"))
                    .with_default(1)
                    .with_help_message(&format!("1 to {max}"))
                    .prompt()
                {
                    Ok(copies) => copies,
                    Err(_) => return cancel(ctrl),
                };
                match ctrl.set_copies(name, copies) {
                    Some(CopiesOutcome::OutOfBounds { max }) => {
                        println!("{}", format!("Enter a value between 1 and {max}.").yellow());
                    }
                    _ => break,
                }
            }
        }

        loop {
            let purpose = match Text::new(&format!("Purpose for {display}:")).prompt() {
                Ok(purpose) => purpose,
                Err(_) => return cancel(ctrl),
            };
            let trimmed = purpose.trim();
            if trimmed.is_empty() {
                println!(
                    "{}",
                    format!("Please fill in the purpose for {display}").yellow()
                );
                continue;
            }
            ctrl.set_purpose(name, trimmed);
            break;
        }
    }

    let current = ctrl
        .form()
        .map(|form| form.date().to_string())
        .unwrap_or_default();
    let date = match Text::new("Date needed (YYYY-MM-DD):")
        .with_initial_value(&current)
        .prompt()
    {
        Ok(date) => date,
        Err(_) => return cancel(ctrl),
    };
    let trimmed = date.trim();
    if !trimmed.is_empty() {
        ctrl.set_date(trimmed);
    }
    true
}

async fn review_and_submit(ctrl: &mut ChatController<TerminalSurface>) {
    println!();
    println!("{}", "Request summary".bold());
    let control = match ctrl.form() {
        Some(form) => {
            for draft in form.drafts() {
                let copies = if draft.copies == 1 {
                    "1 copy".to_string()
                } else {
                    format!("{} copies", draft.copies)
                };
                println!(
                    "  {} - {} - {}",
                    document_label(&draft.name),
                    copies,
                    draft.purpose
                );
            }
            println!("  Date needed: {}", form.date());
            form.submit_control(ctrl.ledger())
        }
        None => return,
    };

    match control {
        SubmitControl::Enabled { label } => {
            let confirmed = Confirm::new(&format!("{label}?"))
                .with_default(false)
                .prompt()
                .unwrap_or(false);
            if confirmed {
                ctrl.submit_form().await;
            } else {
                cancel(ctrl);
            }
        }
        SubmitControl::Hidden => {
            println!("{}", "Daily limit reached. Available tomorrow.".yellow());
            ctrl.close_form();
        }
        SubmitControl::Disabled => {
            cancel(ctrl);
        }
    }
}

fn cancel(ctrl: &mut ChatController<TerminalSurface>) -> bool {
    ctrl.close_form();
    println!("Request canceled.");
    false
}

fn document_label(name: &str) -> String {
    Catalog::standard()
        .get(name)
        .map(|doc| doc.display_name.to_string())
        .unwrap_or_else(|| name.to_string())
}

fn print_help() {
    println!("{}", "Commands".bold());
    println!("  /new                Start a new chat");
    println!("  /chats              List your chats");
    println!("  /open <id>          Open a chat");
    println!("  /rename <title>     Rename the current chat");
    println!("  /delete [<id>]      Delete a chat (defaults to the current one)");
    println!("  /form [<document>]  Open the document request form");
    println!("  /limits             Show today's copy limits");
    println!("  /help               Show this help");
    println!("  /quit               Exit");
    println!();
    println!("Anything else is sent to BAAC as a message.");
}
