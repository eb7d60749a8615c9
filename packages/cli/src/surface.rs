// ABOUTME: Terminal rendering of chat events, cards, and notices
// ABOUTME: Implements ChatSurface for the interactive `baac chat` session

use chrono::Utc;
use colored::Colorize;

use baac_chat::{
    Author, Card, Catalog, ChatSurface, LimitLedger, Notice, RequestForm, ResetCountdown,
    TranscriptEntry,
};
use baac_client::ChatSummary;

pub struct TerminalSurface {
    signed_in: bool,
    catalog: Catalog,
    /// Document names whose daily allowance is spent, per the last refresh.
    spent: Vec<String>,
}

impl TerminalSurface {
    pub fn new(signed_in: bool) -> Self {
        Self {
            signed_in,
            catalog: Catalog::standard(),
            spent: Vec::new(),
        }
    }

    fn is_spent(&self, document_type: &str) -> bool {
        self.spent.iter().any(|name| name == document_type)
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

impl ChatSurface for TerminalSurface {
    fn is_signed_in(&self) -> bool {
        self.signed_in
    }

    fn message_appended(&mut self, entry: &TranscriptEntry) {
        let label = match entry.author {
            Author::User => entry.author_label().cyan().bold(),
            Author::Assistant => entry.author_label().green().bold(),
        };
        println!("{}: {}", label, entry.body);
    }

    fn card_shown(&mut self, card: &Card) {
        println!();
        match card {
            Card::FormSuggestion {
                document_type,
                limit_reached: true,
            } => {
                println!("{}", "⏰ Daily Limit Reached".red().bold());
                println!(
                    "  {} requests have reached the daily limit. Available tomorrow at 12:00 AM.",
                    capitalize_first(document_type)
                );
            }
            Card::FormSuggestion {
                document_type,
                limit_reached: false,
            } => {
                println!("{}", "📋 Document Request Available".green().bold());
                println!(
                    "  I can help you request a {}.",
                    capitalize_first(document_type)
                );
                println!(
                    "  {}",
                    format!("Type /form {document_type} to open the request form.").dimmed()
                );
            }
            Card::AllDocuments if self.signed_in => {
                println!("{}", "📋 Available Document Requests".green().bold());
                println!("  I can help you request any of the following documents:");
                for doc in self.catalog.entries() {
                    if self.is_spent(doc.name) {
                        println!(
                            "  {} {} {}",
                            doc.icon,
                            format!("{} (Limit Reached)", doc.display_name).bold(),
                            "Daily limit reached. Available tomorrow.".dimmed()
                        );
                    } else {
                        println!(
                            "  {} {} {}",
                            doc.icon,
                            doc.display_name.bold(),
                            doc.description.dimmed()
                        );
                    }
                }
                println!("  {}", "Type /form to open the request form.".dimmed());
            }
            Card::AllDocuments => {
                println!("{}", "📋 Available Document Requests".yellow().bold());
                println!(
                    "  I can help you request Barangay Clearance, Barangay Indigency, and \
                     Barangay Residency documents."
                );
                println!("  ⚠️ However, you need to be logged in to submit document requests.");
            }
            Card::AuthRequired { document_type } => {
                println!("{}", "🔐 Authentication Required".yellow().bold());
                println!(
                    "  You need to be logged in to request a {}.",
                    capitalize_first(document_type)
                );
                println!("  {}", "Run again without --guest to sign in.".dimmed());
            }
        }
        println!();
    }

    fn alert(&mut self, text: &str) {
        println!();
        println!("{}", "⚠ Alert".red().bold());
        for line in text.lines() {
            println!("  {line}");
        }
        println!();
    }

    fn notify(&mut self, kind: Notice, text: &str) {
        let mark = match kind {
            Notice::Success => "✓".green().bold(),
            Notice::Error => "✗".red().bold(),
            Notice::Info => "ℹ".blue().bold(),
        };
        println!("{mark} {text}");
    }

    fn form_updated(&mut self, _form: &RequestForm, _ledger: &LimitLedger) {
        // The interactive form flow narrates its own state.
    }

    fn form_closed(&mut self) {}

    fn limits_refreshed(&mut self, ledger: &LimitLedger) {
        self.spent = self
            .catalog
            .entries()
            .iter()
            .filter(|doc| ledger.is_exhausted(doc.name))
            .map(|doc| doc.name.to_string())
            .collect();
    }

    fn countdown_started(&mut self, countdown: ResetCountdown) {
        if let Some(left) = countdown.format_remaining(Utc::now()) {
            println!(
                "{} {} {}",
                "⏳ Next Reset In:".yellow().bold(),
                left,
                "(resets at 12:00 AM)".dimmed()
            );
        }
    }

    fn admin_redirect(&mut self, url: &str) {
        println!();
        println!("Admin session detected. Continue in your browser:");
        println!("  {url}");
        println!();
    }

    fn chat_opened(&mut self, chat_id: i64) {
        println!("{}", format!("── chat #{chat_id} ──").dimmed());
    }

    fn chat_list_updated(&mut self, _chats: &[ChatSummary]) {
        // Lists are rendered on demand by /chats.
    }

    fn transcript_cleared(&mut self) {
        println!();
    }
}
