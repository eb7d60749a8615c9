// ABOUTME: `baac chats` command that lists the user's chat history

use chrono::{DateTime, Datelike, Local, Utc};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use baac_client::{BaacClient, ChatSummary};

pub async fn run(client: BaacClient) -> anyhow::Result<()> {
    let chats = client.list_chats().await?;
    if chats.is_empty() {
        println!("No chat history found.");
        println!("Start a new conversation to create your first chat.");
        return Ok(());
    }
    println!("{}", render_table(&chats));
    Ok(())
}

pub fn render_table(chats: &[ChatSummary]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Title", "Updated"]);
    for chat in chats {
        table.add_row(vec![
            chat.id.to_string(),
            chat.title.clone(),
            format_updated(chat.updated_at),
        ]);
    }
    table
}

/// Short relative form: time of day for today, month and day within the
/// current year, full date otherwise.
fn format_updated(updated_at: Option<DateTime<Utc>>) -> String {
    let Some(updated_at) = updated_at else {
        return String::new();
    };
    let local = updated_at.with_timezone(&Local);
    let now = Local::now();
    if local.date_naive() == now.date_naive() {
        local.format("%-I:%M %p").to_string()
    } else if local.year() == now.year() {
        local.format("%b %-d").to_string()
    } else {
        local.format("%b %-d, %Y").to_string()
    }
}
