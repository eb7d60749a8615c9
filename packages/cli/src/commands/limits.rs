// ABOUTME: `baac limits` command that shows today's document copy quotas

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use baac_chat::{Catalog, LimitLedger};
use baac_client::BaacClient;

pub async fn run(client: BaacClient) -> anyhow::Result<()> {
    let allowances = client.copy_limits().await?;
    let mut ledger = LimitLedger::new();
    ledger.absorb(allowances);
    println!("{}", render_table(&Catalog::standard(), &ledger));
    println!("Limits reset daily at 12:00 AM.");
    Ok(())
}

pub fn render_table(catalog: &Catalog, ledger: &LimitLedger) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Document", "Used", "Limit", "Remaining"]);
    for doc in catalog.entries() {
        match ledger.allowance(doc.name) {
            Some(allowance) => {
                let remaining = if allowance.remaining == 0 {
                    "none (resets tomorrow)".to_string()
                } else {
                    allowance.remaining.to_string()
                };
                table.add_row(vec![
                    doc.display_name.to_string(),
                    allowance.used.to_string(),
                    allowance.limit.to_string(),
                    remaining,
                ]);
            }
            None => {
                table.add_row(vec![doc.display_name.to_string(), "-".into(), "-".into(), "-".into()]);
            }
        }
    }
    table
}
