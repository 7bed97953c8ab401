//! Usage record command handlers

use prettytable::{cell, row, Table};

use crate::api::ApiClient;
use crate::commands::format_time;
use crate::error::Result;

/// Lists usage records, optionally restricted to open records or one
/// borrower.
pub async fn list(
    client: &ApiClient,
    current: bool,
    user: Option<&str>,
    json: bool,
) -> Result<()> {
    let service = client.usages();
    let usages = if let Some(name) = user {
        service.by_user(name).await?
    } else if current {
        service.current().await?
    } else {
        service.list().await?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&usages)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.add_row(row!["ID", "ITEM", "USER", "START", "END", "PURPOSE", "RETURNED"]);
    for usage in &usages {
        table.add_row(row![
            usage.id,
            usage.item_name,
            usage.user,
            format_time(Some(&usage.start_time)),
            format_time(usage.end_time.as_ref()),
            usage.purpose,
            if usage.is_returned { "yes" } else { "no" }
        ]);
    }
    table.printstd();
    println!("{} record(s)", usages.len());
    Ok(())
}
