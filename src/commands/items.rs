//! Item command handlers

use std::path::Path;

use colored::Colorize;
use prettytable::{cell, row, Table};

use crate::api::types::{BorrowRequest, ReturnRequest};
use crate::api::ApiClient;
use crate::commands::{colored_status, format_time};
use crate::error::{Result, StockroomError};

/// Lists items, optionally filtered by status.
pub async fn list(client: &ApiClient, available: bool, in_use: bool, json: bool) -> Result<()> {
    let service = client.items();
    let items = if available {
        service.available().await?
    } else if in_use {
        service.in_use().await?
    } else {
        service.list().await?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.add_row(row![
        "ID", "NAME", "SERIAL", "CATEGORY", "STATUS", "LOCATION", "BORROWER"
    ]);
    for item in &items {
        table.add_row(row![
            item.id,
            item.name,
            item.serial_number,
            item.category,
            colored_status(&item.status),
            item.location,
            item.current_user
                .as_ref()
                .map(|u| u.username.as_str())
                .unwrap_or("-")
        ]);
    }
    table.printstd();
    println!("{} item(s)", items.len());
    Ok(())
}

/// Shows one item and its recent usage history.
pub async fn show(client: &ApiClient, id: i64, json: bool) -> Result<()> {
    let detail = client.items().detail(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
        return Ok(());
    }

    let item = &detail.item;
    println!("{} {}", item.name.bold(), format!("({})", item.serial_number).dimmed());
    println!("  status:   {}", colored_status(&item.status));
    println!("  category: {}", item.category);
    if !item.location.is_empty() {
        println!("  location: {}", item.location);
    }
    if let Some(value) = &item.value {
        println!("  value:    {}", value);
    }
    if let Some(user) = &item.current_user {
        println!("  borrower: {} ({})", user.username, user.contact);
    }
    if !item.description.is_empty() {
        println!("  {}", item.description);
    }

    if !detail.usage_history.is_empty() {
        println!();
        let mut table = Table::new();
        table.add_row(row!["USER", "START", "END", "PURPOSE", "RETURNED"]);
        for usage in &detail.usage_history {
            table.add_row(row![
                usage.user,
                format_time(Some(&usage.start_time)),
                format_time(usage.end_time.as_ref()),
                usage.purpose,
                if usage.is_returned { "yes" } else { "no" }
            ]);
        }
        table.printstd();
    }
    Ok(())
}

/// Borrows an item.
#[allow(clippy::too_many_arguments)]
pub async fn borrow(
    client: &ApiClient,
    id: i64,
    user: String,
    contact: Option<String>,
    purpose: Option<String>,
    notes: Option<String>,
    condition: Option<String>,
) -> Result<()> {
    let request = BorrowRequest {
        user_name: user,
        user_contact: contact,
        purpose,
        notes,
        condition_before: condition,
    };
    let usage = client.items().borrow(id, &request).await?;
    println!(
        "{}",
        format!(
            "Borrowed '{}' for {} (usage record #{}).",
            usage.item_name, usage.user, usage.id
        )
        .green()
    );
    Ok(())
}

/// Returns a borrowed item.
pub async fn return_item(
    client: &ApiClient,
    id: i64,
    condition: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    let request = ReturnRequest {
        condition_after: condition,
        return_notes: notes,
    };
    let usage = client.items().return_item(id, &request).await?;
    println!(
        "{}",
        format!("Returned '{}' (usage record #{}).", usage.item_name, usage.id).green()
    );
    Ok(())
}

/// Uploads an image file for an item.
pub async fn upload_image(client: &ApiClient, id: i64, path: &Path) -> Result<()> {
    let bytes = tokio::fs::read(path).await.map_err(StockroomError::Io)?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("image path has no file name: {}", path.display()))?;

    client
        .items()
        .upload_image(id, file_name, mime_for(path), bytes)
        .await?;
    println!("Uploaded {} for item #{}.", file_name, id);
    Ok(())
}

/// Picks a MIME type from the file extension.
fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
