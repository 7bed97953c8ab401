//! Category command handlers

use prettytable::{cell, row, Table};

use crate::api::ApiClient;
use crate::error::Result;

/// Lists item categories.
pub async fn list(client: &ApiClient, json: bool) -> Result<()> {
    let categories = client.categories().list().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.add_row(row!["ID", "NAME", "DESCRIPTION"]);
    for category in &categories {
        table.add_row(row![category.id, category.name, category.description]);
    }
    table.printstd();
    Ok(())
}
