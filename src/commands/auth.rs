//! Login and logout command handlers

use colored::Colorize;

use crate::api::ApiClient;
use crate::error::{Result, StockroomError};

/// Logs in and persists the session credentials.
///
/// A rejected password surfaces through the gateway's 401 handling, so
/// the raw error talks about sessions; translate it into something a
/// person at a terminal expects before propagating.
pub async fn login(client: &ApiClient, username: &str, password: &str) -> Result<()> {
    match client.auth().login(username, password).await {
        Ok(()) => {
            println!("{}", format!("Logged in as {username}.").green());
            Ok(())
        }
        Err(e) => {
            let rejected = e
                .downcast_ref::<StockroomError>()
                .map(|err| {
                    matches!(
                        err,
                        StockroomError::Authentication(_) | StockroomError::SessionExpired(_)
                    )
                })
                .unwrap_or(false);
            if rejected {
                eprintln!(
                    "{}",
                    "Login failed: the backend rejected these credentials.".red()
                );
            }
            Err(e)
        }
    }
}

/// Clears the stored session credentials.
pub fn logout(client: &ApiClient) -> Result<()> {
    client.auth().logout()?;
    println!("Logged out.");
    Ok(())
}
