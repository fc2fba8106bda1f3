use super::models::{EventWrite, StoreFailure, StoreOperation};
use super::notifications;
use crate::components::widget::models::ServerId;
use crate::config::Config;
use crate::error::{config_error, persistence_error, CalResult};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, RwLock};
use tracing::info;
use url::Url;

/// The store actor that issues calendar event requests
pub struct StoreActor {
    config: Arc<RwLock<Config>>,
    client: Client,
    command_rx: mpsc::Receiver<StoreCommand>,
    failure_tx: mpsc::Sender<StoreFailure>,
}

/// Commands that can be sent to the store actor
pub enum StoreCommand {
    Persist(EventWrite),
    Delete(ServerId),
    Shutdown,
}

impl StoreActor {
    /// Create a new actor along with its command mailbox sender
    pub fn new(
        config: Arc<RwLock<Config>>,
        command_buffer: usize,
        failure_tx: mpsc::Sender<StoreFailure>,
    ) -> (Self, mpsc::Sender<StoreCommand>) {
        let (command_tx, command_rx) = mpsc::channel(command_buffer);

        let actor = Self {
            config,
            client: Client::new(),
            command_rx,
            failure_tx,
        };

        (actor, command_tx)
    }

    /// Start the actor's processing loop.
    ///
    /// Commands are processed one at a time, so requests reach the transport
    /// in the order they were issued.
    pub async fn run(&mut self) {
        info!("Event store actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                StoreCommand::Persist(write) => {
                    let server_id = write.id;
                    if let Err(e) = self.put_event(&write).await {
                        notifications::report_failure(
                            &self.failure_tx,
                            StoreFailure {
                                operation: StoreOperation::Persist,
                                server_id,
                                message: e.to_string(),
                            },
                        )
                        .await;
                    }
                }
                StoreCommand::Delete(server_id) => {
                    if let Err(e) = self.delete_event(server_id).await {
                        notifications::report_failure(
                            &self.failure_tx,
                            StoreFailure {
                                operation: StoreOperation::Delete,
                                server_id,
                                message: e.to_string(),
                            },
                        )
                        .await;
                    }
                }
                StoreCommand::Shutdown => {
                    info!("Event store actor shutting down");
                    break;
                }
            }
        }

        info!("Event store actor shut down");
    }

    /// Issue a PUT with the full event payload
    async fn put_event(&self, write: &EventWrite) -> CalResult<()> {
        let (base_url, timeout_secs) = self.request_settings().await;
        let url = event_endpoint(&base_url)?;

        let response = self
            .client
            .put(url)
            .timeout(Duration::from_secs(timeout_secs))
            .json(write)
            .send()
            .await
            .map_err(|e| persistence_error(&format!("Failed to send event update: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(persistence_error(&format!(
                "Event update rejected: HTTP {} - {}",
                status, error_body
            )));
        }

        Ok(())
    }

    /// Issue a DELETE keyed by the store identifier
    async fn delete_event(&self, server_id: ServerId) -> CalResult<()> {
        let (base_url, timeout_secs) = self.request_settings().await;
        let url = delete_endpoint(&base_url, server_id)?;

        let response = self
            .client
            .delete(url)
            .timeout(Duration::from_secs(timeout_secs))
            .send()
            .await
            .map_err(|e| persistence_error(&format!("Failed to send event deletion: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(persistence_error(&format!(
                "Event deletion rejected: HTTP {} - {}",
                status, error_body
            )));
        }

        Ok(())
    }

    async fn request_settings(&self) -> (String, u64) {
        let config_read = self.config.read().await;
        (
            config_read.store_url.clone(),
            config_read.request_timeout_secs,
        )
    }
}

/// Build the `/calendar_event` endpoint URL from the store base URL
pub fn event_endpoint(base_url: &str) -> CalResult<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|e| config_error(&format!("Invalid store URL: {}", e)))?;

    url.path_segments_mut()
        .map_err(|_| config_error("Store URL cannot be a base"))?
        .pop_if_empty()
        .push("calendar_event");

    Ok(url)
}

/// Build the deletion endpoint URL, keyed by server id in the query string
pub fn delete_endpoint(base_url: &str, server_id: ServerId) -> CalResult<Url> {
    let mut url = event_endpoint(base_url)?;
    url.query_pairs_mut()
        .append_pair("id", &server_id.to_string());
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_endpoint() {
        let url = event_endpoint("http://localhost:5000").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/calendar_event");

        // Trailing slash must not double up
        let url = event_endpoint("http://localhost:5000/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/calendar_event");
    }

    #[test]
    fn test_delete_endpoint_carries_id_query() {
        let url = delete_endpoint("http://localhost:5000", ServerId(42)).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/calendar_event?id=42");
    }

    #[test]
    fn test_endpoint_rejects_invalid_base() {
        assert!(event_endpoint("not a url").is_err());
        assert!(event_endpoint("mailto:someone@example.com").is_err());
    }
}
