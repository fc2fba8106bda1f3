use super::actor::{StoreActor, StoreCommand};
use super::models::{EventWrite, StoreFailure};
use super::EventStore;
use crate::components::widget::models::ServerId;
use crate::config::Config;
use crate::error::{persistence_error, CalResult};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;

/// Handle for issuing requests to the event store actor
#[derive(Clone)]
pub struct StoreHandle {
    command_tx: mpsc::Sender<StoreCommand>,
    _actor_task: Arc<JoinHandle<()>>,
}

impl StoreHandle {
    /// Spawn the store actor and return a handle to it together with the
    /// receiving end of the out-of-band failure channel.
    pub async fn new(config: Arc<RwLock<Config>>) -> (Self, mpsc::Receiver<StoreFailure>) {
        let (command_buffer, failure_buffer) = {
            let config_read = config.read().await;
            (config_read.command_buffer, config_read.failure_buffer)
        };

        let (failure_tx, failure_rx) = mpsc::channel(failure_buffer);
        let (mut actor, command_tx) = StoreActor::new(config, command_buffer, failure_tx);

        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        let handle = Self {
            command_tx,
            _actor_task: Arc::new(actor_task),
        };

        (handle, failure_rx)
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> CalResult<()> {
        let _ = self.command_tx.send(StoreCommand::Shutdown).await;
        Ok(())
    }
}

#[async_trait]
impl EventStore for StoreHandle {
    async fn persist_event(&self, write: EventWrite) -> CalResult<()> {
        self.command_tx
            .send(StoreCommand::Persist(write))
            .await
            .map_err(|e| persistence_error(&format!("Actor mailbox error: {}", e)))
    }

    async fn delete_event(&self, server_id: ServerId) -> CalResult<()> {
        self.command_tx
            .send(StoreCommand::Delete(server_id))
            .await
            .map_err(|e| persistence_error(&format!("Actor mailbox error: {}", e)))
    }
}
