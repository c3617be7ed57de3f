use serde_json::{Map, Value};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use super::actor::{Response, StoreRequest};
use super::error::StoreError;
use super::path::DbPath;
use super::subscription::Subscription;

/// Cloneable handle to the data store.
#[derive(Clone, Debug)]
pub struct StoreClient {
    sender: mpsc::Sender<StoreRequest>,
}

impl StoreClient {
    pub fn new(sender: mpsc::Sender<StoreRequest>) -> Self {
        Self { sender }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(Response<T>) -> StoreRequest,
    ) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::ActorCommunicationError("Store closed".to_string()))?;
        response
            .await
            .map_err(|_| StoreError::ActorCommunicationError("Store dropped".to_string()))?
    }

    /// Current value at `path`; `Null` when nothing is stored there.
    #[instrument(skip(self))]
    pub async fn get(&self, path: &str) -> Result<Value, StoreError> {
        debug!("Sending request");
        let path = DbPath::parse(path)?;
        self.request(|respond_to| StoreRequest::Get { path, respond_to }).await
    }

    #[instrument(skip(self, value))]
    pub async fn set(&self, path: &str, value: Value) -> Result<(), StoreError> {
        debug!("Sending request");
        let path = DbPath::parse(path)?;
        self.request(|respond_to| StoreRequest::Set { path, value, respond_to }).await
    }

    /// Partial merge; only the given fields change.
    #[instrument(skip(self, fields))]
    pub async fn update(&self, path: &str, fields: Map<String, Value>) -> Result<(), StoreError> {
        debug!(field_count = fields.len(), "Sending request");
        let path = DbPath::parse(path)?;
        self.request(|respond_to| StoreRequest::Update { path, fields, respond_to }).await
    }

    /// Inserts `value` under a freshly generated child key and returns the key.
    #[instrument(skip(self, value))]
    pub async fn push(&self, path: &str, value: Value) -> Result<String, StoreError> {
        debug!("Sending request");
        let path = DbPath::parse(path)?;
        self.request(|respond_to| StoreRequest::Push { path, value, respond_to }).await
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, path: &str) -> Result<(), StoreError> {
        debug!("Sending request");
        let path = DbPath::parse(path)?;
        self.request(|respond_to| StoreRequest::Remove { path, respond_to }).await
    }

    #[instrument(skip(self))]
    pub async fn subscribe(&self, path: &str) -> Result<Subscription, StoreError> {
        debug!("Sending request");
        let path = DbPath::parse(path)?;
        let receiver = self
            .request(|respond_to| StoreRequest::Subscribe {
                path: path.clone(),
                respond_to,
            })
            .await?;
        Ok(Subscription::new(path, receiver))
    }

    pub async fn shutdown(&self) -> Result<(), StoreError> {
        self.sender
            .send(StoreRequest::Shutdown)
            .await
            .map_err(|_| StoreError::ActorCommunicationError("Store closed".to_string()))
    }
}
