use std::collections::HashMap;
use std::path::Path;

use serde_json::{Map, Value};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, instrument, warn};

use super::client::StoreClient;
use super::error::StoreError;
use super::path::DbPath;
use super::push_id::PushIdGenerator;
use super::tree;

pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

#[derive(Debug)]
pub enum StoreRequest {
    Get {
        path: DbPath,
        respond_to: Response<Value>,
    },
    Set {
        path: DbPath,
        value: Value,
        respond_to: Response<()>,
    },
    Update {
        path: DbPath,
        fields: Map<String, Value>,
        respond_to: Response<()>,
    },
    Push {
        path: DbPath,
        value: Value,
        respond_to: Response<String>,
    },
    Remove {
        path: DbPath,
        respond_to: Response<()>,
    },
    Subscribe {
        path: DbPath,
        respond_to: Response<watch::Receiver<Value>>,
    },
    Shutdown,
}

/// In-process realtime tree. Owns the data and every subscription channel;
/// all access goes through [`StoreClient`].
pub struct MemoryStore {
    receiver: mpsc::Receiver<StoreRequest>,
    tree: Value,
    watchers: HashMap<DbPath, watch::Sender<Value>>,
    ids: PushIdGenerator,
}

impl MemoryStore {
    pub fn new(buffer_size: usize) -> (Self, StoreClient) {
        Self::with_data(buffer_size, Value::Object(Map::new()))
    }

    pub fn with_data(buffer_size: usize, data: Value) -> (Self, StoreClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let mut tree = Value::Object(Map::new());
        tree::write(&mut tree, &DbPath::root(), data);
        let store = Self {
            receiver,
            tree,
            watchers: HashMap::new(),
            ids: PushIdGenerator::new(),
        };
        (store, StoreClient::new(sender))
    }

    /// Reads a JSON document to start the tree from.
    pub async fn load_seed(path: &Path) -> Result<Value, StoreError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| StoreError::Seed(format!("{}: {}", path.display(), e)))?;
        let data: Value = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Seed(format!("{}: {}", path.display(), e)))?;
        if !data.is_object() {
            return Err(StoreError::Seed(format!("{}: root must be an object", path.display())));
        }
        Ok(data)
    }

    #[instrument(name = "store", skip(self))]
    pub async fn run(mut self) {
        info!("Store starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Get { path, respond_to } => {
                    let _ = respond_to.send(Ok(tree::read(&self.tree, &path)));
                }
                StoreRequest::Set { path, value, respond_to } => {
                    self.handle_set(path, value, respond_to);
                }
                StoreRequest::Update { path, fields, respond_to } => {
                    self.handle_update(path, fields, respond_to);
                }
                StoreRequest::Push { path, value, respond_to } => {
                    self.handle_push(path, value, respond_to);
                }
                StoreRequest::Remove { path, respond_to } => {
                    self.handle_set(path, Value::Null, respond_to);
                }
                StoreRequest::Subscribe { path, respond_to } => {
                    self.handle_subscribe(path, respond_to);
                }
                StoreRequest::Shutdown => {
                    info!("Store shutting down");
                    break;
                }
            }
        }

        info!("Store stopped");
    }

    #[instrument(fields(path = %path), skip(self, value, respond_to))]
    fn handle_set(&mut self, path: DbPath, value: Value, respond_to: Response<()>) {
        debug!(delete = value.is_null(), "Processing set request");
        tree::write(&mut self.tree, &path, value);
        self.notify(&path);
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(fields(path = %path, field_count = fields.len()), skip(self, fields, respond_to))]
    fn handle_update(&mut self, path: DbPath, fields: Map<String, Value>, respond_to: Response<()>) {
        debug!("Processing update request");
        let result = tree::merge(&mut self.tree, &path, fields);
        match &result {
            Ok(()) => self.notify(&path),
            Err(e) => warn!(error = %e, "Update rejected"),
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(path = %path), skip(self, value, respond_to))]
    fn handle_push(&mut self, path: DbPath, value: Value, respond_to: Response<String>) {
        let id = self.ids.next_id();
        let result = path.child(&id).map(|child| {
            tree::write(&mut self.tree, &child, value);
            self.notify(&child);
            id
        });
        if let Ok(id) = &result {
            info!(id = %id, "Record pushed");
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(path = %path), skip(self, respond_to))]
    fn handle_subscribe(&mut self, path: DbPath, respond_to: Response<watch::Receiver<Value>>) {
        let receiver = match self.watchers.get(&path) {
            Some(sender) => sender.subscribe(),
            None => {
                let (sender, receiver) = watch::channel(tree::read(&self.tree, &path));
                self.watchers.insert(path, sender);
                receiver
            }
        };
        debug!(watched_paths = self.watchers.len(), "Subscription registered");
        let _ = respond_to.send(Ok(receiver));
    }

    /// Pushes fresh snapshots to every watcher whose path overlaps `written`
    /// and drops watchers nobody listens to anymore.
    fn notify(&mut self, written: &DbPath) {
        self.watchers.retain(|_, sender| sender.receiver_count() > 0);

        for (path, sender) in &self.watchers {
            if !path.overlaps(written) {
                continue;
            }
            let snapshot = tree::read(&self.tree, path);
            sender.send_if_modified(|current| {
                if *current == snapshot {
                    false
                } else {
                    *current = snapshot;
                    true
                }
            });
        }
    }
}
