//! # Mock Framework
//!
//! Utilities for testing store clients in isolation.
//!
//! Use [`create_mock_store`] to get a client and the receiving end of its
//! request channel, then helpers like [`expect_push`] or [`expect_update`] to
//! assert on the next request and answer it.

use serde_json::{Map, Value};
use tokio::sync::{mpsc, watch};

use crate::store::{DbPath, Response, StoreClient, StoreRequest};

/// Creates a store client whose requests land on the returned receiver
/// instead of a running store, so a test can check what was sent and script
/// the reply.
pub fn create_mock_store(buffer_size: usize) -> (StoreClient, mpsc::Receiver<StoreRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

pub async fn expect_get(receiver: &mut mpsc::Receiver<StoreRequest>) -> Option<(DbPath, Response<Value>)> {
    match receiver.recv().await {
        Some(StoreRequest::Get { path, respond_to }) => Some((path, respond_to)),
        _ => None,
    }
}

pub async fn expect_push(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(DbPath, Value, Response<String>)> {
    match receiver.recv().await {
        Some(StoreRequest::Push { path, value, respond_to }) => Some((path, value, respond_to)),
        _ => None,
    }
}

pub async fn expect_update(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(DbPath, Map<String, Value>, Response<()>)> {
    match receiver.recv().await {
        Some(StoreRequest::Update { path, fields, respond_to }) => Some((path, fields, respond_to)),
        _ => None,
    }
}

pub async fn expect_remove(receiver: &mut mpsc::Receiver<StoreRequest>) -> Option<(DbPath, Response<()>)> {
    match receiver.recv().await {
        Some(StoreRequest::Remove { path, respond_to }) => Some((path, respond_to)),
        _ => None,
    }
}

pub async fn expect_subscribe(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(DbPath, Response<watch::Receiver<Value>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Subscribe { path, respond_to }) => Some((path, respond_to)),
        _ => None,
    }
}

/// Asserts nothing was sent to the store.
pub fn expect_silence(receiver: &mut mpsc::Receiver<StoreRequest>) {
    if let Ok(request) = receiver.try_recv() {
        panic!("Unexpected store request: {:?}", request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_store() {
        let (client, mut receiver) = create_mock_store(10);

        let push_task = tokio::spawn(async move { client.push("categories", json!({ "nameAr": "أ" })).await });

        let (path, value, responder) = expect_push(&mut receiver).await.expect("Expected Push request");
        assert_eq!(path.to_string(), "/categories");
        assert_eq!(value["nameAr"], "أ");
        responder.send(Ok("-k1".to_string())).unwrap();

        let result = push_task.await.unwrap();
        assert_eq!(result, Ok("-k1".to_string()));
        expect_silence(&mut receiver);
    }
}
