//! Tests for the WebSocketManager service

use super::fixtures::*;
use crate::error::WebServerError;
use crate::services::RealWebSocketManager;
use crate::traits::WebSocketManager;
use crate::types::ClientMessage;
use uuid::Uuid;

#[tokio::test]
async fn test_manager_starts_empty() {
    let manager = RealWebSocketManager::new();

    assert_eq!(manager.client_count().await, 0);
    assert!(manager.active_clients().await.is_empty());
}

#[tokio::test]
async fn test_add_and_remove_client() {
    let manager = RealWebSocketManager::new();
    let client_id = Uuid::new_v4();
    let (tx, _rx) = client_channel(8);

    manager.add_client(client_id, tx).await.unwrap();
    assert_eq!(manager.client_count().await, 1);
    assert_eq!(manager.active_clients().await, vec![client_id]);
    assert!(manager.connected_at(client_id).await.is_some());

    manager.remove_client(client_id).await.unwrap();
    assert_eq!(manager.client_count().await, 0);
    assert!(manager.connected_at(client_id).await.is_none());
}

#[tokio::test]
async fn test_remove_unknown_client_is_ok() {
    let manager = RealWebSocketManager::new();

    assert!(manager.remove_client(Uuid::new_v4()).await.is_ok());
}

#[tokio::test]
async fn test_broadcast_reaches_every_client() {
    let manager = RealWebSocketManager::new();
    let (tx1, mut rx1) = client_channel(8);
    let (tx2, mut rx2) = client_channel(8);
    manager.add_client(Uuid::new_v4(), tx1).await.unwrap();
    manager.add_client(Uuid::new_v4(), tx2).await.unwrap();

    manager.broadcast(state_message(4)).await.unwrap();

    assert_eq!(rx1.recv().await, Some(state_message(4)));
    assert_eq!(rx2.recv().await, Some(state_message(4)));
}

#[tokio::test]
async fn test_broadcast_without_clients_is_ok() {
    let manager = RealWebSocketManager::new();

    assert!(manager.broadcast(state_message(1)).await.is_ok());
}

#[tokio::test]
async fn test_broadcast_prunes_closed_clients() {
    let manager = RealWebSocketManager::new();
    let (open_tx, mut open_rx) = client_channel(8);
    let (closed_tx, closed_rx) = client_channel(8);
    let open_id = Uuid::new_v4();
    manager.add_client(open_id, open_tx).await.unwrap();
    manager.add_client(Uuid::new_v4(), closed_tx).await.unwrap();
    drop(closed_rx);

    manager.broadcast(state_message(2)).await.unwrap();

    assert_eq!(manager.active_clients().await, vec![open_id]);
    assert_eq!(open_rx.recv().await, Some(state_message(2)));
}

#[tokio::test]
async fn test_broadcast_skips_full_channel_without_removing() {
    let manager = RealWebSocketManager::new();
    let client_id = Uuid::new_v4();
    let (tx, mut rx) = client_channel(1);
    manager.add_client(client_id, tx).await.unwrap();

    manager.broadcast(state_message(1)).await.unwrap();
    manager.broadcast(state_message(2)).await.unwrap();

    assert_eq!(manager.client_count().await, 1);
    assert_eq!(rx.recv().await, Some(state_message(1)));
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_send_to_client_targets_one_session() {
    let manager = RealWebSocketManager::new();
    let target = Uuid::new_v4();
    let (target_tx, mut target_rx) = client_channel(8);
    let (other_tx, mut other_rx) = client_channel(8);
    manager.add_client(target, target_tx).await.unwrap();
    manager.add_client(Uuid::new_v4(), other_tx).await.unwrap();

    manager
        .send_to_client(target, ClientMessage::error("unknown action type: FOO"))
        .await
        .unwrap();

    assert_eq!(target_rx.recv().await, Some(ClientMessage::error("unknown action type: FOO")));
    assert!(other_rx.try_recv().is_err());
}

#[tokio::test]
async fn test_send_to_unknown_client_fails() {
    let manager = RealWebSocketManager::new();
    let client_id = Uuid::new_v4();

    let result = manager.send_to_client(client_id, state_message(1)).await;

    assert!(matches!(result, Err(WebServerError::ClientNotFound(id)) if id == client_id));
}

#[tokio::test]
async fn test_send_to_closed_client_removes_it() {
    let manager = RealWebSocketManager::new();
    let client_id = Uuid::new_v4();
    let (tx, rx) = client_channel(8);
    manager.add_client(client_id, tx).await.unwrap();
    drop(rx);

    let result = manager.send_to_client(client_id, state_message(1)).await;

    assert!(matches!(result, Err(WebServerError::WebSocket(_))));
    assert_eq!(manager.client_count().await, 0);
}
