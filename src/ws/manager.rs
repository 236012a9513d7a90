//! WebSocket connection manager: tracks live connections per board and
//! pushes events to them.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{RwLock, mpsc};
use tracing::{debug, warn};

use super::messages::WsEvent;

/// Handle for a single WebSocket client. The handler owns the receiving
/// half; the manager keeps the sending half.
pub type ClientSender = mpsc::UnboundedSender<WsEvent>;

/// A unique ID assigned to each connected WebSocket client.
pub type ClientId = u64;

/// Per-board sets of connected clients.
#[derive(Debug)]
pub struct WsManager {
    /// board_id → { client_id → sender }
    subs: RwLock<HashMap<String, HashMap<ClientId, ClientSender>>>,
    next_id: AtomicU64,
}

impl WsManager {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register a new client for a board, returning (client_id, receiver).
    pub async fn subscribe(&self, board_id: &str) -> (ClientId, mpsc::UnboundedReceiver<WsEvent>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();

        let mut subs = self.subs.write().await;
        subs.entry(board_id.to_string()).or_default().insert(id, tx);

        debug!(board_id, client_id = id, "WS client subscribed");
        (id, rx)
    }

    /// Remove a client from a board.
    pub async fn unsubscribe(&self, board_id: &str, client_id: ClientId) {
        let mut subs = self.subs.write().await;
        if let Some(clients) = subs.get_mut(board_id) {
            clients.remove(&client_id);
            if clients.is_empty() {
                subs.remove(board_id);
            }
        }
        debug!(board_id, client_id, "WS client unsubscribed");
    }

    /// Drop every client of a board. Their writer tasks end once the
    /// channel drains.
    pub async fn disconnect_all(&self, board_id: &str) -> usize {
        let removed = self.subs.write().await.remove(board_id);
        let count = removed.map_or(0, |c| c.len());
        if count > 0 {
            debug!(board_id, count, "WS clients disconnected");
        }
        count
    }

    /// Broadcast an event to all subscribers of a board.
    pub async fn broadcast(&self, board_id: &str, event: WsEvent) {
        let subs = self.subs.read().await;
        let Some(clients) = subs.get(board_id) else {
            return;
        };

        let stale: Vec<ClientId> = clients
            .iter()
            .filter(|(_, tx)| tx.send(event.clone()).is_err())
            .map(|(&cid, _)| cid)
            .collect();
        drop(subs); // release read lock before write

        if !stale.is_empty() {
            self.remove_stale(board_id, &stale).await;
        }
    }

    /// Send an event to one client only. Returns false if the client is gone.
    pub async fn send_to(&self, board_id: &str, client_id: ClientId, event: WsEvent) -> bool {
        let subs = self.subs.read().await;
        let Some(tx) = subs.get(board_id).and_then(|c| c.get(&client_id)) else {
            return false;
        };
        let delivered = tx.send(event).is_ok();
        drop(subs);

        if !delivered {
            self.remove_stale(board_id, &[client_id]).await;
        }
        delivered
    }

    async fn remove_stale(&self, board_id: &str, stale: &[ClientId]) {
        let mut subs = self.subs.write().await;
        if let Some(clients) = subs.get_mut(board_id) {
            for cid in stale {
                clients.remove(cid);
                warn!(board_id, client_id = cid, "removed stale WS client");
            }
            if clients.is_empty() {
                subs.remove(board_id);
            }
        }
    }

    /// Number of subscribers for a board.
    pub async fn subscriber_count(&self, board_id: &str) -> usize {
        let subs = self.subs.read().await;
        subs.get(board_id).map_or(0, |c| c.len())
    }

    /// Total number of active connections across all boards.
    pub async fn total_connections(&self) -> usize {
        let subs = self.subs.read().await;
        subs.values().map(|c| c.len()).sum()
    }

    /// Board ids with active subscribers.
    pub async fn active_boards(&self) -> Vec<String> {
        let subs = self.subs.read().await;
        subs.keys().cloned().collect()
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self {
            subs: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribe_returns_unique_ids() {
        let mgr = WsManager::new();
        let (id1, _rx1) = mgr.subscribe("b1").await;
        let (id2, _rx2) = mgr.subscribe("b1").await;
        assert_ne!(id1, id2);
    }

    #[tokio::test]
    async fn subscriber_count_tracks_correctly() {
        let mgr = WsManager::new();
        assert_eq!(mgr.subscriber_count("b1").await, 0);

        let (id1, _rx1) = mgr.subscribe("b1").await;
        let (_id2, _rx2) = mgr.subscribe("b1").await;
        assert_eq!(mgr.subscriber_count("b1").await, 2);

        mgr.unsubscribe("b1", id1).await;
        assert_eq!(mgr.subscriber_count("b1").await, 1);
    }

    #[tokio::test]
    async fn unsubscribe_removes_empty_board() {
        let mgr = WsManager::new();
        let (id1, _rx1) = mgr.subscribe("b1").await;
        mgr.unsubscribe("b1", id1).await;
        assert!(mgr.active_boards().await.is_empty());
    }

    #[tokio::test]
    async fn broadcast_delivers_to_all_subscribers() {
        let mgr = WsManager::new();
        let (_id1, mut rx1) = mgr.subscribe("b1").await;
        let (_id2, mut rx2) = mgr.subscribe("b1").await;

        mgr.broadcast("b1", WsEvent::board_deleted("b1")).await;

        let msg1 = rx1.recv().await.unwrap();
        let msg2 = rx2.recv().await.unwrap();
        assert_eq!(msg1.to_json(), msg2.to_json());
    }

    #[tokio::test]
    async fn broadcast_does_not_cross_boards() {
        let mgr = WsManager::new();
        let (_id1, mut rx1) = mgr.subscribe("b1").await;
        let (_id2, mut rx2) = mgr.subscribe("b2").await;

        mgr.broadcast("b1", WsEvent::board_deleted("b1")).await;

        assert!(rx1.recv().await.is_some());
        assert!(rx2.try_recv().is_err());
    }

    #[tokio::test]
    async fn broadcast_removes_stale_clients() {
        let mgr = WsManager::new();
        let (_id1, rx1) = mgr.subscribe("b1").await;
        let (_id2, _rx2) = mgr.subscribe("b1").await;

        drop(rx1);
        mgr.broadcast("b1", WsEvent::pong()).await;

        assert_eq!(mgr.subscriber_count("b1").await, 1);
    }

    #[tokio::test]
    async fn send_to_reaches_only_that_client() {
        let mgr = WsManager::new();
        let (id1, mut rx1) = mgr.subscribe("b1").await;
        let (_id2, mut rx2) = mgr.subscribe("b1").await;

        assert!(mgr.send_to("b1", id1, WsEvent::pong()).await);
        assert!(rx1.recv().await.is_some());
        assert!(rx2.try_recv().is_err());
    }

    #[tokio::test]
    async fn send_to_unknown_client_fails() {
        let mgr = WsManager::new();
        assert!(!mgr.send_to("b1", 42, WsEvent::pong()).await);

        let (id, rx) = mgr.subscribe("b1").await;
        drop(rx);
        assert!(!mgr.send_to("b1", id, WsEvent::pong()).await);
        assert_eq!(mgr.subscriber_count("b1").await, 0);
    }

    #[tokio::test]
    async fn disconnect_all_closes_channels() {
        let mgr = WsManager::new();
        let (_id1, mut rx1) = mgr.subscribe("b1").await;
        let (_id2, _rx2) = mgr.subscribe("b1").await;

        assert_eq!(mgr.disconnect_all("b1").await, 2);
        assert_eq!(mgr.subscriber_count("b1").await, 0);
        assert!(rx1.recv().await.is_none());
    }

    #[tokio::test]
    async fn total_connections_across_boards() {
        let mgr = WsManager::new();
        let (_id1, _rx1) = mgr.subscribe("b1").await;
        let (_id2, _rx2) = mgr.subscribe("b1").await;
        let (_id3, _rx3) = mgr.subscribe("b2").await;
        assert_eq!(mgr.total_connections().await, 3);
    }

    #[tokio::test]
    async fn broadcast_to_unknown_board_is_noop() {
        let mgr = WsManager::new();
        mgr.broadcast("nonexistent", WsEvent::pong()).await;
        mgr.unsubscribe("b1", 999).await;
    }
}
