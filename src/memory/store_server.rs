// src/memory/store_server.rs — Async message passing for Store
//
// One task owns the SQLite connection. Every write re-reads the full ordered
// list and publishes it on a watch channel, so observers always see the
// latest snapshot without polling.

use crate::memory::store::{ChatSessionRow, NewSession, Store};
use tokio::sync::{mpsc, oneshot, watch};

#[derive(Debug)]
pub enum StoreCommand {
    InsertSession {
        session: NewSession,
        resp: oneshot::Sender<anyhow::Result<i64>>,
    },
    DeleteSession {
        id: i64,
        resp: oneshot::Sender<anyhow::Result<usize>>,
    },
    GetSession {
        id: i64,
        resp: oneshot::Sender<anyhow::Result<Option<ChatSessionRow>>>,
    },
    ListSessions {
        resp: oneshot::Sender<anyhow::Result<Vec<ChatSessionRow>>>,
    },
    RecentSessions {
        limit: u32,
        resp: oneshot::Sender<anyhow::Result<Vec<ChatSessionRow>>>,
    },
    CountSessions {
        resp: oneshot::Sender<anyhow::Result<i64>>,
    },
    AverageScore {
        resp: oneshot::Sender<anyhow::Result<f64>>,
    },
}

/// A handle to the Store that uses message passing.
#[derive(Clone)]
pub struct StoreHandle {
    tx: mpsc::Sender<StoreCommand>,
    sessions: watch::Receiver<Vec<ChatSessionRow>>,
}

impl StoreHandle {
    pub fn new(
        tx: mpsc::Sender<StoreCommand>,
        sessions: watch::Receiver<Vec<ChatSessionRow>>,
    ) -> Self {
        Self { tx, sessions }
    }

    pub async fn insert_session(&self, session: NewSession) -> anyhow::Result<i64> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::InsertSession {
                session,
                resp: resp_tx,
            })
            .await?;
        resp_rx.await?
    }

    pub async fn delete_session(&self, id: i64) -> anyhow::Result<usize> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::DeleteSession { id, resp: resp_tx })
            .await?;
        resp_rx.await?
    }

    pub async fn get_session(&self, id: i64) -> anyhow::Result<Option<ChatSessionRow>> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::GetSession { id, resp: resp_tx })
            .await?;
        resp_rx.await?
    }

    pub async fn list_sessions(&self) -> anyhow::Result<Vec<ChatSessionRow>> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::ListSessions { resp: resp_tx })
            .await?;
        resp_rx.await?
    }

    pub async fn recent_sessions(&self, limit: u32) -> anyhow::Result<Vec<ChatSessionRow>> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::RecentSessions {
                limit,
                resp: resp_tx,
            })
            .await?;
        resp_rx.await?
    }

    pub async fn count_sessions(&self) -> anyhow::Result<i64> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::CountSessions { resp: resp_tx })
            .await?;
        resp_rx.await?
    }

    pub async fn average_score(&self) -> anyhow::Result<f64> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::AverageScore { resp: resp_tx })
            .await?;
        resp_rx.await?
    }

    /// Live list of all sessions, newest first. Re-published after every write.
    pub fn subscribe_sessions(&self) -> watch::Receiver<Vec<ChatSessionRow>> {
        self.sessions.clone()
    }
}

/// Helper to spawn the store server and return a handle.
pub fn spawn_store_server(store: Store) -> (StoreHandle, tokio::task::JoinHandle<()>) {
    let initial = store.list_sessions().unwrap_or_else(|e| {
        tracing::warn!("Could not load session history: {}", e);
        Vec::new()
    });
    let (tx, rx) = mpsc::channel(100);
    let (sessions_tx, sessions_rx) = watch::channel(initial);
    let handle = StoreHandle::new(tx, sessions_rx);
    let join_handle = tokio::spawn(run_store_server(store, rx, sessions_tx));
    (handle, join_handle)
}

fn publish(store: &Store, sessions: &watch::Sender<Vec<ChatSessionRow>>) {
    match store.list_sessions() {
        Ok(list) => {
            sessions.send_replace(list);
        }
        Err(e) => tracing::warn!("Could not refresh session list: {}", e),
    }
}

/// The background task that owns the Store.
pub async fn run_store_server(
    store: Store,
    mut rx: mpsc::Receiver<StoreCommand>,
    sessions: watch::Sender<Vec<ChatSessionRow>>,
) {
    while let Some(cmd) = rx.recv().await {
        match cmd {
            StoreCommand::InsertSession { session, resp } => {
                let res = store.insert_session(&session);
                if res.is_ok() {
                    publish(&store, &sessions);
                }
                let _ = resp.send(res);
            }
            StoreCommand::DeleteSession { id, resp } => {
                let res = store.delete_session(id);
                if matches!(res, Ok(n) if n > 0) {
                    publish(&store, &sessions);
                }
                let _ = resp.send(res);
            }
            StoreCommand::GetSession { id, resp } => {
                let _ = resp.send(store.get_session(id));
            }
            StoreCommand::ListSessions { resp } => {
                let _ = resp.send(store.list_sessions());
            }
            StoreCommand::RecentSessions { limit, resp } => {
                let _ = resp.send(store.recent_sessions(limit));
            }
            StoreCommand::CountSessions { resp } => {
                let _ = resp.send(store.count_sessions());
            }
            StoreCommand::AverageScore { resp } => {
                let _ = resp.send(store.average_score());
            }
        }
    }
    tracing::debug!("store server stopped");
}
