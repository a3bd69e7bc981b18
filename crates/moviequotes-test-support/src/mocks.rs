//! Scripted transport and recording navigator.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use moviequotes_client::error::{RemoteError, RemoteResult};
use moviequotes_client::remote::{Method, RemoteClient, RemoteResponse, RequestBody};
use moviequotes_client::{Navigator, Route};
use moviequotes_api_models::ValidationProblem;
use serde_json::{Value, json};
use tokio::sync::watch;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Canned reply for one request.
#[derive(Clone, Debug)]
pub enum Reply {
    /// Success status with a JSON body.
    Success {
        /// HTTP status (2xx).
        status: u16,
        /// Response body.
        body: Value,
    },
    /// Non-success status with a problem body.
    Failure {
        /// HTTP status.
        status: u16,
        /// Response body.
        body: Value,
    },
    /// The request never reached the server.
    Transport(String),
}

impl Reply {
    /// `200 OK` with `body`.
    #[must_use]
    pub const fn ok(body: Value) -> Self {
        Self::Success { status: 200, body }
    }

    /// `201 Created` with `body`.
    #[must_use]
    pub const fn created(body: Value) -> Self {
        Self::Success { status: 201, body }
    }

    /// Non-success `status` with `body`.
    #[must_use]
    pub const fn status(status: u16, body: Value) -> Self {
        Self::Failure { status, body }
    }

    /// `422` with one localized field error.
    #[must_use]
    pub fn validation(field: &str, en: &str, ka: &str) -> Self {
        Self::status(422, crate::fixtures::validation_json(field, en, ka))
    }

    /// `401 Unauthenticated.`
    #[must_use]
    pub fn unauthorized() -> Self {
        Self::status(401, json!({ "message": "Unauthenticated." }))
    }

    /// `500` with a server message.
    #[must_use]
    pub fn server_error() -> Self {
        Self::status(500, json!({ "message": "Server Error" }))
    }

    /// Connection failure.
    #[must_use]
    pub fn transport(detail: &str) -> Self {
        Self::Transport(detail.to_string())
    }

    fn into_result(self, method: Method, path: &str) -> RemoteResult<RemoteResponse> {
        match self {
            Self::Success { status, body } => Ok(RemoteResponse::new(status, body)),
            Self::Failure { status, body } => Err(RemoteError::Status {
                method,
                path: path.to_string(),
                status,
                problem: serde_json::from_value::<ValidationProblem>(body).unwrap_or_default(),
            }),
            Self::Transport(detail) => Err(RemoteError::Transport {
                method,
                path: path.to_string(),
                detail,
            }),
        }
    }
}

/// Request observed by [`ScriptedRemote`].
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedCall {
    /// Request method.
    pub method: Method,
    /// Request path.
    pub path: String,
    /// Request body.
    pub body: RequestBody,
}

/// Holds requests to a route until released.
#[derive(Debug)]
pub struct Gate {
    open: watch::Sender<bool>,
}

impl Gate {
    fn new() -> Self {
        let (open, _) = watch::channel(false);
        Self { open }
    }

    /// Let held and future requests through.
    pub fn release(&self) {
        self.open.send_replace(true);
    }

    async fn wait(&self) {
        let mut receiver = self.open.subscribe();
        let _ = receiver.wait_for(|open| *open).await;
    }
}

type RouteKey = (Method, String);

/// Transport answering from per-route reply queues.
///
/// Each route pops replies in order; the last reply repeats. Unscripted
/// routes answer `404`.
#[derive(Debug, Default)]
pub struct ScriptedRemote {
    replies: Mutex<HashMap<RouteKey, VecDeque<Reply>>>,
    gates: Mutex<HashMap<RouteKey, Arc<Gate>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedRemote {
    /// Transport with no scripted routes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for `method path`.
    pub fn on(&self, method: Method, path: &str, reply: Reply) -> &Self {
        lock(&self.replies)
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    /// Queue `200 OK` with `body` for `GET path`.
    pub fn on_get(&self, path: &str, body: Value) -> &Self {
        self.on(Method::Get, path, Reply::ok(body))
    }

    /// Hold requests to `method path` until the returned gate is released.
    #[must_use]
    pub fn hold(&self, method: Method, path: &str) -> Arc<Gate> {
        let gate = Arc::new(Gate::new());
        lock(&self.gates).insert((method, path.to_string()), Arc::clone(&gate));
        gate
    }

    /// Every request observed, in dispatch order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// Requests observed for `method path`.
    #[must_use]
    pub fn calls_to(&self, method: Method, path: &str) -> Vec<RecordedCall> {
        lock(&self.calls)
            .iter()
            .filter(|call| call.method == method && call.path == path)
            .cloned()
            .collect()
    }

    /// Number of requests observed for `method path`.
    #[must_use]
    pub fn count(&self, method: Method, path: &str) -> usize {
        self.calls_to(method, path).len()
    }

    fn next_reply(&self, key: &RouteKey) -> Option<Reply> {
        let mut replies = lock(&self.replies);
        let queue = replies.get_mut(key)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl RemoteClient for ScriptedRemote {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> RemoteResult<RemoteResponse> {
        lock(&self.calls).push(RecordedCall {
            method,
            path: path.to_string(),
            body,
        });
        let key = (method, path.to_string());
        let gate = lock(&self.gates).get(&key).cloned();
        if let Some(gate) = gate {
            gate.wait().await;
        }
        self.next_reply(&key)
            .unwrap_or_else(|| Reply::status(404, json!({ "message": "Not Found" })))
            .into_result(method, path)
    }
}

/// Navigation observed by [`RecordingNavigator`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationRecord {
    /// `push(route)`.
    Push(Route),
    /// `back()`.
    Back,
}

/// Navigator that only records calls.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    records: Mutex<Vec<NavigationRecord>>,
}

impl RecordingNavigator {
    /// Navigator with no history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every navigation, in order.
    #[must_use]
    pub fn records(&self) -> Vec<NavigationRecord> {
        lock(&self.records).clone()
    }

    /// Routes pushed, in order.
    #[must_use]
    pub fn pushed(&self) -> Vec<Route> {
        lock(&self.records)
            .iter()
            .filter_map(|record| match record {
                NavigationRecord::Push(route) => Some(route.clone()),
                NavigationRecord::Back => None,
            })
            .collect()
    }

    /// Number of `back()` calls.
    #[must_use]
    pub fn back_count(&self) -> usize {
        lock(&self.records)
            .iter()
            .filter(|record| matches!(record, NavigationRecord::Back))
            .count()
    }
}

#[async_trait]
impl Navigator for RecordingNavigator {
    async fn push(&self, route: Route) {
        lock(&self.records).push(NavigationRecord::Push(route));
    }

    async fn back(&self) {
        lock(&self.records).push(NavigationRecord::Back);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_pop_in_order_and_last_repeats() {
        let remote = ScriptedRemote::new();
        remote
            .on(Method::Get, "/api/user", Reply::unauthorized())
            .on(Method::Get, "/api/user", Reply::ok(json!({ "id": 1 })));

        assert!(remote.get("/api/user").await.is_err());
        assert!(remote.get("/api/user").await.is_ok());
        assert!(remote.get("/api/user").await.is_ok());
        assert_eq!(remote.count(Method::Get, "/api/user"), 3);
    }

    #[tokio::test]
    async fn unscripted_routes_are_not_found() {
        let remote = ScriptedRemote::new();
        let err = remote.delete("/api/likes/9").await.err();
        assert!(err.is_some_and(|err| err.is_not_found()));
    }

    #[tokio::test]
    async fn gate_holds_until_released() {
        let remote = ScriptedRemote::new();
        remote.on_get("/api/quotes?page=1", json!([]));
        let gate = remote.hold(Method::Get, "/api/quotes?page=1");
        let (response, observed) = tokio::join!(remote.get("/api/quotes?page=1"), async {
            let observed = remote.count(Method::Get, "/api/quotes?page=1");
            gate.release();
            observed
        });
        assert!(response.is_ok());
        assert_eq!(observed, 1);
    }
}
