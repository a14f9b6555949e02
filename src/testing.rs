use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde_json::Value;

use crate::error::ClientError;
use crate::remote::RemoteAccess;

pub fn remote_error(status: u16) -> ClientError {
    let status_text = StatusCode::from_u16(status).ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or_default();

    ClientError::Remote {
        status,
        status_text: status_text.to_string(),
        body_text: String::new()
    }
}

#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<(String, Option<Value>)>>>);

impl CallLog {
    pub fn paths(&self) -> Vec<String> {
        self.0.lock().unwrap().iter().map(|(path, _)| path.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn body(&self, index: usize) -> Option<Value> {
        self.0.lock().unwrap().get(index).and_then(|(_, body)| body.clone())
    }
}

/// Scripted API: answers are consumed in order per method and path, the last one repeats.
#[derive(Default)]
pub struct FakeRemote {
    responses: Mutex<HashMap<(Method, String), VecDeque<Result<Value, ClientError>>>>,
    calls: CallLog
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, method: Method, path: &str, response: Result<Value, ClientError>) -> Self {
        self.responses.lock().unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(response);
        self
    }

    pub fn calls(&self) -> CallLog {
        self.calls.clone()
    }
}

#[async_trait]
impl RemoteAccess for FakeRemote {
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, ClientError> {
        self.calls.0.lock().unwrap().push((format!("{} {}", method, path), body));

        let mut responses = self.responses.lock().unwrap();
        let queue = match responses.get_mut(&(method, path.to_string())) {
            Some(queue) => queue,
            None => return Err(remote_error(404))
        };

        if queue.len() > 1 {
            queue.pop_front().unwrap_or_else(|| Err(remote_error(404)))
        } else {
            queue.front().cloned().unwrap_or_else(|| Err(remote_error(404)))
        }
    }
}
