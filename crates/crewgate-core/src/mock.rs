//! Scripted engine for tests

use crate::{Engine, EngineError, EngineMetadata, Result, TaskSpec};
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Failure(String),
}

/// An engine that returns canned replies and records what it was given.
///
/// Scripted replies are handed out in order; once they run out the last one
/// repeats.
pub struct MockEngine {
    replies: Vec<Reply>,
    index: AtomicUsize,
    submissions: Mutex<Vec<TaskSpec>>,
}

impl MockEngine {
    /// Always reply with `text`
    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(vec![Reply::Text(text.into())])
    }

    /// Reply with each item in turn
    pub fn scripted<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            replies
                .into_iter()
                .map(|r| Reply::Text(r.into()))
                .collect(),
        )
    }

    /// Always fail with a backend error carrying `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(vec![Reply::Failure(message.into())])
    }

    fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies,
            index: AtomicUsize::new(0),
            submissions: Mutex::new(Vec::new()),
        }
    }

    /// Number of `submit` calls so far
    pub fn calls(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }

    /// Every task submitted so far, in order
    pub fn submissions(&self) -> Vec<TaskSpec> {
        self.submissions
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Engine for MockEngine {
    async fn submit(&self, task: &TaskSpec) -> Result<String> {
        let i = self.index.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut submissions) = self.submissions.lock() {
            submissions.push(task.clone());
        }

        let reply = self
            .replies
            .get(i)
            .or_else(|| self.replies.last())
            .ok_or_else(|| EngineError::Unavailable("MockEngine has no replies".to_string()))?;

        match reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Failure(message) => Err(EngineError::Backend(message.clone())),
        }
    }

    fn metadata(&self) -> EngineMetadata {
        EngineMetadata {
            name: Some("MockEngine".to_string()),
            model: None,
        }
    }
}
