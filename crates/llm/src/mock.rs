//! Scripted completion provider for tests.
//!
//! Replies are consumed in order; once exhausted the last reply repeats.
//! Every request is recorded so tests can assert on prompts.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::LlmError;
use crate::provider::{CompletionProvider, CompletionRequest};

#[derive(Debug)]
pub struct MockProvider {
    replies: Mutex<VecDeque<Result<String, String>>>,
    last: Mutex<Option<Result<String, String>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockProvider {
    /// A provider that answers with `replies` in order.
    pub fn new(replies: Vec<Result<String, String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            last: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always answers with `text`.
    pub fn constant(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    /// Every call fails.
    pub fn failing() -> Self {
        Self::new(vec![Err("provider unavailable".to_string())])
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().map(|r| r.to_vec()).unwrap_or_default()
    }

    fn next_reply(&self) -> Result<String, String> {
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        let mut replies = self.replies.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(reply) = replies.pop_front() {
            *last = Some(reply.clone());
            reply
        } else {
            (*last)
                .clone()
                .unwrap_or_else(|| Err("no scripted reply".to_string()))
        }
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        self.next_reply().map_err(LlmError::Other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_in_order_then_repeat_last() {
        let mock = MockProvider::new(vec![Ok("one".into()), Ok("two".into())]);
        let req = || CompletionRequest::new("s", "p");

        assert_eq!(mock.complete(req()).await.unwrap(), "one");
        assert_eq!(mock.complete(req()).await.unwrap(), "two");
        assert_eq!(mock.complete(req()).await.unwrap(), "two");
        assert_eq!(mock.requests().len(), 3);
    }

    #[tokio::test]
    async fn failing_mock_fails_every_time() {
        let mock = MockProvider::failing();
        for _ in 0..2 {
            assert!(mock.complete(CompletionRequest::new("s", "p")).await.is_err());
        }
    }
}
