//! Canned [`LlmProvider`] for unit tests.

use super::provider::{CompletionOptions, LlmError, LlmProvider};
use super::types::{CompletionResponse, Message};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub(crate) enum Script {
    Reply(String),
    ApiError(u16),
    Hang,
}

pub(crate) struct ScriptedProvider {
    script: Script,
    calls: AtomicUsize,
    last_messages: Mutex<Vec<Message>>,
    last_options: Mutex<Option<CompletionOptions>>,
}

impl ScriptedProvider {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            last_messages: Mutex::new(Vec::new()),
            last_options: Mutex::new(None),
        }
    }

    pub fn replying(content: impl Into<String>) -> Self {
        Self::new(Script::Reply(content.into()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_messages
            .lock()
            .unwrap()
            .last()
            .map(|m| m.content.clone())
    }

    pub fn last_options(&self) -> Option<CompletionOptions> {
        self.last_options.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_messages.lock().unwrap() = messages.to_vec();
        *self.last_options.lock().unwrap() = Some(options.clone());

        match &self.script {
            Script::Reply(content) => Ok(CompletionResponse::from_text(content.clone())),
            Script::ApiError(status) => Err(LlmError::Api {
                status: *status,
                message: "scripted failure".to_string(),
            }),
            Script::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Err(LlmError::Timeout)
            }
        }
    }
}
