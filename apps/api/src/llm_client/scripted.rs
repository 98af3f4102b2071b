//! Test double for `ChatCompletion`: replies with a canned text and records prompts.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{ChatCompletion, LlmError};

pub struct ScriptedChat {
    reply: Option<String>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedChat {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails as if the upstream returned 503.
    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// (prompt, system) pairs received so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatCompletion for ScriptedChat {
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), system.to_string()));
        self.reply.clone().ok_or(LlmError::Api {
            status: 503,
            message: "upstream unavailable".to_string(),
        })
    }
}
