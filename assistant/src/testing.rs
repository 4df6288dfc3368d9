//! Scripted [`TextGenerator`] for tests.

use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use ai_llm_service::{AiLlmError, TextGenerator, error_handler::Result};
use async_trait::async_trait;

type ErrorFactory = Box<dyn Fn() -> AiLlmError + Send + Sync>;

enum Script {
    Answer(String),
    Fail(ErrorFactory),
}

/// Generator that returns a fixed answer (or error) and records what it was asked.
pub struct ScriptedGenerator {
    script: Script,
    calls: AtomicUsize,
    last: Mutex<Option<(String, Option<String>)>>,
}

impl ScriptedGenerator {
    pub fn answering(answer: impl Into<String>) -> Self {
        Self::with(Script::Answer(answer.into()))
    }

    pub fn failing(make: impl Fn() -> AiLlmError + Send + Sync + 'static) -> Self {
        Self::with(Script::Fail(Box::new(make)))
    }

    fn with(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last
            .lock()
            .ok()
            .and_then(|l| l.as_ref().map(|(p, _)| p.clone()))
    }

    pub fn last_system(&self) -> Option<String> {
        self.last
            .lock()
            .ok()
            .and_then(|l| l.as_ref().and_then(|(_, s)| s.clone()))
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last.lock() {
            *last = Some((prompt.to_string(), system.map(str::to_string)));
        }
        match &self.script {
            Script::Answer(a) => Ok(a.clone()),
            Script::Fail(make) => Err(make()),
        }
    }

    fn model(&self) -> &str {
        "scripted"
    }
}
