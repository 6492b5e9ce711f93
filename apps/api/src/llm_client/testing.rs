//! In-memory provider used by unit tests in place of a real HTTP client.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{GenerateOptions, Prompt, ProviderError, ProviderKind, TextGenerator};

type Responder = Box<dyn Fn(&Prompt) -> Result<String, ProviderError> + Send + Sync>;

pub struct ScriptedProvider {
    kind: ProviderKind,
    responder: Responder,
    prompts: Mutex<Vec<Prompt>>,
}

impl ScriptedProvider {
    pub fn with_responder(
        kind: ProviderKind,
        responder: impl Fn(&Prompt) -> Result<String, ProviderError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            kind,
            responder: Box::new(responder),
            prompts: Mutex::new(Vec::new()),
        })
    }

    /// Replies with the same text to every prompt.
    pub fn always(kind: ProviderKind, text: &str) -> Arc<Self> {
        let text = text.to_string();
        Self::with_responder(kind, move |_| Ok(text.clone()))
    }

    /// Fails every call with the given error.
    pub fn failing(kind: ProviderKind, error: ProviderError) -> Arc<Self> {
        Self::with_responder(kind, move |_| Err(error.clone()))
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn generate(
        &self,
        prompt: &Prompt,
        _options: &GenerateOptions,
    ) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.clone());
        (self.responder)(prompt)
    }
}
