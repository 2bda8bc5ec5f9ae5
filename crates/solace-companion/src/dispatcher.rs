use std::sync::Arc;

use tracing::{debug, warn};

use solace_types::api::ReplySource;
use solace_types::models::ConversationTurn;

use crate::fallback::FallbackResponder;
use crate::prompt::build_messages;
use crate::remote::CompletionBackend;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub message: String,
    pub source: ReplySource,
}

/// Routes a chat message to the remote model, or to the local fallback
/// when there is no model configured or the single remote attempt fails.
/// `respond` never fails.
#[derive(Clone)]
pub struct Dispatcher {
    backend: Option<Arc<dyn CompletionBackend>>,
    fallback: Arc<FallbackResponder>,
}

impl Dispatcher {
    pub fn new(backend: Option<Arc<dyn CompletionBackend>>, fallback: FallbackResponder) -> Self {
        Self {
            backend,
            fallback: Arc::new(fallback),
        }
    }

    pub fn fallback_only(fallback: FallbackResponder) -> Self {
        Self::new(None, fallback)
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    pub async fn respond(&self, user_message: &str, history: &[ConversationTurn]) -> Reply {
        if let Some(backend) = &self.backend {
            let messages = build_messages(user_message, history);
            match backend.complete(&messages).await {
                Ok(text) if !text.trim().is_empty() => {
                    return Reply {
                        message: text,
                        source: ReplySource::Remote,
                    };
                }
                Ok(_) => warn!("Remote completion was empty, using fallback"),
                Err(e) => warn!("Remote completion failed, using fallback: {}", e),
            }
        }

        let message = self.fallback.respond(user_message);
        debug!("Fallback reply selected");
        Reply {
            message,
            source: ReplySource::Fallback,
        }
    }
}
