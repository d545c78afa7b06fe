//! Core data models that flow through the ingestion and chat pipeline.

use serde::Serialize;

/// A stored unit of retrieval: one paragraph of the uploaded document.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// Decimal id assigned by the session's [`IdPolicy`](crate::config::IdPolicy).
    pub id: String,
    pub text: String,
    pub embedding: Vec<f32>,
}

/// Speaker of a [`ConversationTurn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn avatar(&self) -> &'static str {
        match self {
            Role::User => "🧑‍💻",
            Role::Assistant => "🤖",
        }
    }
}

/// One message of the conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Single-line rendering used by the terminal surface.
    pub fn render(&self) -> String {
        format!("{} {}", self.role.avatar(), self.content)
    }
}

/// The user turn and assistant turn produced by one chat submission.
#[derive(Debug, Clone, Serialize)]
pub struct Exchange {
    pub user: ConversationTurn,
    pub assistant: ConversationTurn,
}

/// Summary of one successful ingestion.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub pages: usize,
    pub chunks: usize,
    /// Ids written to the collection, in document order.
    pub ids: Vec<String>,
}
