//! One chat submission: record the question, retrieve, generate, record the
//! answer.

use crate::error::ChatError;
use crate::generate::answer;
use crate::models::{ConversationTurn, Exchange};
use crate::pipeline::Pipeline;
use crate::retrieve::retrieve;
use crate::session::Session;

impl Pipeline {
    /// Answer `message` against the ingested document.
    ///
    /// Rejected with [`ChatError::NoDocument`] before the first successful
    /// ingestion. The user turn is appended before any external call, so a
    /// failing embedding or generation request leaves it in the history
    /// without an assistant reply.
    pub async fn submit(
        &self,
        session: &mut Session,
        message: &str,
    ) -> Result<Exchange, ChatError> {
        if !session.is_document_ready() {
            return Err(ChatError::NoDocument);
        }
        if message.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let user = ConversationTurn::user(message);
        session.push(user.clone());

        let retrieval = retrieve(self.embedder.as_ref(), self.collection.as_ref(), message).await?;
        let reply = answer(self.model.as_ref(), &retrieval, message).await?;

        let assistant = ConversationTurn::assistant(reply);
        session.push(assistant.clone());

        Ok(Exchange { user, assistant })
    }
}
