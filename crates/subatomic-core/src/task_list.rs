use crate::correlation::CorrelationId;
use crate::error::{Result, SubatomicError};
use crate::message::{ChatMessage, ChatSurface};
use crate::task::TaskStatus;
use std::collections::HashMap;
use std::sync::Arc;

/// The single, continuously-updated progress message for one task run.
///
/// Entries are appended at registration time and never removed; every send
/// targets the same correlation id, so the chat surface shows one updating
/// block rather than a stream of new messages.
pub struct TaskListMessage {
    title: String,
    correlation_id: CorrelationId,
    chat: Arc<dyn ChatSurface>,
    order: Vec<String>,
    entries: HashMap<String, TaskEntry>,
}

#[derive(Debug, Clone)]
struct TaskEntry {
    description: String,
    status: TaskStatus,
}

impl TaskListMessage {
    pub fn new(title: impl Into<String>, chat: Arc<dyn ChatSurface>) -> Self {
        TaskListMessage {
            title: title.into(),
            correlation_id: CorrelationId::new(),
            chat,
            order: Vec::new(),
            entries: HashMap::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn correlation_id(&self) -> &CorrelationId {
        &self.correlation_id
    }

    pub fn status(&self, key: &str) -> Option<TaskStatus> {
        self.entries.get(key).map(|e| e.status)
    }

    /// Register a new entry as Pending. Key uniqueness is the caller's
    /// contract (the unique-name generator); a duplicate key keeps its
    /// original position and only refreshes the description.
    pub fn add_task(&mut self, key: impl Into<String>, description: impl Into<String>) {
        let key = key.into();
        let description = description.into();
        match self.entries.get_mut(&key) {
            Some(entry) => {
                tracing::warn!(key = %key, "duplicate task key registered");
                entry.description = description;
            }
            None => {
                self.order.push(key.clone());
                self.entries.insert(
                    key,
                    TaskEntry {
                        description,
                        status: TaskStatus::Pending,
                    },
                );
            }
        }
    }

    /// Transition an entry to Successful and push the updated message.
    pub async fn succeed_task(&mut self, key: &str) -> Result<()> {
        let entry = self
            .entries
            .get_mut(key)
            .ok_or_else(|| SubatomicError::TaskNotFound(key.to_string()))?;
        entry.status = TaskStatus::Successful;
        tracing::debug!(key = %key, "task step successful");
        self.display().await
    }

    /// Mark every entry still Pending as Failed and push the updated message.
    pub async fn fail_remaining_tasks(&mut self) -> Result<()> {
        for entry in self.entries.values_mut() {
            if entry.status == TaskStatus::Pending {
                entry.status = TaskStatus::Failed;
            }
        }
        self.display().await
    }

    /// Render the current state and send/update the correlated message.
    pub async fn display(&self) -> Result<()> {
        let msg = self.render();
        self.chat.post(&self.correlation_id, &msg).await
    }

    fn render(&self) -> ChatMessage {
        let mut text = format!("*{}*", self.title);
        for key in &self.order {
            if let Some(entry) = self.entries.get(key) {
                text.push_str(&format!("\n{} {}", entry.status.glyph(), entry.description));
            }
        }
        ChatMessage::text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSurface;

    #[tokio::test]
    async fn renders_one_correlated_message_with_status_glyphs() {
        let surface = RecordingSurface::new();
        let mut list = TaskListMessage::new("Provisioning", surface.clone());
        list.add_task("t1", "Create repository");
        list.add_task("t2", "Configure access");
        list.add_task("t3", "Create build job");

        list.display().await.unwrap();
        list.succeed_task("t1").await.unwrap();

        let posts = surface.posts();
        assert_eq!(posts.len(), 2);
        // Both sends target the same message.
        assert_eq!(posts[0].0, posts[1].0);
        assert_eq!(posts[1].0, *list.correlation_id());

        let text = &posts[1].1.text;
        assert_eq!(
            text,
            "*Provisioning*\n✓ Create repository\n● Configure access\n● Create build job"
        );
    }

    #[tokio::test]
    async fn fail_remaining_only_touches_pending_entries() {
        let surface = RecordingSurface::new();
        let mut list = TaskListMessage::new("Provisioning", surface.clone());
        list.add_task("t1", "one");
        list.add_task("t2", "two");
        list.add_task("t3", "three");

        list.succeed_task("t1").await.unwrap();
        list.fail_remaining_tasks().await.unwrap();

        assert_eq!(list.status("t1"), Some(TaskStatus::Successful));
        assert_eq!(list.status("t2"), Some(TaskStatus::Failed));
        assert_eq!(list.status("t3"), Some(TaskStatus::Failed));

        let text = surface.last_post().unwrap().1.text;
        assert_eq!(text, "*Provisioning*\n✓ one\n✗ two\n✗ three");
    }

    #[tokio::test]
    async fn unknown_key_is_an_error() {
        let surface = RecordingSurface::new();
        let mut list = TaskListMessage::new("Provisioning", surface);
        let err = list.succeed_task("missing").await.unwrap_err();
        assert!(matches!(err, SubatomicError::TaskNotFound(k) if k == "missing"));
    }

    #[tokio::test]
    async fn duplicate_key_keeps_position() {
        let surface = RecordingSurface::new();
        let mut list = TaskListMessage::new("Provisioning", surface.clone());
        list.add_task("t1", "one");
        list.add_task("t2", "two");
        list.add_task("t1", "one again");

        list.display().await.unwrap();
        assert_eq!(list.status("t1"), Some(TaskStatus::Pending));
        let text = surface.last_post().unwrap().1.text;
        assert_eq!(text, "*Provisioning*\n● one again\n● two");
    }
}
