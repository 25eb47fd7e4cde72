//! Shared test doubles: a recording chat surface and scripted setters.

use crate::correlation::CorrelationId;
use crate::error::Result;
use crate::message::{menu, ChatMessage, ChatSurface, MenuOption};
use crate::param::{ParameterSetter, SetterOutcome};
use crate::session::Session;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Chat surface that records every post instead of sending anything.
#[derive(Default)]
pub(crate) struct RecordingSurface {
    posts: Mutex<Vec<(CorrelationId, ChatMessage)>>,
}

impl RecordingSurface {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn posts(&self) -> Vec<(CorrelationId, ChatMessage)> {
        self.posts.lock().unwrap().clone()
    }

    pub(crate) fn last_post(&self) -> Option<(CorrelationId, ChatMessage)> {
        self.posts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ChatSurface for RecordingSurface {
    async fn post(&self, correlation: &CorrelationId, message: &ChatMessage) -> Result<()> {
        self.posts
            .lock()
            .unwrap()
            .push((correlation.clone(), message.clone()));
        Ok(())
    }
}

/// Setter that either writes a scripted value (Resolved) or emits a menu
/// prompt (NeedsInput), counting invocations either way.
pub(crate) struct ScriptedSetter {
    field: String,
    value: Option<String>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl<C: Send> ParameterSetter<C> for ScriptedSetter {
    async fn resolve(
        &self,
        _ctx: &mut C,
        session: &mut Session,
        prompt: &str,
    ) -> Result<SetterOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.value {
            Some(value) => {
                session.set(self.field.clone(), value.clone());
                Ok(SetterOutcome::Resolved)
            }
            None => Ok(SetterOutcome::NeedsInput(menu(
                prompt,
                self.field.clone(),
                vec![MenuOption::new("first", "first"), MenuOption::new("second", "second")],
            ))),
        }
    }
}

pub(crate) fn resolved_setter<C: Send + 'static>(
    field: &str,
    value: &str,
) -> Arc<dyn ParameterSetter<C>> {
    Arc::new(ScriptedSetter {
        field: field.to_string(),
        value: Some(value.to_string()),
        calls: Arc::new(AtomicUsize::new(0)),
    })
}

pub(crate) fn counting_resolved_setter<C: Send + 'static>(
    field: &str,
    value: &str,
) -> (Arc<dyn ParameterSetter<C>>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let setter = Arc::new(ScriptedSetter {
        field: field.to_string(),
        value: Some(value.to_string()),
        calls: calls.clone(),
    });
    (setter, calls)
}

pub(crate) fn menu_setter<C: Send + 'static>(
    field: &str,
) -> (Arc<dyn ParameterSetter<C>>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let setter = Arc::new(ScriptedSetter {
        field: field.to_string(),
        value: None,
        calls: calls.clone(),
    });
    (setter, calls)
}
