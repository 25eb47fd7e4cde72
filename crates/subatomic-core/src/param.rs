use crate::error::{Result, SubatomicError};
use crate::message::ChatMessage;
use crate::session::Session;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// ParameterSpec
// ---------------------------------------------------------------------------

/// Declaration metadata for one recursive parameter, built at command
/// definition time and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ParameterSpec {
    /// Unique key within the command's declarations.
    pub key: String,
    /// Backing session field the value is read from and written to.
    pub field: String,
    /// Human-readable selection prompt handed to the setter.
    pub prompt: Option<String>,
    /// Whether resolution must complete before business logic runs.
    pub force_set: bool,
}

impl ParameterSpec {
    pub fn new(key: impl Into<String>, field: impl Into<String>) -> Self {
        ParameterSpec {
            key: key.into(),
            field: field.into(),
            prompt: None,
            force_set: true,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Mark the parameter as optionally deferred: it never blocks business
    /// logic, which must tolerate its absence.
    pub fn optional(mut self) -> Self {
        self.force_set = false;
        self
    }
}

// ---------------------------------------------------------------------------
// Setters
// ---------------------------------------------------------------------------

/// Outcome of one setter invocation.
#[derive(Debug)]
pub enum SetterOutcome {
    /// The setter determined the value and wrote it into the session.
    Resolved,
    /// The value needs user input; resolution pauses until the next turn
    /// delivers it. The prompt (typically a menu) is appended to the running
    /// summary message.
    NeedsInput(ChatMessage),
}

/// Resolves one recursive parameter, either synchronously via lookup or by
/// emitting a user-facing prompt.
#[async_trait]
pub trait ParameterSetter<C: Send>: Send + Sync {
    async fn resolve(
        &self,
        ctx: &mut C,
        session: &mut Session,
        prompt: &str,
    ) -> Result<SetterOutcome>;
}

// ---------------------------------------------------------------------------
// SetterRegistry
// ---------------------------------------------------------------------------

/// Per-invocation binding of parameter keys to setters.
///
/// Rebuilt by the command's binding hook on every turn; binding order is the
/// resolution order, which lets a command reorder its parameters based on
/// answers already in the session.
pub struct SetterRegistry<C: Send> {
    order: Vec<String>,
    setters: HashMap<String, Arc<dyn ParameterSetter<C>>>,
}

impl<C: Send> Default for SetterRegistry<C> {
    fn default() -> Self {
        SetterRegistry {
            order: Vec::new(),
            setters: HashMap::new(),
        }
    }
}

impl<C: Send> SetterRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a setter to a parameter key. Binding the same key twice is a
    /// configuration fault in the command definition.
    pub fn bind(
        &mut self,
        key: impl Into<String>,
        setter: Arc<dyn ParameterSetter<C>>,
    ) -> Result<()> {
        let key = key.into();
        if self.setters.contains_key(&key) {
            return Err(SubatomicError::DuplicateParameter(key));
        }
        self.order.push(key.clone());
        self.setters.insert(key, setter);
        Ok(())
    }

    /// Parameter keys in resolution (binding) order.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    pub fn get(&self, key: &str) -> Option<&Arc<dyn ParameterSetter<C>>> {
        self.setters.get(key)
    }
}
