use crate::error::{Result, SubatomicError};
use crate::message::ChatSurface;
use crate::param::{ParameterSpec, SetterRegistry};
use crate::session::Session;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// One chat command type.
///
/// `parameters` declares the recursive parameters; `bind_setters` is re-run
/// on every turn and may reorder resolution based on answers already in the
/// session. `run` is the business logic, invoked only once every force-set
/// parameter holds a value.
#[async_trait]
pub trait Command<C: Send>: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str {
        ""
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        Vec::new()
    }

    fn bind_setters(&self, _registry: &mut SetterRegistry<C>, _session: &Session) -> Result<()> {
        Ok(())
    }

    async fn run(
        &self,
        ctx: &mut C,
        session: &mut Session,
        chat: &Arc<dyn ChatSurface>,
    ) -> Result<()>;
}

// ---------------------------------------------------------------------------
// CommandRegistry
// ---------------------------------------------------------------------------

type CommandFactory<C> = Box<dyn Fn() -> Box<dyn Command<C>> + Send + Sync>;

#[derive(Debug, Clone, Serialize)]
pub struct CommandInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// Explicit registration table mapping command names to factories, built at
/// startup. Also powers the help/listing surface.
pub struct CommandRegistry<C: Send> {
    entries: BTreeMap<&'static str, (CommandInfo, CommandFactory<C>)>,
}

impl<C: Send> Default for CommandRegistry<C> {
    fn default() -> Self {
        CommandRegistry {
            entries: BTreeMap::new(),
        }
    }
}

impl<C: Send> CommandRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, factory: F) -> Result<()>
    where
        F: Fn() -> Box<dyn Command<C>> + Send + Sync + 'static,
    {
        let probe = factory();
        let info = CommandInfo {
            name: probe.name(),
            description: probe.description(),
        };
        if self.entries.contains_key(info.name) {
            return Err(SubatomicError::DuplicateCommand(info.name.to_string()));
        }
        self.entries.insert(info.name, (info, Box::new(factory)));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<Box<dyn Command<C>>> {
        self.entries
            .get(name)
            .map(|(_, factory)| factory())
            .ok_or_else(|| SubatomicError::CommandNotFound(name.to_string()))
    }

    pub fn list(&self) -> Vec<CommandInfo> {
        self.entries.values().map(|(info, _)| info.clone()).collect()
    }
}
