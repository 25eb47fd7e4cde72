//! The subatomic orchestration engine: recursive parameter resolution for
//! chat-driven commands, plus sequential task execution with live progress
//! reporting into a single correlated chat message.

pub mod command;
pub mod correlation;
pub mod error;
pub mod message;
pub mod names;
pub mod param;
pub mod resolver;
pub mod runner;
pub mod session;
pub mod status;
pub mod task;
pub mod task_list;

#[cfg(test)]
pub(crate) mod testing;

pub use command::{Command, CommandInfo, CommandRegistry};
pub use correlation::CorrelationId;
pub use error::{Result, SubatomicError};
pub use message::{menu, ChatMessage, ChatSurface, MenuOption, MessageAction};
pub use names::unique_name;
pub use param::{ParameterSetter, ParameterSpec, SetterOutcome, SetterRegistry};
pub use resolver::{Outcome, Resolver};
pub use runner::TaskRunner;
pub use session::Session;
pub use task::{Task, TaskStatus};
pub use task_list::TaskListMessage;
