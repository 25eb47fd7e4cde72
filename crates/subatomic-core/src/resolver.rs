use crate::command::Command;
use crate::correlation::CorrelationId;
use crate::error::{Result, SubatomicError};
use crate::message::{ChatMessage, ChatSurface};
use crate::param::{ParameterSpec, SetterOutcome, SetterRegistry};
use crate::session::Session;
use crate::status::resolved_summary;
use std::collections::HashSet;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// What one resolver invocation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every force-set parameter was resolved and the business logic ran.
    Completed,
    /// A prompt was sent; resolution is paused until the next turn delivers
    /// the user's choice in a rehydrated session.
    AwaitingInput,
    /// A domain error was converted into a user-facing message on the
    /// correlated thread.
    Failed,
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Drives recursive parameter resolution for one command invocation.
///
/// `handle` is re-invoked by the driving surface once per user turn. Each
/// invocation re-binds setters, re-renders the cumulative summary, and
/// either resolves the next missing parameter, pauses for user input, or
/// runs the command's business logic.
pub struct Resolver {
    chat: Arc<dyn ChatSurface>,
}

impl Resolver {
    pub fn new(chat: Arc<dyn ChatSurface>) -> Self {
        Resolver { chat }
    }

    pub fn chat(&self) -> &Arc<dyn ChatSurface> {
        &self.chat
    }

    pub async fn handle<C: Send>(
        &self,
        command: &dyn Command<C>,
        ctx: &mut C,
        session: &mut Session,
    ) -> Result<Outcome> {
        let correlation = session.ensure_correlation_id().clone();
        let params = command.parameters();
        validate_declarations(&params)?;

        // Setter success loops back here instead of recursing: the next pass
        // re-binds setters and re-renders, exactly like a fresh invocation.
        loop {
            let mut registry = SetterRegistry::new();
            command.bind_setters(&mut registry, session)?;

            let summary = resolved_summary(&params, session);
            if session.display_resolved() && !summary.is_empty() {
                self.chat.post(&correlation, &summary).await?;
            }

            let order = resolution_order(&params, registry.order());
            let blocking = order
                .iter()
                .any(|p| p.force_set && !session.is_set(&p.field));
            if !blocking {
                tracing::debug!(command = command.name(), "parameters resolved, running command");
                return match command.run(ctx, session, &self.chat).await {
                    Ok(()) => Ok(Outcome::Completed),
                    Err(err) => self.report_error(command.name(), &correlation, err).await,
                };
            }

            // A force-set parameter is missing, so at least one parameter is
            // unresolved; take the first in resolution order.
            for spec in order {
                if session.is_set(&spec.field) {
                    continue;
                }
                let setter = registry
                    .get(&spec.key)
                    .ok_or_else(|| SubatomicError::MissingSetter(spec.key.clone()))?;
                let prompt = spec
                    .prompt
                    .clone()
                    .unwrap_or_else(|| format!("Select a value for {}", spec.key));

                match setter.resolve(ctx, session, &prompt).await {
                    Ok(SetterOutcome::Resolved) => {
                        tracing::debug!(
                            command = command.name(),
                            parameter = %spec.key,
                            "parameter resolved"
                        );
                    }
                    Ok(SetterOutcome::NeedsInput(prompt_msg)) => {
                        let mut msg = if session.display_resolved() {
                            summary
                        } else {
                            ChatMessage::default()
                        };
                        msg.append(prompt_msg);
                        self.chat.post(&correlation, &msg).await?;
                        return Ok(Outcome::AwaitingInput);
                    }
                    Err(err) => {
                        return self.report_error(command.name(), &correlation, err).await
                    }
                }
                break;
            }
        }
    }

    /// The one designated boundary that turns errors into user-visible chat
    /// responses. Configuration faults indicate broken command definitions
    /// and propagate instead.
    async fn report_error(
        &self,
        command: &str,
        correlation: &CorrelationId,
        err: SubatomicError,
    ) -> Result<Outcome> {
        if err.is_configuration_fault() {
            return Err(err);
        }
        let msg = match err {
            SubatomicError::UserFacing {
                prompt: Some(prompt),
                message,
            } => {
                tracing::warn!(command, error = %message, "domain error reported to user");
                prompt
            }
            SubatomicError::UserFacing {
                message,
                prompt: None,
            } => {
                tracing::warn!(command, error = %message, "domain error reported to user");
                ChatMessage::text(message)
            }
            other => {
                tracing::error!(command, error = %other, "unexpected fault reported to user");
                ChatMessage::text(format!("Something went wrong: {other}"))
            }
        };
        self.chat.post(correlation, &msg).await?;
        Ok(Outcome::Failed)
    }
}

/// Duplicate recursive keys are configuration faults, rejected before any
/// resolution attempt.
fn validate_declarations(params: &[ParameterSpec]) -> Result<()> {
    let mut seen = HashSet::new();
    for spec in params {
        if !seen.insert(spec.key.as_str()) {
            return Err(SubatomicError::DuplicateParameter(spec.key.clone()));
        }
    }
    Ok(())
}

/// Resolution order is setter-binding order, with declared-but-unbound
/// parameters appended in declaration order (an unbound parameter only
/// faults if the scan actually reaches it unresolved).
fn resolution_order<'a>(
    params: &'a [ParameterSpec],
    bound: &[String],
) -> Vec<&'a ParameterSpec> {
    let mut order = Vec::with_capacity(params.len());
    for key in bound {
        match params.iter().find(|p| &p.key == key) {
            Some(spec) => order.push(spec),
            None => tracing::warn!(key = %key, "setter bound for undeclared parameter, ignoring"),
        }
    }
    for spec in params {
        if !bound.iter().any(|k| k == &spec.key) {
            order.push(spec);
        }
    }
    order
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
