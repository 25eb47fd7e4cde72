use crate::backend::BotContext;
use async_trait::async_trait;
use std::sync::Arc;
use subatomic_core::{ChatMessage, ChatSurface, Command, Result, Session, SubatomicError};

/// Plain command: both inputs arrive with the invocation, nothing recursive.
pub struct CreateTeam;

#[async_trait]
impl Command<BotContext> for CreateTeam {
    fn name(&self) -> &'static str {
        "create-team"
    }

    fn description(&self) -> &'static str {
        "Create a new delivery team"
    }

    async fn run(
        &self,
        ctx: &mut BotContext,
        session: &mut Session,
        chat: &Arc<dyn ChatSurface>,
    ) -> Result<()> {
        let name = session
            .get("teamName")
            .map(str::to_string)
            .ok_or_else(|| SubatomicError::user("supply a team name: --set teamName=<name>"))?;
        let description = session.get("description").unwrap_or("").to_string();

        ctx.backend.create_team(&name, &description)?;
        tracing::info!(team = %name, "team created");

        let correlation = session.ensure_correlation_id().clone();
        chat.post(
            &correlation,
            &ChatMessage::text(format!("✓ Team {name} created")),
        )
        .await
    }
}
