use crate::backend::BotContext;
use crate::commands::setters::{ProjectNameSetter, TeamNameSetter};
use async_trait::async_trait;
use std::sync::Arc;
use subatomic_core::{
    ChatMessage, ChatSurface, Command, ParameterSpec, Result, Session, SetterRegistry,
    SubatomicError,
};

/// Associate a team with a project. The project must be known before the
/// team menu can be narrowed down, so projectName binds first.
pub struct AssociateTeam;

#[async_trait]
impl Command<BotContext> for AssociateTeam {
    fn name(&self) -> &'static str {
        "associate-team"
    }

    fn description(&self) -> &'static str {
        "Associate a team with an existing project"
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::new("projectName", "projectName").with_prompt("Select the project"),
            ParameterSpec::new("teamName", "teamName").with_prompt("Select the team to associate"),
        ]
    }

    fn bind_setters(
        &self,
        registry: &mut SetterRegistry<BotContext>,
        _session: &Session,
    ) -> Result<()> {
        registry.bind("projectName", Arc::new(ProjectNameSetter))?;
        registry.bind("teamName", Arc::new(TeamNameSetter))?;
        Ok(())
    }

    async fn run(
        &self,
        ctx: &mut BotContext,
        session: &mut Session,
        chat: &Arc<dyn ChatSurface>,
    ) -> Result<()> {
        let project = required(session, "projectName")?;
        let team = required(session, "teamName")?;

        ctx.backend.associate_team(&project, &team)?;
        tracing::info!(project = %project, team = %team, "team associated");

        let correlation = session.ensure_correlation_id().clone();
        chat.post(
            &correlation,
            &ChatMessage::text(format!("✓ Associated team {team} with project {project}")),
        )
        .await
    }
}

fn required(session: &Session, field: &str) -> Result<String> {
    session
        .get(field)
        .map(str::to_string)
        .ok_or_else(|| SubatomicError::user(format!("{field} was not resolved")))
}
