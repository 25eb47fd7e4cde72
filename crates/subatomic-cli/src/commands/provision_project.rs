use crate::backend::BotContext;
use crate::commands::setters::ProjectNameSetter;
use crate::tasks::{
    ConfigureTeamAccessTask, CreateBuildJobTask, CreateEnvironmentsTask, CreateRepositoryTask,
};
use async_trait::async_trait;
use std::sync::Arc;
use subatomic_core::{
    ChatMessage, ChatSurface, Command, ParameterSpec, Result, Session, SetterRegistry,
    SubatomicError, TaskListMessage, TaskRunner,
};

/// Provision delivery infrastructure for a project: repository, per-team
/// access, build job, and environments — sequentially, with live progress.
pub struct ProvisionProject;

#[async_trait]
impl Command<BotContext> for ProvisionProject {
    fn name(&self) -> &'static str {
        "provision-project"
    }

    fn description(&self) -> &'static str {
        "Provision repository, build job, and environments for a project"
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        vec![ParameterSpec::new("projectName", "projectName")
            .with_prompt("Select the project to provision")]
    }

    fn bind_setters(
        &self,
        registry: &mut SetterRegistry<BotContext>,
        _session: &Session,
    ) -> Result<()> {
        registry.bind("projectName", Arc::new(ProjectNameSetter))
    }

    async fn run(
        &self,
        ctx: &mut BotContext,
        session: &mut Session,
        chat: &Arc<dyn ChatSurface>,
    ) -> Result<()> {
        let project = session
            .get("projectName")
            .map(str::to_string)
            .ok_or_else(|| SubatomicError::user("projectName was not resolved"))?;
        let teams = ctx.backend.project(&project)?.teams.clone();

        let list = TaskListMessage::new(format!("Provisioning {project}"), chat.clone());
        let mut runner = TaskRunner::new(list)
            .add_task(Box::new(CreateRepositoryTask::new(&project)));
        for team in &teams {
            runner = runner.add_task(Box::new(ConfigureTeamAccessTask::new(&project, team)));
        }
        runner = runner
            .add_task(Box::new(CreateBuildJobTask::new(&project)))
            .add_task(Box::new(CreateEnvironmentsTask::new(&project)));

        let ok = runner.execute(ctx).await?;

        let correlation = session.ensure_correlation_id().clone();
        let closing = if ok {
            format!("✓ Project {project} provisioned")
        } else {
            format!("✗ Provisioning of {project} aborted, see the task list above")
        };
        chat.post(&correlation, &ChatMessage::text(closing)).await
    }
}
