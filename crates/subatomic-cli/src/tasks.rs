//! Provisioning tasks executed by the task runner. Each task registers its
//! entries under unique keys so several instances of one type (one access
//! task per associated team) can share a list.

use crate::backend::BotContext;
use async_trait::async_trait;
use subatomic_core::{unique_name, Result, Task, TaskListMessage};

pub struct CreateRepositoryTask {
    project: String,
    key: String,
}

impl CreateRepositoryTask {
    pub fn new(project: &str) -> Self {
        CreateRepositoryTask {
            project: project.to_string(),
            key: unique_name("CreateRepository"),
        }
    }
}

#[async_trait]
impl Task<BotContext> for CreateRepositoryTask {
    fn register(&mut self, list: &mut TaskListMessage) {
        list.add_task(self.key.clone(), "Create Bitbucket repository");
    }

    async fn execute(&self, ctx: &mut BotContext, list: &mut TaskListMessage) -> Result<bool> {
        if !ctx.backend.create_repository(&self.project)? {
            tracing::warn!(project = %self.project, "repository already provisioned");
            return Ok(false);
        }
        list.succeed_task(&self.key).await?;
        Ok(true)
    }
}

pub struct ConfigureTeamAccessTask {
    project: String,
    team: String,
    key: String,
}

impl ConfigureTeamAccessTask {
    pub fn new(project: &str, team: &str) -> Self {
        ConfigureTeamAccessTask {
            project: project.to_string(),
            team: team.to_string(),
            key: unique_name("ConfigureTeamAccess"),
        }
    }
}

#[async_trait]
impl Task<BotContext> for ConfigureTeamAccessTask {
    fn register(&mut self, list: &mut TaskListMessage) {
        list.add_task(
            self.key.clone(),
            format!("Configure repository access for {}", self.team),
        );
    }

    async fn execute(&self, ctx: &mut BotContext, list: &mut TaskListMessage) -> Result<bool> {
        ctx.backend
            .grant_repository_access(&self.project, &self.team)?;
        list.succeed_task(&self.key).await?;
        Ok(true)
    }
}

pub struct CreateBuildJobTask {
    project: String,
    key: String,
}

impl CreateBuildJobTask {
    pub fn new(project: &str) -> Self {
        CreateBuildJobTask {
            project: project.to_string(),
            key: unique_name("CreateBuildJob"),
        }
    }
}

#[async_trait]
impl Task<BotContext> for CreateBuildJobTask {
    fn register(&mut self, list: &mut TaskListMessage) {
        list.add_task(self.key.clone(), "Create Jenkins build job");
    }

    async fn execute(&self, ctx: &mut BotContext, list: &mut TaskListMessage) -> Result<bool> {
        ctx.backend.create_build_job(&self.project)?;
        list.succeed_task(&self.key).await?;
        Ok(true)
    }
}

/// Header entry plus one sub-step per environment.
pub struct CreateEnvironmentsTask {
    project: String,
    header_key: String,
    environments: Vec<(String, &'static str)>,
}

impl CreateEnvironmentsTask {
    pub fn new(project: &str) -> Self {
        CreateEnvironmentsTask {
            project: project.to_string(),
            header_key: unique_name("CreateEnvironments"),
            environments: ["dev", "test", "prod"]
                .into_iter()
                .map(|env| (unique_name(env), env))
                .collect(),
        }
    }
}

#[async_trait]
impl Task<BotContext> for CreateEnvironmentsTask {
    fn register(&mut self, list: &mut TaskListMessage) {
        list.add_task(self.header_key.clone(), "Create OpenShift environments");
        for (key, env) in &self.environments {
            list.add_task(key.clone(), format!("  environment {env}"));
        }
    }

    async fn execute(&self, ctx: &mut BotContext, list: &mut TaskListMessage) -> Result<bool> {
        for (key, env) in &self.environments {
            ctx.backend.create_environment(&self.project, env)?;
            list.succeed_task(key).await?;
        }
        list.succeed_task(&self.header_key).await?;
        Ok(true)
    }
}
