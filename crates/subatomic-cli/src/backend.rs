//! In-memory stand-in for the provisioning backend ("Gluon"), Bitbucket,
//! Jenkins, and OpenShift. Real deployments put REST/CLI clients behind the
//! same call shapes; the harness only needs the domain errors and state
//! transitions.

use std::collections::BTreeMap;
use subatomic_core::{ChatMessage, MessageAction, Result, SubatomicError};

#[derive(Debug, Clone)]
pub struct Team {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub teams: Vec<String>,
    pub repository: Option<String>,
    pub build_job: Option<String>,
    pub environments: Vec<String>,
}

#[derive(Debug, Default)]
pub struct Backend {
    teams: BTreeMap<String, Team>,
    projects: BTreeMap<String, Project>,
}

/// Context handed through the engine to setters, commands, and tasks.
pub struct BotContext {
    pub backend: Backend,
}

impl BotContext {
    pub fn seeded() -> Self {
        BotContext {
            backend: Backend::seeded(),
        }
    }
}

impl Backend {
    /// Demo dataset so menus have content on a fresh process.
    pub fn seeded() -> Self {
        let mut backend = Backend::default();
        backend.teams.insert(
            "platform".into(),
            Team {
                name: "platform".into(),
                description: "Platform engineering".into(),
            },
        );
        backend.teams.insert(
            "data-eng".into(),
            Team {
                name: "data-eng".into(),
                description: "Data engineering".into(),
            },
        );
        backend.projects.insert(
            "mercury".into(),
            Project {
                name: "mercury".into(),
                description: "Payments gateway".into(),
                ..Project::default()
            },
        );
        backend.projects.insert(
            "apollo".into(),
            Project {
                name: "apollo".into(),
                description: "Launch telemetry".into(),
                teams: vec!["platform".into()],
                ..Project::default()
            },
        );
        backend
    }

    pub fn team_names(&self) -> Vec<String> {
        self.teams.keys().cloned().collect()
    }

    pub fn project_names(&self) -> Vec<String> {
        self.projects.keys().cloned().collect()
    }

    pub fn create_team(&mut self, name: &str, description: &str) -> Result<()> {
        if self.teams.contains_key(name) {
            return Err(SubatomicError::user(format!("team {name} already exists")));
        }
        self.teams.insert(
            name.to_string(),
            Team {
                name: name.to_string(),
                description: description.to_string(),
            },
        );
        Ok(())
    }

    pub fn team(&self, name: &str) -> Result<&Team> {
        self.teams.get(name).ok_or_else(|| missing_team(name))
    }

    pub fn project(&self, name: &str) -> Result<&Project> {
        self.projects
            .get(name)
            .ok_or_else(|| SubatomicError::user(format!("project {name} does not exist")))
    }

    fn project_mut(&mut self, name: &str) -> Result<&mut Project> {
        self.projects
            .get_mut(name)
            .ok_or_else(|| SubatomicError::user(format!("project {name} does not exist")))
    }

    pub fn associate_team(&mut self, project: &str, team: &str) -> Result<()> {
        self.team(team)?;
        let project = self.project_mut(project)?;
        if project.teams.iter().any(|t| t == team) {
            return Err(SubatomicError::user(format!(
                "team {team} is already associated with project {}",
                project.name
            )));
        }
        project.teams.push(team.to_string());
        Ok(())
    }

    // Simulated provisioning steps driven by the task runner.

    pub fn create_repository(&mut self, project: &str) -> Result<bool> {
        let project = self.project_mut(project)?;
        if project.repository.is_some() {
            return Ok(false);
        }
        project.repository = Some(format!("bitbucket/{}", project.name));
        Ok(true)
    }

    pub fn grant_repository_access(&mut self, project: &str, team: &str) -> Result<()> {
        self.team(team)?;
        let project = self.project_mut(project)?;
        if project.repository.is_none() {
            return Err(SubatomicError::user(format!(
                "project {} has no repository to grant access to",
                project.name
            )));
        }
        Ok(())
    }

    pub fn create_build_job(&mut self, project: &str) -> Result<()> {
        let project = self.project_mut(project)?;
        project.build_job = Some(format!("jenkins/{}-build", project.name));
        Ok(())
    }

    pub fn create_environment(&mut self, project: &str, environment: &str) -> Result<()> {
        let project = self.project_mut(project)?;
        let name = format!("{}-{environment}", project.name);
        if !project.environments.contains(&name) {
            project.environments.push(name);
        }
        Ok(())
    }
}

/// "team does not exist" carries an actionable create-team button.
fn missing_team(name: &str) -> SubatomicError {
    let prompt = ChatMessage::text(format!("Team {name} does not exist"))
        .with_action(MessageAction::Button {
            label: format!("Create team {name}"),
            command: "create-team".into(),
            fields: [("teamName".to_string(), name.to_string())].into(),
        });
    SubatomicError::user_with_prompt(format!("team {name} does not exist"), prompt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn associate_rejects_unknown_team() {
        let mut backend = Backend::seeded();
        let err = backend.associate_team("mercury", "ghosts").unwrap_err();
        assert!(matches!(
            err,
            SubatomicError::UserFacing { prompt: Some(_), .. }
        ));
    }

    #[test]
    fn associate_is_idempotent_rejecting() {
        let mut backend = Backend::seeded();
        backend.associate_team("mercury", "platform").unwrap();
        assert!(backend.associate_team("mercury", "platform").is_err());
    }

    #[test]
    fn repository_creation_reports_handled_duplicate() {
        let mut backend = Backend::seeded();
        assert!(backend.create_repository("mercury").unwrap());
        assert!(!backend.create_repository("mercury").unwrap());
    }
}
