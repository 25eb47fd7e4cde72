//! Setters shared between commands: resolve from the backend when the
//! answer is unambiguous, otherwise hand the user a menu.

use crate::backend::BotContext;
use async_trait::async_trait;
use subatomic_core::{
    menu, MenuOption, ParameterSetter, Result, Session, SetterOutcome, SubatomicError,
};

pub struct ProjectNameSetter;

#[async_trait]
impl ParameterSetter<BotContext> for ProjectNameSetter {
    async fn resolve(
        &self,
        ctx: &mut BotContext,
        session: &mut Session,
        prompt: &str,
    ) -> Result<SetterOutcome> {
        let projects = ctx.backend.project_names();
        match projects.as_slice() {
            [] => Err(SubatomicError::user("there are no projects yet")),
            [only] => {
                session.set("projectName", only.clone());
                Ok(SetterOutcome::Resolved)
            }
            _ => Ok(SetterOutcome::NeedsInput(menu(
                prompt,
                "projectName",
                projects
                    .iter()
                    .map(|p| MenuOption::new(p.clone(), p.clone()))
                    .collect(),
            ))),
        }
    }
}

/// Offers only teams not yet associated with the already-chosen project.
pub struct TeamNameSetter;

#[async_trait]
impl ParameterSetter<BotContext> for TeamNameSetter {
    async fn resolve(
        &self,
        ctx: &mut BotContext,
        session: &mut Session,
        prompt: &str,
    ) -> Result<SetterOutcome> {
        let associated = session
            .get("projectName")
            .and_then(|p| ctx.backend.project(p).ok())
            .map(|p| p.teams.clone())
            .unwrap_or_default();
        let candidates: Vec<String> = ctx
            .backend
            .team_names()
            .into_iter()
            .filter(|t| !associated.contains(t))
            .collect();

        match candidates.as_slice() {
            [] => Err(SubatomicError::user(
                "every team is already associated with this project",
            )),
            [only] => {
                session.set("teamName", only.clone());
                Ok(SetterOutcome::Resolved)
            }
            _ => Ok(SetterOutcome::NeedsInput(menu(
                prompt,
                "teamName",
                candidates
                    .iter()
                    .map(|t| MenuOption::new(t.clone(), t.clone()))
                    .collect(),
            ))),
        }
    }
}
