mod associate_team;
mod create_team;
mod provision_project;
mod setters;

pub use associate_team::AssociateTeam;
pub use create_team::CreateTeam;
pub use provision_project::ProvisionProject;

use crate::backend::BotContext;
use subatomic_core::{CommandRegistry, Result};

/// The explicit registration table built at startup.
pub fn registry() -> Result<CommandRegistry<BotContext>> {
    let mut registry = CommandRegistry::new();
    registry.register(|| Box::new(CreateTeam))?;
    registry.register(|| Box::new(AssociateTeam))?;
    registry.register(|| Box::new(ProvisionProject))?;
    Ok(registry)
}
