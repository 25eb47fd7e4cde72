mod backend;
mod commands;
mod console;
mod output;
mod tasks;

use anyhow::{bail, Context};
use backend::BotContext;
use clap::{Parser, Subcommand};
use console::ConsoleSurface;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use subatomic_core::{MenuOption, Outcome, Resolver, Session};

#[derive(Parser)]
#[command(
    name = "subatomic",
    about = "Chat-driven software delivery bot — terminal harness",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered bot commands
    Commands {
        /// Output as JSON
        #[arg(long, short = 'j')]
        json: bool,
    },

    /// Drive a bot command through the parameter resolver, turn by turn
    Run {
        /// Bot command name (see `subatomic commands`)
        name: String,

        /// Bind a session field before the turn, platform-style
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,

        /// Persist the session to this file between turns
        #[arg(long, value_name = "FILE")]
        session: Option<PathBuf>,

        /// Perform exactly one resolver invocation, then exit
        #[arg(long)]
        once: bool,

        /// Hide the resolved-parameter summary
        #[arg(long)]
        no_summary: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Commands { json } => list_commands(json),
        Commands::Run {
            name,
            set,
            session,
            once,
            no_summary,
        } => run(&name, &set, session.as_deref(), once, no_summary).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn list_commands(json: bool) -> anyhow::Result<()> {
    let infos = commands::registry()?.list();
    if json {
        return output::print_json(&infos);
    }
    for info in infos {
        println!("{:<20} {}", info.name, info.description);
    }
    Ok(())
}

async fn run(
    name: &str,
    set: &[String],
    session_path: Option<&Path>,
    once: bool,
    no_summary: bool,
) -> anyhow::Result<()> {
    let registry = commands::registry()?;
    let command = registry.get(name)?;

    let mut session = load_session(session_path)?;
    for pair in set {
        let (field, value) = pair
            .split_once('=')
            .with_context(|| format!("expected FIELD=VALUE, got '{pair}'"))?;
        session.set(field, value);
    }
    if no_summary {
        session.set_display_resolved(false);
    }

    let surface = Arc::new(ConsoleSurface::new());
    let resolver = Resolver::new(surface.clone());
    let mut ctx = BotContext::seeded();

    // Each pass is one chat turn; interactive mode folds the user's menu
    // click back into the session and invokes the resolver again.
    loop {
        let outcome = resolver
            .handle(command.as_ref(), &mut ctx, &mut session)
            .await?;
        save_session(&session, session_path)?;

        match outcome {
            Outcome::Completed | Outcome::Failed => return Ok(()),
            Outcome::AwaitingInput => {
                if once {
                    return Ok(());
                }
                let Some((field, options)) = surface.last_menu() else {
                    return Ok(());
                };
                let Some(choice) = read_selection(&options)? else {
                    return Ok(()); // stdin closed
                };
                session.set(field, choice);
            }
        }
    }
}

fn read_selection(options: &[MenuOption]) -> anyhow::Result<Option<String>> {
    print!("> ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    if std::io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let line = line.trim();

    if let Ok(n) = line.parse::<usize>() {
        if (1..=options.len()).contains(&n) {
            return Ok(Some(options[n - 1].value.clone()));
        }
    }
    if let Some(option) = options.iter().find(|o| o.value == line || o.label == line) {
        return Ok(Some(option.value.clone()));
    }
    bail!("invalid selection: '{line}'");
}

fn load_session(path: Option<&Path>) -> anyhow::Result<Session> {
    match path {
        Some(p) if p.exists() => {
            let data = std::fs::read_to_string(p)
                .with_context(|| format!("reading session file {}", p.display()))?;
            Ok(serde_json::from_str(&data)?)
        }
        _ => Ok(Session::new()),
    }
}

fn save_session(session: &Session, path: Option<&Path>) -> anyhow::Result<()> {
    if let Some(p) = path {
        std::fs::write(p, serde_json::to_string_pretty(session)?)
            .with_context(|| format!("writing session file {}", p.display()))?;
    }
    Ok(())
}
