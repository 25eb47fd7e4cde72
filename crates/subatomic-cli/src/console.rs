//! Renders correlated chat messages as console blocks. A real chat surface
//! updates one message in place; a terminal can only append, so each update
//! is reprinted as a block tagged with the short correlation id.

use async_trait::async_trait;
use std::sync::Mutex;
use subatomic_core::{ChatMessage, ChatSurface, CorrelationId, MenuOption, MessageAction, Result};

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

#[derive(Default)]
pub struct ConsoleSurface {
    last_actions: Mutex<Vec<MessageAction>>,
}

impl ConsoleSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The menu from the most recent post, if any; the run loop maps a
    /// stdin selection back to the session field it populates.
    pub fn last_menu(&self) -> Option<(String, Vec<MenuOption>)> {
        self.last_actions
            .lock()
            .ok()?
            .iter()
            .find_map(|action| match action {
                MessageAction::Menu { field, options, .. } => {
                    Some((field.clone(), options.clone()))
                }
                MessageAction::Button { .. } => None,
            })
    }

    fn colorize(line: &str) -> String {
        let color = match line.chars().next() {
            Some('✓') => GREEN,
            Some('●') => YELLOW,
            Some('✗') => RED,
            _ => return line.to_string(),
        };
        format!("{color}{line}{RESET}")
    }
}

#[async_trait]
impl ChatSurface for ConsoleSurface {
    async fn post(&self, correlation: &CorrelationId, message: &ChatMessage) -> Result<()> {
        if let Ok(mut actions) = self.last_actions.lock() {
            *actions = message.actions.clone();
        }

        let stamp = chrono::Local::now().format("%H:%M:%S");
        println!("┌─ {} {stamp}", correlation.short());
        for line in message.text.lines() {
            println!("│ {}", Self::colorize(line));
        }
        for action in &message.actions {
            match action {
                MessageAction::Menu { text, options, .. } => {
                    println!("│ {text}:");
                    for (i, option) in options.iter().enumerate() {
                        println!("│   {}) {}", i + 1, option.label);
                    }
                }
                MessageAction::Button { label, command, .. } => {
                    println!("│ [{label}] → {command}");
                }
            }
        }
        println!("└─");
        Ok(())
    }
}
