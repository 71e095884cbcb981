//! System commands - reserved, prefix-marked input resolved without the backend

use crate::domain::entities::WorldState;

/// Marks an input line as a system command
pub const SYSTEM_COMMAND_PREFIX: char = '.';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemCommand {
    Quit,
    Health,
    Inventory,
    Location,
    Character,
    Stats,
    Help,
    /// Anything else carrying the prefix; holds the input as typed
    Unknown(String),
}

impl SystemCommand {
    /// Whether `input` is addressed to the system rather than the narrator
    pub fn is_system_input(input: &str) -> bool {
        input.starts_with(SYSTEM_COMMAND_PREFIX)
    }

    /// Look up a prefixed input in the command table, ignoring case
    pub fn parse(input: &str) -> Self {
        match input.to_lowercase().as_str() {
            ".quit" | ".exit" => Self::Quit,
            ".health" => Self::Health,
            ".inventory" => Self::Inventory,
            ".location" => Self::Location,
            ".character" => Self::Character,
            ".stats" => Self::Stats,
            ".help" => Self::Help,
            _ => Self::Unknown(input.to_string()),
        }
    }

    pub fn ends_session(&self) -> bool {
        matches!(self, Self::Quit)
    }

    /// Render the command's output. World state is only read.
    pub fn render(&self, world: &WorldState) -> String {
        match self {
            Self::Quit => "Exiting game...".to_string(),
            Self::Health => format!("Current health: {}", world.health()),
            Self::Inventory => {
                format!("Inventory: {}", world.snapshot().inventory_display())
            }
            Self::Location => format!("Current location: {}", world.location()),
            Self::Character => match world.character() {
                Some(character) => character.details(),
                None => "No character has been created yet.".to_string(),
            },
            Self::Stats => {
                let attributes = world.attributes();
                format!(
                    "Character Stats:\n  Health: {}\n  Strength: {}\n  Wisdom: {}\n  Dexterity: {}\n  Charisma: {}\n  {}: {}",
                    world.health(),
                    attributes.strength,
                    attributes.wisdom,
                    attributes.dexterity,
                    attributes.charisma,
                    capitalize(world.genre().currency_name()),
                    world.money()
                )
            }
            Self::Help => HELP_TEXT.to_string(),
            Self::Unknown(input) => format!(
                "Unknown command: {}. Type .help for available commands.",
                input
            ),
        }
    }
}

const HELP_TEXT: &str = "Available commands:
  .exit, .quit - Exit the game
  .health - Show current health
  .inventory - Show inventory contents
  .location - Show current location
  .character - Show character details
  .stats - Show character stats
  .help - Show this help message";

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
