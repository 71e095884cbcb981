//! Prompt building functions for LLM requests

use crate::domain::entities::CharacterSheet;
use crate::domain::value_objects::WorldSnapshot;

/// Game master prompt, rendered once per narrative turn
pub const GAME_MASTER_TEMPLATE: &str = "Transcript:
%TRANSCRIPT%

Character:
  Name: %CHARACTER_NAME%
  Race: %CHARACTER_RACE%
  Sex: %CHARACTER_SEX%
  Age: %CHARACTER_AGE%
  Occupation: %CHARACTER_OCCUPATION%
  Description: %CHARACTER_DESCRIPTION%
  Backstory: %CHARACTER_BACKSTORY%

Location: %LOCATION%
Health: %HEALTH%
Strength: %STRENGTH%
Wisdom: %WISDOM%
Dexterity: %DEXTERITY%
Charisma: %CHARISMA%
%CURRENCY_NAME%: %MONEY%
Inventory: %INVENTORY%

Player Input:
%PLAYER_INPUT%

Assume the role of a TTRPG Game Master and respond to the player appropriately. Consider the character's backstory and traits in your responses. If there is combat, and the player has been wounded, include the following macro in your response: HEALTH_SUBTRACT(<amount>)";

pub const CHARACTER_DESCRIPTION_TEMPLATE: &str = "Generate a detailed physical description for a %RACE% %OCCUPATION% who is %AGE% years old and %SEX%. The description should be 2-3 sentences long and focus on distinctive physical features that make the character unique and memorable.";

pub const CHARACTER_BACKSTORY_TEMPLATE: &str = "Create a compelling backstory for a %RACE% %OCCUPATION% who is %AGE% years old and %SEX%. The backstory should explain how they came to be in their current profession and include at least one significant life event that shaped their character. Keep the backstory concise but meaningful, about 3-4 sentences long.";

/// Which piece of character text to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterPromptKind {
    Description,
    Backstory,
}

impl CharacterPromptKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::Backstory => "backstory",
        }
    }

    fn template(&self) -> &'static str {
        match self {
            Self::Description => CHARACTER_DESCRIPTION_TEMPLATE,
            Self::Backstory => CHARACTER_BACKSTORY_TEMPLATE,
        }
    }
}

/// Build the game master prompt from a world snapshot and the player's input
pub fn build_game_prompt(snapshot: &WorldSnapshot, player_input: &str) -> String {
    let character = &snapshot.character;
    let values = [
        ("TRANSCRIPT", snapshot.transcript.clone()),
        ("LOCATION", snapshot.location.clone()),
        ("HEALTH", snapshot.health.to_string()),
        ("STRENGTH", snapshot.attributes.strength.to_string()),
        ("WISDOM", snapshot.attributes.wisdom.to_string()),
        ("DEXTERITY", snapshot.attributes.dexterity.to_string()),
        ("CHARISMA", snapshot.attributes.charisma.to_string()),
        ("CURRENCY_NAME", snapshot.currency_name.clone()),
        ("MONEY", snapshot.money.to_string()),
        ("INVENTORY", snapshot.inventory_display()),
        ("CHARACTER_NAME", character.name.clone()),
        ("CHARACTER_RACE", character.race.clone()),
        ("CHARACTER_SEX", character.sex.to_string()),
        ("CHARACTER_AGE", character.age.to_string()),
        ("CHARACTER_OCCUPATION", character.occupation.clone()),
        ("CHARACTER_DESCRIPTION", character.description.clone()),
        ("CHARACTER_BACKSTORY", character.backstory.clone()),
        ("PLAYER_INPUT", player_input.to_string()),
    ];
    render_template(GAME_MASTER_TEMPLATE, &values)
}

/// Build a prompt asking for a character's description or backstory
pub fn build_character_prompt(kind: CharacterPromptKind, character: &CharacterSheet) -> String {
    let values = [
        ("RACE", character.race.clone()),
        ("OCCUPATION", character.occupation.clone()),
        ("AGE", character.age.to_string()),
        ("SEX", character.sex.to_string()),
    ];
    render_template(kind.template(), &values)
}

/// Substitute `%NAME%` placeholders in a single left-to-right pass.
///
/// Substituted values are never rescanned, so a value that itself contains
/// `%NAME%` text is inserted verbatim. Unknown `%...%` spans are left as-is.
pub fn render_template(template: &str, values: &[(&str, String)]) -> String {
    debug_assert!(
        placeholders(template)
            .iter()
            .all(|key| values.iter().any(|(name, _)| name == key)),
        "template has placeholders without values"
    );

    let mut out = String::with_capacity(template.len() * 2);
    let mut rest = template;

    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let substitution = after.find('%').and_then(|end| {
            let key = &after[..end];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (end, value))
        });

        match substitution {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('%');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Placeholder names (`%NAME%` with upper-case letters and underscores) in a template
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut found = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find('%') {
        let after = &rest[start + 1..];
        match after.find('%') {
            Some(end)
                if end > 0
                    && after[..end]
                        .chars()
                        .all(|c| c.is_ascii_uppercase() || c == '_') =>
            {
                found.push(&after[..end]);
                rest = &after[end + 1..];
            }
            _ => rest = after,
        }
    }

    found
}
