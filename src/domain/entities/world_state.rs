//! World state - the single mutable model of one game session
//!
//! Owns the player's health, attributes, purse, inventory, location, the
//! rolling narrative transcript and the character sheet. The session
//! dispatcher is the only writer; everything else reads a [`WorldSnapshot`].

use rand::Rng;

use crate::domain::entities::CharacterSheet;
use crate::domain::value_objects::{
    Attributes, Genre, InvalidGenreError, WorldSnapshot, MONEY_RANGE,
};

pub const MAX_HEALTH: u32 = 100;

/// Default maximum transcript length, in characters
pub const DEFAULT_CONTEXT_WINDOW: usize = 16384;

/// Appended after every transcript entry
pub const TRANSCRIPT_SEPARATOR: &str = "\n";

/// Marks a message boundary that trimming may cut at
const MESSAGE_BOUNDARY: &str = "\n\n";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldStateError {
    #[error("Character has already been created for this session")]
    CharacterAlreadySet,
}

#[derive(Debug, Clone)]
pub struct WorldState {
    genre: Genre,
    health: u32,
    attributes: Attributes,
    money: u32,
    inventory: Vec<String>,
    transcript: String,
    context_window: usize,
    location: String,
    character: Option<CharacterSheet>,
}

impl WorldState {
    /// Create a fresh world for `genre`, rolling attributes and money
    pub fn new(genre: Genre) -> Self {
        Self::with_rng(genre, &mut rand::thread_rng())
    }

    /// Create a fresh world using the given random source
    pub fn with_rng(genre: Genre, rng: &mut impl Rng) -> Self {
        Self {
            genre,
            health: MAX_HEALTH,
            attributes: Attributes::roll(rng),
            money: rng.gen_range(MONEY_RANGE),
            inventory: Vec::new(),
            transcript: String::new(),
            context_window: DEFAULT_CONTEXT_WINDOW,
            location: genre.starting_location().to_string(),
            character: None,
        }
    }

    /// Create a world from a genre name, rejecting names outside the known set
    pub fn from_genre_name(name: &str) -> Result<Self, InvalidGenreError> {
        Ok(Self::new(name.parse()?))
    }

    pub fn with_context_window(mut self, context_window: usize) -> Self {
        self.context_window = context_window;
        self
    }

    pub fn genre(&self) -> Genre {
        self.genre
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn attributes(&self) -> Attributes {
        self.attributes
    }

    pub fn money(&self) -> u32 {
        self.money
    }

    pub fn inventory(&self) -> &[String] {
        &self.inventory
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn character(&self) -> Option<&CharacterSheet> {
        self.character.as_ref()
    }

    pub fn has_character(&self) -> bool {
        self.character.is_some()
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Install the character sheet. Allowed exactly once.
    pub fn set_character(&mut self, character: CharacterSheet) -> Result<(), WorldStateError> {
        if self.character.is_some() {
            return Err(WorldStateError::CharacterAlreadySet);
        }
        self.character = Some(character);
        Ok(())
    }

    /// Subtract `amount` from health, clamping at zero.
    ///
    /// Returns `false` once the player is dead.
    pub fn apply_damage(&mut self, amount: u32) -> bool {
        self.health = self.health.saturating_sub(amount);
        self.health > 0
    }

    pub fn add_item(&mut self, name: impl Into<String>) {
        self.inventory.push(name.into());
    }

    /// Remove the first matching item, reporting whether one existed
    pub fn remove_item(&mut self, name: &str) -> bool {
        if let Some(pos) = self.inventory.iter().position(|item| item == name) {
            self.inventory.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn update_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }

    /// Append an entry to the transcript and enforce the context window.
    ///
    /// When the window overflows only the trailing `context_window`
    /// characters are kept, and everything up to the last blank line inside
    /// them is dropped so the history starts on a message boundary. Without
    /// a blank line the raw tail is kept.
    pub fn append_transcript(&mut self, text: &str) {
        self.transcript.push_str(text);
        self.transcript.push_str(TRANSCRIPT_SEPARATOR);

        let len = self.transcript.chars().count();
        if len <= self.context_window {
            return;
        }

        let cut = self
            .transcript
            .char_indices()
            .nth(len - self.context_window)
            .map(|(idx, _)| idx)
            .unwrap_or(self.transcript.len());
        let window = &self.transcript[cut..];
        let trimmed = match window.rfind(MESSAGE_BOUNDARY) {
            Some(idx) => window[idx + MESSAGE_BOUNDARY.len()..].to_string(),
            None => window.to_string(),
        };

        tracing::debug!(
            before = len,
            after = trimmed.chars().count(),
            "Transcript trimmed to context window"
        );
        self.transcript = trimmed;
    }

    /// Take an owned, deep copy of the current state
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            genre: self.genre,
            health: self.health,
            attributes: self.attributes,
            money: self.money,
            currency_name: self.genre.currency_name().to_string(),
            inventory: self.inventory.clone(),
            transcript: self.transcript.clone(),
            location: self.location.clone(),
            character: self.character.clone().unwrap_or_default(),
        }
    }
}
