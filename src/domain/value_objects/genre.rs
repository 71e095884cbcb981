//! Genres and their static setting data
//!
//! A genre selects the starting location, the name of the currency and the
//! race/occupation vocabularies offered during character creation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Setting data attached to a genre
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenreProfile {
    pub starting_location: &'static str,
    pub currency_name: &'static str,
    pub races: &'static [&'static str],
    pub occupations: &'static [&'static str],
}

const FANTASY: GenreProfile = GenreProfile {
    starting_location: "In front of a ruined Wizard's Tower.",
    currency_name: "gold",
    races: &["Human", "Elf", "Dwarf", "Halfling", "Gnome"],
    occupations: &["Warrior", "Mage", "Rogue", "Cleric", "Ranger", "Bard"],
};

const SCIFI: GenreProfile = GenreProfile {
    starting_location: "In the arrivals terminal of the orbital station's spaceport.",
    currency_name: "credits",
    races: &["Human", "Android", "Cyborg", "Alien", "Mutant"],
    occupations: &["Pilot", "Engineer", "Medic", "Soldier", "Scientist", "Trader"],
};

/// The fixed set of playable genres
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    Fantasy,
    Scifi,
}

impl Genre {
    pub const ALL: [Genre; 2] = [Genre::Fantasy, Genre::Scifi];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fantasy => "fantasy",
            Self::Scifi => "scifi",
        }
    }

    pub fn profile(&self) -> &'static GenreProfile {
        match self {
            Self::Fantasy => &FANTASY,
            Self::Scifi => &SCIFI,
        }
    }

    pub fn starting_location(&self) -> &'static str {
        self.profile().starting_location
    }

    pub fn currency_name(&self) -> &'static str {
        self.profile().currency_name
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a session is constructed with a genre outside the known set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid genre: {genre}. Available genres: {available}")]
pub struct InvalidGenreError {
    pub genre: String,
    pub available: String,
}

impl FromStr for Genre {
    type Err = InvalidGenreError;

    /// Genre names are matched exactly, as listed in [`Genre::ALL`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .into_iter()
            .find(|genre| genre.as_str() == s)
            .ok_or_else(|| InvalidGenreError {
                genre: s.to_string(),
                available: Genre::ALL
                    .iter()
                    .map(Genre::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}
