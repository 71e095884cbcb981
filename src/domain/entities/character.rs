//! Character sheet and the defaulting rules used while building one

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Genre;

/// Race offered as the default in every genre
pub const DEFAULT_RACE: &str = "Human";
pub const MIN_AGE: u32 = 18;
pub const MAX_AGE: u32 = 45;

/// The player character, filled in once before play begins
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSheet {
    pub name: String,
    pub race: String,
    pub sex: Sex,
    pub age: u32,
    pub occupation: String,
    pub description: String,
    pub backstory: String,
}

impl CharacterSheet {
    /// Render the sheet the way the `.character` command shows it
    pub fn details(&self) -> String {
        format!(
            "Character Details:\n  Name: {}\n  Race: {}\n  Sex: {}\n  Age: {}\n  Occupation: {}\n  Description: {}\n  Backstory: {}",
            self.name,
            self.race,
            self.sex,
            self.age,
            self.occupation,
            self.description,
            self.backstory
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
    #[default]
    Other,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of resolving one questionnaire answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    pub value: T,
    /// The answer was given but unusable, so a fallback was substituted
    pub rejected: bool,
}

impl<T> Resolved<T> {
    fn accepted(value: T) -> Self {
        Self {
            value,
            rejected: false,
        }
    }

    fn rejected(value: T) -> Self {
        Self {
            value,
            rejected: true,
        }
    }
}

/// Read the leading decimal digits of an answer, ignoring leading whitespace.
///
/// `"2abc"` reads as 2; an answer without leading digits reads as nothing.
fn leading_number(answer: &str) -> Option<u32> {
    let answer = answer.trim_start();
    let end = answer
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(answer.len());
    answer[..end].parse().ok()
}

/// Parse a 1-based menu answer into a zero-based index into `len` options
fn menu_index(answer: &str, len: usize) -> Option<usize> {
    let choice = usize::try_from(leading_number(answer)?).ok()?;
    (1..=len).contains(&choice).then(|| choice - 1)
}

/// Resolve a race answer. Blank answers take [`DEFAULT_RACE`]; invalid ones fall back to it.
pub fn resolve_race(genre: Genre, answer: &str) -> Resolved<String> {
    if answer.trim().is_empty() {
        return Resolved::accepted(DEFAULT_RACE.to_string());
    }
    let races = genre.profile().races;
    match menu_index(answer, races.len()) {
        Some(idx) => Resolved::accepted(races[idx].to_string()),
        None => Resolved::rejected(DEFAULT_RACE.to_string()),
    }
}

/// Resolve a sex answer (1 Male, 2 Female, 3 Other). Anything else falls back to Other.
pub fn resolve_sex(answer: &str) -> Resolved<Sex> {
    match leading_number(answer) {
        Some(1) => Resolved::accepted(Sex::Male),
        Some(2) => Resolved::accepted(Sex::Female),
        Some(3) => Resolved::accepted(Sex::Other),
        _ => Resolved::rejected(Sex::Other),
    }
}

/// Resolve an age answer. Blank answers roll a random age; out-of-range ones fall back to a roll.
pub fn resolve_age(answer: &str, rng: &mut impl Rng) -> Resolved<u32> {
    if answer.trim().is_empty() {
        return Resolved::accepted(rng.gen_range(MIN_AGE..=MAX_AGE));
    }
    match leading_number(answer) {
        Some(age) if (MIN_AGE..=MAX_AGE).contains(&age) => Resolved::accepted(age),
        _ => Resolved::rejected(rng.gen_range(MIN_AGE..=MAX_AGE)),
    }
}

/// Resolve an occupation answer. Invalid answers fall back to the genre's first occupation.
pub fn resolve_occupation(genre: Genre, answer: &str) -> Resolved<String> {
    let occupations = genre.profile().occupations;
    match menu_index(answer, occupations.len()) {
        Some(idx) => Resolved::accepted(occupations[idx].to_string()),
        None => Resolved::rejected(occupations[0].to_string()),
    }
}
