//! Core character attributes, rolled once per session

use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

pub const ATTRIBUTE_RANGE: RangeInclusive<u32> = 8..=18;
pub const MONEY_RANGE: RangeInclusive<u32> = 50..=200;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub strength: u32,
    pub wisdom: u32,
    pub dexterity: u32,
    pub charisma: u32,
}

impl Attributes {
    /// Roll every attribute uniformly from [`ATTRIBUTE_RANGE`]
    pub fn roll(rng: &mut impl Rng) -> Self {
        Self {
            strength: rng.gen_range(ATTRIBUTE_RANGE),
            wisdom: rng.gen_range(ATTRIBUTE_RANGE),
            dexterity: rng.gen_range(ATTRIBUTE_RANGE),
            charisma: rng.gen_range(ATTRIBUTE_RANGE),
        }
    }
}
