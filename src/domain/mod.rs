//! Domain layer - Core game model with no I/O
//!
//! This layer contains:
//! - Entities: WorldState, CharacterSheet
//! - Value Objects: Genre, Attributes, WorldSnapshot, Directive
pub mod entities;
pub mod value_objects;
