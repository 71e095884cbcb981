//! Value objects - Immutable objects defined by their attributes

mod attributes;
mod directive;
mod genre;
mod ids;
mod snapshot;

pub use attributes::{Attributes, ATTRIBUTE_RANGE, MONEY_RANGE};
pub use directive::{Directive, NarrativeEffect};
pub use genre::{Genre, GenreProfile, InvalidGenreError};
pub use ids::*;
pub use snapshot::WorldSnapshot;
