//! Business rules for cages, dinosaurs and species.
//!
//! Everything here is pure: the entity handlers read whatever facts a rule
//! needs from the stores and pass them in, so every check runs to
//! completion before the single store write that follows it.

pub mod cage_rules;
pub mod dinosaur_rules;
pub mod species_rules;
pub mod violation;

pub use cage_rules::*;
pub use dinosaur_rules::*;
pub use species_rules::*;
pub use violation::*;
