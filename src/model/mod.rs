pub mod cage;
pub mod common;
pub mod dinosaur;
pub mod filter;
pub mod species;

pub use cage::*;
pub use common::*;
pub use dinosaur::*;
pub use filter::*;
pub use species::*;
