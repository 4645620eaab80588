pub mod cage_handler;
pub mod dinosaur_handler;
pub mod entity_handler;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod species_handler;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use cage_handler::*;
pub use dinosaur_handler::*;
pub use entity_handler::*;
pub use error::*;
pub use routes::*;
pub use species_handler::*;
pub use state::*;
