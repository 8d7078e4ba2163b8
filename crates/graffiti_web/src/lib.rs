//! Web presentation layer for the graffiti catalogue.
//! Serves the map and submission pages and a JSON API over the core
//! data-access service.

pub mod routes;
pub mod server;
pub mod state;

pub use routes::build_router;
pub use server::{run, ServeError};
pub use state::AppState;
