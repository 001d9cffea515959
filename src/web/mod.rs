pub mod error;
pub mod guard;
pub mod routes;
pub mod server;

pub use error::WebError;
pub use server::AppState;
