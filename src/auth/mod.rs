pub mod login;
pub mod token;

pub use token::{verify_token, Claims};
