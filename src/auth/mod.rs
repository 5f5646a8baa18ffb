//! Authentication module for Code Museum.
//!
//! Signup and login over the users table. There are no sessions: a
//! successful call returns the user's public identity and nothing else.

mod login;
mod registration;

pub use login::login;
pub use registration::{register, RegistrationRequest};
