mod client;
mod error;

pub use client::{connect, FileCredentialStore, Session, SessionState, Settings};
pub use error::AuthError;
