mod client;
pub mod endpoints;
mod error;
mod macros;
mod refresh;
pub mod repositories;
mod store;

pub use crate::client::Client;
pub use crate::error::ApiError;
pub use crate::refresh::{SessionEvent, TokenRefresher};
pub use crate::store::{
    CredentialKey, CredentialStore, Credentials, MemoryCredentialStore, StoreError,
};
pub use secrecy::SecretString;
use repositories::*;

/// Default backend, overridable at build time with `ONICO_BASE_URL`.
pub const DEFAULT_BASE_URL: &str = match option_env!("ONICO_BASE_URL") {
    Some(url) => url,
    None => "https://onicotech.pve.local:8282/api/v1",
};

/// Entry point for building typed requests, one repository per resource.
pub struct Request;

impl Request {
    pub fn auth() -> AuthRepository {
        AuthRepository::new()
    }

    pub fn appointments() -> AppointmentRepository {
        AppointmentRepository::new()
    }

    pub fn clients() -> ClientRepository {
        ClientRepository::new()
    }

    pub fn dashboard() -> DashboardRepository {
        DashboardRepository::new()
    }

    pub fn expenses() -> ExpenseRepository {
        ExpenseRepository::new()
    }

    pub fn photos() -> PhotoRepository {
        PhotoRepository::new()
    }

    pub fn promotions() -> PromotionRepository {
        PromotionRepository::new()
    }

    pub fn services() -> ServiceRepository {
        ServiceRepository::new()
    }

    pub fn system() -> SystemRepository {
        SystemRepository::new()
    }
}
