use std::sync::Arc;

use onico_api::{ApiError, Client, Credentials, MemoryCredentialStore, Request};

#[tokio::main]
pub async fn main() -> Result<(), ApiError> {
    let store = MemoryCredentialStore::with_credentials(&Credentials::new("token", "refresh"));
    let client = Client::new(onico_api::DEFAULT_BASE_URL, Arc::new(store));

    let req = Request::clients().list();

    let _res = client.send(req).await?;
    Ok(())
}
