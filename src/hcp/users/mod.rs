//! Users - the account owning the API token

mod api;
mod models;

use async_trait::async_trait;

use crate::error::Result;

pub use api::UsersApi;
pub use models::{TwoFactor, User, UserAttributes};

#[async_trait]
pub trait Users: Send + Sync {
    /// Read the user the API token belongs to
    async fn read_current(&self) -> Result<User>;
}
