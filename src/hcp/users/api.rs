//! User API operations

use async_trait::async_trait;

use crate::config::api;
use crate::error::Result;
use crate::hcp::TfeClient;

use super::models::User;
use super::Users;

/// HTTP implementation of [`Users`]
#[derive(Clone, Debug)]
pub struct UsersApi {
    client: TfeClient,
}

impl TfeClient {
    /// User operations
    pub fn users(&self) -> UsersApi {
        UsersApi {
            client: self.clone(),
        }
    }
}

#[async_trait]
impl Users for UsersApi {
    async fn read_current(&self) -> Result<User> {
        self.client
            .fetch_resource(&format!("/{}", api::ACCOUNT_DETAILS), "current user")
            .await
    }
}
