//! User data models

use serde::{Deserialize, Serialize};

use crate::hcp::traits::TfeResource;

/// User data from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub attributes: UserAttributes,
}

/// User attributes from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct UserAttributes {
    #[serde(default)]
    pub username: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub is_service_account: bool,
    pub two_factor: Option<TwoFactor>,
}

/// Two factor authentication settings
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct TwoFactor {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub verified: bool,
}

impl User {
    pub fn email(&self) -> Option<&str> {
        self.attributes.email.as_deref()
    }

    pub fn two_factor_enabled(&self) -> bool {
        self.attributes
            .two_factor
            .as_ref()
            .is_some_and(|t| t.enabled)
    }
}

impl TfeResource for User {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.username
    }
}
