//! Variable data models

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TfeError};
use crate::hcp::helpers::require_string;
use crate::hcp::traits::{ListPage, TfeResource};

/// One page of variables
pub type VariableList = ListPage<Variable>;

/// Where a variable is made available during a run
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryType {
    /// Terraform input variable
    Terraform,
    /// Environment variable
    Env,
    /// Policy-set parameter
    PolicySet,
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CategoryType::Terraform => "terraform",
            CategoryType::Env => "env",
            CategoryType::PolicySet => "policy-set",
        })
    }
}

/// Variable data from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Variable {
    pub id: String,
    pub attributes: VariableAttributes,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct VariableAttributes {
    pub key: String,
    /// Always `None` for sensitive variables
    pub value: Option<String>,
    pub description: Option<String>,
    pub category: CategoryType,
    #[serde(default)]
    pub hcl: bool,
    #[serde(default)]
    pub sensitive: bool,
    #[serde(rename = "version-id")]
    pub version_id: Option<String>,
}

impl TfeResource for Variable {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.key
    }
}

impl Variable {
    pub fn value(&self) -> Option<&str> {
        self.attributes.value.as_deref()
    }

    pub fn is_sensitive(&self) -> bool {
        self.attributes.sensitive
    }
}

/// Options for creating a variable
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct VariableCreateOptions {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: Option<CategoryType>,
    /// Parse the value as HCL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hcl: Option<bool>,
    /// Write-only once set; reads return no value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitive: Option<bool>,
}

impl VariableCreateOptions {
    pub fn new(key: impl Into<String>, value: impl Into<String>, category: CategoryType) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
            description: None,
            category: Some(category),
            hcl: None,
            sensitive: None,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        require_string(Some(self.key.as_str()), "key")?;
        if self.category.is_none() {
            return Err(TfeError::validation("category is required"));
        }
        Ok(())
    }
}

/// Options for updating a variable; unset fields are left unchanged
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct VariableUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hcl: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitive: Option<bool>,
}

impl VariableUpdateOptions {
    pub(crate) fn validate(&self) -> Result<()> {
        if let Some(key) = &self.key {
            require_string(Some(key.as_str()), "key")?;
        }
        Ok(())
    }
}
