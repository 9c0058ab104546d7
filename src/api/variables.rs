//
//  gitlab-admin
//  api/variables.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # CI/CD Variable Operations
//!
//! Group and project variables share one implementation; the
//! [`VariableScope`] picks the endpoint.
//!
//! | Operation | Group endpoint | Project endpoint |
//! |-----------|----------------|------------------|
//! | list | `GET /groups/{id}/variables` | `GET /projects/{id}/variables` |
//! | get | `GET .../variables/{key}` | same, plus `filter[environment_scope]` |
//! | upsert | `PUT .../variables/{key}` or `POST .../variables` | same |
//! | delete | `DELETE .../variables/{key}` | same, plus `filter[environment_scope]` |
//!
//! ## Masking
//!
//! The `masked` flag is only transmitted for project variables. Masking
//! through this client has not been observed to take effect on GitLab, so
//! the CLI gates it behind the `variables.send_masked` setting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::client::GitLabClient;
use super::common::{ApiError, ApiResult, Lister, WriteAction};

/// Environment scope matching every environment.
pub const ALL_ENVIRONMENTS: &str = "*";

/// Where a variable lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableScope {
    Group(u64),
    Project(u64),
}

impl VariableScope {
    fn base_path(&self) -> String {
        match self {
            Self::Group(id) => format!("/groups/{}/variables", id),
            Self::Project(id) => format!("/projects/{}/variables", id),
        }
    }

    /// Environment-scope filter for lookups and deletes.
    ///
    /// Only project variables are keyed by environment scope, and only a
    /// non-default scope needs the filter.
    fn scope_filter<'a>(&self, environment_scope: &'a str) -> Vec<(&'static str, &'a str)> {
        match self {
            Self::Project(_) if environment_scope != ALL_ENVIRONMENTS => {
                vec![("filter[environment_scope]", environment_scope)]
            }
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for VariableScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group(id) => write!(f, "group {}", id),
            Self::Project(id) => write!(f, "project {}", id),
        }
    }
}

/// Kind of CI/CD variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableType {
    #[default]
    EnvVar,
    File,
}

impl VariableType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EnvVar => "env_var",
            Self::File => "file",
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariableType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "env_var" | "env" => Ok(Self::EnvVar),
            "file" => Ok(Self::File),
            other => Err(format!(
                "Invalid variable type '{}'. Expected 'env_var' or 'file'",
                other
            )),
        }
    }
}

/// A CI/CD variable as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub variable_type: VariableType,
    #[serde(default)]
    pub protected: bool,
    #[serde(default)]
    pub masked: bool,
    #[serde(default = "default_environment_scope")]
    pub environment_scope: String,
}

fn default_environment_scope() -> String {
    ALL_ENVIRONMENTS.to_string()
}

/// The fields written by [`GitLabClient::create_or_update_variable`].
///
/// ```rust
/// use gitlab_admin::api::{NewVariable, VariableType};
///
/// let var = NewVariable::new("DEPLOY_KEY", "secret")
///     .variable_type(VariableType::File)
///     .protected(true)
///     .environment_scope("production");
/// assert_eq!(var.environment_scope, "production");
/// ```
#[derive(Debug, Clone)]
pub struct NewVariable {
    pub key: String,
    pub value: String,
    pub variable_type: VariableType,
    pub protected: bool,
    pub masked: bool,
    pub environment_scope: String,
}

impl NewVariable {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            variable_type: VariableType::EnvVar,
            protected: false,
            masked: false,
            environment_scope: default_environment_scope(),
        }
    }

    pub fn variable_type(mut self, variable_type: VariableType) -> Self {
        self.variable_type = variable_type;
        self
    }

    pub fn protected(mut self, protected: bool) -> Self {
        self.protected = protected;
        self
    }

    pub fn masked(mut self, masked: bool) -> Self {
        self.masked = masked;
        self
    }

    pub fn environment_scope(mut self, scope: impl Into<String>) -> Self {
        self.environment_scope = scope.into();
        self
    }

    fn body(&self, scope: VariableScope) -> VariableBody<'_> {
        VariableBody {
            key: &self.key,
            value: &self.value,
            variable_type: self.variable_type,
            protected: self.protected,
            masked: match scope {
                VariableScope::Project(_) => Some(self.masked),
                VariableScope::Group(_) => None,
            },
            environment_scope: &self.environment_scope,
        }
    }
}

#[derive(Debug, Serialize)]
struct VariableBody<'a> {
    key: &'a str,
    value: &'a str,
    variable_type: VariableType,
    protected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    masked: Option<bool>,
    environment_scope: &'a str,
}

impl GitLabClient {
    /// Lists every variable in a scope.
    pub async fn list_variables(&self, scope: VariableScope) -> ApiResult<Vec<Variable>> {
        self.observer()
            .message(&format!("Retrieving variables for {}...", scope));

        let label = match scope {
            VariableScope::Group(_) => "group variables",
            VariableScope::Project(_) => "project variables",
        };
        let variables: Vec<Variable> = Lister::new(self, scope.base_path(), label)
            .fetch_all()
            .await?;

        self.observer().message(&format!(
            "Retrieved a total of {} variables from {}",
            variables.len(),
            scope
        ));
        Ok(variables)
    }

    /// Fetches one variable.
    ///
    /// Returns `Ok(None)` when the API answers 404. Any other failure is an
    /// error.
    pub async fn get_variable(
        &self,
        scope: VariableScope,
        key: &str,
        environment_scope: &str,
    ) -> ApiResult<Option<Variable>> {
        let path = format!("{}/{}", scope.base_path(), key);
        let filter = scope.scope_filter(environment_scope);

        match self.get_query::<Variable, _>(&path, &filter, "variable data").await {
            Ok(variable) => Ok(Some(variable)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Creates the variable, or updates it if the key already exists.
    ///
    /// # Errors
    ///
    /// [`ApiError::Write`] naming the attempted action when the write fails.
    pub async fn create_or_update_variable(
        &self,
        scope: VariableScope,
        variable: &NewVariable,
    ) -> ApiResult<Variable> {
        self.observer().message(&format!(
            "Checking if variable {} exists in {}...",
            variable.key, scope
        ));

        let exists = self
            .get_variable(scope, &variable.key, &variable.environment_scope)
            .await?
            .is_some();
        let body = variable.body(scope);

        let (action, result) = if exists {
            self.observer().message("Variable exists, updating...");
            let path = format!("{}/{}", scope.base_path(), variable.key);
            (WriteAction::Update, self.put(&path, &body, "variable data").await)
        } else {
            self.observer().message("Variable does not exist, creating...");
            (
                WriteAction::Create,
                self.post(&scope.base_path(), &body, "variable data").await,
            )
        };

        match result {
            Ok(saved) => {
                self.observer().message(&format!(
                    "Successfully {}d variable {}",
                    action, variable.key
                ));
                Ok(saved)
            }
            Err(source) => Err(ApiError::Write {
                action,
                source: Box::new(source),
            }),
        }
    }

    /// Deletes a variable.
    pub async fn delete_variable(
        &self,
        scope: VariableScope,
        key: &str,
        environment_scope: &str,
    ) -> ApiResult<()> {
        self.observer()
            .message(&format!("Deleting variable {} from {}...", key, scope));

        let path = format!("{}/{}", scope.base_path(), key);
        self.delete(&path, &scope.scope_filter(environment_scope)).await?;

        self.observer()
            .message(&format!("Successfully deleted variable {}", key));
        Ok(())
    }
}
