use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ValidationError};
use crate::models::base::is_blank;
use crate::models::coerce::{coerce_json_or_default, coerce_text, Metadata};
use crate::registry::FromMetadata;

fn enabled() -> bool {
    true
}

/// A user to create, update or remove.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDefinition {
    #[serde(rename = "Enabled", default = "enabled")]
    pub enabled: bool,
    #[serde(rename = "External user", default)]
    pub external_user: bool,
    #[serde(rename = "Password", default)]
    pub password: String,
    #[serde(rename = "Remove", default)]
    pub remove: bool,
    #[serde(rename = "User name", default)]
    pub user_name: String,
}

impl UserDefinition {
    pub fn new(
        user_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let def = Self {
            enabled: true,
            external_user: false,
            password: password.into(),
            remove: false,
            user_name: user_name.into(),
        };
        def.validate()?;
        Ok(def)
    }

    pub fn removal(user_name: impl Into<String>) -> Self {
        Self {
            enabled: true,
            external_user: false,
            password: String::new(),
            remove: true,
            user_name: user_name.into(),
        }
    }

    pub fn external(mut self) -> Self {
        self.external_user = true;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.remove && is_blank(&self.user_name) {
            return Err(ValidationError::MissingField {
                field: "User name",
                condition: "Remove is false",
            });
        }
        Ok(())
    }
}

/// A group to create, update or remove.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDefinition {
    #[serde(rename = "Enabled", default = "enabled")]
    pub enabled: bool,
    #[serde(rename = "Group name", default)]
    pub group_name: String,
    #[serde(rename = "Remove", default)]
    pub remove: bool,
}

impl GroupDefinition {
    pub fn new(group_name: impl Into<String>) -> Result<Self, ValidationError> {
        let def = Self {
            enabled: true,
            group_name: group_name.into(),
            remove: false,
        };
        def.validate()?;
        Ok(def)
    }

    pub fn removal(group_name: impl Into<String>) -> Self {
        Self {
            enabled: true,
            group_name: group_name.into(),
            remove: true,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.remove && is_blank(&self.group_name) {
            return Err(ValidationError::MissingField {
                field: "Group name",
                condition: "Remove is false",
            });
        }
        Ok(())
    }
}

/// Membership of a user in a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserToGroup {
    #[serde(rename = "Enabled", default = "enabled")]
    pub enabled: bool,
    #[serde(rename = "Group name", default)]
    pub group_name: String,
    #[serde(rename = "Remove", default)]
    pub remove: bool,
    #[serde(rename = "User name", default)]
    pub user_name: String,
}

impl UserToGroup {
    pub fn new(
        user_name: impl Into<String>,
        group_name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let def = Self {
            enabled: true,
            group_name: group_name.into(),
            remove: false,
            user_name: user_name.into(),
        };
        def.validate()?;
        Ok(def)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.remove {
            return Ok(());
        }
        if is_blank(&self.user_name) {
            return Err(ValidationError::MissingField {
                field: "User name",
                condition: "Remove is false",
            });
        }
        if is_blank(&self.group_name) {
            return Err(ValidationError::MissingField {
                field: "Group name",
                condition: "Remove is false",
            });
        }
        Ok(())
    }
}

/// Roles granted to a user or group within one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRoles {
    #[serde(rename = "Group or user name", default)]
    pub group_or_user_name: String,
    #[serde(rename = "Enabled", default = "enabled")]
    pub enabled: bool,
    #[serde(rename = "Application identifier", default)]
    pub application_identifier: String,
    #[serde(rename = "Roles", default)]
    pub roles: String,
}

impl ApplicationRoles {
    pub fn new(
        group_or_user_name: impl Into<String>,
        application_identifier: impl Into<String>,
        roles: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let def = Self {
            group_or_user_name: group_or_user_name.into(),
            enabled: true,
            application_identifier: application_identifier.into(),
            roles: roles.into(),
        };
        def.validate()?;
        Ok(def)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.enabled {
            return Ok(());
        }
        if is_blank(&self.group_or_user_name) {
            return Err(ValidationError::MissingField {
                field: "Group or user name",
                condition: "Enabled is true",
            });
        }
        if is_blank(&self.application_identifier) {
            return Err(ValidationError::MissingField {
                field: "Application identifier",
                condition: "Enabled is true",
            });
        }
        Ok(())
    }
}

task_config! {
    /// Configuration for the Manage Users and Groups task.
    pub struct ManageUsersAndGroupsTaskConfig for ManageUsersAndGroups validated_by validate_definitions {
        adp_manageUsersAndGroups_outputFilename: String = "adp_manageUsersAndGroups_output_file_name".into(),
        adp_manageUsersAndGroups_file: String = "output.json".into(),
        adp_manageUsersAndGroups_outputJson: String = "adp_manageUsersAndGroups_json_output".into(),
        adp_manageUsersAndGroups_userDefinition: Vec<UserDefinition> = Vec::new(),
        adp_manageUsersAndGroups_groupDefinition: Vec<GroupDefinition> = Vec::new(),
        adp_manageUsersAndGroups_assignmentUserToGroup: Vec<UserToGroup> = Vec::new(),
        adp_manageUsersAndGroups_addApplicationRoles: Vec<ApplicationRoles> = Vec::new(),
        adp_manageUsersAndGroups_AppIdsToFilterFor: String = String::new(),
        adp_manageUsersAndGroups_GroupUserIdsToFilterFor: String = String::new(),
        adp_manageUsersAndGroups_ReturnAllUsersUnderGroup: String = String::new(),
    }
}

// Definitions can be built field by field or decoded from files, so the
// constructor checks are repeated before submission.
fn validate_definitions(cfg: &ManageUsersAndGroupsTaskConfig) -> Result<(), ValidationError> {
    cfg.adp_manageUsersAndGroups_userDefinition
        .iter()
        .try_for_each(UserDefinition::validate)?;
    cfg.adp_manageUsersAndGroups_groupDefinition
        .iter()
        .try_for_each(GroupDefinition::validate)?;
    cfg.adp_manageUsersAndGroups_assignmentUserToGroup
        .iter()
        .try_for_each(UserToGroup::validate)?;
    cfg.adp_manageUsersAndGroups_addApplicationRoles
        .iter()
        .try_for_each(ApplicationRoles::validate)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Group {
    #[serde(rename = "DisplayName", alias = "displayName")]
    pub display_name: String,
    #[serde(rename = "Name", alias = "name")]
    pub name: String,
    #[serde(rename = "Description", alias = "description")]
    pub description: String,
    #[serde(rename = "Existent", alias = "existent")]
    pub existent: bool,
    #[serde(rename = "Users", alias = "users")]
    pub users: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(rename = "DisplayName", alias = "displayName")]
    pub display_name: String,
    #[serde(rename = "Name", alias = "name")]
    pub name: String,
    #[serde(rename = "Description", alias = "description")]
    pub description: String,
    #[serde(rename = "Existent", alias = "existent")]
    pub existent: bool,
    #[serde(rename = "External", alias = "external")]
    pub external: bool,
    #[serde(rename = "EmailAddress", alias = "emailAddress")]
    pub email_address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsersAndGroups {
    #[serde(rename = "Groups", alias = "groups")]
    pub groups: BTreeMap<String, Group>,
    #[serde(rename = "Users", alias = "users")]
    pub users: BTreeMap<String, User>,
}

impl UsersAndGroups {
    /// Groups the named user belongs to, in name order.
    pub fn groups_of<'a>(&'a self, user: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.groups
            .iter()
            .filter(move |(_, g)| g.users.iter().any(|u| u == user))
            .map(|(name, _)| name.as_str())
    }
}

#[allow(non_snake_case)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManageUsersAndGroupsResult {
    pub adp_manageUsersAndGroups_output_file_name: Option<String>,
    pub adp_manageUsersAndGroups_json_output: UsersAndGroups,
}

impl FromMetadata for ManageUsersAndGroupsResult {
    fn from_metadata(metadata: &Metadata) -> Result<Self, ParseError> {
        Ok(Self {
            adp_manageUsersAndGroups_output_file_name: coerce_text(
                metadata,
                "adp_manageUsersAndGroups_output_file_name",
            ),
            adp_manageUsersAndGroups_json_output: coerce_json_or_default(
                metadata,
                "adp_manageUsersAndGroups_json_output",
            )?,
        })
    }
}
