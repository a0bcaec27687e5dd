//! Security group helpers

use super::core::CoreApi;
use crate::dataset::{project, Dataset, FieldSelection};
use crate::error::{Error, Result};
use crate::pagination::PaginatedQuery;
use crate::query::append_query;
use crate::types::JsonObject;
use std::str::FromStr;

/// Membership kind within a security group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupRole {
    Admin,
    Member,
}

impl GroupRole {
    pub fn path_segment(self) -> &'static str {
        match self {
            GroupRole::Admin => "administrators",
            GroupRole::Member => "members",
        }
    }

    pub fn dataset(self) -> Dataset {
        match self {
            GroupRole::Admin => Dataset::GroupAdmins,
            GroupRole::Member => Dataset::GroupMembers,
        }
    }
}

impl FromStr for GroupRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "admin" | "admins" | "administrators" => Ok(GroupRole::Admin),
            "member" | "members" => Ok(GroupRole::Member),
            other => Err(Error::invalid_lookup(format!(
                "'{other}' is not a group membership type (expected admin or member)"
            ))),
        }
    }
}

impl CoreApi {
    /// One security group, projected onto the `security_group` dataset or
    /// `return_fields`
    pub async fn get_group_info(
        &self,
        group_id: &str,
        return_fields: Option<&[String]>,
        ignore_exceptions: bool,
    ) -> Result<JsonObject> {
        let url = append_query(&self.query_url(["securityGroups", group_id]), "fields=@all");
        let selection = FieldSelection::resolve(Dataset::SecurityGroup.as_str(), return_fields)?;
        match self.get_entity(&url, "security group", ignore_exceptions).await? {
            Some(group) => Ok(project(&group, &selection, false)),
            None => Ok(JsonObject::new()),
        }
    }

    /// Administrators or members of a security group
    pub async fn get_group_memberships(
        &self,
        group_id: &str,
        role: GroupRole,
        return_fields: Option<&[String]>,
        ignore_exceptions: bool,
    ) -> Result<Vec<JsonObject>> {
        let url = self.query_url(["securityGroups", group_id, role.path_segment()]);
        let query = PaginatedQuery::new(url, role.dataset().as_str())
            .return_fields(return_fields.unwrap_or_default().iter().cloned())
            .ignore_exceptions(ignore_exceptions);
        self.get_paginated(query).await
    }

    /// Every security group in the environment
    pub async fn get_all_groups(
        &self,
        return_fields: Option<&[String]>,
        ignore_exceptions: bool,
    ) -> Result<Vec<JsonObject>> {
        let query = PaginatedQuery::new(
            self.query_url(["securityGroups"]),
            Dataset::SecurityGroup.as_str(),
        )
        .return_fields(return_fields.unwrap_or_default().iter().cloned())
        .ignore_exceptions(ignore_exceptions);
        self.get_paginated(query).await
    }
}
