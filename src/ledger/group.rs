use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::LedgerError;

/// A set of people sharing expenses. Membership is fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub members: Vec<String>,
}

impl Group {
    /// Builds a group whose first member is always `owner`.
    ///
    /// Other member names are trimmed and blanks dropped; a repeated name
    /// (including the owner's) is rejected.
    pub fn new<I, S>(name: impl Into<String>, owner: &str, others: I) -> Result<Self, LedgerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LedgerError::Validation("group name must not be empty".into()));
        }
        let owner = owner.trim();
        if owner.is_empty() {
            return Err(LedgerError::Validation("group owner must not be empty".into()));
        }

        let mut members = vec![owner.to_string()];
        for raw in others {
            let member = raw.as_ref().trim();
            if member.is_empty() {
                continue;
            }
            if members.iter().any(|existing| existing == member) {
                return Err(LedgerError::Validation(format!(
                    "duplicate group member `{}`",
                    member
                )));
            }
            members.push(member.to_string());
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            members,
        })
    }

    pub fn is_member(&self, name: &str) -> bool {
        self.members.iter().any(|member| member == name)
    }
}
