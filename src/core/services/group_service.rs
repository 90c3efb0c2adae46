use uuid::Uuid;

use crate::errors::LedgerError;
use crate::ledger::{Group, Ledger};

use super::ServiceResult;

pub struct GroupService;

impl GroupService {
    /// Creates a group led by the ledger owner plus `members`.
    pub fn create<S: AsRef<str>>(
        ledger: &mut Ledger,
        name: &str,
        members: &[S],
    ) -> ServiceResult<Uuid> {
        if ledger.group_by_name(name).is_some() {
            return Err(LedgerError::Validation(format!(
                "group `{}` already exists",
                name.trim()
            ))
            .into());
        }
        let group = Group::new(name, ledger.owner(), members)?;
        let member_count = group.members.len();
        let id = ledger.add_group(group);
        tracing::info!(%id, name = name.trim(), members = member_count, "group created");
        Ok(id)
    }

    /// Finds a group by id or by case-insensitive name.
    pub fn resolve(ledger: &Ledger, key: &str) -> ServiceResult<Uuid> {
        if let Ok(id) = Uuid::parse_str(key.trim()) {
            if ledger.group(id).is_some() {
                return Ok(id);
            }
        }
        ledger
            .group_by_name(key)
            .map(|group| group.id)
            .ok_or_else(|| LedgerError::GroupNotFound(key.trim().to_string()).into())
    }
}
