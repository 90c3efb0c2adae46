use uuid::Uuid;

use crate::errors::LedgerError;
use crate::ledger::{Goal, Ledger};

use super::{require_text, validate_positive, ServiceResult};

pub struct GoalService;

impl GoalService {
    pub fn create(ledger: &mut Ledger, name: &str, target_amount: f64) -> ServiceResult<Uuid> {
        require_text("Goal name", name)?;
        validate_positive("Goal target", target_amount)?;
        let id = ledger.add_goal(Goal::new(name.trim(), target_amount));
        tracing::info!(%id, name = name.trim(), target_amount, "goal created");
        Ok(id)
    }

    /// Adds savings to goal `id` and returns the new saved total.
    pub fn contribute(ledger: &mut Ledger, id: Uuid, amount: f64) -> ServiceResult<f64> {
        validate_positive("Contribution", amount)?;
        let goal = ledger
            .goal_mut(id)
            .ok_or_else(|| LedgerError::GoalNotFound(id.to_string()))?;
        let total = goal.contribute(amount);
        ledger.touch();
        tracing::info!(%id, amount, total, "goal contribution recorded");
        Ok(total)
    }

    /// Finds a goal by id or by case-insensitive name.
    pub fn resolve(ledger: &Ledger, key: &str) -> ServiceResult<Uuid> {
        if let Ok(id) = Uuid::parse_str(key.trim()) {
            if ledger.goal(id).is_some() {
                return Ok(id);
            }
        }
        ledger
            .goal_by_name(key)
            .map(|goal| goal.id)
            .ok_or_else(|| LedgerError::GoalNotFound(key.trim().to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::ServiceError;

    #[test]
    fn contributions_accumulate() {
        let mut ledger = Ledger::new("You", Vec::new());
        let id = GoalService::create(&mut ledger, "Bike", 300.0).unwrap();
        GoalService::contribute(&mut ledger, id, 100.0).unwrap();
        assert_eq!(GoalService::contribute(&mut ledger, id, 50.0).unwrap(), 150.0);
        assert_eq!(GoalService::resolve(&ledger, "BIKE").unwrap(), id);
    }

    #[test]
    fn invalid_contributions_are_rejected() {
        let mut ledger = Ledger::new("You", Vec::new());
        let id = GoalService::create(&mut ledger, "Bike", 300.0).unwrap();
        assert!(matches!(
            GoalService::contribute(&mut ledger, id, 0.0),
            Err(ServiceError::Invalid(_))
        ));
        assert!(matches!(
            GoalService::contribute(&mut ledger, Uuid::new_v4(), 5.0),
            Err(ServiceError::Ledger(LedgerError::GoalNotFound(_)))
        ));
        assert!(GoalService::create(&mut ledger, "Car", 0.0).is_err());
        assert_eq!(ledger.goal(id).unwrap().current_amount, 0.0);
    }
}
