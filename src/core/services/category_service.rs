use crate::ledger::{Category, Ledger};

use super::{require_text, ServiceError, ServiceResult};

pub struct CategoryService;

impl CategoryService {
    pub fn add(ledger: &mut Ledger, name: &str, icon: &str) -> ServiceResult<()> {
        require_text("Category name", name)?;
        require_text("Category icon", icon)?;
        if ledger.category(name).is_some() {
            return Err(ServiceError::Invalid(format!(
                "Category `{}` already exists",
                name.trim()
            )));
        }
        ledger.add_category(Category::new(name.trim(), icon.trim()));
        tracing::info!(name = name.trim(), "category added");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_names_are_rejected_case_insensitively() {
        let mut ledger = Ledger::new("You", vec![Category::new("Food", "🍔")]);
        CategoryService::add(&mut ledger, " Pets ", "🐶").unwrap();
        assert_eq!(ledger.categories[1].name, "Pets");

        let err = CategoryService::add(&mut ledger, "food", "🥗").unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert!(CategoryService::add(&mut ledger, "Gifts", "").is_err());
    }
}
