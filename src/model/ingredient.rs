use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// One line of a product recipe: how much of an ingredient a single unit consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientRequirement {
    #[serde(rename = "ingredient", alias = "ingredientName", alias = "name")]
    pub ingredient_name: String,
    #[serde(rename = "amount", alias = "amountPerUnit", alias = "amount_per_unit")]
    pub amount_per_unit: Decimal,
}

impl IngredientRequirement {
    pub fn new(ingredient_name: impl Into<String>, amount_per_unit: Decimal) -> Self {
        Self {
            ingredient_name: ingredient_name.into(),
            amount_per_unit,
        }
    }
}

/// An ingredient total left the representable decimal range.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("total of ingredient '{0}' is out of range")]
pub struct IngredientOverflow(pub String);

/// Accumulated ingredient demand, keyed by ingredient name.
///
/// Iteration is alphabetical. Accumulation is checked decimal addition, so the
/// final totals do not depend on the order contributions arrive in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientTotals(BTreeMap<String, Decimal>);

impl IngredientTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` under `ingredient`, starting from zero the first time it is seen.
    ///
    /// On overflow the entry keeps its previous value.
    pub fn add(&mut self, ingredient: &str, amount: Decimal) -> Result<(), IngredientOverflow> {
        let current = self.get(ingredient).unwrap_or(Decimal::ZERO);
        let total = current
            .checked_add(amount)
            .ok_or_else(|| IngredientOverflow(ingredient.to_string()))?;
        self.0.insert(ingredient.to_string(), total);
        Ok(())
    }

    /// Folds every entry of `other` into `self`.
    ///
    /// All or nothing: if any sum overflows, `self` is left untouched.
    pub fn merge(&mut self, other: IngredientTotals) -> Result<(), IngredientOverflow> {
        let mut merged = Vec::with_capacity(other.len());
        for (ingredient, amount) in other.0 {
            let current = self.get(&ingredient).unwrap_or(Decimal::ZERO);
            match current.checked_add(amount) {
                Some(total) => merged.push((ingredient, total)),
                None => return Err(IngredientOverflow(ingredient)),
            }
        }
        self.0.extend(merged);
        Ok(())
    }

    pub fn get(&self, ingredient: &str) -> Option<Decimal> {
        self.0.get(ingredient).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().map(|(name, amount)| (name.as_str(), *amount))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_add_starts_from_zero_and_accumulates() {
        let mut totals = IngredientTotals::new();
        totals.add("Mozzarella", dec!(1.10)).unwrap();
        totals.add("Mozzarella", dec!(1.10)).unwrap();
        totals.add("Basil", dec!(0.05)).unwrap();

        assert_eq!(totals.get("Mozzarella"), Some(dec!(2.20)));
        assert_eq!(totals.get("Basil"), Some(dec!(0.05)));
        assert_eq!(totals.get("Ham"), None);
        assert_eq!(totals.len(), 2);
    }

    #[test]
    fn test_merge_is_order_independent() {
        let mut a = IngredientTotals::new();
        a.add("Flour", dec!(0.25)).unwrap();
        let mut b = IngredientTotals::new();
        b.add("Flour", dec!(0.50)).unwrap();
        b.add("Yeast", dec!(0.01)).unwrap();

        let mut left = a.clone();
        left.merge(b.clone()).unwrap();
        let mut right = b;
        right.merge(a).unwrap();

        assert_eq!(left, right);
        assert_eq!(left.get("Flour"), Some(dec!(0.75)));
    }

    #[test]
    fn test_overflowing_add_keeps_previous_total() {
        let mut totals = IngredientTotals::new();
        totals.add("Flour", Decimal::MAX).unwrap();

        let error = totals.add("Flour", dec!(1)).unwrap_err();

        assert_eq!(error, IngredientOverflow("Flour".to_string()));
        assert_eq!(totals.get("Flour"), Some(Decimal::MAX));
    }

    #[test]
    fn test_overflowing_merge_changes_nothing() {
        let mut totals = IngredientTotals::new();
        totals.add("Flour", Decimal::MAX).unwrap();
        totals.add("Yeast", dec!(0.01)).unwrap();
        let before = totals.clone();

        let mut other = IngredientTotals::new();
        other.add("Yeast", dec!(0.01)).unwrap();
        other.add("Flour", dec!(1)).unwrap();

        assert!(totals.merge(other).is_err());
        assert_eq!(totals, before);
    }

    #[test]
    fn test_iteration_is_alphabetical() {
        let mut totals = IngredientTotals::new();
        totals.add("Tomato Sauce", dec!(1)).unwrap();
        totals.add("Basil", dec!(1)).unwrap();
        totals.add("Mozzarella", dec!(1)).unwrap();

        let names: Vec<&str> = totals.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Basil", "Mozzarella", "Tomato Sauce"]);
    }
}
