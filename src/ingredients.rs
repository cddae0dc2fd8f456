use crate::error::IngredientError;
use log::warn;

/// Ordered, bounded list of ingredient names.
///
/// Entries are unique under case-insensitive comparison and keep the case
/// they were entered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientList {
    items: Vec<String>,
    max: usize,
}

impl IngredientList {
    pub fn new(max: usize) -> Self {
        IngredientList {
            items: Vec::new(),
            max,
        }
    }

    /// Build a list from seed entries, skipping any that fail validation.
    pub fn with_seed<I, S>(max: usize, seed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new(max);
        for entry in seed {
            if let Err(e) = list.add(entry.as_ref()) {
                warn!("Skipping seed ingredient {:?}: {}", entry.as_ref(), e);
            }
        }
        list
    }

    /// Check `raw` against the list without mutating it.
    ///
    /// Returns the trimmed value that would be stored. Checks run in a fixed
    /// order: empty, no letters, capacity, duplicate.
    pub fn validate<'a>(&self, raw: &'a str) -> Result<&'a str, IngredientError> {
        let candidate = raw.trim();

        if candidate.is_empty() {
            return Err(IngredientError::EmptyInput);
        }

        if !candidate.chars().any(char::is_alphabetic) {
            return Err(IngredientError::InvalidCharacters);
        }

        if self.is_full() {
            return Err(IngredientError::CapacityExceeded { max: self.max });
        }

        if self.contains(candidate) {
            return Err(IngredientError::DuplicateIngredient {
                name: candidate.to_string(),
            });
        }

        Ok(candidate)
    }

    /// Validate and append. Returns the stored value.
    pub fn add(&mut self, raw: &str) -> Result<&str, IngredientError> {
        let accepted = self.validate(raw)?.to_string();
        self.items.push(accepted);
        Ok(self.items[self.items.len() - 1].as_str())
    }

    /// Remove the entry that matches `name` exactly.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.items.iter().position(|item| item == name) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Case-insensitive membership test
    pub fn contains(&self, name: &str) -> bool {
        let needle = name.trim().to_lowercase();
        self.items.iter().any(|item| item.to_lowercase() == needle)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.max
    }

    pub fn capacity(&self) -> usize {
        self.max
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.items.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> IngredientList {
        IngredientList::with_seed(
            10,
            ["chicken", "all the main spices", "corn", "heavy cream", "pasta"],
        )
    }

    #[test]
    fn test_adds_keep_submission_order() {
        let mut list = IngredientList::new(10);
        for name in ["oregano", "basil", "garlic"] {
            list.add(name).unwrap();
        }
        assert_eq!(list.as_slice(), ["oregano", "basil", "garlic"]);
    }

    #[test]
    fn test_add_trims_but_keeps_case() {
        let mut list = IngredientList::new(10);
        assert_eq!(list.add("  Red Onion \t").unwrap(), "Red Onion");
        assert_eq!(list.as_slice(), ["Red Onion"]);
    }

    #[test]
    fn test_empty_input() {
        let mut list = seeded();
        assert_eq!(list.add("   "), Err(IngredientError::EmptyInput));
        assert_eq!(list.add(""), Err(IngredientError::EmptyInput));
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn test_rejects_entries_without_letters() {
        let mut list = seeded();
        for raw in ["123", "!!!", "4 - 2", "  42  "] {
            assert_eq!(list.add(raw), Err(IngredientError::InvalidCharacters));
        }
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn test_accepts_non_ascii_letters() {
        let mut list = IngredientList::new(10);
        assert!(list.add("jalapeño").is_ok());
        assert!(list.add("сир").is_ok());
        assert!(list.add("2 eggs").is_ok());
    }

    #[test]
    fn test_capacity_is_enforced() {
        let mut list = seeded();
        for name in ["tomato", "onion", "garlic", "basil", "rice"] {
            list.add(name).unwrap();
        }
        assert!(list.is_full());

        assert_eq!(
            list.add("lemon"),
            Err(IngredientError::CapacityExceeded { max: 10 })
        );
        assert_eq!(list.len(), 10);
    }

    #[test]
    fn test_capacity_checked_before_duplicate() {
        let mut list = IngredientList::with_seed(2, ["rice", "beans"]);
        assert_eq!(
            list.add("RICE"),
            Err(IngredientError::CapacityExceeded { max: 2 })
        );
    }

    #[test]
    fn test_duplicates_are_case_insensitive() {
        let mut list = seeded();
        list.add("tomato").unwrap();

        let err = list.add("Tomato").unwrap_err();
        assert_eq!(
            err,
            IngredientError::DuplicateIngredient {
                name: "Tomato".to_string()
            }
        );
        assert!(err.is_warning());
        assert_eq!(list.len(), 6);

        assert!(list.add(" CORN ").is_err());
        assert_eq!(list.len(), 6);
    }

    #[test]
    fn test_remove_is_exact_match() {
        let mut list = seeded();
        assert!(!list.remove("Corn"));
        assert_eq!(list.len(), 5);

        assert!(list.remove("corn"));
        assert_eq!(
            list.as_slice(),
            ["chicken", "all the main spices", "heavy cream", "pasta"]
        );
        assert!(!list.remove("corn"));
    }

    #[test]
    fn test_clear() {
        let mut list = seeded();
        list.clear();
        assert!(list.is_empty());
        assert!(list.add("corn").is_ok());
    }

    #[test]
    fn test_seed_skips_invalid_entries() {
        let list = IngredientList::with_seed(3, ["rice", "Rice", "", "99", "beans", "peas", "kale"]);
        assert_eq!(list.as_slice(), ["rice", "beans", "peas"]);
    }
}
