//! Adding and listing a user's birthdays
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use log::{debug, info};
use thiserror::Error;

use super::model::{parse_birth_date, BirthdayEntry};
use crate::database::{BirthdayFilter, Database};

#[derive(Debug, Error)]
pub enum AddBirthdayError {
    #[error("a name for the birthday is required")]
    MissingLabel,
    #[error("'{0}' is not a valid YYYY-MM-DD date")]
    InvalidDate(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl AddBirthdayError {
    /// True for bad input, false when the store itself failed
    pub fn is_validation(&self) -> bool {
        !matches!(self, AddBirthdayError::Storage(_))
    }
}

#[derive(Clone)]
pub struct BirthdayRegistry {
    database: Database,
}

impl BirthdayRegistry {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Store (or re-date) the birthday `label` for `owner_key`
    ///
    /// Input is validated before anything is written. Re-adding an existing label
    /// replaces its date and re-arms the reminder.
    pub async fn add(
        &self,
        owner_key: &str,
        label: &str,
        date_text: &str,
    ) -> Result<BirthdayEntry, AddBirthdayError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(AddBirthdayError::MissingLabel);
        }
        let date = parse_birth_date(date_text)
            .ok_or_else(|| AddBirthdayError::InvalidDate(date_text.trim().to_string()))?;

        let entry = self.database.upsert_birthday(owner_key, label, date).await?;
        info!("Stored birthday '{}' ({}) for user {owner_key}", entry.label, entry.date);
        Ok(entry)
    }

    /// Every birthday owned by `owner_key`, in the order they were first added
    ///
    /// An empty vec means the user has not added any birthdays yet.
    pub async fn list(&self, owner_key: &str) -> anyhow::Result<Vec<BirthdayEntry>> {
        let entries = self
            .database
            .find_birthdays(&BirthdayFilter::owned_by(owner_key))
            .await?;
        debug!("Found {} birthdays for user {owner_key}", entries.len());
        Ok(entries)
    }
}

/// Reply text for the `birthdays` command
pub fn format_listing(entries: &[BirthdayEntry]) -> String {
    if entries.is_empty() {
        return "No birthdays have been added yet.".to_string();
    }

    let mut lines = vec!["🎂 Here are the birthdays:".to_string()];
    lines.extend(entries.iter().map(BirthdayEntry::listing_line));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn registry() -> BirthdayRegistry {
        BirthdayRegistry::new(Database::open_in_memory().unwrap())
    }

    #[tokio::test]
    async fn test_add_then_list() {
        let registry = registry();
        let entry = registry.add("7", "Alice", "2024-05-10").await.unwrap();
        assert_eq!(entry.label, "Alice");
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2024, 5, 10).unwrap());
        assert!(!entry.notified);

        let listed = registry.list("7").await.unwrap();
        assert_eq!(listed, vec![entry]);
    }

    #[tokio::test]
    async fn test_readd_replaces_date() {
        let registry = registry();
        registry.add("7", "Alice", "2024-05-10").await.unwrap();
        registry.add("7", "Alice", "2024-06-11").await.unwrap();

        let listed = registry.list("7").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].date, NaiveDate::from_ymd_opt(2024, 6, 11).unwrap());
        assert!(!listed[0].notified);
    }

    #[tokio::test]
    async fn test_validation_errors_do_not_write() {
        let registry = registry();

        let missing = registry.add("7", "  ", "2024-05-10").await.unwrap_err();
        assert!(matches!(missing, AddBirthdayError::MissingLabel));
        assert!(missing.is_validation());

        let bad_date = registry.add("7", "Alice", "2024-13-01").await.unwrap_err();
        assert!(matches!(bad_date, AddBirthdayError::InvalidDate(ref d) if d == "2024-13-01"));

        let no_date = registry.add("7", "Alice", "").await.unwrap_err();
        assert!(no_date.is_validation());

        assert!(registry.list("7").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_owner() {
        let registry = registry();
        registry.add("7", "Alice", "2024-05-10").await.unwrap();
        registry.add("8", "Bob", "2024-05-10").await.unwrap();

        let listed = registry.list("8").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].label, "Bob");
        assert!(registry.list("9").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_format_listing() {
        assert_eq!(format_listing(&[]), "No birthdays have been added yet.");

        let registry = registry();
        registry.add("7", "Alice", "2024-05-10").await.unwrap();
        registry.add("7", "Bob", "1990-01-02").await.unwrap();
        let text = format_listing(&registry.list("7").await.unwrap());
        assert_eq!(
            text,
            "🎂 Here are the birthdays:\nAlice: Fri May 10 2024\nBob: Tue Jan 02 1990"
        );
    }
}
