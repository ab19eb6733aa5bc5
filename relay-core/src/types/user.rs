//! User identity type.

use serde::{Deserialize, Serialize};

/// User identity (id, username, names).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl User {
    /// First and last name joined by a space; falls back to `@username`, then to the numeric id.
    pub fn full_name(&self) -> String {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !name.is_empty() {
            return name;
        }
        match &self.username {
            Some(username) => format!("@{}", username),
            None => self.id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(first: Option<&str>, last: Option<&str>, username: Option<&str>) -> User {
        User {
            id: 42,
            username: username.map(String::from),
            first_name: first.map(String::from),
            last_name: last.map(String::from),
        }
    }

    #[test]
    fn test_full_name_joins_first_and_last() {
        assert_eq!(user(Some("Olena"), Some("Shevchenko"), None).full_name(), "Olena Shevchenko");
        assert_eq!(user(Some("Olena"), None, Some("olena")).full_name(), "Olena");
    }

    #[test]
    fn test_full_name_fallbacks() {
        assert_eq!(user(None, None, Some("olena")).full_name(), "@olena");
        assert_eq!(user(Some(" "), None, None).full_name(), "42");
    }
}
