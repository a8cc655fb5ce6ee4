use serde::{Deserialize, Serialize};

use crate::pet::Pet;

/// An account and the pets it owns.
///
/// The password is kept verbatim and compared by equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password: String,
    pub pets: Vec<Pet>,
}

impl User {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into(), pets: Vec::new() }
    }

    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_is_exact_on_both_fields() {
        let u = User::new("alice", "pw1");
        assert!(u.matches("alice", "pw1"));
        assert!(!u.matches("alice", "pw2"));
        assert!(!u.matches("Alice", "pw1"));
    }

    #[test]
    fn serializes_in_file_layout() -> Result<(), anyhow::Error> {
        let mut u = User::new("alice", "pw1");
        u.pets.push(Pet::new("Rex", "lab", "3", "20").unwrap());
        let v = serde_json::to_value(&u)?;
        assert_eq!(v["username"], "alice");
        assert_eq!(v["pets"][0]["name"], "Rex");
        assert!(v["pets"][0]["vaccinations"].as_array().unwrap().is_empty());
        Ok(())
    }

    #[test]
    fn pets_key_is_required() {
        assert!(serde_json::from_str::<User>(r#"{"username":"a","password":"b"}"#).is_err());
    }
}
