//! The in-memory user store.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// A stored user record.
///
/// Every field is optional: the API accepts whatever subset the client sends
/// and keeps absent fields as `None`. Absent fields are omitted from
/// serialized output, so an empty record renders as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub real_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Shared handle to the process-wide ordered sequence of user records.
///
/// Position determines identity: a record's `user_id` is its index in the
/// sequence, computed at response time and never stored. The sequence is
/// append-only for the lifetime of the process and is discarded at exit.
///
/// Cloning the handle is cheap; every clone observes the same records. The
/// handle is constructed where the server is wired up and passed into the
/// handlers, so tests get an isolated store per scenario.
#[derive(Clone, Default)]
pub struct UserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl UserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records in insertion order.
    pub async fn all(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    /// The record at `index`, if any.
    pub async fn get(&self, index: usize) -> Option<User> {
        self.users.read().await.get(index).cloned()
    }

    /// Append a record and return its index.
    pub async fn append(&self, user: User) -> usize {
        let mut users = self.users.write().await;
        users.push(user);
        users.len() - 1
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(username: &str) -> User {
        User {
            username: Some(username.to_string()),
            ..User::default()
        }
    }

    #[tokio::test]
    async fn test_append_returns_sequential_indices() {
        let store = UserStore::new();

        assert_eq!(store.append(named("a")).await, 0);
        assert_eq!(store.append(named("b")).await, 1);
        assert_eq!(store.append(named("c")).await, 2);
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn test_all_preserves_insertion_order() {
        let store = UserStore::new();
        store.append(named("first")).await;
        store.append(named("second")).await;

        let users = store.all().await;
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].username.as_deref(), Some("first"));
        assert_eq!(users[1].username.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_get_out_of_range_is_none() {
        let store = UserStore::new();
        assert!(store.get(0).await.is_none());

        store.append(named("only")).await;
        assert!(store.get(0).await.is_some());
        assert!(store.get(1).await.is_none());
    }

    #[tokio::test]
    async fn test_duplicates_are_permitted() {
        let store = UserStore::new();
        store.append(named("dup")).await;
        store.append(named("dup")).await;

        let users = store.all().await;
        assert_eq!(users[0], users[1]);
    }

    #[tokio::test]
    async fn test_clones_share_records() {
        let store = UserStore::new();
        let other = store.clone();

        store.append(named("shared")).await;
        assert_eq!(other.len().await, 1);
    }

    #[test]
    fn test_empty_record_serializes_without_fields() {
        let json = serde_json::to_string(&User::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_partial_record_deserializes() {
        let user: User = serde_json::from_str(r#"{"username":"a"}"#).unwrap();
        assert_eq!(user.username.as_deref(), Some("a"));
        assert!(user.real_name.is_none());
        assert!(user.country.is_none());
    }
}
