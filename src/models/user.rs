//! User model for storage and API.

use super::payload::{FieldReader, TextRule};
use super::{ObjectId, Payload, Resource, UniqueKey};
use crate::db::collections;
use crate::error::FieldErrors;
use serde::{Deserialize, Serialize};

/// User profile stored in the `users` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Unique across all users
    pub email: String,
    /// Stored as given
    pub password: String,
}

impl Resource for User {
    const COLLECTION: &'static str = collections::USERS;

    fn id(&self) -> ObjectId {
        self.id
    }

    fn from_payload(
        id: ObjectId,
        payload: &Payload<'_>,
        current: Option<&Self>,
    ) -> Result<Self, FieldErrors> {
        let mut fields = FieldReader::new(payload);
        let username = fields.text(
            "username",
            TextRule::limited(100),
            current.map(|u| u.username.as_str()),
            None,
        );
        let name = fields.text(
            "name",
            TextRule::limited(150).blank_ok(),
            current.map(|u| u.name.as_str()),
            Some(""),
        );
        let email = fields.email("email", current.map(|u| u.email.as_str()));
        let password = fields.text(
            "password",
            TextRule::limited(100),
            current.map(|u| u.password.as_str()),
            None,
        );
        fields.finish()?;

        Ok(Self {
            id,
            username: username.unwrap_or_default(),
            name: name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            password: password.unwrap_or_default(),
        })
    }

    fn label(&self) -> String {
        self.username.clone()
    }

    fn unique_key(&self) -> Option<UniqueKey> {
        Some(UniqueKey {
            field: "email",
            value: self.email.clone(),
            message: "user with this email already exists.",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::payload::{INVALID_EMAIL, REQUIRED};
    use serde_json::json;

    #[test]
    fn test_user_from_payload() {
        let body = json!({
            "username": "testuser",
            "email": "test@example.com",
            "password": "testpass",
        });
        let payload = Payload::from_value(&body).unwrap();
        let user = User::from_payload(ObjectId::new(), &payload, None).unwrap();

        assert_eq!(user.username, "testuser");
        assert_eq!(user.email, "test@example.com");
        assert_eq!(user.name, "");
        assert_eq!(user.label(), "testuser");
    }

    #[test]
    fn test_user_requires_email_and_password() {
        let body = json!({"username": "testuser", "email": "nope"});
        let payload = Payload::from_value(&body).unwrap();
        let errors = User::from_payload(ObjectId::new(), &payload, None).unwrap_err();

        assert_eq!(errors.get("email").unwrap(), [INVALID_EMAIL]);
        assert_eq!(errors.get("password").unwrap(), [REQUIRED]);
        assert!(errors.get("username").is_none());
    }

    #[test]
    fn test_user_serializes_id_as_string() {
        let id = ObjectId::parse_str("65a1b2c3d4e5f60718293a4b").unwrap();
        let user = User {
            id,
            username: "ironman".to_string(),
            name: "Tony Stark".to_string(),
            email: "tony@stark.com".to_string(),
            password: "pepper123".to_string(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["_id"], "65a1b2c3d4e5f60718293a4b");
        assert_eq!(value["name"], "Tony Stark");
    }

    #[test]
    fn test_stored_user_without_name_defaults_to_empty() {
        let user: User = serde_json::from_value(json!({
            "_id": "65a1b2c3d4e5f60718293a4b",
            "username": "thor",
            "email": "thor@asgard.com",
            "password": "mjolnir99",
        }))
        .unwrap();
        assert_eq!(user.name, "");
    }
}
