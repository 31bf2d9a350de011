//! Leaderboard entry model for storage and API.

use super::payload::{FieldReader, TextRule};
use super::{ObjectId, Payload, Resource};
use crate::db::collections;
use crate::error::FieldErrors;
use serde::{Deserialize, Serialize};

/// Leaderboard entry stored in the `leaderboard` collection.
///
/// One entry per username is the convention, but nothing enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    pub score: i64,
    #[serde(default)]
    pub calories: i64,
}

impl Resource for Leaderboard {
    const COLLECTION: &'static str = collections::LEADERBOARD;

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
            current.map(|e| e.username.as_str()),
            None,
        );
        let score = fields.integer("score", current.map(|e| e.score), None);
        let calories = fields.integer("calories", current.map(|e| e.calories), Some(0));
        fields.finish()?;

        Ok(Self {
            id,
            username: username.unwrap_or_default(),
            score: score.unwrap_or_default(),
            calories: calories.unwrap_or_default(),
        })
    }

    fn label(&self) -> String {
        format!("{} - {}", self.username, self.score)
    }
}
