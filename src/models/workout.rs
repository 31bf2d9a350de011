// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Suggested workout model for storage and API.

use super::payload::{FieldReader, TextRule};
use super::{ObjectId, Payload, Resource};
use crate::db::collections;
use crate::error::FieldErrors;
use crate::list_field::StringList;
use serde::{Deserialize, Serialize};

/// Workout stored in the `workouts` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub exercises: StringList,
}

impl Resource for Workout {
    const COLLECTION: &'static str = collections::WORKOUTS;

    fn id(&self) -> ObjectId {
        self.id
    }

    fn from_payload(
        id: ObjectId,
        payload: &Payload<'_>,
        current: Option<&Self>,
    ) -> Result<Self, FieldErrors> {
        let mut fields = FieldReader::new(payload);
        let name = fields.text(
            "name",
            TextRule::limited(100),
            current.map(|w| w.name.as_str()),
            None,
        );
        let description = fields.text(
            "description",
            TextRule::unlimited(),
            current.map(|w| w.description.as_str()),
            None,
        );
        let exercises = fields.string_list(
            "exercises",
            current.map(|w| w.exercises.as_slice()),
            Some(Vec::new()),
        );
        fields.finish()?;

        Ok(Self {
            id,
            name: name.unwrap_or_default(),
            description: description.unwrap_or_default(),
            exercises: exercises.unwrap_or_default().into(),
        })
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list_field::EXPECTED_LIST;
    use serde_json::json;

    #[test]
    fn test_workout_from_payload() {
        let body = json!({
            "name": "Stark Iron Conditioning",
            "description": "High-intensity suit-inspired workout.",
            "exercises": ["repulsor aim drills", "flight stabilization"],
        });
        let payload = Payload::from_value(&body).unwrap();
        let workout = Workout::from_payload(ObjectId::new(), &payload, None).unwrap();

        assert_eq!(workout.label(), "Stark Iron Conditioning");
        assert!(workout
            .exercises
            .as_slice()
            .contains(&"repulsor aim drills".to_string()));
    }

    #[test]
    fn test_workout_rejects_malformed_exercises() {
        let body = json!({
            "name": "Speed Force Intervals",
            "description": "Lightning-fast intervals.",
            "exercises": "rapid interval sprints",
        });
        let payload = Payload::from_value(&body).unwrap();
        let errors = Workout::from_payload(ObjectId::new(), &payload, None).unwrap_err();
        assert_eq!(errors.get("exercises").unwrap(), [EXPECTED_LIST]);
    }
}
