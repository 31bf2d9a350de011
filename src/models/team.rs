// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Team model for storage and API.

use super::payload::{FieldReader, TextRule};
use super::{ObjectId, Payload, Resource};
use crate::db::collections;
use crate::error::FieldErrors;
use crate::list_field::StringList;
use serde::{Deserialize, Serialize};

/// Team stored in the `teams` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    /// Member usernames. Plain values, not checked against `users`.
    #[serde(default)]
    pub members: StringList,
}

impl Resource for Team {
    const COLLECTION: &'static str = collections::TEAMS;

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
            current.map(|t| t.name.as_str()),
            None,
        );
        let members = fields.string_list(
            "members",
            current.map(|t| t.members.as_slice()),
            Some(Vec::new()),
        );
        fields.finish()?;

        Ok(Self {
            id,
            name: name.unwrap_or_default(),
            members: members.unwrap_or_default().into(),
        })
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_team_members_from_list_or_text() {
        for members in [json!(["ironman", "spiderman"]), json!("['ironman', 'spiderman']")] {
            let body = json!({"name": "Team Marvel", "members": members});
            let payload = Payload::from_value(&body).unwrap();
            let team = Team::from_payload(ObjectId::new(), &payload, None).unwrap();
            assert_eq!(team.members.as_slice(), ["ironman", "spiderman"]);
        }
    }

    #[test]
    fn test_team_members_default_empty() {
        let body = json!({"name": "Team DC"});
        let payload = Payload::from_value(&body).unwrap();
        let team = Team::from_payload(ObjectId::new(), &payload, None).unwrap();
        assert!(team.members.as_slice().is_empty());
    }

    #[test]
    fn test_partial_update_replaces_members() {
        let current = Team {
            id: ObjectId::new(),
            name: "Team Marvel".to_string(),
            members: vec!["ironman".to_string(), "thor".to_string()].into(),
        };
        let body = json!({"members": ["hulk"]});
        let payload = Payload::from_value(&body).unwrap().partial();
        let team = Team::from_payload(current.id, &payload, Some(&current)).unwrap();

        assert_eq!(team.name, "Team Marvel");
        assert_eq!(team.members.as_slice(), ["hulk"]);
    }

    #[test]
    fn test_legacy_text_members_normalized_on_read() {
        let team: Team = serde_json::from_value(json!({
            "_id": "65a1b2c3d4e5f60718293a4b",
            "name": "Team DC",
            "members": "['batman', 'superman']",
        }))
        .unwrap();
        assert_eq!(team.members.as_slice(), ["batman", "superman"]);
        assert_eq!(
            serde_json::to_value(&team).unwrap()["members"],
            json!(["batman", "superman"])
        );
    }
}
