// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Logged workout activity model for storage and API.

use super::payload::{FieldReader, TextRule};
use super::{ObjectId, Payload, Resource};
use crate::db::collections;
use crate::error::FieldErrors;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Activity record stored in the `activities` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// Who performed the activity
    pub username: String,
    /// Free-form type (running, swimming, ...)
    pub activity_type: String,
    /// Duration in minutes
    pub duration: f64,
    /// Calendar date (YYYY-MM-DD)
    pub date: NaiveDate,
}

impl Resource for Activity {
    const COLLECTION: &'static str = collections::ACTIVITIES;

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
            current.map(|a| a.username.as_str()),
            None,
        );
        let activity_type = fields.text(
            "activity_type",
            TextRule::limited(100),
            current.map(|a| a.activity_type.as_str()),
            None,
        );
        let duration = fields.float("duration", current.map(|a| a.duration));
        let date = fields.date("date", current.map(|a| a.date));
        fields.finish()?;

        Ok(Self {
            id,
            username: username.unwrap_or_default(),
            activity_type: activity_type.unwrap_or_default(),
            duration: duration.unwrap_or_default(),
            date: date.unwrap_or_default(),
        })
    }

    fn label(&self) -> String {
        format!("{} - {}", self.username, self.activity_type)
    }
}
