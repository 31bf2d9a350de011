// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod leaderboard;
pub mod object_id;
pub mod payload;
pub mod team;
pub mod user;
pub mod workout;

pub use activity::Activity;
pub use leaderboard::Leaderboard;
pub use object_id::ObjectId;
pub use payload::Payload;
pub use team::Team;
pub use user::User;
pub use workout::Workout;

use crate::error::FieldErrors;
use serde::{de::DeserializeOwned, Serialize};

/// A field whose value must be unique across a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueKey {
    pub field: &'static str,
    pub value: String,
    /// Message reported against `field` when the value is taken.
    pub message: &'static str,
}

/// A record type stored in its own collection and exposed under
/// `/api/{COLLECTION}/`.
///
/// The serde representation is both the stored document and the wire
/// object: `_id` as a hex string plus the declared fields.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection name, also the URL segment.
    const COLLECTION: &'static str;

    fn id(&self) -> ObjectId;

    /// Validate a request payload into a record.
    ///
    /// `current` is the stored record when updating and `None` when
    /// creating. See [`payload::FieldReader`] for how absent fields resolve.
    fn from_payload(
        id: ObjectId,
        payload: &Payload<'_>,
        current: Option<&Self>,
    ) -> Result<Self, FieldErrors>;

    /// Short human-readable label, used in logs.
    fn label(&self) -> String;

    /// Uniqueness constraint enforced by the store, if any.
    fn unique_key(&self) -> Option<UniqueKey> {
        None
    }
}
