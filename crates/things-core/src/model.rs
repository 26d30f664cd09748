//! Thing Entity
//!
//! A persisted text entry with a server-assigned creation timestamp.

use std::fmt;

use chrono::{DateTime, Utc};

/// Name of the collection holding things
pub const COLLECTION: &str = "things";

/// Field the live feed is ordered by (ascending)
pub const ORDER_FIELD: &str = "created";

/// Opaque document identifier assigned by the backend
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ThingId(String);

impl ThingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ThingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ThingId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A single item in the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thing {
    /// Backend-assigned id, stable for the item's lifetime
    pub id: ThingId,
    /// Free-form text
    pub content: String,
    /// Server clock at insertion
    pub created: DateTime<Utc>,
}

impl Thing {
    pub fn new(id: ThingId, content: impl Into<String>, created: DateTime<Utc>) -> Self {
        Self {
            id,
            content: content.into(),
            created,
        }
    }
}

/// Backend sort order: `created` ascending, document id breaks ties.
pub fn snapshot_order(a: &Thing, b: &Thing) -> std::cmp::Ordering {
    a.created.cmp(&b.created).then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn equal_timestamps_sort_by_id() {
        let at = Utc.timestamp_opt(1_700_000_000, 0).single().expect("valid timestamp");
        let mut things = vec![
            Thing::new(ThingId::from("b"), "second", at),
            Thing::new(ThingId::from("a"), "first", at),
        ];
        things.sort_by(snapshot_order);

        let ids: Vec<&str> = things.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn earlier_timestamp_wins_over_id() {
        let early = Utc.timestamp_opt(1, 0).single().expect("valid timestamp");
        let late = Utc.timestamp_opt(2, 0).single().expect("valid timestamp");
        let mut things = vec![
            Thing::new(ThingId::from("a"), "late", late),
            Thing::new(ThingId::from("z"), "early", early),
        ];
        things.sort_by(snapshot_order);

        assert_eq!(things[0].content, "early");
    }
}
