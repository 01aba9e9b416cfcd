//! [`User`] definitions.

use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// User provided by the upstream directory.
///
/// Only the name is interpreted by the service, everything else is carried
/// through as-is.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// ID of this [`User`].
    ///
    /// [`None`] if the upstream record carries no ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,

    /// First [`Name`] of this [`User`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<Name>,

    /// Last [`Name`] of this [`User`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<Name>,

    /// Other attributes of this [`User`] (age, email, address, company, etc).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Returns the full name of this [`User`]: its first and last [`Name`]s
    /// joined with a single space.
    ///
    /// [`None`] is returned if any of the [`Name`]s is absent.
    #[must_use]
    pub fn full_name(&self) -> Option<String> {
        let first = self.first_name.as_ref()?;
        let last = self.last_name.as_ref()?;
        Some(format!("{first} {last}"))
    }
}

/// ID of a [`User`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[serde(transparent)]
pub struct Id(u64);

/// Name (first or last) of a [`User`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq, Serialize,
)]
#[as_ref(str)]
#[serde(transparent)]
pub struct Name(String);

/// Complete dataset of [`User`]s along with the upstream listing metadata.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Users {
    /// All the [`User`]s in their upstream order.
    pub users: Vec<User>,

    /// Total number of [`User`]s reported by the upstream.
    pub total: u64,

    /// Number of [`User`]s skipped by the upstream.
    pub skip: u64,

    /// Limit the upstream applied to the listing.
    pub limit: u64,
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use super::{Id, User};

    #[test]
    fn keeps_unknown_attributes() {
        let raw = json!({
            "id": 1,
            "firstName": "Emily",
            "lastName": "Johnson",
            "age": 28,
            "address": {"city": "Phoenix", "state": "Mississippi"},
        });

        let user: User = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(user.first_name.as_ref().unwrap().to_string(), "Emily");
        assert_eq!(user.extra["age"], json!(28));

        assert_eq!(serde_json::to_value(&user).unwrap(), raw);
    }

    #[test]
    fn tolerates_absent_names() {
        let user: User =
            serde_json::from_value(json!({"id": 2, "firstName": null}))
                .unwrap();

        assert!(user.first_name.is_none());
        assert!(user.last_name.is_none());
        assert!(user.full_name().is_none());
    }

    #[test]
    fn tolerates_absent_id() {
        let missing: User = serde_json::from_value(
            json!({"firstName": "Jane", "lastName": "Smith"}),
        )
        .unwrap();
        assert_eq!(missing.id, None);
        assert_eq!(missing.full_name().as_deref(), Some("Jane Smith"));
        assert_eq!(
            serde_json::to_value(&missing).unwrap(),
            json!({"firstName": "Jane", "lastName": "Smith"}),
        );

        let null: User =
            serde_json::from_value(json!({"id": null, "firstName": "Jane"}))
                .unwrap();
        assert_eq!(null.id, None);

        let present: User = serde_json::from_value(json!({"id": 7})).unwrap();
        assert_eq!(present.id, Some(Id::from(7)));
    }

    #[test]
    fn full_name() {
        let user: User = serde_json::from_value(
            json!({"id": 3, "firstName": "John", "lastName": "Doe"}),
        )
        .unwrap();

        assert_eq!(user.full_name().as_deref(), Some("John Doe"));
    }
}
