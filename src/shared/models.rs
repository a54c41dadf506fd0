//! Domain models exchanged with the remote API
//!
//! Field names follow the server's JSON. The `display_*_url` fields are never
//! read from the wire; they are derived by the service layer (see
//! [`crate::shared::media`]).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable identifier of a user
pub type UserId = i64;

/// Stable identifier of a post
pub type PostId = i64;

/// Account as returned by registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Public profile of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub profile_photo_filename: Option<String>,
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    /// Derived from `profile_photo_filename`
    #[serde(default, skip_deserializing)]
    pub display_photo_url: Option<String>,
}

/// A post with its embedded owner snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    #[serde(default)]
    pub text_content: Option<String>,
    #[serde(default)]
    pub image_filename: Option<String>,
    pub owner_id: UserId,
    pub owner: UserProfile,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub like_count: u32,
    /// Maintained by the server; only showcase/unshowcase responses change it
    #[serde(default)]
    pub is_showcased: bool,
    /// Derived from `image_filename`
    #[serde(default, skip_deserializing)]
    pub display_image_url: Option<String>,
}

impl Post {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }
}

/// A like left on a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub id: i64,
    pub owner_id: UserId,
    pub post_id: PostId,
    pub owner: UserProfile,
}

/// Password-grant token response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Reference to a profile: a literal id or the sentinel `me`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserRef {
    Me,
    Id(UserId),
}

impl UserRef {
    /// Resolve `me` against the signed-in user id, if any.
    pub fn resolve(self, viewer: Option<UserId>) -> Option<UserId> {
        match self {
            Self::Id(id) => Some(id),
            Self::Me => viewer,
        }
    }
}

impl fmt::Display for UserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Me => f.write_str("me"),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}

impl From<UserId> for UserRef {
    fn from(id: UserId) -> Self {
        Self::Id(id)
    }
}

impl FromStr for UserRef {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "me" {
            return Ok(Self::Me);
        }
        s.parse().map(Self::Id)
    }
}

/// Lenient timestamp codec.
///
/// Accepts RFC 3339 as well as naive ISO timestamps (no offset), which are
/// taken to be UTC.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
            return Some(with_offset.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, NAIVE_FORMAT)
            .ok()
            .map(|naive| naive.and_utc())
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(ts) => serializer.serialize_some(&ts.to_rfc3339()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => super::parse(&raw)
                    .map(Some)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}"))),
                None => Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_post_from_server_json() {
        let json = r#"{
            "id": 7,
            "title": "Bowl #3",
            "text_content": null,
            "image_filename": "abc.jpg",
            "owner_id": 2,
            "owner": {"id": 2, "email": "potter@example.com", "created_at": "2024-03-01T10:00:00"},
            "created_at": "2024-03-02T09:30:15.123456",
            "like_count": 4
        }"#;

        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.id, 7);
        assert_eq!(post.image_filename.as_deref(), Some("abc.jpg"));
        assert!(!post.is_showcased);
        assert!(post.updated_at.is_none());
        assert!(post.display_image_url.is_none());
        assert_eq!(post.created_at.day(), 2);
        assert_eq!(post.created_at.second(), 15);
        assert!(post.is_owned_by(2));
    }

    #[test]
    fn test_display_url_is_not_read_from_wire() {
        let json = r#"{"id": 1, "email": "a@b.com", "display_photo_url": "http://evil/x.png"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert!(profile.display_photo_url.is_none());
    }

    #[test]
    fn test_rfc3339_timestamp() {
        let parsed = timestamp::parse("2024-03-02T09:30:15+02:00").unwrap();
        assert_eq!(parsed.hour(), 7);
    }

    #[test]
    fn test_invalid_timestamp_fails() {
        let json = r#"{"id": 1, "email": "a@b.com", "created_at": "yesterday"}"#;
        assert!(serde_json::from_str::<User>(json).is_err());
    }

    #[test]
    fn test_user_ref_parse_and_display() {
        assert_eq!("me".parse::<UserRef>().unwrap(), UserRef::Me);
        assert_eq!("42".parse::<UserRef>().unwrap(), UserRef::Id(42));
        assert!("someone".parse::<UserRef>().is_err());
        assert_eq!(UserRef::Me.to_string(), "me");
        assert_eq!(UserRef::Id(5).to_string(), "5");
    }

    #[test]
    fn test_user_ref_resolve() {
        assert_eq!(UserRef::Me.resolve(Some(3)), Some(3));
        assert_eq!(UserRef::Me.resolve(None), None);
        assert_eq!(UserRef::Id(9).resolve(Some(3)), Some(9));
    }
}
