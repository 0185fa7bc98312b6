//! Validated user shapes and the raw API response envelope.

use serde::{Deserialize, Serialize};

/// A user's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserName {
    pub first: String,
    pub last: String,
}

/// City-level location, the input to geocoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserLocation {
    pub city: String,
    pub country: String,
}

/// Profile picture URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPicture {
    pub large: String,
}

/// A validated user profile.
///
/// Instances come out of the validators in [`crate::validate`]: every
/// string is trimmed and non-empty, and `picture.large` parses as an
/// absolute URL. Do not build these by hand from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: UserName,
    pub location: UserLocation,
    pub picture: UserPicture,
}

impl User {
    /// Free-text geocoding query, `"City, Country"`.
    pub fn location_query(&self) -> String {
        format!("{}, {}", self.location.city, self.location.country)
    }
}

/// Pagination and seed metadata returned alongside results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiInfo {
    pub seed: Option<String>,
    pub results: Option<u32>,
    pub page: Option<u32>,
    pub version: Option<String>,
}

/// Envelope returned by the user-listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub results: Vec<User>,
    pub info: Option<ApiInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User {
            name: UserName {
                first: "Astrid".to_string(),
                last: "Berg".to_string(),
            },
            location: UserLocation {
                city: "Oslo".to_string(),
                country: "Norway".to_string(),
            },
            picture: UserPicture {
                large: "https://example.com/astrid.jpg".to_string(),
            },
        }
    }

    #[test]
    fn test_location_query() {
        assert_eq!(test_user().location_query(), "Oslo, Norway");
    }

    #[test]
    fn test_user_serialization_round_trip() {
        let user = test_user();
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["name"]["first"], "Astrid");

        let parsed: User = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, user);
    }
}
