//! Gym members

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Enrollment date of the placeholder member
const PLACEHOLDER_JOIN_DATE: NaiveDate = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");

/// Membership tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "graphql", derive(async_graphql::Enum))]
#[serde(rename_all = "lowercase")]
pub enum Membership {
    Basic,
    Premium,
    Elite,
}

impl Membership {
    /// Lowercase tier name, as used in tokens
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Premium => "premium",
            Self::Elite => "elite",
        }
    }
}

impl std::fmt::Display for Membership {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated gym member
///
/// The record is carried as-is inside a session token, so field names follow the camelCase
/// format expected by the front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "graphql", derive(async_graphql::SimpleObject))]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User identifier
    pub id: String,
    /// Login email
    pub email: String,
    /// Display name
    pub name: String,
    /// Membership tier
    pub membership_type: Membership,
    /// Enrollment date
    pub join_date: NaiveDate,
}

impl User {
    /// Fabricates the placeholder member returned by every successful login.
    ///
    /// Only the email depends on the input, everything else is fixed.
    pub fn placeholder(email: impl Into<String>) -> Self {
        Self {
            id: "1".to_owned(),
            email: email.into(),
            name: "Test User".to_owned(),
            membership_type: Membership::Premium,
            join_date: PLACEHOLDER_JOIN_DATE,
        }
    }
}
