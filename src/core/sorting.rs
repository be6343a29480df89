use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::aggregate::average_match_level;
use crate::models::User;

/// Every column the list view can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    FirstName,
    LastName,
    Email,
    InterestedInCount,
    MatchesCount,
    MatchLevel,
    Role,
    OrgName,
    ContactEmail,
}

impl SortKey {
    pub const ALL: [SortKey; 9] = [
        SortKey::FirstName,
        SortKey::LastName,
        SortKey::Email,
        SortKey::InterestedInCount,
        SortKey::MatchesCount,
        SortKey::MatchLevel,
        SortKey::Role,
        SortKey::OrgName,
        SortKey::ContactEmail,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::FirstName => "first_name",
            SortKey::LastName => "last_name",
            SortKey::Email => "email",
            SortKey::InterestedInCount => "interested_in_count",
            SortKey::MatchesCount => "matches_count",
            SortKey::MatchLevel => "match_level",
            SortKey::Role => "role",
            SortKey::OrgName => "org_name",
            SortKey::ContactEmail => "contact_email",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "interested_in.length" => return Ok(SortKey::InterestedInCount),
            "matches.length" => return Ok(SortKey::MatchesCount),
            _ => {}
        }

        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("Unknown sort key: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// The single active sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            key: SortKey::MatchLevel,
            direction: SortDirection::Desc,
        }
    }
}

impl SortConfig {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Column-header click: ascending first, descending on a second click
    pub fn toggle(self, key: SortKey) -> Self {
        let direction = if self.key == key && self.direction == SortDirection::Asc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        Self { key, direction }
    }
}

/// Comparable value extracted from a user for one sort key
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Text(String),
    Count(usize),
    Level(f64),
}

impl SortValue {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            (SortValue::Count(a), SortValue::Count(b)) => a.cmp(b),
            (SortValue::Level(a), SortValue::Level(b)) => a.total_cmp(b),
            // A single key always yields a single variant
            _ => Ordering::Equal,
        }
    }
}

/// Extract the value a user is ordered by
pub fn key_of(user: &User, key: SortKey) -> SortValue {
    let first_match_text = |pick: fn(&crate::models::Match) -> &str| {
        SortValue::Text(user.first_match().map(pick).unwrap_or_default().to_string())
    };

    match key {
        SortKey::FirstName => SortValue::Text(user.first_name.clone()),
        SortKey::LastName => SortValue::Text(user.last_name.clone().unwrap_or_default()),
        SortKey::Email => SortValue::Text(user.email.clone().unwrap_or_default()),
        SortKey::InterestedInCount => SortValue::Count(user.interested_in.len()),
        SortKey::MatchesCount => SortValue::Count(user.matches.len()),
        SortKey::MatchLevel => SortValue::Level(average_match_level(&user.matches)),
        SortKey::Role => first_match_text(|m| &m.role),
        SortKey::OrgName => first_match_text(|m| &m.org_name),
        SortKey::ContactEmail => first_match_text(|m| &m.contact_email),
    }
}

/// Stable sort by the configured key
///
/// Keys are extracted once per user. Users with equal keys keep their input
/// order in both directions.
pub fn sort_users<'a>(users: Vec<&'a User>, config: SortConfig) -> Vec<&'a User> {
    let mut keyed: Vec<(SortValue, &'a User)> = users
        .into_iter()
        .map(|user| (key_of(user, config.key), user))
        .collect();

    // slice::sort_by is a stable merge sort
    keyed.sort_by(|(a, _), (b, _)| match config.direction {
        SortDirection::Asc => a.compare(b),
        SortDirection::Desc => b.compare(a),
    });

    keyed.into_iter().map(|(_, user)| user).collect()
}
