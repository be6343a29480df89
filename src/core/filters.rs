use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::aggregate::average_match_level;
use crate::core::input::parse_number;
use crate::models::User;

/// Filter inputs exactly as typed in the list view
///
/// An empty string leaves its criterion inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub interested_in: String,
    pub min_matches_count: String,
    pub min_match_level: String,
}

/// One settable filter input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterField {
    FirstName,
    LastName,
    Email,
    InterestedIn,
    MinMatchesCount,
    MinMatchLevel,
}

impl FilterField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::FirstName => "firstName",
            FilterField::LastName => "lastName",
            FilterField::Email => "email",
            FilterField::InterestedIn => "interestedIn",
            FilterField::MinMatchesCount => "minMatchesCount",
            FilterField::MinMatchLevel => "minMatchLevel",
        }
    }
}

impl FromStr for FilterField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "firstName" | "first_name" => Ok(FilterField::FirstName),
            "lastName" | "last_name" => Ok(FilterField::LastName),
            "email" => Ok(FilterField::Email),
            "interestedIn" | "interested_in" => Ok(FilterField::InterestedIn),
            "minMatchesCount" | "min_matches_count" => Ok(FilterField::MinMatchesCount),
            "minMatchLevel" | "min_match_level" => Ok(FilterField::MinMatchLevel),
            other => Err(format!("Unknown filter field: {}", other)),
        }
    }
}

impl FilterCriteria {
    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FilterField::FirstName => self.first_name = value,
            FilterField::LastName => self.last_name = value,
            FilterField::Email => self.email = value,
            FilterField::InterestedIn => self.interested_in = value,
            FilterField::MinMatchesCount => self.min_matches_count = value,
            FilterField::MinMatchLevel => self.min_match_level = value,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Lowercase the text criteria and parse the numeric ones
    ///
    /// Numeric inputs that do not parse are dropped, which leaves that
    /// criterion passing every user.
    pub fn compile(&self) -> CompiledFilter {
        CompiledFilter {
            first_name: lowered(&self.first_name),
            last_name: lowered(&self.last_name),
            email: lowered(&self.email),
            interested_in: lowered(&self.interested_in),
            min_matches_count: numeric("min_matches_count", &self.min_matches_count)
                .map(f64::floor),
            min_match_level: numeric("min_match_level", &self.min_match_level),
        }
    }
}

fn lowered(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_lowercase())
    }
}

fn numeric(field: &'static str, value: &str) -> Option<f64> {
    match parse_number(field, value) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!("Ignoring filter criterion: {}", e);
            None
        }
    }
}

/// Filter criteria ready to evaluate; `None` means inactive
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledFilter {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    interested_in: Option<String>,
    min_matches_count: Option<f64>,
    min_match_level: Option<f64>,
}

impl CompiledFilter {
    /// Check a user against every active criterion
    #[inline]
    pub fn matches(&self, user: &User) -> bool {
        if let Some(needle) = &self.first_name {
            if !contains_ci(&user.first_name, needle) {
                return false;
            }
        }

        // Absent last name / email never satisfies a non-empty filter
        if let Some(needle) = &self.last_name {
            if !user.last_name.as_deref().is_some_and(|v| contains_ci(v, needle)) {
                return false;
            }
        }

        if let Some(needle) = &self.email {
            if !user.email.as_deref().is_some_and(|v| contains_ci(v, needle)) {
                return false;
            }
        }

        if let Some(needle) = &self.interested_in {
            if !user.interested_in.iter().any(|tag| contains_ci(tag, needle)) {
                return false;
            }
        }

        if let Some(min_count) = self.min_matches_count {
            if (user.matches.len() as f64) < min_count {
                return false;
            }
        }

        if let Some(min_level) = self.min_match_level {
            if average_match_level(&user.matches) < min_level {
                return false;
            }
        }

        true
    }
}

#[inline]
fn contains_ci(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

/// Keep the users that pass every active criterion, in their original order
pub fn apply_filters<'a, I>(criteria: &FilterCriteria, users: I) -> Vec<&'a User>
where
    I: IntoIterator<Item = &'a User>,
{
    let compiled = criteria.compile();
    users.into_iter().filter(|user| compiled.matches(user)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Match;

    fn create_test_user(id: &str, first: &str, last: Option<&str>, levels: &[f64]) -> User {
        User {
            user_id: id.to_string(),
            first_name: first.to_string(),
            last_name: last.map(str::to_string),
            email: Some(format!("{}@example.test", first.to_lowercase())),
            interested_in: vec!["Engineering".to_string(), "Design".to_string()],
            matches: levels
                .iter()
                .enumerate()
                .map(|(i, level)| Match {
                    opp_id: format!("{}-{}", id, i),
                    role: "Engineer".to_string(),
                    org_name: "Acme".to_string(),
                    contact_email: "hr@acme.test".to_string(),
                    match_level: *level,
                })
                .collect(),
            user_image: None,
        }
    }

    fn ids(users: &[&User]) -> Vec<String> {
        users.iter().map(|u| u.user_id.clone()).collect()
    }

    #[test]
    fn test_empty_criteria_keeps_everything() {
        let users = vec![
            create_test_user("1", "Ada", None, &[]),
            create_test_user("2", "Bob", Some("Stone"), &[1.0]),
        ];

        let kept = apply_filters(&FilterCriteria::default(), &users);

        assert_eq!(ids(&kept), vec!["1", "2"]);
    }

    #[test]
    fn test_first_name_case_insensitive() {
        let users = vec![
            create_test_user("1", "Ada", None, &[]),
            create_test_user("2", "Adam", None, &[]),
            create_test_user("3", "Bob", None, &[]),
        ];
        let mut criteria = FilterCriteria::default();
        criteria.set(FilterField::FirstName, "aD");

        assert_eq!(ids(&apply_filters(&criteria, &users)), vec!["1", "2"]);
    }

    #[test]
    fn test_absent_last_name_fails_non_empty_filter() {
        let users = vec![
            create_test_user("1", "Ada", None, &[]),
            create_test_user("2", "Bob", Some("Lovelace"), &[]),
        ];
        let mut criteria = FilterCriteria::default();
        criteria.set(FilterField::LastName, "love");

        assert_eq!(ids(&apply_filters(&criteria, &users)), vec!["2"]);
    }

    #[test]
    fn test_absent_email_fails_non_empty_filter() {
        let mut no_email = create_test_user("1", "Ada", None, &[]);
        no_email.email = None;
        let users = vec![no_email, create_test_user("2", "Bob", None, &[])];
        let mut criteria = FilterCriteria::default();
        criteria.set(FilterField::Email, "EXAMPLE");

        assert_eq!(ids(&apply_filters(&criteria, &users)), vec!["2"]);
    }

    #[test]
    fn test_interested_in_any_tag() {
        let mut other = create_test_user("2", "Bob", None, &[]);
        other.interested_in = vec!["Finance".to_string()];
        let users = vec![create_test_user("1", "Ada", None, &[]), other];
        let mut criteria = FilterCriteria::default();
        criteria.set(FilterField::InterestedIn, "sign");

        assert_eq!(ids(&apply_filters(&criteria, &users)), vec!["1"]);
    }

    #[test]
    fn test_min_matches_count_floors_input() {
        let users = vec![
            create_test_user("1", "Ada", None, &[1.0]),
            create_test_user("2", "Bob", None, &[1.0, 2.0]),
            create_test_user("3", "Cy", None, &[1.0, 2.0, 3.0]),
        ];
        let mut criteria = FilterCriteria::default();
        criteria.set(FilterField::MinMatchesCount, "2.9");

        assert_eq!(ids(&apply_filters(&criteria, &users)), vec!["2", "3"]);
    }

    #[test]
    fn test_min_match_level_uses_rounded_average() {
        let users = vec![
            create_test_user("1", "Ada", None, &[3.0]),
            create_test_user("2", "Bob", None, &[3.0, 4.0]),
            create_test_user("3", "Cy", None, &[4.0]),
        ];
        let mut criteria = FilterCriteria::default();
        criteria.set(FilterField::MinMatchLevel, "3.5");

        assert_eq!(ids(&apply_filters(&criteria, &users)), vec!["2", "3"]);
    }

    #[test]
    fn test_malformed_numbers_disable_criterion() {
        let users = vec![
            create_test_user("1", "Ada", None, &[]),
            create_test_user("2", "Bob", None, &[5.0]),
        ];
        let mut criteria = FilterCriteria::default();
        criteria.set(FilterField::MinMatchesCount, "lots");
        criteria.set(FilterField::MinMatchLevel, "high");

        assert_eq!(ids(&apply_filters(&criteria, &users)), vec!["1", "2"]);
    }

    #[test]
    fn test_criteria_combine_with_and() {
        let users = vec![
            create_test_user("1", "Ada", Some("King"), &[4.0]),
            create_test_user("2", "Ada", Some("Queen"), &[4.0]),
            create_test_user("3", "Ada", Some("King"), &[1.0]),
        ];
        let mut criteria = FilterCriteria::default();
        criteria.set(FilterField::FirstName, "ada");
        criteria.set(FilterField::LastName, "king");
        criteria.set(FilterField::MinMatchLevel, "2");

        assert_eq!(ids(&apply_filters(&criteria, &users)), vec!["1"]);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut criteria = FilterCriteria::default();
        criteria.set(FilterField::Email, "x");
        assert!(!criteria.is_empty());

        criteria.clear();
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_field_names() {
        assert_eq!("firstName".parse::<FilterField>(), Ok(FilterField::FirstName));
        assert_eq!("min_match_level".parse::<FilterField>(), Ok(FilterField::MinMatchLevel));
        assert!("nickname".parse::<FilterField>().is_err());
        assert_eq!(FilterField::InterestedIn.as_str(), "interestedIn");
    }
}
