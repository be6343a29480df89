use serde::{Deserialize, Deserializer, Serialize};

/// One opportunity paired with a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    #[serde(deserialize_with = "id_string")]
    pub opp_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub org_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contact_email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub match_level: f64,
}

/// User record as delivered by the backend, before normalization
///
/// Collection fields may be missing or `null` here; see [`crate::core::normalize`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawUser {
    #[serde(deserialize_with = "id_string")]
    pub user_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub interested_in: Option<Vec<String>>,
    #[serde(default)]
    pub matches: Option<Vec<Match>>,
    #[serde(default)]
    pub user_image: Option<String>,
}

/// Normalized user record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub interested_in: Vec<String>,
    pub matches: Vec<Match>,
    pub user_image: Option<String>,
}

impl User {
    /// First match, which supplies the role/org/contact sort keys
    pub fn first_match(&self) -> Option<&Match> {
        self.matches.first()
    }
}

/// One page of the feed plus the total the backend reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageResponse {
    #[serde(default)]
    pub data: Vec<RawUser>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Text(String),
    Int(i64),
    Unsigned(u64),
}

/// Identifiers arrive as either JSON strings or integers
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match IdRepr::deserialize(deserializer)? {
        IdRepr::Text(s) => s,
        IdRepr::Int(n) => n.to_string(),
        IdRepr::Unsigned(n) => n.to_string(),
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_ids_become_strings() {
        let raw: RawUser = serde_json::from_value(json!({
            "user_id": 42,
            "first_name": "Ada",
            "matches": [{ "opp_id": 7, "role": "Mentor", "org_name": "Acme",
                          "contact_email": "hr@acme.test", "match_level": 4 }]
        }))
        .unwrap();

        assert_eq!(raw.user_id, "42");
        assert_eq!(raw.matches.unwrap()[0].opp_id, "7");
    }

    #[test]
    fn test_null_fields() {
        let raw: RawUser = serde_json::from_value(json!({
            "user_id": "u1",
            "first_name": null,
            "last_name": null,
            "interested_in": null,
            "matches": null
        }))
        .unwrap();

        assert_eq!(raw.first_name, "");
        assert!(raw.last_name.is_none());
        assert!(raw.interested_in.is_none());
        assert!(raw.matches.is_none());
    }

    #[test]
    fn test_page_response_defaults() {
        let page: PageResponse = serde_json::from_value(json!({})).unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.total, 0);
    }
}
