use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to change one filter input
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SetFilterRequest {
    #[validate(length(min = 1))]
    pub field: String,
    #[serde(default)]
    pub value: String,
}

/// Request to sort by a column (toggles direction on repeat)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SortRequest {
    #[validate(length(min = 1))]
    pub key: String,
}

/// Request to open a user's detail view
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SelectUserRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
}

/// A page number sent either as a JSON integer or as typed text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageInput {
    Number(u64),
    Signed(i64),
    Text(String),
}

impl Default for PageInput {
    fn default() -> Self {
        PageInput::Text(String::new())
    }
}

/// Page number to jump to; text is parsed leniently
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInputRequest {
    #[serde(default)]
    pub page: PageInput,
}
