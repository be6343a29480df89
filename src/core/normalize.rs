use crate::models::{RawUser, User};

/// Normalize a raw backend record
///
/// Missing or `null` collections become empty vectors, so nothing downstream
/// has to deal with an absent `interested_in` or `matches`.
pub fn normalize(raw: RawUser) -> User {
    User {
        user_id: raw.user_id,
        first_name: raw.first_name,
        last_name: raw.last_name,
        email: raw.email,
        interested_in: raw.interested_in.unwrap_or_default(),
        matches: raw.matches.unwrap_or_default(),
        user_image: raw.user_image,
    }
}

/// Normalize every record of a fetched page, keeping backend order
pub fn normalize_page(raw: Vec<RawUser>) -> Vec<User> {
    raw.into_iter().map(normalize).collect()
}
