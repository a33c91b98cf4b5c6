use serde::{Deserialize, Serialize};

/// A speaker or author as listed on a contribution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub affiliation: String,
    pub id: String,
}

/// A file attached to one contribution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub title: String,
    pub filename: String,
    pub download_url: String,
    pub content_type: String,
    /// Size in bytes as reported by the server
    pub size: u64,
    pub modified_dt: String,
    pub is_protected: bool,
}
