use serde::{Deserialize, Serialize};

use crate::core::Priority;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    pub audit: String,
    pub title: String,
    pub priority: Priority,
    pub impact: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    pub fixes: Vec<Snippet>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    #[serde(rename = "type")]
    pub snippet_type: String,
    pub title: String,
    pub code: String,
}

impl Snippet {
    pub fn new(
        snippet_type: impl Into<String>,
        title: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            snippet_type: snippet_type.into(),
            title: title.into(),
            code: code.into(),
        }
    }
}
