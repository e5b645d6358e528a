//! Task record stored in the snapshot file.

use serde::{Deserialize, Serialize};

/// A single to-do item.
///
/// `scheduled_at` holds the raw `YYYY-MM-DDTHH:MM` string produced by the
/// input section. It is parsed only at display time, so a malformed value
/// degrades to a placeholder instead of failing the whole snapshot decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub text: String,
    pub is_completed: bool,
    #[serde(default)]
    pub scheduled_at: Option<String>,
}
