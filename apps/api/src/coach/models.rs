use serde::Deserialize;

use crate::feedback::validation::lenient_string;

/// Raw `/api/coach` body. A non-string `prompt` reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CoachRequest {
    #[serde(deserialize_with = "lenient_string")]
    pub prompt: Option<String>,
}
