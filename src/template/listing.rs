//! `GET notifications` response body

use serde::Deserialize;
use serde_json::{Map, Value};

use super::store::TemplateSet;

/// One page of the notification (template) listing.
///
/// Both fields are kept as raw JSON: a malformed entry or paging block never
/// rejects a body that is otherwise valid. The body itself must be an object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct NotificationListing {
    pub results: Option<Value>,
    pub paging: Option<Value>,
}

impl From<Map<String, Value>> for NotificationListing {
    fn from(mut body: Map<String, Value>) -> Self {
        Self {
            results: body.remove("results"),
            paging: body.remove("paging"),
        }
    }
}

impl NotificationListing {
    /// Whether the API reported further pages (`paging.more == true`)
    pub fn has_more(&self) -> bool {
        self.paging
            .as_ref()
            .and_then(|paging| paging.get("more"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Template ids in response order; entries without a string `id` are skipped
    pub fn template_set(&self) -> TemplateSet {
        self.results
            .as_ref()
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|item| match item.get("id").and_then(Value::as_str) {
                Some(id) => Some(id.to_string()),
                None => {
                    tracing::debug!(entry = %item, "Skipping listing entry without an id");
                    None
                }
            })
            .collect()
    }
}
