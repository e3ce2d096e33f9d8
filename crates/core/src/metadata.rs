//! Provenance metadata stamped onto every test document
//!
//! ## Persisted shape
//!
//! ```json
//! {
//!   "__test": {
//!     "pid": "4242",
//!     "hostname": "ci-runner-7",
//!     "filename": "tests/users.rs",
//!     "tag": ""
//!   }
//! }
//! ```
//!
//! All four fields are strings. An empty `tag` means the document was
//! created untagged.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default name of the metadata sub-object
pub const DEFAULT_FIELD: &str = "__test";

/// Provenance fields written onto a document at insertion time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StampedMetadata {
    /// Process id, as a decimal string
    pub pid: String,
    /// Host the test ran on
    pub hostname: String,
    /// Test file that created the document
    pub filename: String,
    /// Tag active at insertion, empty when untagged
    pub tag: String,
}

impl StampedMetadata {
    /// Write this metadata under `field`, replacing any previous stamp
    ///
    /// Fails with [`Error::InvalidDocument`] if `doc` is not a JSON object.
    pub fn write_to(&self, doc: &mut Value, field: &str) -> Result<()> {
        let encoded = serde_json::to_value(self)?;
        match doc {
            Value::Object(map) => {
                map.insert(field.to_string(), encoded);
                Ok(())
            }
            other => Err(Error::InvalidDocument(format!(
                "expected a JSON object, got {}",
                json_kind(other)
            ))),
        }
    }

    /// Read the metadata stamped under `field`, if the document carries one
    pub fn read_from(doc: &Value, field: &str) -> Result<Option<Self>> {
        match doc.get(field) {
            Some(stamp) => Ok(Some(serde_json::from_value(stamp.clone())?)),
            None => Ok(None),
        }
    }

    /// Whether the document was created untagged
    pub fn is_untagged(&self) -> bool {
        self.tag.is_empty()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
