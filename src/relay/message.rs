use std::collections::BTreeMap;

/// A single relayed submission: field name to value.
///
/// Ordered so encoded output is deterministic. A submission carries at
/// least the `username` and `message` fields.
pub type Message = BTreeMap<String, String>;

/// The fields a submission must carry for the front to relay it.
pub const REQUIRED_FIELDS: [&str; 2] = ["username", "message"];

/// Whether the message carries all required fields with non-empty values.
#[must_use]
pub fn has_required_fields(message: &Message) -> bool {
    REQUIRED_FIELDS
        .iter()
        .all(|field| message.get(*field).is_some_and(|value| !value.is_empty()))
}
