use serde::{Deserialize, Serialize};

/// File attached to a request by one of the workflow stages.
///
/// `url` is either a plain link or an embedded `data:` payload. Attachments
/// are immutable once appended; stage buckets only ever grow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentModel {
    pub filename: String,
    pub url: String,
}
