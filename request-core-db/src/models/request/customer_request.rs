use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};

use request_core_api::domain::RequestStatus;

use super::attachment::AttachmentModel;
use super::history_entry::HistoryEntryModel;
use super::request_product::RequestProductModel;
use crate::models::identifiable::Identifiable;

fn default_version() -> i64 {
    1
}

/// One customer product request, tracked through the approval workflow.
///
/// This is the persisted document: everything including the nested history
/// and product lines serializes into a single JSON blob which is the source
/// of truth. `status` is mutable only through the workflow engine; the
/// stage-specific fields are optional, become meaningful once the request
/// enters the corresponding stage and are never cleared afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequestModel {
    /// Business id, `CRA{YY}{0000}`. Immutable once created.
    pub id: HeaplessString<20>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub created_by: HeaplessString<50>,
    #[serde(default)]
    pub created_by_name: HeaplessString<100>,
    /// Optimistic-concurrency counter, bumped on every write.
    #[serde(default = "default_version")]
    pub version: i64,

    // General client/application information
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub client_contact: String,
    #[serde(default)]
    pub application_vehicle: String,
    #[serde(default)]
    pub application_vehicle_other: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub expected_qty: Option<f64>,
    #[serde(default)]
    pub repeatability: String,
    #[serde(default)]
    pub expected_delivery_selections: Vec<String>,
    #[serde(default)]
    pub working_condition: String,
    #[serde(default)]
    pub working_condition_other: String,
    #[serde(default)]
    pub usage_type: String,
    #[serde(default)]
    pub usage_type_other: String,
    #[serde(default)]
    pub environment: String,
    #[serde(default)]
    pub environment_other: String,

    /// Product lines; always at least one after normalization.
    #[serde(default)]
    pub products: Vec<RequestProductModel>,

    // Clarification stage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clarification_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clarification_response: Option<String>,

    // Design stage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceptance_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_design_reply_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_result_comments: Option<String>,
    #[serde(default)]
    pub design_result_attachments: Vec<AttachmentModel>,

    // Costing stage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub costing_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selling_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculated_margin: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incoterm: Option<HeaplessString<20>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_leadtime: Option<String>,
    #[serde(default)]
    pub costing_attachments: Vec<AttachmentModel>,

    // Sales follow-up stage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_final_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_feedback_comment: Option<String>,
    #[serde(default)]
    pub sales_attachments: Vec<AttachmentModel>,

    /// Append-only; insertion order is chronological order.
    #[serde(default)]
    pub history: Vec<HistoryEntryModel>,
}

impl CustomerRequestModel {
    /// Whether the current status agrees with the most recent history entry.
    pub fn is_history_consistent(&self) -> bool {
        self.history
            .last()
            .map(|entry| entry.status == self.status)
            .unwrap_or(false)
    }
}

impl Identifiable for CustomerRequestModel {
    fn get_id(&self) -> &str {
        self.id.as_str()
    }
}
