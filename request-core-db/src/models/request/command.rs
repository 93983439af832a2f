use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use validator::Validate;

use request_core_api::domain::{Actor, RequestStatus};
use request_core_api::error::WorkflowResult;

use super::attachment::AttachmentModel;
use super::customer_request::CustomerRequestModel;
use super::history_entry::HistoryEntryModel;
use super::request_product::RequestProductModel;

/// Create payload for a request.
///
/// Excludes everything the engine assigns: id, history, timestamps and the
/// creator identity. `status` may only be `draft` or `submitted`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestDraft {
    pub status: RequestStatus,
    pub client_name: String,
    pub client_contact: String,
    pub application_vehicle: String,
    pub application_vehicle_other: String,
    pub country: String,
    pub expected_qty: Option<f64>,
    pub repeatability: String,
    pub expected_delivery_selections: Vec<String>,
    pub working_condition: String,
    pub working_condition_other: String,
    pub usage_type: String,
    pub usage_type_other: String,
    pub environment: String,
    pub environment_other: String,
    #[validate(length(min = 1, message = "a request carries at least one product"))]
    pub products: Vec<RequestProductModel>,
}

impl Default for RequestDraft {
    fn default() -> Self {
        RequestDraft {
            status: RequestStatus::Draft,
            client_name: String::new(),
            client_contact: String::new(),
            application_vehicle: String::new(),
            application_vehicle_other: String::new(),
            country: String::new(),
            expected_qty: None,
            repeatability: String::new(),
            expected_delivery_selections: Vec::new(),
            working_condition: String::new(),
            working_condition_other: String::new(),
            usage_type: String::new(),
            usage_type_other: String::new(),
            environment: String::new(),
            environment_other: String::new(),
            products: vec![RequestProductModel::default()],
        }
    }
}

impl RequestDraft {
    /// Materialize the draft into a full record.
    ///
    /// Seeds the history with exactly one entry at the initial status,
    /// attributed to the creating actor.
    pub fn into_model(
        self,
        id: HeaplessString<20>,
        actor: &Actor,
        now: DateTime<Utc>,
    ) -> WorkflowResult<CustomerRequestModel> {
        let seed_entry = HistoryEntryModel {
            id: HistoryEntryModel::next_id(&[], now)?,
            status: self.status,
            timestamp: now,
            user_id: actor.user_id.clone(),
            user_name: actor.user_name.clone(),
            comment: None,
        };

        Ok(CustomerRequestModel {
            id,
            status: self.status,
            created_at: now,
            updated_at: now,
            created_by: actor.user_id.clone(),
            created_by_name: actor.user_name.clone(),
            version: 1,
            client_name: self.client_name,
            client_contact: self.client_contact,
            application_vehicle: self.application_vehicle,
            application_vehicle_other: self.application_vehicle_other,
            country: self.country,
            expected_qty: self.expected_qty,
            repeatability: self.repeatability,
            expected_delivery_selections: self.expected_delivery_selections,
            working_condition: self.working_condition,
            working_condition_other: self.working_condition_other,
            usage_type: self.usage_type,
            usage_type_other: self.usage_type_other,
            environment: self.environment,
            environment_other: self.environment_other,
            products: self.products,
            clarification_comment: None,
            clarification_response: None,
            acceptance_message: None,
            expected_design_reply_date: None,
            design_result_comments: None,
            design_result_attachments: Vec::new(),
            costing_notes: None,
            selling_price: None,
            calculated_margin: None,
            incoterm: None,
            delivery_leadtime: None,
            costing_attachments: Vec::new(),
            sales_final_price: None,
            sales_feedback_comment: None,
            sales_attachments: Vec::new(),
            history: vec![seed_entry],
        })
    }
}

/// Typed partial update for `update_request_fields`.
///
/// There is deliberately no way to express `status`, `history` or the
/// identity fields here; a field absent from the patch is left untouched.
/// Attachment buckets are append-only: patched attachments are added after
/// the existing ones, never replacing them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestPatch {
    pub client_name: Option<String>,
    pub client_contact: Option<String>,
    pub application_vehicle: Option<String>,
    pub application_vehicle_other: Option<String>,
    pub country: Option<String>,
    pub expected_qty: Option<f64>,
    pub repeatability: Option<String>,
    pub expected_delivery_selections: Option<Vec<String>>,
    pub working_condition: Option<String>,
    pub working_condition_other: Option<String>,
    pub usage_type: Option<String>,
    pub usage_type_other: Option<String>,
    pub environment: Option<String>,
    pub environment_other: Option<String>,
    pub products: Option<Vec<RequestProductModel>>,

    pub clarification_comment: Option<String>,
    pub clarification_response: Option<String>,

    pub acceptance_message: Option<String>,
    pub expected_design_reply_date: Option<DateTime<Utc>>,
    pub design_result_comments: Option<String>,
    pub design_result_attachments: Vec<AttachmentModel>,

    pub costing_notes: Option<String>,
    pub selling_price: Option<f64>,
    pub calculated_margin: Option<f64>,
    pub incoterm: Option<HeaplessString<20>>,
    pub delivery_leadtime: Option<String>,
    pub costing_attachments: Vec<AttachmentModel>,

    pub sales_final_price: Option<f64>,
    pub sales_feedback_comment: Option<String>,
    pub sales_attachments: Vec<AttachmentModel>,
}

macro_rules! merge {
    ($model:ident, $patch:ident, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $patch.$field {
                $model.$field = Some(value);
            }
        )+
    };
}

macro_rules! merge_plain {
    ($model:ident, $patch:ident, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $patch.$field {
                $model.$field = value;
            }
        )+
    };
}

impl RequestPatch {
    /// Merge this patch into `model`. Touches neither `status` nor history.
    pub fn apply_to(self, model: &mut CustomerRequestModel) {
        let patch = self;

        merge_plain!(
            model,
            patch,
            client_name,
            client_contact,
            application_vehicle,
            application_vehicle_other,
            country,
            repeatability,
            expected_delivery_selections,
            working_condition,
            working_condition_other,
            usage_type,
            usage_type_other,
            environment,
            environment_other,
            products,
        );

        merge!(
            model,
            patch,
            expected_qty,
            clarification_comment,
            clarification_response,
            acceptance_message,
            expected_design_reply_date,
            design_result_comments,
            costing_notes,
            selling_price,
            calculated_margin,
            incoterm,
            delivery_leadtime,
            sales_final_price,
            sales_feedback_comment,
        );

        model
            .design_result_attachments
            .extend(patch.design_result_attachments);
        model.costing_attachments.extend(patch.costing_attachments);
        model.sales_attachments.extend(patch.sales_attachments);
    }
}
