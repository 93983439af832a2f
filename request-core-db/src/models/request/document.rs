use serde::Deserialize;
use serde_json::Value;

use super::attachment::AttachmentModel;
use super::customer_request::CustomerRequestModel;
use super::request_product::{RequestProductModel, StudsPcdMode};

/// Technical fields of pre-products-array documents, read from the document
/// root. Kept separate from [`RequestProductModel`] so the legacy key
/// `otherRequirements` can be mapped onto `productComments`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct LegacyProductFields {
    axle_location: String,
    axle_location_other: String,
    articulation_type: String,
    articulation_type_other: String,
    configuration_type: String,
    configuration_type_other: String,
    loads_kg: Option<f64>,
    speeds_kmh: Option<f64>,
    tyre_size: String,
    track_mm: Option<f64>,
    studs_pcd_mode: Option<StudsPcdMode>,
    studs_pcd_standard_selections: Vec<String>,
    studs_pcd_special_text: String,
    wheel_base: String,
    finish: Option<String>,
    brake_type: Option<String>,
    brake_size: String,
    suspension: String,
    product_comments: Option<String>,
    other_requirements: Option<String>,
    attachments: Vec<AttachmentModel>,
}

impl From<LegacyProductFields> for RequestProductModel {
    fn from(legacy: LegacyProductFields) -> Self {
        let defaults = RequestProductModel::default();
        RequestProductModel {
            axle_location: legacy.axle_location,
            axle_location_other: legacy.axle_location_other,
            articulation_type: legacy.articulation_type,
            articulation_type_other: legacy.articulation_type_other,
            configuration_type: legacy.configuration_type,
            configuration_type_other: legacy.configuration_type_other,
            loads_kg: legacy.loads_kg,
            speeds_kmh: legacy.speeds_kmh,
            tyre_size: legacy.tyre_size,
            track_mm: legacy.track_mm,
            studs_pcd_mode: legacy.studs_pcd_mode.unwrap_or_default(),
            studs_pcd_standard_selections: legacy.studs_pcd_standard_selections,
            studs_pcd_special_text: legacy.studs_pcd_special_text,
            wheel_base: legacy.wheel_base,
            finish: legacy.finish.unwrap_or(defaults.finish),
            brake_type: legacy.brake_type,
            brake_size: legacy.brake_size,
            suspension: legacy.suspension,
            product_comments: legacy
                .product_comments
                .or(legacy.other_requirements)
                .unwrap_or_default(),
            attachments: legacy.attachments,
        }
    }
}

/// Parse a persisted request document.
///
/// The JSON document is the source of truth for the whole record. Legacy
/// single-product documents carry their technical fields at the root; those
/// are normalized into a one-element `products` list so every parsed record
/// has at least one product.
pub fn parse_document(raw: &str) -> Result<CustomerRequestModel, serde_json::Error> {
    let value: Value = serde_json::from_str(raw)?;
    let mut model: CustomerRequestModel = serde_json::from_value(value.clone())?;

    if model.products.is_empty() {
        let legacy: LegacyProductFields = serde_json::from_value(value).unwrap_or_default();
        model.products.push(legacy.into());
    }

    Ok(model)
}

/// Serialize a record into its persisted document form.
pub fn to_document(model: &CustomerRequestModel) -> Result<String, serde_json::Error> {
    serde_json::to_string(model)
}
