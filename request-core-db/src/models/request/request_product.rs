use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::attachment::AttachmentModel;

/// Stud/PCD selection mode of a product line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StudsPcdMode {
    #[default]
    Standard,
    Special,
}

impl std::fmt::Display for StudsPcdMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StudsPcdMode::Standard => write!(f, "standard"),
            StudsPcdMode::Special => write!(f, "special"),
        }
    }
}

impl FromStr for StudsPcdMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(StudsPcdMode::Standard),
            "special" => Ok(StudsPcdMode::Special),
            _ => Err(()),
        }
    }
}

/// Technical specification of one physical product line on a request.
///
/// A request carries at least one product. Fields mirror the intake form;
/// empty strings mean "not filled in yet" on drafts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestProductModel {
    pub axle_location: String,
    pub axle_location_other: String,
    pub articulation_type: String,
    pub articulation_type_other: String,
    pub configuration_type: String,
    pub configuration_type_other: String,
    pub loads_kg: Option<f64>,
    pub speeds_kmh: Option<f64>,
    pub tyre_size: String,
    pub track_mm: Option<f64>,
    pub studs_pcd_mode: StudsPcdMode,
    pub studs_pcd_standard_selections: Vec<String>,
    pub studs_pcd_special_text: String,
    pub wheel_base: String,
    pub finish: String,
    pub brake_type: Option<String>,
    pub brake_size: String,
    pub suspension: String,
    pub product_comments: String,
    pub attachments: Vec<AttachmentModel>,
}

impl Default for RequestProductModel {
    fn default() -> Self {
        RequestProductModel {
            axle_location: String::new(),
            axle_location_other: String::new(),
            articulation_type: String::new(),
            articulation_type_other: String::new(),
            configuration_type: String::new(),
            configuration_type_other: String::new(),
            loads_kg: None,
            speeds_kmh: None,
            tyre_size: String::new(),
            track_mm: None,
            studs_pcd_mode: StudsPcdMode::Standard,
            studs_pcd_standard_selections: Vec::new(),
            studs_pcd_special_text: String::new(),
            wheel_base: String::new(),
            // Form default carried over from the intake UI.
            finish: "Black Primer default".to_string(),
            brake_type: None,
            brake_size: String::new(),
            suspension: String::new(),
            product_comments: String::new(),
            attachments: Vec::new(),
        }
    }
}
