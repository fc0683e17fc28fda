use serde_json::Value;

use crate::admission_request::AdmissionRequest;
use crate::admission_response::AdmissionResponse;
use crate::errors::MutationError;
use crate::resource::lenient;

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdmissionReviewRequest {
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient"
    )]
    pub kind: Option<String>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient"
    )]
    pub api_version: Option<String>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient"
    )]
    pub request: Option<AdmissionRequest>,
}

impl AdmissionReviewRequest {
    /// Fails only when `document` is not a JSON object; any inner field that
    /// does not have the expected shape is treated as absent.
    pub fn from_value(document: Value) -> Result<Self, MutationError> {
        serde_json::from_value(document).map_err(MutationError::InvalidReview)
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionReviewResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    pub response: AdmissionResponse,
}

impl AdmissionReviewResponse {
    pub fn new(response: AdmissionResponse) -> Self {
        AdmissionReviewResponse {
            api_version: Some(String::from("admission.k8s.io/v1")),
            kind: Some(String::from("AdmissionReview")),
            response,
        }
    }
}
