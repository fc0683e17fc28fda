use base64::{engine::general_purpose, Engine as _};
use json_patch::PatchOperation;

use crate::errors::MutationError;

/// This models the admission/v1/AdmissionResponse object of Kubernetes,
/// restricted to the fields a mutating-only webhook produces.
/// See https://pkg.go.dev/k8s.io/kubernetes/pkg/apis/admission#AdmissionResponse
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionResponse {
    /// UID copied over from the corresponding AdmissionRequest, when one
    /// could be read at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    /// Always true: this webhook mutates or passes through, it never denies.
    pub allowed: bool,

    /// The type of Patch. Present iff `patch` is present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch_type: Option<PatchType>,

    /// Base64 of the UTF-8 JSON array of RFC 6902 operations. Present iff
    /// the computed operation sequence is non-empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<String>,
}

/// PatchType is the type of patch being used to represent the mutated object
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PatchType {
    #[serde(rename = "JSONPatch")]
    #[default]
    JSONPatch,
}

impl AdmissionResponse {
    /// Allow the request untouched.
    pub fn allow(uid: Option<String>) -> AdmissionResponse {
        AdmissionResponse {
            uid,
            allowed: true,
            ..Default::default()
        }
    }

    /// Allow the request with the given mutation attached.
    pub fn with_patch(
        uid: Option<String>,
        operations: &[PatchOperation],
    ) -> Result<AdmissionResponse, MutationError> {
        let payload = serde_json::to_vec(operations).map_err(MutationError::SerializePatch)?;

        Ok(AdmissionResponse {
            uid,
            allowed: true,
            patch_type: Some(PatchType::JSONPatch),
            patch: Some(general_purpose::STANDARD.encode(payload)),
        })
    }
}
