use serde_json::Value;

use crate::resource::lenient;

/// The slice of the admission/v1/AdmissionRequest object this webhook
/// consumes. Remaining fields of the request are ignored on the wire.
/// See https://pkg.go.dev/k8s.io/kubernetes/pkg/apis/admission#AdmissionRequest
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdmissionRequest {
    /// Identifier for the individual request/response, echoed verbatim in
    /// the response.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient"
    )]
    pub uid: Option<String>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient"
    )]
    pub kind: Option<GroupVersionKind>,

    /// CREATE, UPDATE, ... Informational, used for logging only.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient"
    )]
    pub operation: Option<String>,

    /// The resource being admitted, kept as a raw document.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient"
    )]
    pub object: Option<Value>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GroupVersionKind {
    pub group: String,
    pub version: String,
    pub kind: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn consumed_fields_are_deserialized() {
        let request: AdmissionRequest = serde_json::from_value(json!({
            "uid": "705ab4f5-6393-11e8-b7cc-42010a800002",
            "kind": {"group": "", "version": "v1", "kind": "Pod"},
            "resource": {"group": "", "version": "v1", "resource": "pods"},
            "operation": "CREATE",
            "userInfo": {"username": "admin"},
            "object": {"apiVersion": "v1", "kind": "Pod"}
        }))
        .unwrap();

        assert_eq!(
            request.uid.as_deref(),
            Some("705ab4f5-6393-11e8-b7cc-42010a800002")
        );
        assert_eq!(request.kind.map(|gvk| gvk.kind).as_deref(), Some("Pod"));
        assert_eq!(request.operation.as_deref(), Some("CREATE"));
        assert!(request.object.is_some());
    }

    #[test]
    fn missing_and_malformed_fields_default_to_absent() {
        let request: AdmissionRequest = serde_json::from_value(json!({
            "uid": 42,
            "kind": "Pod"
        }))
        .unwrap();

        assert!(request.uid.is_none());
        assert!(request.kind.is_none());
        assert!(request.operation.is_none());
        assert!(request.object.is_none());
    }
}
