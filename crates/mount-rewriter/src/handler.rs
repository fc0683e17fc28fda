use serde_json::Value;
use tracing::{error, info};

use crate::admission_response::AdmissionResponse;
use crate::admission_review::{AdmissionReviewRequest, AdmissionReviewResponse};
use crate::errors::MutationError;
use crate::mutation::build_patches;
use crate::resource::ResourceObject;
use crate::settings::MutationSettings;

/// Handles one admission review and produces the review to send back.
///
/// Stateless: the settings are immutable for the process lifetime and every
/// request is an independent unit of work, so a single handler can serve any
/// number of concurrent requests.
#[derive(Clone, Debug)]
pub struct MutationHandler {
    settings: MutationSettings,
}

impl MutationHandler {
    pub fn new(settings: MutationSettings) -> Self {
        MutationHandler { settings }
    }

    /// Total entry point: whatever happens while processing `body`, an
    /// allowed AdmissionReview comes back. Errors are logged and mapped to
    /// an allow without patch; the cluster's webhook failurePolicy governs
    /// the behavior when this webhook cannot answer at all.
    pub fn handle(&self, body: &[u8]) -> AdmissionReviewResponse {
        match self.mutate(body) {
            Ok(response) => AdmissionReviewResponse::new(response),
            Err(error) => {
                error!(
                    error = error.to_string().as_str(),
                    "mutation failed, allowing request unmodified"
                );
                AdmissionReviewResponse::new(AdmissionResponse::allow(recover_uid(body)))
            }
        }
    }

    fn mutate(&self, body: &[u8]) -> Result<AdmissionResponse, MutationError> {
        let document: Value = serde_json::from_slice(body).map_err(MutationError::InvalidBody)?;
        let review = AdmissionReviewRequest::from_value(document)?;
        let request = review.request.unwrap_or_default();

        let uid = request.uid;
        let kind = request.kind.map(|gvk| gvk.kind).unwrap_or_default();
        let operation = request.operation.unwrap_or_default().to_uppercase();
        let object = request
            .object
            .map(|value| ResourceObject::from_value(&value))
            .unwrap_or_default();

        if !matches!(kind.as_str(), "Pod" | "Deployment")
            || !self.settings.target_label.matches(object.labels())
        {
            return Ok(AdmissionResponse::allow(uid));
        }

        let operations = build_patches(&self.settings.rewrite_rule, &kind, &object);
        if operations.is_empty() {
            return Ok(AdmissionResponse::allow(uid));
        }

        info!(
            uid = uid.as_deref().unwrap_or_default(),
            kind = kind.as_str(),
            operation = operation.as_str(),
            namespace = object.namespace().unwrap_or_default(),
            name = object.name().unwrap_or_default(),
            patches = operations.len(),
            "volume mounts rewritten",
        );

        AdmissionResponse::with_patch(uid, &operations)
    }
}

// Best effort: pull `request.uid` out of the raw body so even the fail-open
// response can be correlated.
fn recover_uid(body: &[u8]) -> Option<String> {
    let document: Value = serde_json::from_slice(body).ok()?;
    document
        .get("request")?
        .get("uid")?
        .as_str()
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use base64::{engine::general_purpose, Engine as _};
    use serde_json::json;

    use super::*;

    fn handler() -> MutationHandler {
        MutationHandler::new(MutationSettings::default())
    }

    fn review(kind: &str, object: Value) -> Vec<u8> {
        serde_json::to_vec(&json!({
            "apiVersion": "admission.k8s.io/v1",
            "kind": "AdmissionReview",
            "request": {
                "uid": "705ab4f5-6393-11e8-b7cc-42010a800002",
                "kind": {"group": "", "version": "v1", "kind": kind},
                "operation": "CREATE",
                "object": object
            }
        }))
        .unwrap()
    }

    fn decoded_patch(response: &AdmissionResponse) -> Value {
        let patch = response.patch.as_ref().expect("patch should be present");
        let bytes = general_purpose::STANDARD.decode(patch).unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn labeled_pod_with_matching_mounts_is_patched() {
        let body = review(
            "Pod",
            json!({
                "metadata": {
                    "name": "workstation",
                    "namespace": "research",
                    "labels": {"nfs-home": "true"}
                },
                "spec": {
                    "containers": [{
                        "volumeMounts": [
                            {"mountPath": "/home"},
                            {"mountPath": "/data"},
                            {"mountPath": "/home/x"}
                        ]
                    }]
                }
            }),
        );

        let envelope = handler().handle(&body);

        assert_eq!(envelope.api_version.as_deref(), Some("admission.k8s.io/v1"));
        assert_eq!(envelope.kind.as_deref(), Some("AdmissionReview"));

        let response = envelope.response;
        assert!(response.allowed);
        assert_eq!(
            response.uid.as_deref(),
            Some("705ab4f5-6393-11e8-b7cc-42010a800002")
        );
        assert_eq!(response.patch_type, Some(crate::PatchType::JSONPatch));
        assert_eq!(
            decoded_patch(&response),
            json!([
                {
                    "op": "replace",
                    "path": "/spec/containers/0/volumeMounts/0/mountPath",
                    "value": "/blah/home/"
                },
                {
                    "op": "replace",
                    "path": "/spec/containers/0/volumeMounts/2/mountPath",
                    "value": "/blah/home/x"
                }
            ])
        );
    }

    #[test]
    fn unlabeled_pod_is_allowed_untouched() {
        let body = review(
            "Pod",
            json!({
                "metadata": {"name": "workstation"},
                "spec": {
                    "containers": [{"volumeMounts": [{"mountPath": "/home"}]}]
                }
            }),
        );

        let response = handler().handle(&body).response;

        assert!(response.allowed);
        assert!(response.patch.is_none());
        assert!(response.patch_type.is_none());
    }

    #[test]
    fn labeled_pod_without_matching_mounts_gets_no_patch() {
        let body = review(
            "Pod",
            json!({
                "metadata": {"labels": {"nfs-home": "true"}},
                "spec": {
                    "containers": [{"volumeMounts": [{"mountPath": "/data"}]}]
                }
            }),
        );

        let response = handler().handle(&body).response;

        assert!(response.allowed);
        assert!(response.patch.is_none());
        assert!(response.patch_type.is_none());
    }

    #[test]
    fn labeled_deployment_is_patched_under_the_template() {
        let body = review(
            "Deployment",
            json!({
                "metadata": {"labels": {"nfs-home": "true"}},
                "spec": {
                    "template": {
                        "spec": {
                            "initContainers": [{
                                "volumeMounts": [{"mountPath": "/home/setup"}]
                            }]
                        }
                    }
                }
            }),
        );

        let response = handler().handle(&body).response;

        assert_eq!(
            decoded_patch(&response),
            json!([{
                "op": "replace",
                "path": "/spec/template/spec/initContainers/0/volumeMounts/0/mountPath",
                "value": "/blah/home/setup"
            }])
        );
    }

    #[test]
    fn unsupported_kinds_are_allowed_even_when_labeled() {
        let body = review(
            "ConfigMap",
            json!({
                "metadata": {"labels": {"nfs-home": "true"}},
                "spec": {
                    "containers": [{"volumeMounts": [{"mountPath": "/home"}]}]
                }
            }),
        );

        let response = handler().handle(&body).response;

        assert!(response.allowed);
        assert!(response.patch.is_none());
    }

    #[test]
    fn malformed_metadata_means_not_eligible() {
        let body = review(
            "Pod",
            json!({
                "metadata": "not-an-object",
                "spec": {
                    "containers": [{"volumeMounts": [{"mountPath": "/home"}]}]
                }
            }),
        );

        let response = handler().handle(&body).response;

        assert!(response.allowed);
        assert!(response.patch.is_none());
    }

    #[test]
    fn invalid_body_fails_open_without_uid() {
        let response = handler().handle(b"not json at all").response;

        assert!(response.allowed);
        assert!(response.uid.is_none());
        assert!(response.patch.is_none());
    }

    #[test]
    fn non_object_body_fails_open() {
        let response = handler().handle(b"[1, 2, 3]").response;

        assert!(response.allowed);
        assert!(response.uid.is_none());
        assert!(response.patch.is_none());
    }

    #[test]
    fn uid_is_echoed_even_for_bare_requests() {
        let body = serde_json::to_vec(&json!({
            "request": {"uid": "bare", "object": {}}
        }))
        .unwrap();

        let envelope = handler().handle(&body);

        assert!(envelope.response.allowed);
        assert_eq!(envelope.response.uid.as_deref(), Some("bare"));
    }

    #[test]
    fn missing_request_section_is_allowed() {
        let body = serde_json::to_vec(&json!({
            "apiVersion": "admission.k8s.io/v1",
            "kind": "AdmissionReview"
        }))
        .unwrap();

        let response = handler().handle(&body).response;

        assert!(response.allowed);
        assert!(response.uid.is_none());
        assert!(response.patch.is_none());
    }
}
