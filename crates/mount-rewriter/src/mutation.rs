use json_patch::{PatchOperation, ReplaceOperation};
use jsonptr::{PointerBuf, Token};
use serde_json::Value;

use crate::resource::{Container, ResourceObject, ResourceSpec};
use crate::rewrite::RewriteRule;

/// Computes every JSON Patch operation for the given resource kind.
///
/// Pod mutates `spec.containers` and `spec.initContainers`; Deployment
/// mutates the pod template at `spec.template.spec.*`. Any other kind yields
/// no operations. Missing intermediate objects are treated as empty.
pub fn build_patches(rule: &RewriteRule, kind: &str, object: &ResourceObject) -> Vec<PatchOperation> {
    match kind {
        "Pod" => pod_spec_patches(rule, &["spec"], object.spec.as_ref()),
        "Deployment" => pod_spec_patches(rule, &["spec", "template", "spec"], object.template_spec()),
        _ => Vec::new(),
    }
}

// Regular containers first, then init containers as a separate pass with its
// own indices.
fn pod_spec_patches(
    rule: &RewriteRule,
    base: &[&str],
    spec: Option<&ResourceSpec>,
) -> Vec<PatchOperation> {
    let Some(spec) = spec else {
        return Vec::new();
    };

    let mut location: Vec<&str> = base.to_vec();
    location.push("containers");
    let mut patches =
        patches_for_volume_mounts(rule, &location, spec.containers.as_deref().unwrap_or_default());

    location.pop();
    location.push("initContainers");
    patches.extend(patches_for_volume_mounts(
        rule,
        &location,
        spec.init_containers.as_deref().unwrap_or_default(),
    ));

    patches
}

/// Builds `replace` operations for every mount under `containers` whose path
/// falls under the rule's source prefix.
///
/// `base` is the location of the container array inside the resource
/// document, e.g. `["spec", "containers"]`. Emitted pointers index the
/// original document: the patch is applied against the unmodified object, so
/// container and mount indices are preserved exactly. Mounts without a
/// string `mountPath` keep their slot but produce no operation.
pub fn patches_for_volume_mounts(
    rule: &RewriteRule,
    base: &[&str],
    containers: &[Container],
) -> Vec<PatchOperation> {
    let mut patches = Vec::new();

    for (container_index, container) in containers.iter().enumerate() {
        let volume_mounts = container.volume_mounts.as_deref().unwrap_or_default();
        for (mount_index, mount) in volume_mounts.iter().enumerate() {
            let Some(mount_path) = mount.mount_path.as_deref() else {
                continue;
            };
            if !rule.matches(mount_path) {
                continue;
            }

            let rewritten = rule.rewrite(mount_path);
            if rewritten == mount_path {
                continue;
            }

            patches.push(PatchOperation::Replace(ReplaceOperation {
                path: mount_path_pointer(base, container_index, mount_index),
                value: Value::String(rewritten),
            }));
        }
    }

    patches
}

fn mount_path_pointer(base: &[&str], container_index: usize, mount_index: usize) -> PointerBuf {
    let mut tokens: Vec<Token> = base.iter().map(|segment| Token::new(*segment)).collect();
    tokens.push(Token::new(container_index.to_string()));
    tokens.push(Token::new("volumeMounts"));
    tokens.push(Token::new(mount_index.to_string()));
    tokens.push(Token::new("mountPath"));

    PointerBuf::from_tokens(tokens)
}
