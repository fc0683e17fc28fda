use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Collapses a missing or wrong-typed field to `None` instead of failing the
/// whole document. Only sound when deserializing from an in-memory
/// `serde_json::Value`; a streaming deserializer could be left mid-token.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(T::deserialize(deserializer).ok())
}

/// Read-only view over the resource embedded in an admission request.
///
/// Every field is optional at every nesting level: admission payloads from
/// the API server are assumed well formed except where explicitly probed, so
/// anything that does not have the expected shape is treated as empty rather
/// than rejected.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResourceObject {
    #[serde(deserialize_with = "lenient")]
    pub metadata: Option<Metadata>,
    #[serde(deserialize_with = "lenient")]
    pub spec: Option<ResourceSpec>,
}

impl ResourceObject {
    /// Total: anything that is not an object collapses to the empty view.
    pub fn from_value(document: &Value) -> Self {
        serde_json::from_value(document.clone()).unwrap_or_default()
    }

    pub fn labels(&self) -> Option<&BTreeMap<String, String>> {
        self.metadata.as_ref().and_then(|meta| meta.labels.as_ref())
    }

    pub fn name(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|meta| meta.name.as_deref())
    }

    pub fn namespace(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|meta| meta.namespace.as_deref())
    }

    /// The pod spec nested under a workload template, e.g.
    /// `spec.template.spec` of a Deployment.
    pub fn template_spec(&self) -> Option<&ResourceSpec> {
        self.spec
            .as_ref()?
            .template
            .as_ref()?
            .spec
            .as_deref()
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Metadata {
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub namespace: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub labels: Option<BTreeMap<String, String>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceSpec {
    #[serde(deserialize_with = "lenient")]
    pub containers: Option<Vec<Container>>,
    #[serde(deserialize_with = "lenient")]
    pub init_containers: Option<Vec<Container>>,
    #[serde(deserialize_with = "lenient")]
    pub template: Option<PodTemplate>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PodTemplate {
    #[serde(deserialize_with = "lenient")]
    pub spec: Option<Box<ResourceSpec>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Container {
    #[serde(deserialize_with = "lenient")]
    pub volume_mounts: Option<Vec<VolumeMount>>,
}

/// Only `mountPath` is ever read; all other mount fields stay untouched in
/// the original document.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolumeMount {
    #[serde(deserialize_with = "lenient")]
    pub mount_path: Option<String>,
}
