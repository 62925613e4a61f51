use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Message value that requests the StatefulSet be created.
pub const CREATE_MESSAGE: &str = "create";

/// Primary CRD for requesting work from the operator.
#[derive(CustomResource, Serialize, Deserialize, Debug, Default, PartialEq, Clone, JsonSchema)]
#[kube(
    group = "apps.example.com",
    version = "v1alpha1",
    kind = "MyApp",
    plural = "myapps",
    derive = "PartialEq",
    printcolumn = r#"{"name":"Message", "type":"string", "jsonPath":".spec.message"}"#,
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct MyAppSpec {
    /// Instruction for the operator. Only `create` has an effect.
    #[serde(default)]
    pub message: String,
}

impl MyAppSpec {
    /// Reports whether the message asks for the StatefulSet to be created.
    ///
    /// The comparison is exact, `Create` or `create ` do not match.
    pub fn wants_stateful_set(&self) -> bool {
        self.message == CREATE_MESSAGE
    }
}
