//! Helper methods only available for tests

use kube::Resource;
use serde_json::json;
use tokio::task::JoinHandle;

use crate::{
    myapp::{MyApp, MyAppSpec},
    utils::test::{ApiServerVerifier, Request},
};

// Add tests specific implementation to the MyApp
impl MyApp {
    /// A normal test resource
    pub fn test() -> Self {
        let mut my_app = MyApp::new("test", MyAppSpec::default());
        let meta = my_app.meta_mut();
        meta.namespace = Some("test".to_owned());
        my_app
    }
    /// Modify a resource to have an expected message
    pub fn with_message(self, message: &str) -> Self {
        Self {
            spec: MyAppSpec {
                message: message.to_owned(),
            },
            ..self
        }
    }
}

/// How the fake API server answers the stateful set creation.
#[derive(Debug)]
pub enum CreateResponse {
    /// The stateful set is created.
    Created,
    /// The API server rejects the request with the given code and reason.
    Error { code: u16, reason: &'static str },
}

/// Stub of expected requests during reconciliation.
///
/// The default expects no request at all, which is the case for any message other than `create`.
/// Set `stateful_set` to expect the creation request and choose how it is answered.
#[derive(Debug, Default)]
pub struct Stub {
    pub stateful_set: Option<CreateResponse>,
}

impl Stub {
    pub fn expect_create(response: CreateResponse) -> Self {
        Self {
            stateful_set: Some(response),
        }
    }

    /// Run a test with against the provided server.
    ///
    /// NB: If the controller is making more calls than we are handling in the stub,
    /// you then typically see a `Kube(Service(Closed(())))` from the reconciler.
    ///
    /// You should await the `JoinHandle` (with a timeout) from this function to ensure that the
    /// stub runs to completion (i.e. all expected calls were responded to),
    /// using the timeout to catch missing api calls to Kubernetes.
    pub fn run(self, mut fakeserver: ApiServerVerifier) -> JoinHandle<()> {
        tokio::spawn(async move {
            let request = match self.stateful_set {
                None => {
                    fakeserver.assert_no_request().await;
                    return;
                }
                Some(CreateResponse::Created) => fakeserver
                    .handle_create()
                    .await
                    .expect("stateful set should be created"),
                Some(CreateResponse::Error { code, reason }) => fakeserver
                    .handle_error(code, reason)
                    .await
                    .expect("stateful set create should be answered"),
            };
            assert_example_stateful_set(&request);
        })
    }
}

/// Assert the request creates the example stateful set.
pub fn assert_example_stateful_set(request: &Request) {
    assert_eq!(request.method, "POST");
    assert_eq!(
        request.uri.path(),
        "/apis/apps/v1/namespaces/default/statefulsets"
    );
    assert_eq!(
        request.query_param("fieldManager").as_deref(),
        Some("myapp-operator")
    );

    let body = &request.body;
    let field = |pointer: &str| body.pointer(pointer).cloned();
    assert_eq!(field("/apiVersion"), Some(json!("apps/v1")));
    assert_eq!(field("/kind"), Some(json!("StatefulSet")));
    assert_eq!(field("/metadata/name"), Some(json!("example-statefulset")));
    assert_eq!(field("/metadata/namespace"), Some(json!("default")));
    assert_eq!(
        field("/metadata/labels"),
        Some(json!({ "managed-by": "myapp-operator" }))
    );
    assert_eq!(field("/metadata/ownerReferences"), None);
    assert_eq!(field("/spec/serviceName"), Some(json!("example-service")));
    assert_eq!(field("/spec/replicas"), Some(json!(3)));
    assert_eq!(
        field("/spec/selector/matchLabels"),
        Some(json!({ "app": "example" }))
    );
    assert_eq!(
        field("/spec/template/metadata/labels"),
        Some(json!({ "app": "example" }))
    );
    assert_eq!(
        field("/spec/template/spec/containers"),
        Some(json!([{
            "name": "example-container",
            "image": "nginx:latest",
            "ports": [{ "containerPort": 80 }],
        }]))
    );
    assert_eq!(
        field("/spec/volumeClaimTemplates/0/metadata/name"),
        Some(json!("example-pvc"))
    );
    assert_eq!(
        field("/spec/volumeClaimTemplates/0/spec/accessModes"),
        Some(json!(["ReadWriteOnce"]))
    );
    assert_eq!(
        field("/spec/volumeClaimTemplates/0/spec/resources/requests/storage"),
        Some(json!("1Gi"))
    );
    assert_eq!(field("/spec/volumeClaimTemplates/1"), None);
}
