//! Utils is shared functions and constants for the controller

use std::{path::Path, sync::Arc};

use anyhow::Result;
use k8s_openapi::api::apps::v1::{StatefulSet, StatefulSetSpec};
use kube::{
    api::PostParams,
    client::Client,
    config::{KubeConfigOptions, Kubeconfig},
    core::ObjectMeta,
    Api, Config,
};
use tracing::debug;

use crate::{labels::managed_labels, myapp::stateful_set::StatefulSetConfig, CONTROLLER_NAME};

/// Operator Context
pub struct Context {
    /// Kube client
    pub k_client: Client,
    /// Workload created for MyApp resources with the `create` message
    pub stateful_set: StatefulSetConfig,
}

impl Context {
    /// Create new context
    pub fn new(k_client: Client) -> Self {
        Context {
            k_client,
            stateful_set: StatefulSetConfig::default(),
        }
    }
}

/// Construct a kube client.
///
/// The in-cluster configuration is preferred. Outside of a cluster the kubeconfig at `kubeconfig`
/// is used, or the default kubeconfig location when no path is given.
pub async fn kube_client(kubeconfig: Option<&Path>) -> Result<Client> {
    let config = match Config::incluster() {
        Ok(config) => config,
        Err(err) => {
            debug!(%err, "in-cluster config unavailable, falling back to kubeconfig");
            kubeconfig_config(kubeconfig).await?
        }
    };
    Ok(Client::try_from(config)?)
}

/// Load client configuration from a kubeconfig file.
pub async fn kubeconfig_config(kubeconfig: Option<&Path>) -> Result<Config> {
    let kubeconfig = match kubeconfig {
        Some(path) => Kubeconfig::read_from(path)?,
        None => Kubeconfig::read()?,
    };
    Ok(Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default()).await?)
}

/// Create a stateful set in namespace with default managed labels.
///
/// Returns `None` when a stateful set with the same name already exists, the existing object is
/// left untouched.
pub async fn create_stateful_set(
    cx: Arc<Context>,
    ns: &str,
    name: &str,
    spec: StatefulSetSpec,
) -> Result<Option<StatefulSet>, kube::error::Error> {
    let params = PostParams {
        field_manager: Some(CONTROLLER_NAME.to_owned()),
        ..Default::default()
    };
    let stateful_sets: Api<StatefulSet> = Api::namespaced(cx.k_client.clone(), ns);

    let stateful_set: StatefulSet = StatefulSet {
        metadata: ObjectMeta {
            name: Some(name.to_owned()),
            namespace: Some(ns.to_owned()),
            labels: managed_labels(),
            ..ObjectMeta::default()
        },
        spec: Some(spec),
        ..Default::default()
    };
    match stateful_sets.create(&params, &stateful_set).await {
        Ok(stateful_set) => Ok(Some(stateful_set)),
        Err(kube::Error::Api(err)) if err.reason == "AlreadyExists" => Ok(None),
        Err(e) => Err(e),
    }
}
