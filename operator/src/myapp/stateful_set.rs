use std::collections::BTreeMap;

use k8s_openapi::{
    api::{
        apps::v1::StatefulSetSpec,
        core::v1::{
            Container, ContainerPort, PersistentVolumeClaim, PersistentVolumeClaimSpec, PodSpec,
            PodTemplateSpec, ResourceRequirements,
        },
    },
    apimachinery::pkg::{api::resource::Quantity, apis::meta::v1::LabelSelector},
};
use kube::api::ObjectMeta;

use crate::labels::selector_labels;

/// Persistent volume claim template attached to every replica.
#[derive(Clone, Debug)]
pub struct VolumeClaimConfig {
    /// Name of the claim template, also the volume name inside the pod.
    pub name: String,
    /// Requested storage size.
    pub size: Quantity,
}

impl Default for VolumeClaimConfig {
    fn default() -> Self {
        Self {
            name: "example-pvc".to_owned(),
            size: Quantity("1Gi".to_owned()),
        }
    }
}

impl From<VolumeClaimConfig> for PersistentVolumeClaim {
    fn from(value: VolumeClaimConfig) -> Self {
        Self {
            metadata: ObjectMeta {
                name: Some(value.name),
                ..Default::default()
            },
            spec: Some(PersistentVolumeClaimSpec {
                access_modes: Some(vec!["ReadWriteOnce".to_owned()]),
                resources: Some(ResourceRequirements {
                    requests: Some(BTreeMap::from_iter(vec![(
                        "storage".to_owned(),
                        value.size,
                    )])),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}

/// StatefulSetConfig defines the workload created for a MyApp with the `create` message.
///
/// The defaults are the only values the controller uses.
#[derive(Clone, Debug)]
pub struct StatefulSetConfig {
    /// Name of the stateful set.
    pub name: String,
    /// Namespace the stateful set is created in, independent of the MyApp's namespace.
    pub namespace: String,
    /// Headless service governing the pods' network identity.
    pub service_name: String,
    /// Number of pods.
    pub replicas: i32,
    /// Value of the `app` label used by the selector and the pod template.
    pub app: String,
    /// Name of the single container.
    pub container_name: String,
    /// Container image.
    pub image: String,
    /// Port exposed by the container.
    pub container_port: i32,
    /// Claim template mounted by every replica.
    pub volume_claim: VolumeClaimConfig,
}

impl Default for StatefulSetConfig {
    fn default() -> Self {
        Self {
            name: "example-statefulset".to_owned(),
            namespace: "default".to_owned(),
            service_name: "example-service".to_owned(),
            replicas: 3,
            app: "example".to_owned(),
            container_name: "example-container".to_owned(),
            image: "nginx:latest".to_owned(),
            container_port: 80,
            volume_claim: VolumeClaimConfig::default(),
        }
    }
}

/// Build the StatefulSetSpec for the configured workload.
pub fn stateful_set_spec(config: &StatefulSetConfig) -> StatefulSetSpec {
    StatefulSetSpec {
        service_name: config.service_name.to_owned(),
        replicas: Some(config.replicas),
        selector: LabelSelector {
            match_labels: selector_labels(&config.app),
            ..Default::default()
        },
        template: PodTemplateSpec {
            metadata: Some(ObjectMeta {
                labels: selector_labels(&config.app),
                ..Default::default()
            }),
            spec: Some(PodSpec {
                containers: vec![Container {
                    name: config.container_name.to_owned(),
                    image: Some(config.image.to_owned()),
                    ports: Some(vec![ContainerPort {
                        container_port: config.container_port,
                        ..Default::default()
                    }]),
                    ..Default::default()
                }],
                ..Default::default()
            }),
        },
        volume_claim_templates: Some(vec![config.volume_claim.clone().into()]),
        ..Default::default()
    }
}
