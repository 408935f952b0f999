use async_trait::async_trait;
use k8s_openapi::api::{apps::v1::Deployment, core::v1::Pod};
use kube::{
    api::{Api, DeleteParams, Patch, PatchParams},
    Client,
};
use serde_json::json;
use tracing::debug;

use crate::Result;

/// Cluster operations the remediations are built from.
///
/// Every call is scoped to the namespace passed in and takes its parameters
/// as structured arguments. On success the returned string is the output
/// text reported back to the webhook caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClusterControl: Send + Sync {
    async fn scale_deployment(&self, namespace: &str, deployment: &str, replicas: i32) -> Result<String>;

    async fn restart_deployment(&self, namespace: &str, deployment: &str) -> Result<String>;

    async fn delete_pod(&self, namespace: &str, pod: &str) -> Result<String>;
}

/// `ClusterControl` backed by the Kubernetes API.
#[derive(Clone)]
pub struct KubeCluster {
    client: Client,
}

impl KubeCluster {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn try_default() -> Result<Self> {
        let client = Client::try_default().await?;
        Ok(Self::new(client))
    }

    fn deployments(&self, namespace: &str) -> Api<Deployment> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait]
impl ClusterControl for KubeCluster {
    async fn scale_deployment(&self, namespace: &str, deployment: &str, replicas: i32) -> Result<String> {
        debug!("Scaling deployment {}/{} to {}", namespace, deployment, replicas);
        let patch = json!({ "spec": { "replicas": replicas } });
        let scale = self
            .deployments(namespace)
            .patch_scale(deployment, &PatchParams::default(), &Patch::Merge(&patch))
            .await?;

        let desired = scale.spec.and_then(|s| s.replicas).unwrap_or(replicas);
        Ok(format!("deployment.apps/{} scaled to {} replicas", deployment, desired))
    }

    async fn restart_deployment(&self, namespace: &str, deployment: &str) -> Result<String> {
        debug!("Restarting deployment {}/{}", namespace, deployment);
        self.deployments(namespace).restart(deployment).await?;
        Ok(format!("deployment.apps/{} restarted", deployment))
    }

    async fn delete_pod(&self, namespace: &str, pod: &str) -> Result<String> {
        debug!("Deleting pod {}/{}", namespace, pod);
        let pods: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        pods.delete(pod, &DeleteParams::default()).await?;
        Ok(format!("pod \"{}\" deleted", pod))
    }
}
