use async_trait::async_trait;
use k8s_openapi::api::core::v1::Namespace;
use kube::Api;
use kube::api::ListParams;
use kube::core::{ApiResource, DynamicObject, GroupVersionKind};

use kubelens_types::{ApiGroup, ResourceKind};

/// Listing operations served by one API group handle
#[async_trait]
pub trait GroupApi: Send + Sync {
    /// Names of every namespace visible to the client
    async fn list_namespaces(&self) -> Result<Vec<String>, kube::Error>;

    /// List `kind` in one namespace, or cluster-wide when `namespace` is `None`
    async fn list(
        &self,
        kind: &ResourceKind,
        namespace: Option<&str>,
    ) -> Result<Vec<DynamicObject>, kube::Error>;
}

/// Live handle backed by a `kube::Client`
#[derive(Clone)]
pub struct KubeGroupApi {
    client: kube::Client,
    group: ApiGroup,
}

impl KubeGroupApi {
    pub fn new(client: kube::Client, group: ApiGroup) -> Self {
        Self { client, group }
    }

    pub fn group(&self) -> ApiGroup {
        self.group
    }

    fn api_resource(kind: &ResourceKind) -> ApiResource {
        let gvk = GroupVersionKind::gvk(kind.group.group(), kind.group.version(), kind.kind);
        ApiResource::from_gvk_with_plural(&gvk, kind.plural)
    }
}

#[async_trait]
impl GroupApi for KubeGroupApi {
    async fn list_namespaces(&self) -> Result<Vec<String>, kube::Error> {
        let namespaces: Api<Namespace> = Api::all(self.client.clone());
        let list = namespaces.list(&ListParams::default()).await?;

        Ok(list
            .items
            .into_iter()
            .filter_map(|ns| ns.metadata.name)
            .collect())
    }

    async fn list(
        &self,
        kind: &ResourceKind,
        namespace: Option<&str>,
    ) -> Result<Vec<DynamicObject>, kube::Error> {
        let resource = Self::api_resource(kind);
        let api: Api<DynamicObject> = match namespace {
            Some(ns) => Api::namespaced_with(self.client.clone(), ns, &resource),
            None => Api::all_with(self.client.clone(), &resource),
        };

        tracing::debug!(
            group = %self.group,
            kind = kind.kind,
            namespace = namespace.unwrap_or("<cluster>"),
            "listing resources"
        );

        let list = api.list(&ListParams::default()).await?;
        Ok(list.items)
    }
}
