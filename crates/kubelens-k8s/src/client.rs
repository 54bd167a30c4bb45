use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use futures::TryFutureExt;
use futures::future::try_join_all;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::core::DynamicObject;
use parking_lot::RwLock;

use kubelens_types::{ApiGroup, Error, ResourceKind, Result};

use crate::backend::{GroupApi, KubeGroupApi};

/// Per-API-group handles, keyed by group
#[derive(Clone, Default)]
pub struct HandleSet {
    handles: HashMap<ApiGroup, Arc<dyn GroupApi>>,
}

impl HandleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// One live handle per known API group, sharing a single client
    pub fn from_client(client: kube::Client) -> Self {
        let mut set = Self::new();
        for group in ApiGroup::ALL {
            set.insert(group, Arc::new(KubeGroupApi::new(client.clone(), group)));
        }
        set
    }

    pub fn insert(&mut self, group: ApiGroup, api: Arc<dyn GroupApi>) {
        self.handles.insert(group, api);
    }

    pub fn with(mut self, group: ApiGroup, api: impl GroupApi + 'static) -> Self {
        self.insert(group, Arc::new(api));
        self
    }

    pub fn get(&self, group: ApiGroup) -> Result<&Arc<dyn GroupApi>> {
        self.handles
            .get(&group)
            .ok_or(Error::UnknownApiGroup { group })
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// Kubernetes client adapter
///
/// Holds the handle set for the currently loaded kubeconfig. The set is
/// replaced as a whole on re-initialization; every list call works on the
/// snapshot it started with.
#[derive(Default)]
pub struct ClusterClient {
    handles: RwLock<Option<Arc<HandleSet>>>,
}

impl ClusterClient {
    /// Create an adapter with no kubeconfig loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the kubeconfig at `path` and swap in a fresh handle set
    ///
    /// On failure the previously installed handles stay in place.
    pub async fn initialize(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "initializing Kubernetes client");

        let is_file = tokio::fs::metadata(path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !is_file {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let invalid = |message: String| Error::ConfigInvalid {
            path: path.to_path_buf(),
            message,
        };

        // Relative certificate and key paths resolve against the file's directory
        let kubeconfig = Kubeconfig::read_from(path).map_err(|e| invalid(e.to_string()))?;
        let config = kube::Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
            .await
            .map_err(|e| invalid(e.to_string()))?;
        let client = kube::Client::try_from(config).map_err(|e| invalid(e.to_string()))?;

        self.install(HandleSet::from_client(client));
        tracing::info!(path = %path.display(), "Kubernetes client initialized");
        Ok(())
    }

    /// Replace the handle set wholesale
    pub fn install(&self, handles: HandleSet) {
        *self.handles.write() = Some(Arc::new(handles));
    }

    pub fn is_initialized(&self) -> bool {
        self.handles.read().is_some()
    }

    fn snapshot(&self) -> Result<Arc<HandleSet>> {
        self.handles.read().clone().ok_or(Error::NotInitialized)
    }

    /// List every instance of `kind`, across all namespaces for namespaced kinds
    ///
    /// Namespaced kinds issue one call per namespace, all in flight at once.
    /// The first failing call fails the whole listing.
    pub async fn list_resources(&self, kind: &ResourceKind) -> Result<Vec<DynamicObject>> {
        let handles = self.snapshot()?;
        let api = handles.get(kind.group)?;

        if !kind.is_namespaced() {
            return api.list(kind, None).await.map_err(|e| upstream(kind, None, e));
        }

        let namespaces = handles
            .get(ApiGroup::Core)?
            .list_namespaces()
            .await
            .map_err(|e| upstream(kind, None, e))?;

        tracing::debug!(
            kind = kind.name,
            namespaces = namespaces.len(),
            "fanning out namespaced list"
        );

        let calls = namespaces.iter().map(|ns| {
            api.list(kind, Some(ns.as_str()))
                .map_err(move |e| upstream(kind, Some(ns.as_str()), e))
        });
        let per_namespace = try_join_all(calls).await?;

        Ok(per_namespace.into_iter().flatten().collect())
    }

    /// List `kind` in a single namespace; cluster-scoped kinds ignore it
    pub async fn list_resources_in(
        &self,
        kind: &ResourceKind,
        namespace: &str,
    ) -> Result<Vec<DynamicObject>> {
        let handles = self.snapshot()?;
        let api = handles.get(kind.group)?;
        let namespace = kind.is_namespaced().then_some(namespace);

        api.list(kind, namespace)
            .await
            .map_err(|e| upstream(kind, namespace, e))
    }
}

fn upstream(kind: &ResourceKind, namespace: Option<&str>, source: kube::Error) -> Error {
    tracing::warn!(
        kind = kind.name,
        namespace = namespace.unwrap_or("<cluster>"),
        error = %source,
        "listing failed"
    );
    Error::Upstream {
        kind: kind.name.to_string(),
        source: Box::new(source),
    }
}
