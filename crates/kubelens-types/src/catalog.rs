//! Static registry of the resource kinds kubelens knows how to list.

use std::fmt;

/// Operation identifiers with this prefix list a namespaced resource.
const NAMESPACED_PREFIX: &str = "list_namespaced_";

/// Kubernetes API group a resource kind is served from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ApiGroup {
    Core,
    Apps,
    Batch,
    Networking,
    Storage,
}

impl ApiGroup {
    pub const ALL: [ApiGroup; 5] = [
        Self::Core,
        Self::Apps,
        Self::Batch,
        Self::Networking,
        Self::Storage,
    ];

    /// Short identifier used as the handle key
    pub fn id(&self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Apps => "apps",
            Self::Batch => "batch",
            Self::Networking => "networking",
            Self::Storage => "storage",
        }
    }

    /// Group name as served by the API server (empty for the legacy core group)
    pub fn group(&self) -> &'static str {
        match self {
            Self::Core => "",
            Self::Apps => "apps",
            Self::Batch => "batch",
            Self::Networking => "networking.k8s.io",
            Self::Storage => "storage.k8s.io",
        }
    }

    pub fn version(&self) -> &'static str {
        "v1"
    }

    /// `apiVersion` string, e.g. `v1` or `apps/v1`
    pub fn api_version(&self) -> String {
        match self.group() {
            "" => self.version().to_string(),
            group => format!("{}/{}", group, self.version()),
        }
    }
}

impl fmt::Display for ApiGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Which row formatter presents a kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormatterKind {
    Pod,
    Job,
    CronJob,
    Generic,
}

/// A Kubernetes object type that can be listed and presented
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceKind {
    /// Display name shown in the navigation tree
    pub name: &'static str,
    pub group: ApiGroup,
    /// Listing operation identifier
    pub operation: &'static str,
    /// Kubernetes `kind`
    pub kind: &'static str,
    /// Plural resource name used in request paths
    pub plural: &'static str,
    pub formatter: FormatterKind,
}

impl ResourceKind {
    const fn new(
        name: &'static str,
        group: ApiGroup,
        operation: &'static str,
        kind: &'static str,
        plural: &'static str,
    ) -> Self {
        Self {
            name,
            group,
            operation,
            kind,
            plural,
            formatter: FormatterKind::Generic,
        }
    }

    const fn formatted_by(mut self, formatter: FormatterKind) -> Self {
        self.formatter = formatter;
        self
    }

    /// Whether instances are partitioned by namespace
    pub fn is_namespaced(&self) -> bool {
        self.operation.starts_with(NAMESPACED_PREFIX)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A navigation-tree group of kinds
#[derive(Debug)]
pub struct ResourceCategory {
    pub key: &'static str,
    pub label: &'static str,
    pub kinds: &'static [ResourceKind],
}

pub const PODS: ResourceKind =
    ResourceKind::new("Pods", ApiGroup::Core, "list_namespaced_pod", "Pod", "pods")
        .formatted_by(FormatterKind::Pod);
pub const DEPLOYMENTS: ResourceKind = ResourceKind::new(
    "Deployments",
    ApiGroup::Apps,
    "list_namespaced_deployment",
    "Deployment",
    "deployments",
);
pub const STATEFUL_SETS: ResourceKind = ResourceKind::new(
    "StatefulSets",
    ApiGroup::Apps,
    "list_namespaced_stateful_set",
    "StatefulSet",
    "statefulsets",
);
pub const DAEMON_SETS: ResourceKind = ResourceKind::new(
    "DaemonSets",
    ApiGroup::Apps,
    "list_namespaced_daemon_set",
    "DaemonSet",
    "daemonsets",
);
pub const JOBS: ResourceKind =
    ResourceKind::new("Jobs", ApiGroup::Batch, "list_namespaced_job", "Job", "jobs")
        .formatted_by(FormatterKind::Job);
pub const CRON_JOBS: ResourceKind = ResourceKind::new(
    "CronJobs",
    ApiGroup::Batch,
    "list_namespaced_cron_job",
    "CronJob",
    "cronjobs",
)
.formatted_by(FormatterKind::CronJob);
pub const PERSISTENT_VOLUMES: ResourceKind = ResourceKind::new(
    "PersistentVolumes",
    ApiGroup::Core,
    "list_persistent_volume",
    "PersistentVolume",
    "persistentvolumes",
);
pub const PERSISTENT_VOLUME_CLAIMS: ResourceKind = ResourceKind::new(
    "PersistentVolumeClaims",
    ApiGroup::Core,
    "list_namespaced_persistent_volume_claim",
    "PersistentVolumeClaim",
    "persistentvolumeclaims",
);
pub const STORAGE_CLASSES: ResourceKind = ResourceKind::new(
    "StorageClasses",
    ApiGroup::Storage,
    "list_storage_class",
    "StorageClass",
    "storageclasses",
);
pub const SERVICES: ResourceKind = ResourceKind::new(
    "Services",
    ApiGroup::Core,
    "list_namespaced_service",
    "Service",
    "services",
);
pub const INGRESSES: ResourceKind = ResourceKind::new(
    "Ingresses",
    ApiGroup::Networking,
    "list_namespaced_ingress",
    "Ingress",
    "ingresses",
);
pub const NETWORK_POLICIES: ResourceKind = ResourceKind::new(
    "NetworkPolicies",
    ApiGroup::Networking,
    "list_namespaced_network_policy",
    "NetworkPolicy",
    "networkpolicies",
);
pub const CONFIG_MAPS: ResourceKind = ResourceKind::new(
    "ConfigMaps",
    ApiGroup::Core,
    "list_namespaced_config_map",
    "ConfigMap",
    "configmaps",
);
pub const SECRETS: ResourceKind = ResourceKind::new(
    "Secrets",
    ApiGroup::Core,
    "list_namespaced_secret",
    "Secret",
    "secrets",
);

static CATEGORIES: &[ResourceCategory] = &[
    ResourceCategory {
        key: "workloads",
        label: "Workloads",
        kinds: &[PODS, DEPLOYMENTS, STATEFUL_SETS, DAEMON_SETS],
    },
    ResourceCategory {
        key: "batch",
        label: "Batch",
        kinds: &[JOBS, CRON_JOBS],
    },
    ResourceCategory {
        key: "storage",
        label: "Storage",
        kinds: &[PERSISTENT_VOLUMES, PERSISTENT_VOLUME_CLAIMS, STORAGE_CLASSES],
    },
    ResourceCategory {
        key: "networking",
        label: "Networking",
        kinds: &[SERVICES, INGRESSES, NETWORK_POLICIES],
    },
    ResourceCategory {
        key: "config",
        label: "Config and Storage",
        kinds: &[CONFIG_MAPS, SECRETS],
    },
];

/// All categories in navigation order
pub fn categories() -> &'static [ResourceCategory] {
    CATEGORIES
}

/// All kinds, flattened in navigation order
pub fn kinds() -> impl Iterator<Item = &'static ResourceKind> {
    CATEGORIES.iter().flat_map(|c| c.kinds.iter())
}

/// Look up a kind by display name, Kubernetes kind or plural (case-insensitive)
pub fn find(name: &str) -> Option<&'static ResourceKind> {
    kinds().find(|k| {
        k.name.eq_ignore_ascii_case(name)
            || k.kind.eq_ignore_ascii_case(name)
            || k.plural.eq_ignore_ascii_case(name)
    })
}
