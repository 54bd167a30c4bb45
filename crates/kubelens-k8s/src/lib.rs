//! Kubernetes client adapter for kubelens
//!
//! This crate loads a kubeconfig into a set of per-API-group handles and
//! lists resources, fanning out across namespaces for namespaced kinds.

mod backend;
mod client;

pub use backend::{GroupApi, KubeGroupApi};
pub use client::{ClusterClient, HandleSet};

// Re-export types that are used in our public API
pub use kube::core::DynamicObject;
pub use kubelens_types::{ApiGroup, Error, ResourceKind, Result};
