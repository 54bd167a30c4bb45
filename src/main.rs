mod preferences;
mod render;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use kubelens_k8s::ClusterClient;
use kubelens_types::{ResourceKind, catalog};
use kubelens_view::{DynamicObject, NamespaceSelection, SortDirection, SortSpec};

use crate::preferences::PreferenceStore;

/// Kubelens - browse Kubernetes resources as sortable tables
#[derive(Parser, Debug)]
#[command(name = "kubelens")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a kubeconfig file (remembered for later runs)
    #[arg(long, global = true, value_name = "PATH")]
    kubeconfig: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the supported resource kinds by category
    Kinds,

    /// List every instance of a kind as a table
    List {
        /// Kind name, e.g. pods, Job, cronjobs
        kind: String,

        /// Only show this namespace ("all" shows everything)
        #[arg(short, long, default_value = "all")]
        namespace: String,

        /// Column key to order by
        #[arg(long, default_value = "name")]
        sort: String,

        /// Sort descending
        #[arg(long)]
        desc: bool,
    },

    /// Print the details of one resource as JSON
    Describe {
        kind: String,
        name: String,

        /// Namespace of the resource
        #[arg(short, long)]
        namespace: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = run(args).await;

    if let Err(e) = &result {
        eprintln!("Error: {:#}", e);
    }

    result
}

async fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Kinds => {
            println!("{}", render::catalog(catalog::categories()));
            Ok(())
        }
        Command::List {
            kind,
            namespace,
            sort,
            desc,
        } => {
            let kind = lookup_kind(&kind)?;
            let sort = sort_spec(kind, sort, desc)?;
            let client = connect(args.kubeconfig).await?;
            list(&client, kind, &namespace, sort).await
        }
        Command::Describe {
            kind,
            name,
            namespace,
        } => {
            let kind = lookup_kind(&kind)?;
            let client = connect(args.kubeconfig).await?;
            describe(&client, kind, &name, namespace.as_deref()).await
        }
    }
}

fn lookup_kind(name: &str) -> Result<&'static ResourceKind> {
    catalog::find(name).with_context(|| {
        format!(
            "Unknown resource kind '{}' (run `kubelens kinds` for the list)",
            name
        )
    })
}

/// Validate `--sort` against the columns the kind's formatter declares
fn sort_spec(kind: &ResourceKind, column: String, desc: bool) -> Result<SortSpec> {
    let columns = kubelens_view::formatter_for(kind.formatter).columns();
    if !kubelens_view::is_sortable(columns, &column) {
        let keys: Vec<&str> = columns
            .iter()
            .filter(|c| c.sortable)
            .map(|c| c.key)
            .collect();
        anyhow::bail!(
            "Cannot sort {} by '{}' (sortable columns: {})",
            kind.name,
            column,
            keys.join(", ")
        );
    }

    let direction = if desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };
    Ok(SortSpec::new(column, direction))
}

async fn list(
    client: &ClusterClient,
    kind: &'static ResourceKind,
    namespace: &str,
    sort: SortSpec,
) -> Result<()> {
    let items = client
        .list_resources(kind)
        .await
        .with_context(|| format!("Failed to list {}", kind.name))?;

    let requested = NamespaceSelection::parse(namespace);
    let mut selection = requested.clone();
    let view = kubelens_view::present(kind, &items, &mut selection, &sort, chrono::Utc::now())
        .with_context(|| format!("Failed to present {}", kind.name))?;

    if selection != requested {
        eprintln!("Namespace '{}' has no {}, showing all", requested, kind.name);
    }

    println!("{}", render::table(view.columns, &view.rows, &sort));
    println!();
    println!("{}", render::namespaces(&view.namespaces));
    println!("Total: {} {}", view.rows.len(), kind.name);
    Ok(())
}

async fn describe(
    client: &ClusterClient,
    kind: &'static ResourceKind,
    name: &str,
    namespace: Option<&str>,
) -> Result<()> {
    let items = match namespace {
        Some(ns) => client.list_resources_in(kind, ns).await,
        None => client.list_resources(kind).await,
    }
    .with_context(|| format!("Failed to list {}", kind.name))?;

    let object = find_object(&items, name, namespace, kind)?;
    let details = kubelens_view::describe(kind, object, chrono::Utc::now())?;
    println!("{}", serde_json::to_string_pretty(&details)?);
    Ok(())
}

fn find_object<'a>(
    items: &'a [DynamicObject],
    name: &str,
    namespace: Option<&str>,
    kind: &ResourceKind,
) -> Result<&'a DynamicObject> {
    let mut matches = items.iter().filter(|o| {
        o.metadata.name.as_deref() == Some(name)
            && namespace.is_none_or(|ns| o.metadata.namespace.as_deref() == Some(ns))
    });

    let first = matches
        .next()
        .with_context(|| format!("{} '{}' not found", kind.kind, name))?;
    if matches.next().is_some() {
        anyhow::bail!(
            "{} '{}' exists in several namespaces, pass --namespace",
            kind.kind,
            name
        );
    }
    Ok(first)
}

/// Where the kubeconfig path came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KubeconfigSource {
    Flag,
    Preference,
    Environment,
    Home,
}

/// First of: flag, remembered path, `$KUBECONFIG` (first entry), `~/.kube/config`
fn resolve_kubeconfig(
    flag: Option<PathBuf>,
    remembered: Option<PathBuf>,
    env: Option<OsString>,
    home: Option<PathBuf>,
) -> Option<(PathBuf, KubeconfigSource)> {
    if let Some(path) = flag {
        return Some((path, KubeconfigSource::Flag));
    }
    if let Some(path) = remembered {
        return Some((path, KubeconfigSource::Preference));
    }
    if let Some(path) = env
        .as_deref()
        .and_then(|v| std::env::split_paths(v).find(|p| !p.as_os_str().is_empty()))
    {
        return Some((path, KubeconfigSource::Environment));
    }
    home.map(|h| (h.join(".kube").join("config"), KubeconfigSource::Home))
}

async fn connect(flag: Option<PathBuf>) -> Result<ClusterClient> {
    let store = PreferenceStore::default_location();
    let remembered = store.as_ref().and_then(PreferenceStore::kubeconfig);

    let (path, source) = resolve_kubeconfig(
        flag,
        remembered.clone(),
        std::env::var_os("KUBECONFIG"),
        dirs::home_dir(),
    )
    .context("No kubeconfig found: pass --kubeconfig or set KUBECONFIG")?;
    tracing::debug!(path = %path.display(), ?source, "resolved kubeconfig");

    let client = ClusterClient::new();
    match client.initialize(&path).await {
        Ok(()) => {
            if let (KubeconfigSource::Flag, Some(store)) = (source, &store) {
                remember(store, &path);
            }
            Ok(client)
        }
        Err(e) => {
            let stale = e.is_config_error() && remembered.as_deref() == Some(path.as_path());
            if let (true, Some(store)) = (stale, &store) {
                forget(store);
            }
            Err(e).with_context(|| format!("Failed to load kubeconfig {}", path.display()))
        }
    }
}

fn remember(store: &PreferenceStore, path: &Path) {
    let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    if let Err(e) = store.remember_kubeconfig(&path) {
        tracing::warn!(path = %store.path().display(), error = %e, "could not save preferences");
    }
}

fn forget(store: &PreferenceStore) {
    if let Err(e) = store.forget_kubeconfig() {
        tracing::warn!(path = %store.path().display(), error = %e, "could not save preferences");
    }
}
