//! Preflight checks and the ejection plan
//!
//! Nothing in this module writes to disk. Every failure here leaves the
//! project exactly as it was.

use super::scripts::{apply_rewrites, ManagedScriptSet, ScriptRewrite};
use crate::error::EjectError;
use crate::proxy::ProxyConfig;
use crate::templates::manifest::{manifest_path, PackageManifest};
use crate::templates::{version, StringMap};
use std::path::{Path, PathBuf};

/// Where to look for the installed proxy package's files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSearch {
    /// Candidate proxy `package.json` files, first existing wins
    pub manifests: Vec<PathBuf>,
    /// Candidate setup scripts, first existing wins
    pub setup_scripts: Vec<PathBuf>,
}

impl AssetSearch {
    /// The proxy's own install location first, then the project's
    /// `node_modules` copy (built `dist/`, then `src/`)
    pub fn new(proxy: &ProxyConfig, project_root: &Path, own_root: Option<&Path>) -> Self {
        let installed = project_root.join("node_modules").join(&proxy.package_name);
        let mut manifests = Vec::new();
        let mut setup_scripts = Vec::new();

        if let Some(root) = own_root {
            manifests.push(manifest_path(root));
            setup_scripts.push(root.join("dist").join(&proxy.setup_asset));
        }
        manifests.push(manifest_path(&installed));
        setup_scripts.push(installed.join("dist").join(&proxy.setup_asset));
        setup_scripts.push(installed.join("src").join(&proxy.setup_asset));

        manifests.dedup();
        setup_scripts.dedup();
        Self {
            manifests,
            setup_scripts,
        }
    }

    fn first_existing(candidates: &[PathBuf], what: &str) -> Result<PathBuf, EjectError> {
        candidates
            .iter()
            .find(|p| p.is_file())
            .cloned()
            .ok_or_else(|| EjectError::MissingInternalAsset {
                what: what.to_string(),
                searched: candidates.to_vec(),
            })
    }
}

/// Build tool pin copied from the proxy package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyPin {
    pub package: String,
    pub version: String,
    /// `false` when the project already pins the package itself
    pub added: bool,
}

/// Everything ejection will change, computed before anything is changed
#[derive(Debug, Clone)]
pub struct EjectionPlan {
    pub project_root: PathBuf,
    pub manifest_path: PathBuf,
    /// Directory to create, if it does not exist yet
    pub create_dir: Option<PathBuf>,
    pub setup_source: PathBuf,
    pub setup_target: PathBuf,
    pub script_rewrites: Vec<ScriptRewrite>,
    pub build_tool: Option<DependencyPin>,
    /// `dependencies` / `devDependencies` tables the proxy is removed from
    pub removed_from: Vec<&'static str>,
    /// Manifest as it will be written
    pub manifest: PackageManifest,
    pub warnings: Vec<String>,
}

/// Run every preflight check and compute the plan
pub fn plan(
    project_root: &Path,
    proxy: &ProxyConfig,
    search: &AssetSearch,
) -> Result<EjectionPlan, EjectError> {
    let manifest_file = manifest_path(project_root);
    let mut manifest = PackageManifest::load(&manifest_file)?;

    let managed = ManagedScriptSet::from_proxy(proxy);
    let scripts = manifest.scripts.clone().unwrap_or_default();
    managed.check_fidelity(&scripts)?;

    let scripts_dir = project_root.join(&proxy.scripts_dir);
    let setup_target = scripts_dir.join(&proxy.setup_asset);
    if setup_target.symlink_metadata().is_ok() {
        return Err(EjectError::DestinationConflict {
            path: setup_target,
            reason: "a file already exists".to_string(),
        });
    }
    let create_dir = match scripts_dir.symlink_metadata() {
        Ok(meta) if meta.is_dir() => None,
        Ok(_) => {
            return Err(EjectError::DestinationConflict {
                reason: format!(
                    "a file occupies the path needed for the {} directory",
                    proxy.scripts_dir
                ),
                path: scripts_dir,
            })
        }
        Err(_) => Some(scripts_dir),
    };

    let proxy_manifest_file =
        AssetSearch::first_existing(&search.manifests, &format!("{} package.json", proxy.package_name))?;
    let proxy_manifest = PackageManifest::load(&proxy_manifest_file)?;
    let setup_source = AssetSearch::first_existing(&search.setup_scripts, &proxy.setup_asset)?;

    let mut warnings = Vec::new();

    let script_rewrites = managed.rewrites(&scripts);
    if let Some(current) = manifest.scripts.as_mut() {
        apply_rewrites(current, &script_rewrites);
    }

    let build_tool = match proxy_manifest.dependency_version(&proxy.build_tool) {
        Some(version) => {
            if let Some(warning) = version::check_pin(&proxy.build_tool, version) {
                warnings.push(warning);
            }
            let dev = manifest.dev_dependencies.get_or_insert_with(StringMap::new);
            let added = !dev.contains_key(&proxy.build_tool);
            if added {
                dev.insert(proxy.build_tool.clone(), version);
            }
            Some(DependencyPin {
                package: proxy.build_tool.clone(),
                version: version.to_string(),
                added,
            })
        }
        None => {
            warnings.push(format!(
                "could not find '{}' in {} dependencies; build scripts might not work",
                proxy.build_tool, proxy.package_name
            ));
            None
        }
    };

    let mut removed_from = Vec::new();
    if let Some(deps) = manifest.dependencies.as_mut() {
        if deps.remove(&proxy.package_name).is_some() {
            removed_from.push("dependencies");
        }
    }
    if let Some(deps) = manifest.dev_dependencies.as_mut() {
        if deps.remove(&proxy.package_name).is_some() {
            removed_from.push("devDependencies");
        }
    }

    Ok(EjectionPlan {
        project_root: project_root.to_path_buf(),
        manifest_path: manifest_file,
        create_dir,
        setup_source,
        setup_target,
        script_rewrites,
        build_tool,
        removed_from,
        manifest,
        warnings,
    })
}
