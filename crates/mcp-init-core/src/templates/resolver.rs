//! Template resolution from a local directory or the package registry
//!
//! - Local: the directory itself is the template, nothing is copied here
//! - Registry: a throwaway manifest pulls the package into `node_modules`,
//!   the installed package directory is the template
//!
//! Copying into the project is the copier's job.

use crate::error::ScaffoldError;
use crate::runtime::{run_checked, CommandRunner, PackageManager};
use crate::templates::manifest::{manifest_path, PackageManifest};
use std::fmt;
use std::path::{Path, PathBuf};

/// Prefix marking a local template on the command line
pub const LOCAL_PREFIX: &str = "file:";

/// Where a template comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateReference {
    Local(PathBuf),
    Registry(String),
}

impl TemplateReference {
    /// Parse `file:<path>` or a bare registry package name
    ///
    /// Relative local paths are resolved against `cwd`.
    pub fn parse(reference: &str, cwd: &Path) -> Self {
        let reference = reference.trim();
        match reference.strip_prefix(LOCAL_PREFIX) {
            Some(path) => {
                let path = PathBuf::from(path);
                if path.is_absolute() {
                    Self::Local(path)
                } else {
                    Self::Local(cwd.join(path))
                }
            }
            None => Self::Registry(reference.to_string()),
        }
    }
}

impl fmt::Display for TemplateReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateReference::Local(path) => write!(f, "{}{}", LOCAL_PREFIX, path.display()),
            TemplateReference::Registry(name) => write!(f, "{}", name),
        }
    }
}

/// A template available on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTemplate {
    pub root: PathBuf,
    /// Set when the files live in the destination's `node_modules`
    registry_package: Option<String>,
}

/// Make a template available on disk
pub async fn resolve<R: CommandRunner>(
    reference: &TemplateReference,
    destination: &Path,
    package_manager: PackageManager,
    runner: &R,
) -> Result<ResolvedTemplate, ScaffoldError> {
    match reference {
        TemplateReference::Local(path) => {
            if !path.exists() {
                return Err(ScaffoldError::TemplateNotFound(path.clone()));
            }
            Ok(ResolvedTemplate {
                root: path.clone(),
                registry_package: None,
            })
        }
        TemplateReference::Registry(package) => {
            install_from_registry(package, destination, package_manager, runner).await
        }
    }
}

async fn install_from_registry<R: CommandRunner>(
    package: &str,
    destination: &Path,
    package_manager: PackageManager,
    runner: &R,
) -> Result<ResolvedTemplate, ScaffoldError> {
    let fail = |reason: String| ScaffoldError::TemplateInstallFailure {
        template: package.to_string(),
        reason,
    };

    if package.is_empty() {
        return Err(fail("no template name given".to_string()));
    }

    PackageManifest::installer_stub(package)
        .save(&manifest_path(destination))
        .map_err(|e| fail(e.to_string()))?;

    let installed = run_checked(runner, &package_manager.install(destination)).await;
    let root = destination.join("node_modules").join(package);
    let resolved = ResolvedTemplate {
        root: root.clone(),
        registry_package: Some(package.to_string()),
    };

    let failure = match installed {
        Err(reason) => Some(reason),
        Ok(()) if !root.is_dir() => Some(format!(
            "package was installed but {} does not exist",
            root.display()
        )),
        Ok(()) => None,
    };

    match failure {
        Some(reason) => {
            // The install footprint is removed even when the install failed.
            let _ = release(&resolved, destination, package_manager, runner).await;
            Err(fail(reason))
        }
        None => Ok(resolved),
    }
}

/// Remove the throwaway registry dependency once the files are copied
pub async fn release<R: CommandRunner>(
    resolved: &ResolvedTemplate,
    destination: &Path,
    package_manager: PackageManager,
    runner: &R,
) -> Result<(), String> {
    match &resolved.registry_package {
        Some(package) => {
            run_checked(runner, &package_manager.uninstall(destination, package)).await
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_registry_name() {
        let cwd = Path::new("/work");
        assert_eq!(
            TemplateReference::parse("mcpi-template-default", cwd),
            TemplateReference::Registry("mcpi-template-default".into())
        );
        assert_eq!(
            TemplateReference::parse("@acme/mcp-template", cwd),
            TemplateReference::Registry("@acme/mcp-template".into())
        );
    }

    #[test]
    fn test_parse_local_paths() {
        let cwd = Path::new("/work");
        assert_eq!(
            TemplateReference::parse("file:../my-template", cwd),
            TemplateReference::Local(PathBuf::from("/work/../my-template"))
        );
        assert_eq!(
            TemplateReference::parse("file:/opt/templates/x", cwd),
            TemplateReference::Local(PathBuf::from("/opt/templates/x"))
        );
    }

    #[test]
    fn test_display_round_trips_prefix() {
        let local = TemplateReference::Local(PathBuf::from("/opt/t"));
        assert_eq!(local.to_string(), "file:/opt/t");
    }
}
