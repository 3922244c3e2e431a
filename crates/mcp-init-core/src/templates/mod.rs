//! Template resolution, copying and manifests
//!
//! This module provides:
//! - Typed `package.json` handling
//! - Template resolution from a local path or the package registry
//! - Template copying with the `gitignore` rename rule
//! - Proxy version pinning for the templates shipped in this repository

pub mod copier;
pub mod manifest;
pub mod resolver;
pub mod version;

use crate::product::ProductConfig;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

pub use copier::{copy_template, finalize_manifest, materialize};
pub use manifest::{PackageManifest, StringMap};
pub use resolver::{release, resolve, ResolvedTemplate, TemplateReference};

/// Re-pin the proxy package in every template under `template_dir`
///
/// Only manifests that already depend on the proxy are touched. Returns the
/// manifests that changed.
pub fn sync_template_deps<C: ProductConfig>(
    config: &C,
    template_dir: &Path,
    proxy_version: &str,
) -> Result<Vec<PathBuf>> {
    if !template_dir.is_dir() {
        anyhow::bail!("Template directory not found: {}", template_dir.display());
    }

    let proxy = config.proxy();
    let pin = version::caret_pin(proxy_version)?;

    println!(
        "{}",
        format!("Pinning {} to {} in templates...", proxy.package_name, pin)
            .cyan()
            .bold()
    );
    println!();

    let mut template_dirs: Vec<PathBuf> = std::fs::read_dir(template_dir)
        .with_context(|| format!("Failed to read {}", template_dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir())
        .collect();
    template_dirs.sort();

    let mut updated = Vec::new();
    for dir in template_dirs {
        let manifest_path = manifest::manifest_path(&dir);
        if !manifest_path.exists() {
            continue;
        }

        let mut package = PackageManifest::load(&manifest_path)?;
        let mut changed = false;
        for deps in [&mut package.dependencies, &mut package.dev_dependencies]
            .into_iter()
            .flatten()
        {
            if deps.contains_key(&proxy.package_name) {
                deps.insert(proxy.package_name.clone(), pin.clone());
                changed = true;
            }
        }

        if changed {
            package.save(&manifest_path)?;
            println!("  {} {}", "->".blue(), manifest_path.display());
            updated.push(manifest_path);
        }
    }

    println!();
    println!(
        "{} {} template manifest(s) in {}",
        "Updated".green().bold(),
        updated.len(),
        template_dir.display()
    );

    Ok(updated)
}
