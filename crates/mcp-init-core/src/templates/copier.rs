//! Template file copying and project manifest synthesis

use crate::error::ScaffoldError;
use crate::templates::manifest::{manifest_path, PackageManifest};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Top-level template entries that are never copied
const EXCLUDED_ENTRIES: &[&str] = &["node_modules", ".git"];

/// Destination name for a top-level template entry
///
/// Registries strip `.gitignore` from published packages, so templates ship it
/// as `gitignore`.
pub fn destination_name(name: &str) -> &str {
    match name {
        "gitignore" => ".gitignore",
        other => other,
    }
}

/// Whether a top-level template entry is skipped entirely
pub fn is_excluded(name: &str) -> bool {
    EXCLUDED_ENTRIES.contains(&name)
}

/// Copy template files to the target directory
///
/// Returns the destination names of the copied top-level entries, sorted. An
/// entry that contains `target_dir` is skipped.
pub fn copy_template(template_root: &Path, target_dir: &Path) -> Result<Vec<String>, ScaffoldError> {
    let fail = |reason: String| ScaffoldError::TemplateInstallFailure {
        template: template_root.display().to_string(),
        reason,
    };

    fs::create_dir_all(target_dir)
        .map_err(|e| fail(format!("failed to create {}: {}", target_dir.display(), e)))?;

    let root = fs::canonicalize(template_root)
        .map_err(|e| fail(format!("failed to read {}: {}", template_root.display(), e)))?;
    let target = fs::canonicalize(target_dir)
        .map_err(|e| fail(format!("failed to read {}: {}", target_dir.display(), e)))?;
    if target == root {
        return Err(fail("cannot copy a template into itself".to_string()));
    }

    let mut entries: Vec<_> = fs::read_dir(template_root)
        .map_err(|e| fail(format!("failed to read {}: {}", template_root.display(), e)))?
        .collect::<Result<_, _>>()
        .map_err(|e| fail(format!("failed to read {}: {}", template_root.display(), e)))?;
    entries.sort_by_key(|e| e.file_name());

    let mut copied = Vec::new();
    for entry in entries {
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            return Err(fail(format!(
                "template entry {:?} is not valid UTF-8",
                file_name
            )));
        };
        if is_excluded(name) {
            continue;
        }
        // The destination itself may live inside the template root.
        let source = fs::canonicalize(entry.path())
            .map_err(|e| fail(format!("failed to read {}: {}", entry.path().display(), e)))?;
        if target.starts_with(&source) {
            continue;
        }

        let dest_name = destination_name(name);
        copy_entry(&entry.path(), &target_dir.join(dest_name)).map_err(fail)?;
        copied.push(dest_name.to_string());
    }

    copied.sort();
    Ok(copied)
}

/// Recursively copy a file or directory, preserving structure
fn copy_entry(src: &Path, dest: &Path) -> Result<(), String> {
    for item in WalkDir::new(src).follow_links(true) {
        let item = item.map_err(|e| format!("failed to walk {}: {}", src.display(), e))?;
        let relative = item
            .path()
            .strip_prefix(src)
            .map_err(|e| format!("unexpected path {}: {}", item.path().display(), e))?;
        let target = if relative.as_os_str().is_empty() {
            dest.to_path_buf()
        } else {
            dest.join(relative)
        };

        if item.file_type().is_dir() {
            fs::create_dir_all(&target)
                .map_err(|e| format!("failed to create {}: {}", target.display(), e))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| format!("failed to create {}: {}", parent.display(), e))?;
            }
            fs::copy(item.path(), &target).map_err(|e| {
                format!(
                    "failed to copy {} to {}: {}",
                    item.path().display(),
                    target.display(),
                    e
                )
            })?;
        }
    }
    Ok(())
}

/// Replace the copied template manifest with the project's own
///
/// Identity (`name`, `version`, `private`) is reset; `bin`, `scripts`,
/// `dependencies` and `devDependencies` are inherited unchanged.
pub fn finalize_manifest(
    project_dir: &Path,
    project_name: &str,
) -> Result<PackageManifest, ScaffoldError> {
    let path = manifest_path(project_dir);
    let template = PackageManifest::load(&path)?;
    let manifest = PackageManifest::for_new_project(project_name, &template);
    manifest.save(&path)?;
    Ok(manifest)
}

/// Copy a resolved template and write the project manifest
pub fn materialize(
    template_root: &Path,
    project_dir: &Path,
    project_name: &str,
) -> Result<PackageManifest, ScaffoldError> {
    copy_template(template_root, project_dir)?;
    finalize_manifest(project_dir, project_name)
}
