//! Applying an ejection plan
//!
//! Both new files are fully written to temporaries next to their destinations
//! before either destination is touched. Renames are the only mutations of
//! existing paths, and a failed manifest rename takes the placed setup script
//! back out.

use super::plan::EjectionPlan;
use crate::error::EjectError;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Step of the destructive phase, for error reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyStep {
    CreateDir,
    StageSetup,
    StageManifest,
    PlaceSetup,
    PlaceManifest,
}

impl fmt::Display for ApplyStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = match self {
            ApplyStep::CreateDir => "creating the scripts directory",
            ApplyStep::StageSetup => "staging the setup script",
            ApplyStep::StageManifest => "staging package.json",
            ApplyStep::PlaceSetup => "moving the setup script into place",
            ApplyStep::PlaceManifest => "replacing package.json",
        };
        f.write_str(step)
    }
}

fn stage_copy(source: &Path, dir: &Path) -> io::Result<NamedTempFile> {
    let mut staged = NamedTempFile::new_in(dir)?;
    let mut input = File::open(source)?;
    io::copy(&mut input, staged.as_file_mut())?;
    staged.as_file().sync_all()?;
    fs::set_permissions(staged.path(), input.metadata()?.permissions())?;
    Ok(staged)
}

fn stage_text(text: &str, dir: &Path) -> io::Result<NamedTempFile> {
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(text.as_bytes())?;
    staged.as_file().sync_all()?;
    Ok(staged)
}

/// Execute a plan produced by [`super::plan::plan`]
pub fn apply(plan: &EjectionPlan) -> Result<(), EjectError> {
    let fail = |step: ApplyStep, rolled_back: bool, source: io::Error| EjectError::Apply {
        step,
        rolled_back,
        source,
    };
    let remove_created_dir = || {
        if let Some(dir) = &plan.create_dir {
            let _ = fs::remove_dir(dir);
        }
    };

    if let Some(dir) = &plan.create_dir {
        fs::create_dir(dir).map_err(|e| fail(ApplyStep::CreateDir, true, e))?;
    }

    let setup_dir = plan
        .setup_target
        .parent()
        .unwrap_or(plan.project_root.as_path());
    let staged_setup = match stage_copy(&plan.setup_source, setup_dir) {
        Ok(staged) => staged,
        Err(e) => {
            remove_created_dir();
            return Err(fail(ApplyStep::StageSetup, true, e));
        }
    };

    let manifest_dir = plan
        .manifest_path
        .parent()
        .unwrap_or(plan.project_root.as_path());
    let staged_manifest = match stage_text(&plan.manifest.to_pretty_string(), manifest_dir) {
        Ok(staged) => staged,
        Err(e) => {
            drop(staged_setup);
            remove_created_dir();
            return Err(fail(ApplyStep::StageManifest, true, e));
        }
    };

    if let Err(e) = staged_setup.persist_noclobber(&plan.setup_target) {
        drop(e.file);
        drop(staged_manifest);
        remove_created_dir();
        return Err(fail(ApplyStep::PlaceSetup, true, e.error));
    }

    if let Err(e) = staged_manifest.persist(&plan.manifest_path) {
        drop(e.file);
        let rolled_back = fs::remove_file(&plan.setup_target).is_ok();
        if rolled_back {
            remove_created_dir();
        }
        return Err(fail(ApplyStep::PlaceManifest, rolled_back, e.error));
    }

    Ok(())
}
