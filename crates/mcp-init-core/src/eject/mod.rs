//! One-way ejection from the proxy package
//!
//! Ejection copies the proxy's setup script into the project, rewrites the
//! managed scripts to call the build tool directly, pins the build tool and
//! drops the proxy dependency.
//!
//! The engine moves through `Idle -> PreflightChecked -> Materializing -> Done`.
//! A failure before `Materializing` has changed nothing on disk. Once the
//! managed scripts are rewritten they no longer match their proxy literals, so
//! a second ejection fails preflight.

pub mod apply;
pub mod plan;
pub mod scripts;

use crate::error::EjectError;
use crate::proxy::ProxyConfig;
use std::fmt;
use std::path::{Path, PathBuf};

pub use apply::ApplyStep;
pub use plan::{AssetSearch, DependencyPin, EjectionPlan};
pub use scripts::{ManagedScript, ManagedScriptSet, ScriptRewrite};

/// Where the engine is in its one-shot lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EjectPhase {
    Idle,
    PreflightChecked,
    Materializing,
    Done,
    Failed,
}

impl fmt::Display for EjectPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self {
            EjectPhase::Idle => "idle",
            EjectPhase::PreflightChecked => "preflight checked",
            EjectPhase::Materializing => "materializing",
            EjectPhase::Done => "done",
            EjectPhase::Failed => "failed",
        };
        f.write_str(phase)
    }
}

/// Drives one ejection of one project
pub struct Ejector {
    project_root: PathBuf,
    proxy: ProxyConfig,
    search: AssetSearch,
    phase: EjectPhase,
}

impl Ejector {
    pub fn new(project_root: &Path, proxy: ProxyConfig, search: AssetSearch) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            proxy,
            search,
            phase: EjectPhase::Idle,
        }
    }

    pub fn phase(&self) -> EjectPhase {
        self.phase
    }

    /// Run the preflight checks and compute the plan; writes nothing
    pub fn preflight(&mut self) -> Result<EjectionPlan, EjectError> {
        if self.phase != EjectPhase::Idle {
            let phase = self.phase;
            self.phase = EjectPhase::Failed;
            return Err(EjectError::InvalidState(phase));
        }
        match plan::plan(&self.project_root, &self.proxy, &self.search) {
            Ok(plan) => {
                self.phase = EjectPhase::PreflightChecked;
                Ok(plan)
            }
            Err(e) => {
                self.phase = EjectPhase::Failed;
                Err(e)
            }
        }
    }

    /// Apply a plan returned by [`Ejector::preflight`]
    pub fn apply(&mut self, plan: &EjectionPlan) -> Result<(), EjectError> {
        if self.phase != EjectPhase::PreflightChecked {
            let phase = self.phase;
            self.phase = EjectPhase::Failed;
            return Err(EjectError::InvalidState(phase));
        }
        self.phase = EjectPhase::Materializing;
        match apply::apply(plan) {
            Ok(()) => {
                self.phase = EjectPhase::Done;
                Ok(())
            }
            Err(e) => {
                self.phase = EjectPhase::Failed;
                Err(e)
            }
        }
    }
}

/// Preflight and apply in one go, returning the applied plan
pub fn eject(
    project_root: &Path,
    proxy: ProxyConfig,
    search: AssetSearch,
) -> Result<EjectionPlan, EjectError> {
    let mut ejector = Ejector::new(project_root, proxy, search);
    let plan = ejector.preflight()?;
    ejector.apply(&plan)?;
    Ok(plan)
}

/// Root of the installed proxy package that contains the running binary
///
/// Binaries ship as `<package>/bin/<name>`.
pub fn own_package_root() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let exe = exe.canonicalize().unwrap_or(exe);
    exe.parent()?.parent().map(Path::to_path_buf)
}
