//! Project generation pipeline
//!
//! [`ProjectBuilder`] runs every stage in a fixed order and stops at the first
//! fatal failure. UIs follow along through a [`BuildObserver`].

use crate::error::ScaffoldError;
use crate::naming::validate_package_name;
use crate::product::ProductConfig;
use crate::runtime::{run_checked, CommandRunner, ExternalCommand, PackageManager};
use crate::templates::{self, PackageManifest, TemplateReference};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// One step of project generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ValidateName,
    CreateDirectory,
    ResolveTemplate,
    CopyTemplate,
    UpdateManifest,
    InitRepository,
    InstallDependencies,
    InitialCommit,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            Stage::ValidateName => "Validating project name",
            Stage::CreateDirectory => "Creating project directory",
            Stage::ResolveTemplate => "Installing template",
            Stage::CopyTemplate => "Copying template",
            Stage::UpdateManifest => "Updating package.json",
            Stage::InitRepository => "Initializing git repository",
            Stage::InstallDependencies => "Installing dependencies",
            Stage::InitialCommit => "Creating initial commit",
        };
        f.write_str(stage)
    }
}

/// Receives progress from [`ProjectBuilder::build`]
pub trait BuildObserver {
    fn stage_started(&self, _stage: Stage) {}
    fn stage_finished(&self, _stage: Stage) {}
    fn warning(&self, _stage: Stage, _error: &ScaffoldError) {}
}

impl BuildObserver for () {}

/// A freshly generated project
#[derive(Debug)]
pub struct CreatedProject {
    pub dir: PathBuf,
    pub name: String,
    pub manifest: PackageManifest,
    /// Non-fatal failures, in the order they happened
    pub warnings: Vec<ScaffoldError>,
}

/// Resolve a user-supplied directory against `cwd`, normalizing `.` and `..`
pub fn resolve_project_dir(input: &str, cwd: &Path) -> PathBuf {
    let joined = cwd.join(input.trim());
    let mut resolved = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other.as_os_str()),
        }
    }
    resolved
}

/// Options for generating one project
#[derive(Debug, Clone)]
pub struct ProjectBuilder {
    project_dir: PathBuf,
    template: TemplateReference,
    package_manager: PackageManager,
    commit_message: String,
}

impl ProjectBuilder {
    /// `project_dir` should be absolute; see [`resolve_project_dir`]
    pub fn new(project_dir: impl Into<PathBuf>, template: TemplateReference) -> Self {
        Self {
            project_dir: project_dir.into(),
            template,
            package_manager: PackageManager::default(),
            commit_message: "Initial commit".to_string(),
        }
    }

    /// Builder with the product's defaults and an optional template override
    pub fn from_config<C: ProductConfig>(
        config: &C,
        project_dir: &str,
        template: Option<&str>,
        cwd: &Path,
    ) -> Self {
        let template = template
            .map(str::to_string)
            .unwrap_or_else(|| config.template_reference());
        Self::new(
            resolve_project_dir(project_dir, cwd),
            TemplateReference::parse(&template, cwd),
        )
        .package_manager(config.package_manager())
        .commit_message(config.commit_message())
    }

    pub fn package_manager(mut self, package_manager: PackageManager) -> Self {
        self.package_manager = package_manager;
        self
    }

    pub fn commit_message(mut self, message: impl Into<String>) -> Self {
        self.commit_message = message.into();
        self
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn template(&self) -> &TemplateReference {
        &self.template
    }

    /// Package name derived from the directory's basename
    pub fn project_name(&self) -> &str {
        self.project_dir
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("")
    }

    /// Run every stage; returns the project once dependencies are installed
    pub async fn build<R, O>(&self, runner: &R, observer: &O) -> Result<CreatedProject, ScaffoldError>
    where
        R: CommandRunner,
        O: BuildObserver,
    {
        let dir = self.project_dir.as_path();
        let pm = self.package_manager;
        let mut warnings = Vec::new();

        observer.stage_started(Stage::ValidateName);
        let name = self.project_name().to_string();
        let validation = validate_package_name(&name);
        if !validation.valid_for_new_packages() {
            return Err(ScaffoldError::InvalidProjectName {
                name,
                problems: validation.problems(),
            });
        }
        observer.stage_finished(Stage::ValidateName);

        observer.stage_started(Stage::CreateDirectory);
        if dir.exists() {
            return Err(ScaffoldError::DirectoryConflict(dir.to_path_buf()));
        }
        std::fs::create_dir_all(dir).map_err(|source| ScaffoldError::CreateDirectory {
            path: dir.to_path_buf(),
            source,
        })?;
        observer.stage_finished(Stage::CreateDirectory);

        observer.stage_started(Stage::ResolveTemplate);
        let resolved = templates::resolve(&self.template, dir, pm, runner).await?;
        observer.stage_finished(Stage::ResolveTemplate);

        observer.stage_started(Stage::CopyTemplate);
        let copied = templates::copy_template(&resolved.root, dir);
        let released = templates::release(&resolved, dir, pm, runner).await;
        copied?;
        released.map_err(|reason| ScaffoldError::TemplateInstallFailure {
            template: self.template.to_string(),
            reason,
        })?;
        observer.stage_finished(Stage::CopyTemplate);

        observer.stage_started(Stage::UpdateManifest);
        let manifest = templates::finalize_manifest(dir, &name)?;
        observer.stage_finished(Stage::UpdateManifest);

        observer.stage_started(Stage::InitRepository);
        let git_init = ExternalCommand::new("git", dir).arg("init");
        match run_checked(runner, &git_init).await {
            Ok(()) => observer.stage_finished(Stage::InitRepository),
            Err(reason) => {
                let warning = ScaffoldError::VersionControlInitFailure(reason);
                observer.warning(Stage::InitRepository, &warning);
                warnings.push(warning);
            }
        }

        observer.stage_started(Stage::InstallDependencies);
        run_checked(runner, &pm.install(dir))
            .await
            .map_err(ScaffoldError::DependencyInstallFailure)?;
        observer.stage_finished(Stage::InstallDependencies);

        observer.stage_started(Stage::InitialCommit);
        match self.initial_commit(runner).await {
            Ok(()) => observer.stage_finished(Stage::InitialCommit),
            Err(reason) => {
                let warning = ScaffoldError::VersionControlInitFailure(reason);
                observer.warning(Stage::InitialCommit, &warning);
                warnings.push(warning);
            }
        }

        Ok(CreatedProject {
            dir: dir.to_path_buf(),
            name,
            manifest,
            warnings,
        })
    }

    async fn initial_commit<R: CommandRunner>(&self, runner: &R) -> Result<(), String> {
        let dir = self.project_dir.as_path();
        run_checked(runner, &ExternalCommand::new("git", dir).args(["add", "-A"])).await?;
        run_checked(
            runner,
            &ExternalCommand::new("git", dir).args(["commit", "-m", self.commit_message.as_str()]),
        )
        .await
    }
}
