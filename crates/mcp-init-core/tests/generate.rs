mod common;

use common::{default_template, write, RecordingRunner};
use mcp_init_core::templates::PackageManifest;
use mcp_init_core::{ProjectBuilder, ScaffoldError, TemplateReference};
use std::fs;
use tempfile::TempDir;

#[tokio::test]
async fn test_local_template_creates_project() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("my-server");
    let builder = ProjectBuilder::new(&dir, TemplateReference::Local(default_template()))
        .commit_message("Initial commit from create-mcp-ts");
    let runner = RecordingRunner::default();

    let project = builder.build(&runner, &()).await.unwrap();

    assert_eq!(project.name, "my-server");
    assert!(project.warnings.is_empty());
    assert!(dir.join(".gitignore").is_file());
    assert!(!dir.join("gitignore").exists());
    assert!(dir.join("src/index.ts").is_file());
    assert!(dir.join("tsconfig.json").is_file());

    let manifest = PackageManifest::load(&dir.join("package.json")).unwrap();
    let template = PackageManifest::load(&default_template().join("package.json")).unwrap();
    assert_eq!(manifest.name.as_deref(), Some("my-server"));
    assert_eq!(manifest.version.as_deref(), Some("0.1.0"));
    assert_eq!(manifest.private, Some(true));
    assert_eq!(manifest.scripts, template.scripts);
    assert_eq!(manifest.dependencies, template.dependencies);
    assert_eq!(manifest.dev_dependencies, template.dev_dependencies);
    assert!(manifest.extra("description").is_none());
    assert_eq!(manifest.script("eject"), Some("mcp-scripts eject"));

    assert_eq!(
        runner.commands(),
        vec![
            "git init",
            "npm install",
            "git add -A",
            "git commit -m Initial commit from create-mcp-ts",
        ]
    );
}

#[tokio::test]
async fn test_manifest_keys_are_written_in_order() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("my-server");
    ProjectBuilder::new(&dir, TemplateReference::Local(default_template()))
        .build(&RecordingRunner::default(), &())
        .await
        .unwrap();

    let written = fs::read_to_string(dir.join("package.json")).unwrap();
    assert!(written.starts_with("{\n  \"name\": \"my-server\",\n  \"version\": \"0.1.0\",\n  \"private\": true,"));
    assert!(written.ends_with("}\n"));
}

#[tokio::test]
async fn test_excluded_entries_are_not_copied() {
    let tmp = TempDir::new().unwrap();
    let template = tmp.path().join("template");
    write(&template.join("package.json"), r#"{"name":"t","scripts":{"build":"mcp-scripts build"}}"#);
    write(&template.join("node_modules/left/index.js"), "");
    write(&template.join(".git/HEAD"), "ref: refs/heads/main\n");
    write(&template.join("README.md"), "# server\n");
    let dir = tmp.path().join("srv");

    ProjectBuilder::new(&dir, TemplateReference::Local(template))
        .build(&RecordingRunner::default(), &())
        .await
        .unwrap();

    assert!(dir.join("README.md").is_file());
    assert!(!dir.join("node_modules").exists());
    assert!(!dir.join(".git").exists());
}

#[tokio::test]
async fn test_registry_template_is_installed_copied_and_released() {
    let tmp = TempDir::new().unwrap();
    let registry = tmp.path().join("registry");
    common::copy_dir(&default_template(), &registry.join("mcpi-template-default")).unwrap();
    let dir = tmp.path().join("weather");
    let runner = RecordingRunner {
        registry: Some(registry),
        ..RecordingRunner::default()
    };

    let project = ProjectBuilder::new(
        &dir,
        TemplateReference::Registry("mcpi-template-default".into()),
    )
    .build(&runner, &())
    .await
    .unwrap();

    assert_eq!(project.manifest.name.as_deref(), Some("weather"));
    assert_eq!(
        project.manifest.script("build"),
        Some("mcp-scripts build")
    );
    assert_eq!(
        project.manifest.dependency_version("mcpi-template-default"),
        None
    );
    let commands = runner.commands();
    assert_eq!(commands[0], "npm install");
    assert_eq!(commands[1], "npm uninstall mcpi-template-default");
    assert_eq!(commands[2], "git init");
    assert_eq!(commands[3], "npm install");
}

#[tokio::test]
async fn test_failed_registry_install_is_cleaned_up() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("my-server");
    let runner = RecordingRunner {
        failing: vec!["npm install"],
        ..RecordingRunner::default()
    };

    let err = ProjectBuilder::new(
        &dir,
        TemplateReference::Registry("mcpi-template-default".into()),
    )
    .build(&runner, &())
    .await
    .unwrap_err();

    match err {
        ScaffoldError::TemplateInstallFailure { template, reason } => {
            assert_eq!(template, "mcpi-template-default");
            assert!(reason.contains("exit code 1"), "{reason}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        runner.commands(),
        vec!["npm install", "npm uninstall mcpi-template-default"]
    );
    assert!(!runner.commands().iter().any(|c| c.starts_with("git")));

    let left = PackageManifest::load(&dir.join("package.json")).unwrap();
    let stub = PackageManifest::installer_stub("mcpi-template-default");
    assert_eq!(left.name, None);
    assert_eq!(left.scripts, None);
    assert_eq!(left.dependencies, stub.dependencies);
    assert_eq!(left.dev_dependencies, None);
}

#[tokio::test]
async fn test_missing_local_template() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope");
    let err = ProjectBuilder::new(
        tmp.path().join("my-server"),
        TemplateReference::Local(missing.clone()),
    )
    .build(&RecordingRunner::default(), &())
    .await
    .unwrap_err();

    assert!(matches!(err, ScaffoldError::TemplateNotFound(path) if path == missing));
}

#[tokio::test]
async fn test_project_inside_template_directory() {
    let tmp = TempDir::new().unwrap();
    let template = tmp.path().join("template");
    common::copy_dir(&default_template(), &template).unwrap();
    let dir = template.join("my-server");

    let project = ProjectBuilder::new(&dir, TemplateReference::Local(template.clone()))
        .build(&RecordingRunner::default(), &())
        .await
        .unwrap();

    assert_eq!(project.manifest.name.as_deref(), Some("my-server"));
    assert!(dir.join("src/index.ts").is_file());
    assert!(!dir.join("my-server").exists());
}
