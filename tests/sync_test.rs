use serde_json::json;
use std::fs;
use std::path::Path;
use tacklebox::config::{ConfigData, ProjectConfig, TemplateSetting};
use tacklebox::error::Error;
use tacklebox::renderer::DirectiveRenderer;
use tacklebox::sync::{plan_sync, sync};
use tacklebox::template::Template;
use tempfile::TempDir;

fn setting(name: &str, location: &str, settings: serde_json::Value) -> TemplateSetting {
    TemplateSetting {
        name: name.to_string(),
        location: location.into(),
        settings: serde_json::from_value(settings).unwrap(),
    }
}

/// Writes two templates into `root/templates` and returns a config for one
/// project at `root/project`.
fn fixture(root: &Path) -> ConfigData {
    let templates = root.join("templates");
    fs::create_dir_all(&templates).unwrap();
    fs::write(templates.join("LICENSE"), "Copyright {% render(year) %} {% render(owner) %}\n")
        .unwrap();
    fs::write(templates.join("ci.yml"), "lint: {% if(strict) \"deny\" ? \"warn\" %}\n").unwrap();

    let mut config = ConfigData::default();
    config.templates = vec![
        Template::new("license", templates.join("LICENSE")),
        Template::new("ci", templates.join("ci.yml")),
    ];
    config
        .global_templates
        .insert("strict-ci".to_string(), setting("ci", ".ci/ci.yml", json!({"strict": true})));
    config.projects.push(ProjectConfig {
        globals: vec!["strict-ci".to_string()],
        name: "project".to_string(),
        location: root.join("project"),
        template_settings: vec![setting(
            "license",
            "LICENSE",
            json!({"year": 2024, "owner": "Ada"}),
        )],
    });
    config
}

#[test_log::test]
fn test_sync_writes_project_files() {
    let temp_dir = TempDir::new().unwrap();
    let config = fixture(temp_dir.path());
    let engine = DirectiveRenderer::new().unwrap();

    let expected = temp_dir.path().join("expected");
    fs::create_dir_all(expected.join(".ci")).unwrap();
    fs::write(expected.join("LICENSE"), "Copyright 2024 Ada\n").unwrap();
    fs::write(expected.join(".ci/ci.yml"), "lint: deny\n").unwrap();

    let written = sync(&config, &engine).unwrap();

    assert_eq!(written.len(), 2);
    assert!(!dir_diff::is_different(temp_dir.path().join("project"), &expected).unwrap());
}

#[test]
fn test_plan_sync_does_not_write() {
    let temp_dir = TempDir::new().unwrap();
    let config = fixture(temp_dir.path());
    let engine = DirectiveRenderer::new().unwrap();

    let files = plan_sync(&config, &engine).unwrap();

    assert_eq!(files[0].target, temp_dir.path().join("project/LICENSE"));
    assert_eq!(files[0].content, "Copyright 2024 Ada\n");
    assert_eq!(files[1].target, temp_dir.path().join("project/.ci/ci.yml"));
    assert!(!temp_dir.path().join("project").exists());
}

#[test]
fn test_sync_unknown_template() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = fixture(temp_dir.path());
    config.projects[0].template_settings.push(setting("readme", "README.md", json!({})));
    let engine = DirectiveRenderer::new().unwrap();

    match sync(&config, &engine) {
        Err(Error::TemplateNotFound { name }) => assert_eq!(name, "readme"),
        other => panic!("Expected TemplateNotFound, got {other:?}"),
    }
}

#[test]
fn test_sync_unknown_global() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = fixture(temp_dir.path());
    config.projects[0].globals.push("missing".to_string());
    let engine = DirectiveRenderer::new().unwrap();

    match sync(&config, &engine) {
        Err(Error::GlobalNotFound { project, global }) => {
            assert_eq!(project, "project");
            assert_eq!(global, "missing");
        }
        other => panic!("Expected GlobalNotFound, got {other:?}"),
    }
}

#[test_log::test]
fn test_sync_render_error_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = fixture(temp_dir.path());
    config.global_templates["strict-ci"].settings.insert("strict".to_string(), json!("yes"));
    let engine = DirectiveRenderer::new().unwrap();

    let result = sync(&config, &engine);

    assert!(matches!(result, Err(Error::TypeMismatch { .. })));
    assert!(!temp_dir.path().join("project/LICENSE").exists());
}
