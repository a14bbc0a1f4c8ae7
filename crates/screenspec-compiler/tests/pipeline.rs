use std::fs;
use std::path::Path;

use screenspec_codegen::Framework;
use screenspec_compiler::{
    CompileError, CompileOptions, Compiler, CompilerConfig, ScreenErrorKind,
};
use serde_json::json;
use tempfile::TempDir;

fn write_json(path: &Path, value: serde_json::Value) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
}

fn project(framework: Framework) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_json(
        &dir.path().join("screenspec.json"),
        json!({
            "framework": framework.as_str(),
            "tokens": "tokens.json",
            "registryPath": "components.json",
            "outDir": "out"
        }),
    );
    write_json(
        &dir.path().join("tokens.json"),
        json!({"color": {"primary": {"value": "#3366ff", "type": "color"}}}),
    );
    write_json(
        &dir.path().join("components.json"),
        json!([{
            "id": "banner",
            "name": "Banner",
            "tree": {"id": "banner-root", "type": "Text", "props": {"text": "Welcome"}}
        }]),
    );
    write_json(
        &dir.path().join("specs/home.screen.json"),
        json!({
            "version": 1,
            "route": "/",
            "meta": {"title": "Home"},
            "tree": {
                "id": "root",
                "type": "Stack",
                "style": {"color": "$color.primary"},
                "children": [
                    {"id": "title", "type": "Heading", "props": {"text": "Hello"}},
                    {"id": "hero", "type": "ComponentRef", "props": {"ref": "banner"}}
                ]
            }
        }),
    );
    dir
}

fn compiler(dir: &TempDir) -> Compiler {
    let config = CompilerConfig::load(&dir.path().join("screenspec.json")).unwrap();
    Compiler::from_config(config).unwrap()
}

#[test]
fn test_compile_writes_screen_and_barrel() {
    let dir = project(Framework::React);
    let report = compiler(&dir).compile(CompileOptions::default()).unwrap();

    assert!(report.is_success());
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.written, 2);

    let screen =
        fs::read_to_string(dir.path().join("out/components/generated/HomeScreen.tsx")).unwrap();
    assert!(screen.contains("Welcome"));
    assert!(screen.contains("#3366ff"));
    assert!(!screen.contains("$color.primary"));

    let barrel = fs::read_to_string(dir.path().join("out/components/generated/index.ts")).unwrap();
    assert!(barrel.contains("HomeScreen"));
}

#[test]
fn test_invalid_screen_is_reported_and_skipped() {
    let dir = project(Framework::React);
    write_json(
        &dir.path().join("specs/settings.screen.json"),
        json!({"version": 1, "route": "/settings", "tree": {"id": "root", "type": 42}}),
    );

    let report = compiler(&dir).compile(CompileOptions::default()).unwrap();

    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].route.as_deref(), Some("/settings"));
    assert!(matches!(report.errors[0].kind, ScreenErrorKind::Invalid(_)));
    assert!(!report.is_success());

    let generated = dir.path().join("out/components/generated");
    assert!(generated.join("HomeScreen.tsx").exists());
    assert!(!generated.join("SettingsScreen.tsx").exists());
    let barrel = fs::read_to_string(generated.join("index.ts")).unwrap();
    assert!(barrel.contains("HomeScreen"));
    assert!(!barrel.contains("SettingsScreen"));
}

#[test]
fn test_second_run_skips_every_file() {
    for framework in Framework::ALL {
        let dir = project(framework);
        let compiler = compiler(&dir);

        let first = compiler.compile(CompileOptions::default()).unwrap();
        assert_eq!(first.skipped, 0, "{framework}");

        let second = compiler.compile(CompileOptions::default()).unwrap();
        assert_eq!(second.written, 0, "{framework}");
        assert_eq!(second.skipped, first.files(), "{framework}");
    }
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = project(Framework::Swiftui);
    let report = compiler(&dir)
        .compile(CompileOptions { dry_run: true })
        .unwrap();

    assert_eq!(report.written, 2);
    assert_eq!(report.changed.len(), 2);
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_unparsable_spec_aborts_the_run() {
    let dir = project(Framework::Compose);
    fs::write(dir.path().join("specs/broken.screen.json"), "{ not json").unwrap();

    let result = compiler(&dir).compile(CompileOptions::default());
    assert!(matches!(result, Err(CompileError::Json { .. })));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_missing_specs_dir_aborts_the_run() {
    let dir = project(Framework::React);
    fs::remove_dir_all(dir.path().join("specs")).unwrap();

    let result = compiler(&dir).compile(CompileOptions::default());
    assert!(matches!(result, Err(CompileError::MissingSpecsDir(_))));
}

#[test]
fn test_validate_all_reports_without_writing() {
    let dir = project(Framework::React);
    write_json(
        &dir.path().join("specs/about.screen.json"),
        json!({"version": 2, "route": "/about", "tree": {"id": "root", "type": "Stack"}}),
    );

    let summary = compiler(&dir).validate_all().unwrap();
    assert_eq!(summary.checked, 2);
    assert_eq!(summary.errors.len(), 1);
    assert!(summary.errors[0].source.ends_with("about.screen.json"));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_routes_sharing_a_component_name_write_one_file() {
    let dir = project(Framework::React);
    for (file, route, text) in [("team.screen.json", "/team", "first"), ("team-slash.screen.json", "/team/", "second")] {
        write_json(
            &dir.path().join("specs").join(file),
            json!({
                "version": 1,
                "route": route,
                "tree": {"id": "root", "type": "Text", "props": {"text": text}}
            }),
        );
    }

    let report = compiler(&dir).compile(CompileOptions::default()).unwrap();

    assert_eq!(report.succeeded, 2);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].route.as_deref(), Some("/team/"));
    assert!(matches!(report.errors[0].kind, ScreenErrorKind::NameCollision { .. }));

    let generated = dir.path().join("out/components/generated");
    let screen = fs::read_to_string(generated.join("TeamScreen.tsx")).unwrap();
    assert!(screen.contains("first"));
    assert!(!screen.contains("second"));
    let barrel = fs::read_to_string(generated.join("index.ts")).unwrap();
    assert_eq!(barrel.matches("as TeamScreen").count(), 1);
}
