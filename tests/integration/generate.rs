use predicates::prelude::*;

use crate::common::{TestProject, console_app};
use bpl_cli::test_utils::TemplateTree;

/// Inline values drive both file names and contents
#[test]
fn test_generate_with_inline_values() {
    let project = TestProject::new(console_app());

    project
        .generate()
        .arg("--values")
        .arg("Project=Widget,author.name=Jane Doe,author.email=jane@example.com")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated"));

    let program = project.read_generated("Widget/Program.cs");
    assert!(program.starts_with("// jane doe <jane@example.com>\nnamespace Widget\n"));
    assert!(program.contains("// WIDGET widget"));

    let sln = project.read_generated("Widget.sln");
    let csproj = project.read_generated("Widget/Widget.csproj");
    let guid = sln.split('"').nth(1).unwrap().to_string();
    assert_eq!(guid.len(), 36);
    assert_eq!(guid, guid.to_uppercase());
    assert!(csproj.contains(&format!("<ProjectGuid>{{{guid}}}</ProjectGuid>")));
}

/// INI configuration with sections
#[test]
fn test_generate_with_ini_config() {
    let project = TestProject::new(console_app());
    let config = project.write(
        "values.ini",
        "; console app\nProject = Widget\n\n[author]\nname = Jane\nemail = jane@example.com\n",
    );

    project.generate().arg("--config").arg(&config).assert().success();

    assert!(project.read_generated("Widget/Program.cs").contains("// jane <jane@example.com>"));
}

/// JSON configuration picked by extension
#[test]
fn test_generate_with_json_config() {
    let project = TestProject::new(TemplateTree::new().file("__name__.txt", "{{Name}} by {{author.name}}"));
    let config = project.write(
        "values.json",
        r#"{
            "named_values": [{ "name": "Name", "value": "Widget" }],
            "sections": [{ "name": "author", "named_values": [{ "name": "name", "value": "Jane" }] }]
        }"#,
    );

    project.generate().arg("-c").arg(&config).assert().success();

    assert_eq!(project.read_generated("widget.txt"), "Widget by jane");
}

/// The configuration path can come from the environment
#[test]
fn test_config_from_environment() {
    let project = TestProject::new(TemplateTree::new().file("out.txt", "{{Name}}"));
    let config = project.write("values.ini", "name = FromEnv\n");

    project.generate().env("BPL_CONFIG", &config).assert().success();

    assert_eq!(project.read_generated("out.txt"), "FromEnv");
}

#[test]
fn test_missing_config_file() {
    let project = TestProject::new(console_app());

    project
        .generate()
        .arg("--config")
        .arg("does-not-exist.ini")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
    assert!(!project.target().exists());
}

#[test]
fn test_malformed_config_file() {
    let project = TestProject::new(console_app());
    let config = project.write("values.ini", "Project = Widget\n[author\n");

    project
        .generate()
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
    assert!(!project.target().exists());
}

/// A name defined in the file and on the command line is rejected
#[test]
fn test_duplicate_value_across_sources() {
    let project = TestProject::new(console_app());
    let config = project.write("values.ini", "Project = Widget\n");

    project
        .generate()
        .arg("--config")
        .arg(&config)
        .arg("--values")
        .arg("PROJECT=Gadget")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate entry"));
}

#[test]
fn test_existing_target_files_need_force() {
    let project = TestProject::new(TemplateTree::new().file("readme.txt", "{{name}}"));

    project.generate().arg("--values").arg("name=first").assert().success();

    project
        .generate()
        .arg("--values")
        .arg("name=second")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("Generation finished with failures"));
    assert_eq!(project.read_generated("readme.txt"), "first");

    project.generate().arg("--values").arg("name=second").arg("--force").assert().success();
    assert_eq!(project.read_generated("readme.txt"), "second");
}

#[test]
fn test_target_inside_template_is_rejected() {
    let project = TestProject::new(TemplateTree::new().file("a.txt", "a"));

    project
        .bpl()
        .arg("generate")
        .arg(project.template.path())
        .arg(project.template.join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("inside the template directory"));
    assert!(!project.template.join("out").exists());
}

#[test]
fn test_missing_template() {
    let project = TestProject::new(TemplateTree::new());

    project
        .bpl()
        .arg("generate")
        .arg(project.work_path("no-template"))
        .arg(project.target())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template source directory not found"));
}
