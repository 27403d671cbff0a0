use predicates::prelude::*;

use crate::common::{TestProject, console_app};

#[test]
fn test_generate_blank_ini_config() {
    let project = TestProject::new(console_app());
    let config = project.work_path("values.ini");

    project
        .bpl()
        .arg("generate-config")
        .arg(project.template.path())
        .arg(&config)
        .arg("--extensions-to-ignore")
        .arg("png")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 names to define"));

    assert_eq!(
        std::fs::read_to_string(&config).unwrap(),
        "extensions_to_ignore = png\nfiles_to_ignore =\nproject =\n\n[author]\nemail =\nname =\n"
    );
}

#[test]
fn test_generate_blank_json_config() {
    let project = TestProject::new(console_app());
    let config = project.work_path("values.json");

    project
        .bpl()
        .arg("generate-config")
        .arg(project.template.path())
        .arg(&config)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&config).unwrap()).unwrap();
    assert_eq!(json["named_values"][0]["name"], "project");
    assert_eq!(json["sections"][0]["name"], "author");
    assert_eq!(json["sections"][0]["named_values"].as_array().unwrap().len(), 2);
}

#[test]
fn test_existing_config_needs_force() {
    let project = TestProject::new(console_app());
    let config = project.write("values.ini", "keep = me\n");

    project
        .bpl()
        .arg("generate-config")
        .arg(project.template.path())
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(std::fs::read_to_string(&config).unwrap(), "keep = me\n");

    project
        .bpl()
        .arg("generate-config")
        .arg(project.template.path())
        .arg(&config)
        .arg("--force")
        .assert()
        .success();
    assert!(std::fs::read_to_string(&config).unwrap().contains("[author]"));
}

/// A generated blank configuration, once filled in, generates the template
/// in strict mode
#[test]
fn test_filled_blank_config_generates_strictly() {
    let project = TestProject::new(console_app());
    let config = project.work_path("values.ini");

    project
        .bpl()
        .arg("generate-config")
        .arg(project.template.path())
        .arg(&config)
        .assert()
        .success();

    let filled = std::fs::read_to_string(&config)
        .unwrap()
        .replace("project =", "project = Widget")
        .replace("email =", "email = jane@example.com")
        .replace("name =", "name = Jane");
    std::fs::write(&config, filled).unwrap();

    project.generate().arg("--config").arg(&config).arg("--strict").assert().success();

    assert!(project.read_generated("Widget/Program.cs").contains("namespace Widget"));
}
