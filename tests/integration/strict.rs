use predicates::prelude::*;

use crate::common::TestProject;
use bpl_cli::test_utils::TemplateTree;

/// Without --strict, unknown placeholders stay as they are
#[test]
fn test_lenient_mode_keeps_unknown_placeholders() {
    let project = TestProject::new(
        TemplateTree::new().file("__unknown__/notes.txt", "{{known}} {{unknown}} {{ known"),
    );

    project.generate().arg("--values").arg("known=yes").assert().success();

    assert_eq!(project.read_generated("__unknown__/notes.txt"), "yes {{unknown}} {{ known");
}

/// A strict failure is reported with its position, and other entries are
/// still generated
#[test]
fn test_strict_mode_reports_every_failure() {
    let project = TestProject::new(
        TemplateTree::new()
            .file("a.txt", "first line\n  {{projct}}\n")
            .file("b.txt", "{{project}}")
            .file("c.txt", "{{ also_missing }}"),
    );

    project
        .generate()
        .arg("--values")
        .arg("project=Widget")
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("projct"))
        .stderr(predicate::str::contains("line 2, column 3"))
        .stderr(predicate::str::contains("also_missing"))
        .stderr(predicate::str::contains("2 template entries could not be generated"));

    assert_eq!(project.read_generated("b.txt"), "widget");
    assert!(!project.target().join("a.txt").exists());
}

/// One extra delimiter character in front of a placeholder is literal text
#[test]
fn test_strict_mode_allows_single_extra_delimiter() {
    let project = TestProject::new(
        TemplateTree::new().file("___name__.txt", "{{{name}}}").file("____name__.txt", "x"),
    );

    project
        .generate()
        .arg("--values")
        .arg("name=Widget")
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("____name__.txt"));

    assert_eq!(project.read_generated("_widget.txt"), "{widget}");
}

#[test]
fn test_strict_mode_rejects_unterminated_placeholder() {
    let project = TestProject::new(TemplateTree::new().file("a.txt", "value {{name"));

    project
        .generate()
        .arg("--values")
        .arg("name=x")
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Non-terminated replacement"));
}
