use predicates::prelude::*;

use crate::common::{TestProject, console_app};

#[test]
fn test_describe_console_app() {
    let project = TestProject::new(console_app());

    project
        .bpl()
        .arg("describe")
        .arg(project.template.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Template: "))
        .stdout(predicate::str::contains("__Project__/Program.cs"))
        .stdout(predicate::str::contains("[function]             guid(0)"))
        .stdout(predicate::str::contains("[needs to be defined]  author.email"))
        .stdout(predicate::str::contains("Replacement functions used:\n\tguid(0)\n"))
        .stdout(predicate::str::contains("Names to be defined:\n\tproject\n\t[author]\n\t\temail\n\t\tname\n"));

    assert!(!project.target().exists());
}

#[test]
fn test_describe_marks_excluded_content() {
    let project = TestProject::new(
        bpl_cli::test_utils::TemplateTree::new()
            .file("docs/logo.svg", "{{hidden}}")
            .file("lib/__GITCLONE__", "https://example.com/lib.git\n"),
    );

    project
        .bpl()
        .arg("describe")
        .arg(project.template.path())
        .arg("--extensions-to-ignore")
        .arg("svg")
        .assert()
        .success()
        .stdout(predicate::str::contains("The content of the file was excluded from parsing."))
        .stdout(predicate::str::contains("[special file]         __GITCLONE__"))
        .stdout(predicate::str::contains("Special files used:\n\tlib/__GITCLONE__\n"))
        .stdout(predicate::str::contains("hidden").not());
}

#[test]
fn test_describe_missing_template() {
    let project = TestProject::new(bpl_cli::test_utils::TemplateTree::new());

    project
        .bpl()
        .arg("describe")
        .arg(project.work_path("nothing-here"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template source directory not found"));
}
