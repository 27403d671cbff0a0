use crate::common::TestProject;
use bpl_cli::test_utils::TemplateTree;

fn template() -> TemplateTree {
    TemplateTree::new()
        .file("src/__name__.txt", "{{name}}")
        .file("assets/__name__.PNG", "{{name}} raw")
        .file("binfiles/x64/__name__.dll", "{{name}} raw")
        .file("vendor/jquery.min.js", "{{name}} raw")
        .bytes("assets/logo.ico", &[0, 159, 146, 150])
}

/// Ignore lists from the command line
#[test]
fn test_ignore_lists_from_command_line() {
    let project = TestProject::new(template());

    project
        .generate()
        .arg("--values")
        .arg("name=widget")
        .arg("--extensions-to-ignore")
        .arg("png, .ICO")
        .arg("--files-to-ignore")
        .arg("binfiles,*.min.js")
        .assert()
        .success();

    assert_eq!(project.read_generated("src/widget.txt"), "widget");
    assert_eq!(project.read_generated("assets/widget.PNG"), "{{name}} raw");
    assert_eq!(project.read_generated("binfiles/x64/widget.dll"), "{{name}} raw");
    assert_eq!(project.read_generated("vendor/jquery.min.js"), "{{name}} raw");
    assert_eq!(
        std::fs::read(project.target().join("assets/logo.ico")).unwrap(),
        vec![0, 159, 146, 150]
    );
}

/// Ignore lists from the configuration file
#[test]
fn test_ignore_lists_from_config() {
    let project = TestProject::new(template());
    let config = project.write(
        "values.ini",
        "extensions_to_ignore = png, ico\nfiles_to_ignore = binfiles, *.min.js\nname = widget\n",
    );

    project.generate().arg("--config").arg(&config).assert().success();

    assert_eq!(project.read_generated("binfiles/x64/widget.dll"), "{{name}} raw");
    assert_eq!(project.read_generated("src/widget.txt"), "widget");
}

/// A binary file that is not ignored fails on its own
#[test]
fn test_binary_file_without_ignore_rule_fails() {
    let project = TestProject::new(template());

    project.generate().arg("--values").arg("name=widget").assert().failure();

    assert_eq!(project.read_generated("src/widget.txt"), "widget");
    assert!(!project.target().join("assets/logo.ico").exists());
}

/// Wildcard extension rules
#[test]
fn test_wildcard_extension_rules() {
    let project = TestProject::new(template());

    project
        .generate()
        .arg("--values")
        .arg("name=widget")
        .arg("--extensions-to-ignore")
        .arg("p?g,.ic*")
        .arg("--files-to-ignore")
        .arg("binfiles,*.min.js")
        .assert()
        .success();

    assert_eq!(project.read_generated("assets/widget.PNG"), "{{name}} raw");
    assert_eq!(
        std::fs::read(project.target().join("assets/logo.ico")).unwrap(),
        vec![0, 159, 146, 150]
    );
    assert_eq!(project.read_generated("src/widget.txt"), "widget");
}
