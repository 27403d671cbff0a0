//! Shared helpers for the integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use bpl_cli::test_utils::TemplateTree;
use std::path::PathBuf;
use tempfile::TempDir;

/// A template plus a separate working directory to generate into.
pub struct TestProject {
    pub template: TemplateTree,
    pub work: TempDir,
}

impl TestProject {
    pub fn new(template: TemplateTree) -> Self {
        Self {
            template,
            work: TempDir::new().unwrap(),
        }
    }

    /// Default generation target inside the working directory.
    pub fn target(&self) -> PathBuf {
        self.work.path().join("generated")
    }

    /// A path inside the working directory.
    pub fn work_path(&self, relative: &str) -> PathBuf {
        self.work.path().join(relative)
    }

    /// Writes a file into the working directory.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.work_path(relative);
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Reads a generated file.
    pub fn read_generated(&self, relative: &str) -> String {
        std::fs::read_to_string(self.target().join(relative))
            .unwrap_or_else(|e| panic!("Failed to read generated {relative}: {e}"))
    }

    /// The `bpl` binary, run from the working directory with a clean
    /// environment for the variables bpl reads.
    pub fn bpl(&self) -> Command {
        let mut cmd = Command::cargo_bin("bpl").unwrap();
        cmd.current_dir(self.work.path()).env_remove("BPL_CONFIG").env_remove("RUST_LOG");
        cmd
    }

    /// `bpl generate <template> <target>` ready for more arguments.
    pub fn generate(&self) -> Command {
        let mut cmd = self.bpl();
        cmd.arg("generate").arg(self.template.path()).arg(self.target());
        cmd
    }
}

/// A small console application template.
pub fn console_app() -> TemplateTree {
    TemplateTree::new()
        .file(
            "__Project__.sln",
            "Project(\"{{GUID(0)}}\") = \"{{Project}}\", \"{{Project}}\\{{Project}}.csproj\"\n",
        )
        .file(
            "__Project__/__Project__.csproj",
            "<ProjectGuid>{{{GUID(0)}}}</ProjectGuid>\n<RootNamespace>{{Project}}</RootNamespace>\n",
        )
        .file(
            "__Project__/Program.cs",
            "// {{author.name}} <{{author.email}}>\nnamespace {{Project}}\n{\n    // {{PROJECT}} {{project}}\n}\n",
        )
}
