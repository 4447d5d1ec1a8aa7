//! Workspace discovery integration tests.
//!
//! Covers project-file discovery, unit ownership, enumeration order,
//! excluded directories and files that fail to load.

use std::fs;
use std::path::{Path, PathBuf};

use hermes::{LoadErrorKind, Module, Workspace};
use tempfile::TempDir;

const PROJECT: &str = "<Project Sdk=\"Microsoft.NET.Sdk\">\n</Project>\n";

/// Create a temporary workspace with the given files.
fn workspace_with_files(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("should create temp dir");

    for (path, content) in files {
        let full_path = dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("should create parent dirs");
        }
        fs::write(&full_path, content).expect("should write file");
    }

    dir
}

fn module_names(workspace: &Workspace) -> Vec<&str> {
    workspace.modules().iter().map(Module::name).collect()
}

fn unit_paths(module: &Module) -> Vec<PathBuf> {
    module.units().iter().map(|u| u.path().to_path_buf()).collect()
}

#[test]
fn project_files_define_modules_in_path_order() {
    let dir = workspace_with_files(&[
        ("src/Sample.Domain/Sample.Domain.csproj", PROJECT),
        ("src/Sample.Domain/Foo.cs", "class Foo { }"),
        ("src/Sample.Api/Sample.Api.csproj", PROJECT),
        ("src/Sample.Api/Program.cs", "class Program { }"),
        ("src/Sample.Application/Sample.Application.csproj", PROJECT),
    ]);

    let workspace = Workspace::load(dir.path()).expect("should load");

    assert_eq!(
        module_names(&workspace),
        vec!["Sample.Api", "Sample.Application", "Sample.Domain"]
    );
    assert_eq!(workspace.unit_count(), 2);
    assert!(workspace.errors().is_empty());
}

#[test]
fn units_are_sorted_and_relative_to_root() {
    let dir = workspace_with_files(&[
        ("Sample.Domain/Sample.Domain.csproj", PROJECT),
        ("Sample.Domain/CommandHandlers/B.cs", "class B { }"),
        ("Sample.Domain/CommandHandlers/A.cs", "class A { }"),
        ("Sample.Domain/Models/C.cs", "class C { }"),
    ]);

    let workspace = Workspace::load(dir.path()).expect("should load");

    assert_eq!(
        unit_paths(&workspace.modules()[0]),
        vec![
            PathBuf::from("Sample.Domain/CommandHandlers/A.cs"),
            PathBuf::from("Sample.Domain/CommandHandlers/B.cs"),
            PathBuf::from("Sample.Domain/Models/C.cs"),
        ]
    );
}

#[test]
fn nested_project_owns_its_own_sources() {
    let dir = workspace_with_files(&[
        ("Outer/Outer.csproj", PROJECT),
        ("Outer/A.cs", "class A { }"),
        ("Outer/Inner/Inner.csproj", PROJECT),
        ("Outer/Inner/B.cs", "class B { }"),
    ]);

    let workspace = Workspace::load(dir.path()).expect("should load");

    assert_eq!(module_names(&workspace), vec!["Outer", "Inner"]);
    assert_eq!(
        unit_paths(&workspace.modules()[0]),
        vec![PathBuf::from("Outer/A.cs")]
    );
    assert_eq!(
        unit_paths(&workspace.modules()[1]),
        vec![PathBuf::from("Outer/Inner/B.cs")]
    );
}

#[test]
fn build_and_hidden_directories_are_skipped() {
    let dir = workspace_with_files(&[
        ("App/App.csproj", PROJECT),
        ("App/Handler.cs", "class Handler { }"),
        ("App/obj/Debug/Generated.cs", "class Generated { }"),
        ("App/bin/Release/Copied.cs", "class Copied { }"),
        ("App/.vs/Cache.cs", "class Cache { }"),
    ]);

    let workspace = Workspace::load(dir.path()).expect("should load");

    assert_eq!(
        unit_paths(&workspace.modules()[0]),
        vec![PathBuf::from("App/Handler.cs")]
    );
}

#[test]
fn loose_sources_form_a_single_module() {
    let dir = workspace_with_files(&[
        ("Handlers/FooHandler.cs", "class FooHandler { }"),
        ("Models/Foo.cs", "class Foo { }"),
    ]);

    let workspace = Workspace::load(dir.path()).expect("should load");

    let expected = dir
        .path()
        .canonicalize()
        .expect("temp dir exists")
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .expect("temp dir has a name");
    assert_eq!(module_names(&workspace), vec![expected.as_str()]);
    assert_eq!(workspace.unit_count(), 2);
}

#[test]
fn non_utf8_source_is_recorded_and_skipped() {
    let dir = workspace_with_files(&[
        ("App/App.csproj", PROJECT),
        ("App/Good.cs", "class Good { }"),
    ]);
    fs::write(dir.path().join("App/Bad.cs"), [0xff, 0xfe, 0x63, 0x00, 0x6c])
        .expect("should write file");

    let workspace = Workspace::load(dir.path()).expect("loading must not abort");

    assert_eq!(
        unit_paths(&workspace.modules()[0]),
        vec![PathBuf::from("App/Good.cs")]
    );
    assert_eq!(workspace.errors().len(), 1);
    let error = &workspace.errors()[0];
    assert_eq!(error.path, Path::new("App/Bad.cs"));
    assert_eq!(error.kind, LoadErrorKind::EncodingError);
    assert!(error.kind.is_input_error());
}

#[test]
fn malformed_source_still_loads() {
    let malformed = "public class Broken : IRequestHandler<FooCommand\n{\n    void Handle(FooCommand c {\n";
    let dir = workspace_with_files(&[
        ("App/App.csproj", PROJECT),
        ("App/Broken.cs", malformed),
    ]);

    let workspace = Workspace::load(dir.path()).expect("should load");

    assert_eq!(workspace.unit_count(), 1);
    assert!(workspace.errors().is_empty());
}

#[test]
fn root_is_canonical() {
    let dir = workspace_with_files(&[("App/App.csproj", PROJECT)]);

    let workspace = Workspace::load(dir.path()).expect("should load");

    assert_eq!(
        workspace.root(),
        dir.path().canonicalize().expect("temp dir exists")
    );
}
