//! End-to-end handler resolution over workspaces written to disk.
//!
//! Each test lays out a small solution with project files, loads it through
//! `Hermes::open` and checks the reported handler locations.

use std::fs;
use std::path::Path;

use hermes::{Hermes, HermesConfig, Module, SourceUnit, Strategy, Workspace};
use proptest::prelude::*;
use tempfile::TempDir;

const PROJECT: &str = "<Project Sdk=\"Microsoft.NET.Sdk\">\n</Project>\n";

const FOO_HANDLER: &str = r"using MediatR;

namespace Sample.Domain.CommandHandlers;

public class FooHandler : IRequestHandler<FooCommand>
{
    private readonly IRepository _repository;

    public FooHandler(IRepository repository) => _repository = repository;
    public Task Handle(FooCommand cmd, CancellationToken ct)
    {
        return Task.CompletedTask;
    }
}
";

/// Create a temporary workspace with the given files and open it.
fn workspace_with_files(files: &[(&str, &str)]) -> (TempDir, Hermes) {
    let dir = tempfile::tempdir().expect("should create temp dir");

    for (path, content) in files {
        let full_path = dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("should create parent dirs");
        }
        fs::write(&full_path, content).expect("should write file");
    }

    let hermes = Hermes::open(dir.path()).expect("should open workspace");
    (dir, hermes)
}

fn sample_solution() -> (TempDir, Hermes) {
    workspace_with_files(&[
        ("Sample.Domain/Sample.Domain.csproj", PROJECT),
        (
            "Sample.Domain/Commands/FooCommand.cs",
            "namespace Sample.Domain.Commands;\n\npublic record FooCommand(int Id);\n",
        ),
        ("Sample.Domain/CommandHandlers/FooHandler.cs", FOO_HANDLER),
        ("Sample.Application/Sample.Application.csproj", PROJECT),
        (
            "Sample.Application/QueryHandlers/GetOrderHandler.cs",
            r"namespace Sample.Application.QueryHandlers;

public class GetOrderHandler : IRequestHandler<GetOrderQuery, OrderDto>
{
    public Task<OrderDto> Handle(GetOrderQuery query, CancellationToken ct)
    {
        return Task.FromResult(new OrderDto());
    }
}
",
        ),
        ("Sample.Api/Sample.Api.csproj", PROJECT),
        (
            "Sample.Api/Controllers/OrdersController.cs",
            r"public class OrdersController
{
    public OrdersController()
    {
        var count = 42;
    }
}
",
        ),
    ])
}

// === Command strategy ===

#[test]
fn command_handler_is_found_at_its_handle_line() {
    let (_dir, hermes) = sample_solution();

    let resolution = hermes.resolve("FooCommand");

    assert_eq!(resolution.strategy, Strategy::Command);
    assert_eq!(resolution.module.as_deref(), Some("Sample.Domain"));
    let only = resolution.unique().expect("exactly one handler");
    assert_eq!(
        only.path,
        Path::new("Sample.Domain/CommandHandlers/FooHandler.cs")
    );
    assert_eq!(only.line, 10);
    assert_eq!(only.column, None);
    assert_eq!(
        only.display(),
        "Sample.Domain/CommandHandlers/FooHandler.cs:10"
    );
}

#[test]
fn command_without_domain_project_reports_missing_module() {
    let (_dir, hermes) = workspace_with_files(&[
        ("Sample.Api/Sample.Api.csproj", PROJECT),
        ("Sample.Api/CommandHandlers/FooHandler.cs", FOO_HANDLER),
    ]);

    let resolution = hermes.resolve("FooCommand");

    assert!(resolution.is_empty());
    assert!(resolution.module_missing());
}

// === Request strategy ===

#[test]
fn query_handler_is_found_in_application_project() {
    let (_dir, hermes) = sample_solution();

    let resolution = hermes.resolve("GetOrderQuery");

    assert_eq!(resolution.strategy, Strategy::Request);
    assert_eq!(resolution.module.as_deref(), Some("Sample.Application"));
    let only = resolution.unique().expect("exactly one handler");
    assert_eq!(
        only.path,
        Path::new("Sample.Application/QueryHandlers/GetOrderHandler.cs")
    );
    assert_eq!(only.line, 5);
}

#[test]
fn response_type_argument_does_not_match_as_handled_type() {
    let (_dir, hermes) = sample_solution();

    // OrderDto is a type argument of the interface, but no method takes it
    // as its first parameter.
    let resolution = hermes.resolve_with("OrderDto", Strategy::Request);

    assert!(resolution.is_empty());
}

// === Solution-wide strategy ===

#[test]
fn solution_wide_reports_every_module_in_order() {
    let (_dir, hermes) = workspace_with_files(&[
        ("Billing/Billing.csproj", PROJECT),
        (
            "Billing/Handlers/BarHandler.cs",
            "public class BarHandler\n{\n    public void Handle(BarQuery q) { }\n}\n",
        ),
        ("Shipping/Shipping.csproj", PROJECT),
        (
            "Shipping/Handlers/BarHandler.cs",
            "public class BarHandler\n{\n    public void Handle(BarQuery q) { }\n}\n",
        ),
    ]);

    let resolution = hermes.resolve_with("BarQuery", Strategy::SolutionWide);

    let shown: Vec<String> = resolution.locations.iter().map(|l| l.display()).collect();
    assert_eq!(
        shown,
        vec![
            "Billing/Handlers/BarHandler.cs:3:13",
            "Shipping/Handlers/BarHandler.cs:3:13",
        ]
    );
}

#[test]
fn unknown_name_yields_nothing() {
    let (_dir, hermes) = sample_solution();

    let resolution = hermes.resolve("Baz");

    assert_eq!(resolution.strategy, Strategy::SolutionWide);
    assert!(resolution.is_empty());
}

// === Cursor-driven resolution ===

#[test]
fn cursor_on_record_name_resolves_its_handler() {
    let (dir, hermes) = sample_solution();
    let file = dir.path().join("Sample.Domain/Commands/FooCommand.cs");
    let offset = hermes
        .offset_of(&file, 3, 15)
        .expect("unit exists")
        .expect("position is inside the file");

    let resolution = hermes
        .resolve_at(&file, offset)
        .expect("unit exists")
        .expect("record is a supported context");

    assert_eq!(resolution.query, "FooCommand");
    assert_eq!(resolution.locations.len(), 1);
}

#[test]
fn cursor_on_numeric_literal_is_not_a_supported_context() {
    let (_dir, hermes) = sample_solution();
    let file = Path::new("Sample.Api/Controllers/OrdersController.cs");
    let offset = hermes
        .offset_of(file, 5, 21)
        .expect("unit exists")
        .expect("position is inside the file");

    let result = hermes.resolve_at(file, offset).expect("unit exists");

    assert!(result.is_none());
}

#[test]
fn cursor_on_var_keyword_never_queries_the_placeholder() {
    let (_dir, hermes) = sample_solution();
    let file = Path::new("Sample.Api/Controllers/OrdersController.cs");
    let offset = hermes
        .offset_of(file, 5, 9)
        .expect("unit exists")
        .expect("position is inside the file");

    if let Some(resolution) = hermes.resolve_at(file, offset).expect("unit exists") {
        assert_ne!(resolution.query, "var");
        assert!(resolution.is_empty());
    }
}

// === Configuration ===

#[test]
fn workspace_configuration_changes_conventions() {
    let (_dir, hermes) = workspace_with_files(&[
        (
            ".hermes/config.yaml",
            "method-marker: Consume\ncommand:\n  module-suffix: core\n  name-suffixes: [command]\n  folders: [handlers]\n",
        ),
        ("Sample.Core/Sample.Core.csproj", PROJECT),
        (
            "Sample.Core/Handlers/FooHandler.cs",
            "class FooHandler : IRequestHandler<FooCommand>\n{\n    void Handle(FooCommand c) { }\n}\n",
        ),
        (
            "Sample.Core/Consumers/BarConsumer.cs",
            "class BarConsumer\n{\n    void Consume(BarEvent e) { }\n}\n",
        ),
    ]);

    assert_eq!(hermes.config().method_marker, "Consume");

    let command = hermes.resolve("FooCommand");
    assert_eq!(command.module.as_deref(), Some("Sample.Core"));
    assert_eq!(command.locations.len(), 1);

    let event = hermes.resolve("BarEvent");
    assert_eq!(event.strategy, Strategy::SolutionWide);
    assert_eq!(event.locations.len(), 1);
}

#[test]
fn invalid_configuration_fails_to_open() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let config_path = HermesConfig::default_path(dir.path());
    fs::create_dir_all(config_path.parent().expect("config dir")).expect("should create dir");
    fs::write(&config_path, "interface-marker: ''\n").expect("should write config");

    let err = Hermes::open(dir.path()).expect_err("empty marker must be rejected");

    assert!(matches!(err, hermes::Error::Config(_)));
}

// === Properties ===

fn in_memory_hermes() -> Hermes {
    let domain = Module::new(
        "Sample.Domain",
        vec![SourceUnit::parse("Sample.Domain/CommandHandlers/FooHandler.cs", FOO_HANDLER)
            .expect("grammar should load")],
    );
    let shared = Module::new(
        "Shared",
        vec![SourceUnit::parse(
            "Shared/BarHandler.cs",
            "class BarHandler { void Handle(BarQuery q) { } }",
        )
        .expect("grammar should load")],
    );
    Hermes::with_config(
        Workspace::from_modules("/solution", vec![domain, shared]),
        HermesConfig::default(),
    )
}

proptest! {
    #[test]
    fn names_absent_from_the_workspace_never_resolve(
        name in "Unknown[A-Za-z]{0,8}(Command|Request|Query)?"
    ) {
        let hermes = in_memory_hermes();
        prop_assert!(hermes.resolve(&name).is_empty());
    }

    #[test]
    fn resolution_is_idempotent(
        name in prop::sample::select(vec!["FooCommand", "BarQuery", "Baz", "var", "IRepository"])
    ) {
        let hermes = in_memory_hermes();
        let first = hermes.resolve(name);
        let second = hermes.resolve(name);
        prop_assert_eq!(first, second);
    }
}
