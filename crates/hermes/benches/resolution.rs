//! Benchmarks for handler resolution.
//!
//! These benchmarks measure:
//! - Workspace loading (discovery plus parallel parsing)
//! - Each resolution strategy over a loaded workspace
//! - Scaling of the solution-wide scan with workspace size

// Benchmark code - performance of the benchmark setup is not critical
#![allow(missing_docs)]
#![allow(clippy::format_push_string)]
#![allow(clippy::missing_panics_doc)]

use std::fs;
use std::path::Path;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use hermes::{Hermes, Strategy, Workspace};
use tempfile::TempDir;

const PROJECT: &str = "<Project Sdk=\"Microsoft.NET.Sdk\">\n</Project>\n";

/// Generate a command handler with some surrounding noise.
fn generate_handler(name: &str, helpers: usize) -> String {
    let mut code = String::new();
    code.push_str("using MediatR;\n\nnamespace Bench.Domain.CommandHandlers;\n\n");
    code.push_str(&format!(
        "public class {name}Handler : IRequestHandler<{name}Command>\n{{\n"
    ));
    for i in 0..helpers {
        code.push_str(&format!(
            "    private int Helper{i}(int value)\n    {{\n        var local = value + {i};\n        return local;\n    }}\n\n"
        ));
    }
    code.push_str(&format!(
        "    public Task Handle({name}Command command, CancellationToken ct)\n    {{\n        return Task.CompletedTask;\n    }}\n}}\n"
    ));
    code
}

/// Write a solution with a domain project holding `handlers` command
/// handlers and a shared project with one `Handle` method per handler.
fn create_solution(handlers: usize) -> TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let root = dir.path();

    write(root, "Bench.Domain/Bench.Domain.csproj", PROJECT);
    write(root, "Bench.Shared/Bench.Shared.csproj", PROJECT);
    for i in 0..handlers {
        let name = format!("Order{i}");
        write(
            root,
            &format!("Bench.Domain/CommandHandlers/{name}Handler.cs"),
            &generate_handler(&name, 5),
        );
        write(
            root,
            &format!("Bench.Shared/Events/{name}Listener.cs"),
            &format!("public class {name}Listener\n{{\n    public void Handle({name}Event e) {{ }}\n}}\n"),
        );
    }
    dir
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create parent dirs");
    }
    fs::write(path, content).expect("failed to write file");
}

fn bench_loading(c: &mut Criterion) {
    let mut group = c.benchmark_group("workspace_load");
    for handlers in [10, 100] {
        let dir = create_solution(handlers);
        group.throughput(Throughput::Elements(handlers as u64 * 2));
        group.bench_with_input(BenchmarkId::from_parameter(handlers), &dir, |b, dir| {
            b.iter(|| Workspace::load(black_box(dir.path())).expect("loads"));
        });
    }
    group.finish();
}

fn bench_strategies(c: &mut Criterion) {
    let dir = create_solution(100);
    let hermes = Hermes::open(dir.path()).expect("opens");

    let mut group = c.benchmark_group("resolve");
    group.bench_function("command_last", |b| {
        b.iter(|| hermes.resolve(black_box("Order99Command")));
    });
    group.bench_function("solution_wide", |b| {
        b.iter(|| hermes.resolve_with(black_box("Order50Event"), Strategy::SolutionWide));
    });
    group.bench_function("unknown", |b| {
        b.iter(|| hermes.resolve(black_box("Missing")));
    });
    group.finish();
}

fn bench_solution_wide_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("solution_wide_scaling");
    for handlers in [10, 50, 200] {
        let dir = create_solution(handlers);
        let hermes = Hermes::open(dir.path()).expect("opens");
        group.bench_with_input(BenchmarkId::from_parameter(handlers), &hermes, |b, hermes| {
            b.iter(|| hermes.resolve_with(black_box("Order0Event"), Strategy::SolutionWide));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_loading,
    bench_strategies,
    bench_solution_wide_scaling
);
criterion_main!(benches);
