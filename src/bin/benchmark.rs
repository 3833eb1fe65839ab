//! Serial vs parallel generation throughput for the per-cell automata

use std::time::Instant;

use cellular_automata::{AutomatonConfig, AutomatonKind, ExecutionMode, Result};

/// Average milliseconds per generation
fn benchmark(kind: AutomatonKind, size: usize, execution: ExecutionMode, iterations: u32) -> Result<f64> {
    let mut engine = AutomatonConfig::for_kind(kind, size)
        .with_execution(execution)
        .with_seed(42)
        .build()?;

    let start = Instant::now();
    for _ in 0..iterations {
        engine.step();
    }
    Ok(start.elapsed().as_secs_f64() * 1000.0 / iterations as f64)
}

fn main() -> Result<()> {
    println!("=== Cellular Automata Step Benchmark ===\n");

    let cases: [(AutomatonKind, &[usize]); 4] = [
        (AutomatonKind::Cca2D, &[100, 200, 500, 1000, 2000]),
        (AutomatonKind::Conway, &[100, 200, 500, 1000, 2000]),
        (AutomatonKind::QuadLife, &[100, 500, 1000]),
        (AutomatonKind::Cca3D, &[16, 32, 64]),
    ];
    let iterations = 20;

    println!("{:>14} {:>14} {:>12} {:>12} {:>10}", "Automaton", "Size", "Serial", "Parallel", "Speedup");
    println!("{:-<66}", "");

    for (kind, sizes) in cases {
        for &size in sizes {
            let serial_ms = benchmark(kind, size, ExecutionMode::Serial, iterations)?;
            let parallel_ms = benchmark(kind, size, ExecutionMode::Parallel, iterations)?;
            let dims = kind
                .dimensions(size)
                .size()
                .iter()
                .map(usize::to_string)
                .collect::<Vec<_>>()
                .join("x");
            println!(
                "{:>14} {:>14} {:>12.2} {:>12.2} {:>9.1}x",
                kind.name(),
                dims,
                serial_ms,
                parallel_ms,
                serial_ms / parallel_ms
            );
        }
    }

    println!("\n=== Throughput at 2000x2000 ===\n");

    let cells = 2000 * 2000;
    for kind in [AutomatonKind::Cca2D, AutomatonKind::Conway] {
        let ms = benchmark(kind, 2000, ExecutionMode::Parallel, iterations)?;
        println!(
            "{:<10} {:.2} ms/gen, {:.1}M cells/sec",
            kind.name(),
            ms,
            cells as f64 / (ms / 1000.0) / 1_000_000.0
        );
    }
    Ok(())
}
