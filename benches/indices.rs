use boidbench::{IndexKind, PointId, Vector2D};
use criterion::{criterion_group, BenchmarkId, Criterion};
use plotters::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::process::Command;

/// The part of criterion's `estimates.json` the chart needs.
#[derive(Deserialize)]
struct Estimates {
    median: Estimate,
}

#[derive(Deserialize)]
struct Estimate {
    point_estimate: f64,
    standard_error: f64,
}

/// Median tick cost in ms with a one-standard-error band.
struct Sample {
    boids: usize,
    median_ms: f64,
    error_ms: f64,
}

const SIZES: [usize; 5] = [100, 500, 1000, 2500, 5000];
const WIDTH: f64 = 1200.0;
const HEIGHT: f64 = 800.0;
const RADIUS: f64 = 50.0;

fn random_points(n: usize) -> Vec<(PointId, Vector2D)> {
    let mut rng = StdRng::seed_from_u64(n as u64);
    (0..n)
        .map(|i| (i, Vector2D::new(rng.gen_range(0.0..WIDTH), rng.gen_range(0.0..HEIGHT))))
        .collect()
}

/// One simulation tick worth of index work: a rebuild and a query per point.
fn benchmark_build_and_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("indices");
    group.sample_size(10);

    for &size in &SIZES {
        let points = random_points(size);

        for kind in IndexKind::ALL {
            group.bench_with_input(BenchmarkId::new(kind.name(), size), &points, |b, points| {
                let mut index = kind.create(WIDTH, HEIGHT, RADIUS).unwrap();
                b.iter(|| {
                    index.build(points);
                    let mut found = 0;
                    for &(id, pos) in points {
                        found += index.query_radius(pos, RADIUS, id).len();
                    }
                    found
                })
            });
        }
    }
    group.finish();
}

fn load_samples(group: &Path, kind: IndexKind) -> Result<Vec<Sample>, Box<dyn std::error::Error>> {
    let mut samples = Vec::new();
    for &boids in &SIZES {
        let path = group.join(kind.name()).join(boids.to_string()).join("new/estimates.json");
        if !path.exists() {
            continue;
        }
        let estimates: Estimates = serde_json::from_reader(BufReader::new(File::open(&path)?))?;
        samples.push(Sample {
            boids,
            median_ms: estimates.median.point_estimate / 1e6,
            error_ms: estimates.median.standard_error / 1e6,
        });
    }
    Ok(samples)
}

fn plot_index_results() -> Result<(), Box<dyn std::error::Error>> {
    let group = Path::new("target/criterion/indices");
    if !group.exists() {
        return Ok(());
    }

    let mut series = Vec::new();
    for kind in IndexKind::ALL {
        let samples = load_samples(group, kind)?;
        if !samples.is_empty() {
            series.push((kind, samples));
        }
    }
    let Some(y_max) = series
        .iter()
        .flat_map(|(_, samples)| samples.iter().map(|s| s.median_ms + s.error_ms))
        .reduce(f64::max)
    else {
        return Ok(());
    };
    let y_min = series
        .iter()
        .flat_map(|(_, samples)| samples.iter().map(|s| (s.median_ms - s.error_ms).max(1e-6)))
        .fold(f64::INFINITY, f64::min);

    let revision = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "local".to_string());
    let out_dir = Path::new("benches/results");
    std::fs::create_dir_all(out_dir)?;
    let out_file = out_dir.join(format!("bench_indices_{revision}.png"));

    let area = BitMapBackend::new(&out_file, (1024, 768)).into_drawing_area();
    area.fill(&WHITE)?;

    let x_range = (SIZES[0] as f64 * 0.8)..(SIZES[SIZES.len() - 1] as f64 * 1.25);
    let mut chart = ChartBuilder::on(&area)
        .caption(
            format!("Index build + {RADIUS} radius queries, {WIDTH}x{HEIGHT}"),
            ("sans-serif", 28).into_font(),
        )
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range.log_scale(), (y_min * 0.5..y_max * 2.0).log_scale())?;

    chart
        .configure_mesh()
        .x_desc("Boids")
        .y_desc("Median time per tick (ms)")
        .draw()?;

    let palette = [RED, BLUE, GREEN, MAGENTA];
    for (i, (kind, samples)) in series.iter().enumerate() {
        let color = palette[i % palette.len()];
        let line = samples.iter().map(|s| (s.boids as f64, s.median_ms));

        chart
            .draw_series(LineSeries::new(line, color.stroke_width(2)))?
            .label(kind.name())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));

        chart.draw_series(samples.iter().map(|s| {
            ErrorBar::new_vertical(
                s.boids as f64,
                (s.median_ms - s.error_ms).max(1e-6),
                s.median_ms,
                s.median_ms + s.error_ms,
                color.filled(),
                8,
            )
        }))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    area.present()?;
    println!("Plot saved to {}", out_file.display());
    Ok(())
}

criterion_group!(benches, benchmark_build_and_query);

fn main() {
    benches();
    if let Err(e) = plot_index_results() {
        eprintln!("Error generating plot: {}", e);
    }
}
