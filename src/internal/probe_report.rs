#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

//! Measures how long probe sequences get as a `ProbingHashtable` fills up,
//! for each probing strategy, and plots the results.

use std::error::Error;

use lineage::{
    LinearProbing, ProbingFunction, ProbingHashtable, QuadraticProbing, StridedProbing,
    TableError, initialize_logger,
};
use log::info;
use plotters::prelude::*;
use rand::Rng;

const TABLE_SIZE: usize = 1 << 16;
// Load factors from 0.1 to 0.95
const NUM_LOAD_FACTORS: usize = 10;
const STRATEGIES: [&str; 3] = ["Linear Probing", "Quadratic Probing", "Strided Probing (7)"];

/// Average and worst probe length of a lookup
#[derive(Debug, Clone, Copy)]
struct ProbeStats {
    average: f64,
    worst: usize,
}

/// Fills a fresh table with `keys` and measures lookups of every key.
fn measure<P: ProbingFunction>(probing: P, keys: &[u64]) -> Result<ProbeStats, TableError> {
    let mut table: ProbingHashtable<u64, (), P> =
        ProbingHashtable::empty(TABLE_SIZE, probing, lineage::IdentityHash)?;
    for &key in keys {
        if table.insert(key, ())?.is_none() {
            table.record_insertion();
        }
    }

    let lengths: Vec<usize> = keys.iter().filter_map(|key| table.probe_length(key)).collect();
    let total: usize = lengths.iter().sum();
    Ok(ProbeStats {
        average: total as f64 / lengths.len().max(1) as f64,
        worst: lengths.iter().copied().max().unwrap_or(0),
    })
}

fn measure_strategy(index: usize, keys: &[u64]) -> Result<ProbeStats, TableError> {
    match index {
        0 => measure(LinearProbing, keys),
        1 => measure(QuadraticProbing, keys),
        _ => measure(StridedProbing::new(7), keys),
    }
}

fn plot(
    path: &str,
    caption: &str,
    y_desc: &str,
    load_factors: &[f64],
    series: &[Vec<f64>],
) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_y = series.iter().flatten().fold(1.0_f64, |max, &x| max.max(x)) * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..1.0, 0.0..max_y)?;

    chart
        .configure_mesh()
        .x_desc("Load Factor")
        .y_desc(y_desc)
        .axis_desc_style(("sans-serif", 16))
        .draw()?;

    for (idx, (name, values)) in STRATEGIES.iter().zip(series).enumerate() {
        let style = Palette99::pick(idx).stroke_width(2);
        chart
            .draw_series(LineSeries::new(
                load_factors.iter().copied().zip(values.iter().copied()),
                style,
            ))?
            .label(*name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    initialize_logger();

    let load_factors: Vec<f64> = (0..NUM_LOAD_FACTORS)
        .map(|i| 0.1 + (0.95 - 0.1) * (i as f64) / ((NUM_LOAD_FACTORS - 1) as f64))
        .collect();

    let mut rng = rand::rng();
    let keys: Vec<u64> = (0..TABLE_SIZE).map(|_| rng.random()).collect();

    let mut average_probes: Vec<Vec<f64>> = vec![Vec::new(); STRATEGIES.len()];
    let mut worst_probes: Vec<Vec<f64>> = vec![Vec::new(); STRATEGIES.len()];

    for &load in &load_factors {
        let n_keys = ((TABLE_SIZE as f64) * load) as usize;
        let sample = keys.get(..n_keys).unwrap_or(keys.as_slice());
        info!("Testing with {n_keys} keys (load factor {load:.2})");

        for (idx, name) in STRATEGIES.iter().enumerate() {
            let stats = measure_strategy(idx, sample)?;
            info!("  {name}: Avg probes = {:.2}, Worst = {}", stats.average, stats.worst);

            if let Some(series) = average_probes.get_mut(idx) {
                series.push(stats.average);
            }
            if let Some(series) = worst_probes.get_mut(idx) {
                series.push(stats.worst as f64);
            }
        }
    }

    plot(
        "average_probe_length.png",
        "Average Lookup Probe Length",
        "Probes per lookup",
        &load_factors,
        &average_probes,
    )?;
    plot(
        "worst_probe_length.png",
        "Worst-Case Lookup Probe Length",
        "Probes",
        &load_factors,
        &worst_probes,
    )?;

    info!("Generated plot images: average_probe_length.png, worst_probe_length.png");
    Ok(())
}
