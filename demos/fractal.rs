//! Maps how many Bairstow iterations each starting guess `(u, v)` needs to
//! factor `x^4 + 1`, and writes the result as a heat map.

use bairstow::{poly, roots::bairstow_iterations, QuadraticFactor};
use itertools::Itertools;
use plotly::{common::Title, HeatMap, Layout, Plot};

const WIDTH: usize = 600;
const HEIGHT: usize = 400;
const MAX_ITER: usize = 50;

fn main() -> anyhow::Result<()> {
    let p = poly![1.0, 0.0, 0.0, 0.0, 1.0];

    let us = (0..WIDTH)
        .map(|i| (i as f64 / (WIDTH - 1) as f64).mul_add(6.0, -3.0))
        .collect_vec();
    let vs = (0..HEIGHT)
        .map(|j| (j as f64 / (HEIGHT - 1) as f64).mul_add(4.0, -2.0))
        .collect_vec();

    let iterations = vs
        .iter()
        .map(|&v| {
            us.iter()
                .map(|&u| {
                    bairstow_iterations(&p, QuadraticFactor::new(u, v), None, Some(MAX_ITER))
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut plot = Plot::new();
    plot.add_trace(HeatMap::new(us, vs, iterations));
    plot.set_layout(Layout::new().title(Title::with_text("Bairstow iterations for x^4 + 1")));

    std::fs::create_dir_all("temp")?;
    plot.write_html("temp/fractal.html");
    Ok(())
}
