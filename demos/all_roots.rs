//! Solves a handful of reference polynomials and prints every deflation
//! round. The solver's own debug logs are interleaved with the summary.

use bairstow::{BairstowFinder, Poly64, QuadraticFactor};

fn main() -> anyhow::Result<()> {
    simple_logger::init_with_level(log::Level::Debug)?;

    let polys: [&[f64]; 5] = [
        &[1.0, 0.0, 0.0, -1.0],
        &[1.0, -1.0, 2.0, 5.0],
        &[1.0, 0.0, 0.0, 0.0, 15.0, 0.0, 0.0, 0.0, -16.0],
        &[1.0, -8.0, -72.0, 382.0, 727.0, -2310.0],
        &[1.0, 20.4, 151.3, 490.0, 687.0, 719.0, 150.0, 109.0, 6.87],
    ];

    for coeffs in polys {
        let poly = Poly64::try_new(coeffs)?;
        let solution = BairstowFinder::from_poly(poly.clone())
            .with_initial_guess(QuadraticFactor::new(1.0, 1.0))
            .solve()?;

        println!("p(x) = {poly}");
        for (i, round) in solution.rounds.iter().enumerate() {
            println!(
                "  round {i}: {} after {} iterations ({:?}), roots {} and {}",
                round.refinement.factor,
                round.refinement.iterations,
                round.refinement.status,
                round.roots[0],
                round.roots[1],
            );
        }
        println!("  tail: {}", solution.tail.poly);
        println!("  roots: {}", solution.roots);
        println!("  max |p(r)|: {:e}", solution.max_residual());
        if !solution.within_tolerance() {
            println!("  residuals are out of tolerance");
        }
    }
    Ok(())
}
