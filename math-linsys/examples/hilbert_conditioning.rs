//! Hilbert Conditioning - Watch the LDR pivots collapse as the order grows
//!
//! Hilbert matrices `H_ij = 1/(i+j+1)` are the classic ill-conditioned family.
//! For each order this prints both condition numbers, the smallest LDR pivot
//! and the solve residual for `H x = H·1`.
//!
//! # Usage
//! ```bash
//! RUST_LOG=warn cargo run --release --example hilbert_conditioning
//! ```

use math_audio_linsys::{
    LdrFactorization, LinSysError, Matrix, SolverConfig, Vector, residual_norm_inf,
};

fn main() -> Result<(), LinSysError> {
    env_logger::init();

    println!("=== Hilbert Conditioning ===\n");
    println!(
        "{:>3} {:>12} {:>12} {:>12} {:>12}",
        "n", "cond_1", "cond_inf", "min pivot", "residual"
    );

    for n in 2..=14 {
        let h: Matrix = Matrix::hilbert(n);
        let ones = Vector::from_vec(vec![1.0; n]);
        let b = h.mul_vector(&ones)?;

        let mut system = LdrFactorization::new(&h, b.clone())?;
        let min_pivot = system
            .factor()?
            .d()
            .diagonal()
            .iter()
            .fold(f64::INFINITY, |acc, &p| acc.min(p.abs()));
        let x = system.resolve_partial()?;
        let residual = residual_norm_inf(&h, &x, &b)?;

        println!(
            "{:>3} {:>12.3e} {:>12.3e} {:>12.3e} {:>12.3e}",
            n,
            h.cond_1()?,
            h.cond_inf()?,
            min_pivot,
            residual
        );
    }

    println!("\nStrict pivot policy:");
    for n in 5..=8 {
        let h: Matrix = Matrix::hilbert(n);
        let mut system =
            LdrFactorization::with_config(&h, Vector::basis(n, 0), SolverConfig::strict())?;
        match system.factor() {
            Ok(_) => println!("  n = {}: accepted", n),
            Err(e) => println!("  n = {}: {}", n, e),
        }
    }

    Ok(())
}
