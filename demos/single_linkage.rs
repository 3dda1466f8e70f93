//! Single-linkage clustering of a small 2D dataset under two distances.
//!
//! Run with `RUST_LOG=strand=trace` to see every merge.

use strand::{
    cophenetic, resolve, Canberra, FeatureDistance, KernelDistance, SigmoidKernel, SingleLinkage,
};
use tracing_subscriber::EnvFilter;

fn main() -> strand::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let data: Vec<Vec<f64>> = vec![
        // Group A
        vec![1.0, 1.0],
        vec![1.1, 1.2],
        vec![0.9, 1.1],
        // Group B
        vec![-3.0, 4.0],
        vec![-3.2, 4.1],
        // Group C
        vec![5.0, -2.0],
        vec![5.1, -2.2],
    ];
    let n = data.len();

    // --- Canberra ---
    let oracle = FeatureDistance::new(data.clone(), Canberra)?;
    let history = SingleLinkage::exhaustive(n, oracle)?.run()?;
    println!("=== Canberra merge history ===");
    for r in &history {
        println!(
            "  step {}: {:>2} + {:>2} at {:.4} (size {})",
            r.step, r.cluster_a, r.cluster_b, r.distance, r.size
        );
    }
    for k in [3, 2, 1] {
        println!("  k={k}: {:?}", resolve(&history, k)?);
    }

    let coph = cophenetic(&history);
    println!("  cophenetic(0, 3) = {:.4}", coph.get(0, 3));

    // --- Sigmoid kernel, bounded run ---
    let kernel = SigmoidKernel::new(0.1, 0.0)?;
    let oracle = FeatureDistance::new(data, KernelDistance::new(kernel))?;
    let history = SingleLinkage::new(n, oracle, n - 3)?.run()?;
    println!("\n=== Sigmoid kernel ({} merges) ===", history.merge_count());
    println!("  k=3: {:?}", history.final_assignment());

    Ok(())
}
