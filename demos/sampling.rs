//! Sampling example: look at what generators produce.

use tumble::*;

fn main() {
    println!("Tumble Sampling Examples");
    println!();

    // Example 1: Plain integers, biased towards small values on early runs
    println!("Sampling ten integers in [-1000, 1000] with seed 42");
    let ints = Gen::int_range(-1000, 1000);
    match sample(&ints, Parameters::new().with_num_runs(10).with_seed(42)) {
        Ok(values) => println!("  {values:?}"),
        Err(error) => println!("  Sampling failed: {error}"),
    }
    println!();

    // Example 2: The same seed without bias
    println!("Same seed, unbiased");
    match sample(
        &ints,
        Parameters::new()
            .with_num_runs(10)
            .with_seed(42)
            .with_unbiased(true),
    ) {
        Ok(values) => println!("  {values:?}"),
        Err(error) => println!("  Sampling failed: {error}"),
    }
    println!();

    // Example 3: Weighted choice, one constant for every three integers
    println!("Frequency: constant 5 with weight 1, [0, 100] with weight 3");
    let weighted = Gen::frequency(vec![
        WeightedEntry::new(1, Gen::constant(5)),
        WeightedEntry::new(3, Gen::int_range(0, 100)),
    ]);
    match weighted.and_then(|gen| sample(&gen, Parameters::new().with_num_runs(12).with_seed(42))) {
        Ok(values) => println!("  {values:?}"),
        Err(error) => println!("  Sampling failed: {error}"),
    }
    println!();

    // Example 4: Forced examples come before any random value
    println!("Examples first, then ChaCha8 draws");
    match sample(
        Gen::nat(9),
        Parameters::new()
            .with_num_runs(6)
            .with_seed(7)
            .with_random_type(RandomType::ChaCha8)
            .with_examples(vec![100, 200]),
    ) {
        Ok(values) => println!("  {values:?}"),
        Err(error) => println!("  Sampling failed: {error}"),
    }
    println!();

    // Example 5: Invalid configurations are reported, not panicked on
    println!("Zero total weight is rejected");
    match Gen::frequency(vec![WeightedEntry::new(0, Gen::constant(1))]) {
        Ok(_) => println!("  Unexpectedly accepted"),
        Err(error) => println!("  {error}"),
    }
}
