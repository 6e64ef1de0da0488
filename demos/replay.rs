//! Replay example: walk a recorded shrink path again.

use tumble::*;

fn main() {
    println!("Tumble Replay Examples");
    println!();

    let gen = Gen::int_range(0, 10_000);
    let base = Parameters::new().with_num_runs(5).with_seed(2024);

    // Example 1: The raw tosses
    println!("First five tosses of seed 2024");
    match sample(&gen, base.clone()) {
        Ok(values) => println!("  {values:?}"),
        Err(error) => println!("  Sampling failed: {error}"),
    }
    println!();

    // Example 2: Start from toss 3
    println!("Path \"3\": tosses from the fourth one on");
    match sample(&gen, base.clone().with_path("3")) {
        Ok(values) => println!("  {values:?}"),
        Err(error) => println!("  Replay failed: {error}"),
    }
    println!();

    // Example 3: Walk down the shrink tree of toss 3
    for path in ["3:0", "3:1", "3:1:2"] {
        println!("Path \"{path}\"");
        match sample(&gen, base.clone().with_path(path)) {
            Ok(values) => println!("  {values:?}"),
            Err(error) => println!("  Replay failed: {error}"),
        }
    }
    println!();

    // Example 4: Extending a path one shrink round at a time
    let mut path = ReplayPath::new(vec![3]);
    loop {
        let next = path.then(0);
        match sample(&gen, base.clone().with_num_runs(1).with_path(next.to_string())) {
            Ok(values) => {
                println!("Path \"{next}\" reaches {values:?}");
                path = next;
            }
            Err(error) => {
                println!("Stopped: {error}");
                break;
            }
        }
    }
    println!();

    // Example 5: Malformed paths are configuration errors
    match sample(&gen, base.with_path("3:x")) {
        Ok(_) => println!("Malformed path unexpectedly accepted"),
        Err(error) => println!("Malformed path rejected: {error}"),
    }
}
