//! Statistics example: check how a generator distributes its values.

use tumble::*;

#[derive(Debug, Clone)]
enum Shape {
    Point,
    Circle(i64),
    Rect(i64, i64),
}

fn main() {
    println!("Tumble Statistics Examples");
    println!();

    // Example 1: One label per value
    println!("Natural numbers below 1000, low or high");
    let result = statistics(
        Gen::nat(999),
        |v: &i64| if *v < 100 { "low" } else { "high" },
        Parameters::new().with_num_runs(1000).with_seed(1),
    );
    if let Err(error) = result {
        println!("Statistics failed: {error}");
    }
    println!();

    // Example 2: Several labels per value
    println!("Integers in [-50, 50], sign and parity");
    let result = statistics(
        Gen::int_range(-50, 50),
        |v: &i64| {
            let sign = match v.signum() {
                -1 => "negative",
                0 => "zero",
                _ => "positive",
            };
            let parity = if v % 2 == 0 { "even" } else { "odd" };
            [sign, parity]
        },
        Parameters::new().with_num_runs(500).with_seed(2),
    );
    if let Err(error) = result {
        println!("Statistics failed: {error}");
    }
    println!();

    // Example 3: Weighted shapes, degenerate ones also counted as shapes
    println!("Shapes picked by weight");
    let shapes = Gen::frequency(vec![
        WeightedEntry::new(1, Gen::constant(Shape::Point)),
        WeightedEntry::new(2, Gen::nat(10).map(Shape::Circle)),
        WeightedEntry::new(2, Gen::nat(10).map(|side| Shape::Rect(side, side * 2))),
    ]);
    let result = shapes.and_then(|shapes| {
        statistics(
            &shapes,
            |shape: &Shape| match shape {
                Shape::Point => Labels::from("point"),
                Shape::Circle(0) | Shape::Rect(0, _) => Labels::from(vec!["degenerate", "shape"]),
                Shape::Circle(_) | Shape::Rect(..) => Labels::from("shape"),
            },
            Parameters::new().with_num_runs(400).with_seed(3),
        )
    });
    if let Err(error) = result {
        println!("Statistics failed: {error}");
    }
    println!();

    // Example 4: Collect the numbers instead of printing them
    println!("Report rows for a fair coin");
    match sample(Gen::bool(), Parameters::new().with_num_runs(200).with_seed(4)) {
        Ok(flips) => {
            let report = StatisticsReport::collect(
                flips,
                |heads: &bool| if *heads { "heads" } else { "tails" },
                200,
            );
            for row in report.rows() {
                println!("  {} -> {} ({:.2}%)", row.label, row.count, row.percentage);
            }
        }
        Err(error) => println!("Sampling failed: {error}"),
    }
}
