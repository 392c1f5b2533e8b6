//! Demo binary: runs the locator over a synthetic walk through the
//! floor plan and prints the resulting trajectory.

use rssi_locator::{
    Hit, Locator, LocatorConfig, ObservationPeriod, ReceiverTable, TriangulationStrategy,
};

fn demo_receiver_table() -> ReceiverTable {
    // Raw floor-plan pixel positions for the fixed receivers
    let mut table = ReceiverTable::new();
    table.insert(1, 520.0, 620.0);
    table.insert(2, 850.0, 240.0);
    table.insert(3, 1420.0, 700.0);
    table.insert(4, 900.0, 980.0);
    table
}

fn demo_hit_log() -> Vec<Hit> {
    // A short walk: lingering near receiver 1, crossing toward
    // receiver 2, a silent stretch, then receivers 2 and 3 together
    vec![
        Hit::new(0.2, 1, -58.0, "p01"),
        Hit::new(0.7, 1, -60.0, "p01"),
        Hit::new(1.3, 1, -63.0, "p01"),
        Hit::new(1.8, 2, -78.0, "p02"),
        Hit::new(2.4, 1, -70.0, "p01"),
        Hit::new(2.6, 2, -72.0, "p02"),
        Hit::new(3.1, 2, -66.0, "p02"),
        Hit::new(3.9, 2, -61.0, "p02"),
        Hit::new(6.2, 2, -64.0, "p02"),
        Hit::new(6.8, 3, -79.0, "p03"),
        Hit::new(7.4, 3, -71.0, "p03"),
    ]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    let mut config = LocatorConfig::default();
    if args.len() == 2 && args[1] == "--aggregate" {
        config.strategy = TriangulationStrategy::Aggregate;
    }

    let locator = Locator::new(config, demo_receiver_table())?;
    let hits = demo_hit_log();
    let period = ObservationPeriod::from_epoch(0.0, 8.0);

    println!("Indoor Locator demo");
    println!("strategy: {:?}", locator.config().strategy);
    println!("hits: {}, observation: {:.0}s\n", hits.len(), period.end - period.start);

    let trajectory = locator.locate(&hits, &period)?;

    println!("{:>8}  {:>8}  {:>8}  {:<16} receivers", "time", "x", "y", "room");
    for point in &trajectory {
        println!(
            "{:>8.1}  {:>8.1}  {:>8.1}  {:<16} {:?} x{:?}",
            point.timestamp, point.x, point.y, point.room, point.receivers, point.hit_counts
        );
    }

    println!("\ntrajectory as JSON:");
    println!("{}", serde_json::to_string_pretty(&trajectory)?);

    Ok(())
}
