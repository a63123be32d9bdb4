//! Compare generated terrain across the map size presets

use hexplate::*;
use std::time::Instant;

fn main() -> Result<()> {
    let sizes = [
        MapSize::Duel,
        MapSize::Tiny,
        MapSize::Small,
        MapSize::Standard,
        MapSize::Large,
        MapSize::Huge,
    ];

    println!("Surveying map sizes with seed 42...\n");
    println!(
        "{:<10} {:>7} {:>7} {:>6} {:>7} {:>7} {:>9} {:>10}",
        "Size", "Tiles", "Plates", "Land", "Land%", "Rough", "Mountain", "Time"
    );

    for size in sizes {
        let config = MapConfigBuilder::new().seed(42).map_size(size).build()?;

        let start = Instant::now();
        let map = WorldMap::generate(config)?;
        let elapsed = start.elapsed();

        let stats = map.statistics();
        let land_plates = map.plates().iter().filter(|p| p.is_land).count();
        println!(
            "{:<10} {:>7} {:>7} {:>6} {:>6.1}% {:>7} {:>9} {:>10.1?}",
            size.name(),
            stats.total,
            map.plates().len(),
            land_plates,
            stats.land_percent,
            stats.rough,
            stats.mountain,
            elapsed
        );
    }

    // Same size, different seeds
    println!("\nSeed spread on {}:", MapSize::Standard.name());
    for seed in 1..=5 {
        let config = MapConfigBuilder::new()
            .seed(seed)
            .map_size(MapSize::Standard)
            .build()?;
        let map = WorldMap::generate(config)?;
        let stats = map.statistics();
        println!(
            "  seed {}: {:>5.1}% water, {:>5.1}% land",
            seed, stats.water_percent, stats.land_percent
        );
    }

    Ok(())
}
