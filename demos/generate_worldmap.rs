//! Complete workflow demonstration for hexplate

use hexplate::*;

fn main() -> Result<()> {
    println!("=== hexplate Complete Demo ===\n");

    // Step 1: Configure the map
    println!("Step 1: Configuring map...");
    let config = MapConfigBuilder::new()
        .seed_text("uncharted waters")
        .map_size(MapSize::Duel)
        .build()?;

    println!("  Seed: {}", config.seed);
    println!(
        "  Size: {} ({}x{} tiles)",
        config.map_size.name(),
        config.width(),
        config.height()
    );
    println!("  Plates: {}", config.plate_count);

    // Step 2: Generate the map
    println!("\nStep 2: Generating world map...");
    let map = WorldMap::generate(config)?;
    let land_plates = map.plates().iter().filter(|p| p.is_land).count();
    println!("  Generated {} tiles", map.cell_count());
    println!("  Land plates: {} / {}", land_plates, map.plates().len());

    // Step 3: Terrain distribution
    println!("\nStep 3: Terrain distribution:");
    let stats = map.statistics();
    println!("  Water:     {:5} ({:.1}%)", stats.water, stats.water_percent);
    println!("  Flat:      {:5}", stats.flat);
    println!("  Rough:     {:5}", stats.rough);
    println!("  Mountains: {:5}", stats.mountain);

    // Step 4: Render the grid
    println!("\nStep 4: Map ({}x{}):", map.width(), map.height());
    render(&map);

    // Step 5: Query the spatial index
    #[cfg(feature = "spatial-index")]
    {
        println!("\nStep 5: Spatial queries:");
        let pos = map.bounds().center();
        let region_id = map.region_at(pos);
        let plate = map.plate(region_id).unwrap();
        println!(
            "  Position ({:.1}, {:.1}) -> region {} (land plate: {})",
            pos.x, pos.y, region_id, plate.is_land
        );
        let nearby = map.cells_within_hops(map.width() as i32 / 2, map.height() as i32 / 2, 2);
        println!("  {} tiles within 2 hops of the center tile", nearby.len());
    }

    // Step 6: Replay the terrain pass without erosion
    println!("\nStep 6: Rebuilding grid with erosion disabled...");
    let mut params = RasterParams::from_config(map.config());
    params.erosion_chance = 0.0;
    let calm = map.rebuild_grid_with(&params)?;
    let regained = calm
        .iter()
        .zip(map.cells())
        .filter(|(c, o)| c.terrain.is_land() && o.terrain.is_water())
        .count();
    println!("  {} coastal tiles kept instead of eroded", regained);

    println!("\n=== Demo Complete ===");
    Ok(())
}

/// Print one glyph per tile, odd rows indented half a step like the hex grid
fn render(map: &WorldMap) {
    for y in 0..map.height() as i32 {
        let mut line = String::new();
        if y % 2 == 1 {
            line.push(' ');
        }
        for x in 0..map.width() as i32 {
            line.push(glyph(map.cell_at(x, y).unwrap().terrain));
            line.push(' ');
        }
        println!("  {}", line);
    }
}

fn glyph(terrain: TerrainType) -> char {
    match terrain {
        TerrainType::Water => '~',
        TerrainType::Flat => '.',
        TerrainType::Rough => ':',
        TerrainType::Mountainous | TerrainType::Volcano => '^',
    }
}
