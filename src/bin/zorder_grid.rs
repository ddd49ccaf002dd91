/// Prints the chunkified index of every cell in the first slice of a layout
///
/// Usage: zorder_grid [layout.toml]
/// Without a config file the default 2x2x2 layout of 4-wide chunks is used.

use anyhow::{Context, Result};
use chunk_morton::{ChunkLayout, LayoutConfig};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => LayoutConfig::from_file(&path)
            .with_context(|| format!("failed to load layout config from {}", path))?,
        None => LayoutConfig::default(),
    };
    let layout = config.build().context("layout config is not usable")?;

    log::info!(
        "Layout: {} axes, chunk size {} (padded to {}), span {:?}",
        layout.dimensions(),
        layout.chunk_size(),
        layout.padded_chunk_size(),
        layout.chunk_span()
    );

    print_slice(&layout)
}

/// Rows are axis 1, columns axis 0, every other axis held at 0
fn print_slice(layout: &ChunkLayout) -> Result<()> {
    let extent = layout.world_extent();
    let columns = extent[0];
    let rows = extent.get(1).copied().unwrap_or(1);
    let width = layout.index_capacity().to_string().len();

    for y in 0..rows {
        let mut line = String::new();
        for x in 0..columns {
            let mut coords = vec![0u64; layout.dimensions()];
            coords[0] = x;
            if coords.len() > 1 {
                coords[1] = y;
            }
            let index = layout.chunkified_index(&coords)?;
            line.push_str(&format!("{:>width$} ", index, width = width));
            if (x + 1) % layout.chunk_size() == 0 && x + 1 < columns {
                line.push_str("| ");
            }
        }
        println!("{}", line.trim_end());
    }

    Ok(())
}
