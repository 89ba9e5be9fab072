use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use nz_twin::scene::{demo_fan, demo_mixed};
use nz_twin::{image_out, verify, RenderJob, TriangleResult, Twin, TwinConfig};
use nz_twin_core::{PatchCoverage, TileOrigin, Triangle};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "nz-twin")]
#[command(about = "Rasterize triangles on the rasterizer unit digital twin", long_about = None)]
#[command(version)]
struct Cli {
    /// Triangle as x1,y1,x2,y2,x3,y3 in pixels (repeatable)
    #[arg(long = "tri", value_parser = parse_triangle, allow_hyphen_values = true)]
    triangles: Vec<Triangle>,

    /// Built-in scene used when no --tri is given
    #[arg(long, value_enum, default_value_t = Scene::Fan)]
    scene: Scene,

    /// Tile as tile_x,tile_y (64-pixel units, negative allowed)
    #[arg(long, value_parser = parse_tile, default_value = "0,0", allow_hyphen_values = true)]
    tile: TileOrigin,

    /// Swap vertices of back-facing triangles instead of rasterizing them as given
    #[arg(long)]
    fix_winding: bool,

    /// Unit clocks per host register access
    #[arg(long, default_value_t = TwinConfig::default().cycles_per_access)]
    cycles_per_access: u32,

    /// Status polls without progress before giving up
    #[arg(long, default_value_t = TwinConfig::default().poll_limit)]
    poll_limit: u32,

    /// Write a PNG of the tile's coverage
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write delivered patches per triangle as JSON
    #[arg(long)]
    report: Option<PathBuf>,

    /// Output pixels per rasterized pixel
    #[arg(long, default_value_t = TwinConfig::default().scale)]
    scale: u32,

    /// Check coverage against the per-pixel reference
    #[arg(long)]
    verify: bool,

    /// Suppress progress output (only show errors)
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Scene {
    /// Eight triangles fanned across the tile
    Fan,
    /// A sliver, a small triangle and one larger than the tile
    Mixed,
}

fn parse_numbers<const N: usize>(s: &str) -> Result<[i16; N], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(format!("expected {N} comma-separated values, got {}", parts.len()));
    }
    let mut out = [0i16; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part
            .parse()
            .map_err(|e| format!("'{part}' is not a 16-bit integer: {e}"))?;
    }
    Ok(out)
}

fn parse_triangle(s: &str) -> Result<Triangle, String> {
    parse_numbers::<6>(s).map(Triangle::from_coords)
}

fn parse_tile(s: &str) -> Result<TileOrigin, String> {
    let [x, y] = parse_numbers::<2>(s)?;
    // The unit takes the low 10 bits, so -1 is the tile left of/above 0.
    Ok(TileOrigin::new(x as u16, y as u16))
}

/// One triangle's entry in the JSON report.
#[derive(Serialize)]
struct TriangleReport<'a> {
    triangle: &'a Triangle,
    tile: TileOrigin,
    patches: &'a [PatchCoverage],
    pixels: u32,
}

fn reports(results: &[TriangleResult]) -> Vec<TriangleReport<'_>> {
    results
        .iter()
        .map(|r| TriangleReport {
            triangle: &r.job.triangle,
            tile: r.job.tile,
            patches: &r.patches,
            pixels: r.coverage.count(),
        })
        .collect()
}

fn write_report(path: &Path, results: &[TriangleResult]) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, &reports(results))?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        log::LevelFilter::Error
    } else {
        match cli.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn jobs(cli: &Cli) -> Vec<RenderJob> {
    if cli.triangles.is_empty() {
        return match cli.scene {
            Scene::Fan => demo_fan(cli.tile),
            Scene::Mixed => demo_mixed(cli.tile),
        };
    }
    cli.triangles
        .iter()
        .map(|t| {
            let tri = if cli.fix_winding { t.front_facing() } else { *t };
            if tri.signed_area2() > 0 {
                log::warn!("{:?} faces away and covers nothing", tri.vertices);
            }
            RenderJob::new(tri, cli.tile)
        })
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    if cli.scale > 64 {
        bail!("scale {} would produce a {}-pixel image", cli.scale, 64 * cli.scale);
    }

    let config = TwinConfig {
        cycles_per_access: cli.cycles_per_access,
        poll_limit: cli.poll_limit,
        scale: cli.scale,
    };
    let mut twin = Twin::new(config).context("Failed to set up the twin")?;
    let jobs = jobs(&cli);
    let results = twin.render(&jobs).context("Rasterization failed")?;

    if !cli.quiet {
        for (i, r) in results.iter().enumerate() {
            let v = r.job.triangle.vertices;
            println!(
                "#{i}: ({},{}) ({},{}) ({},{}) -> {} patches, {} pixels",
                v[0].x,
                v[0].y,
                v[1].x,
                v[1].y,
                v[2].x,
                v[2].y,
                r.patches.len(),
                r.coverage.count()
            );
        }
        println!(
            "{} cycles, {} register accesses",
            twin.cycles(),
            twin.port().accesses()
        );
    }

    if cli.verify {
        verify(&results).context("Reference check failed")?;
        if !cli.quiet {
            println!("coverage matches the reference");
        }
    }

    if let Some(path) = &cli.report {
        write_report(path, &results)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    if let Some(path) = &cli.output {
        let img = image_out::tile_image(&results, cli.tile, twin.config().scale);
        image_out::write_png(path, &img)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(())
}
