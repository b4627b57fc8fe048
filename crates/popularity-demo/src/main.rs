// File: crates/popularity-demo/src/main.rs
// Summary: Demo renders the popularity chart to PNG, optionally from a CSV export, with per-dataset visibility flags.

use anyhow::{Context, Result};
use clap::Parser;
use popularity_core::{dispatch, theme, ChartState, ControlEvent, DatasetId, Outcome, RenderOptions};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "popularity-demo", about = "Render a popularity chart with release annotations")]
struct Cli {
    /// Popularity export to import (Week/Month/Day header + value column)
    #[arg(long)]
    csv: Option<String>,

    /// Output PNG path
    #[arg(long, default_value = "target/out/popularity.png")]
    out: PathBuf,

    /// Hide the search interest line
    #[arg(long)]
    hide_search: bool,

    /// Hide the social mentions line
    #[arg(long)]
    hide_social: bool,

    /// Seed for the synthetic noise; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Theme preset (light or dark)
    #[arg(long, default_value = "light")]
    theme: String,

    #[arg(long, default_value_t = 1024)]
    width: i32,

    #[arg(long, default_value_t = 640)]
    height: i32,

    /// Skip all text (title, legend captions, ticks)
    #[arg(long)]
    no_labels: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let mut chart = ChartState::popularity(&mut rng);
    log::info!("built default chart with {} months", chart.labels().len());

    // An unreadable file is reported like a rejected import; the synthetic chart still renders.
    if let Some(raw) = &cli.csv {
        match load_csv(raw) {
            Ok((name, contents)) => {
                if let Outcome::Notice(msg) = dispatch(&mut chart, ControlEvent::FileLoaded { name, contents }, &mut rng) {
                    eprintln!("{msg}");
                }
            }
            Err(e) => eprintln!("Import skipped: {e:#}"),
        }
    }

    for (dataset, hidden) in [(DatasetId::SearchInterest, cli.hide_search), (DatasetId::SocialMentions, cli.hide_social)] {
        if hidden {
            if let Outcome::Notice(msg) = dispatch(&mut chart, ControlEvent::Toggle { dataset, checked: false }, &mut rng) {
                eprintln!("{msg}");
            }
        }
    }

    let opts = RenderOptions {
        width: cli.width,
        height: cli.height,
        theme: theme::find(&cli.theme),
        draw_labels: !cli.no_labels,
        ..RenderOptions::default()
    };

    chart
        .render_to_png(&opts, &cli.out)
        .with_context(|| format!("failed to render '{}'", cli.out.display()))?;
    println!("Wrote {}", cli.out.display());
    Ok(())
}

/// Read an export from disk. Returns (file name, contents).
fn load_csv(raw: &str) -> Result<(String, String)> {
    let (path, used_alt) = resolve_path(raw)?;
    println!("Using input file: {}", path.display());
    if used_alt {
        println!("  (extension swapped between .csv/.cvs)");
    }
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read CSV '{}'", path.display()))?;
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_else(|| raw.to_string());
    Ok((name, contents))
}

/// Resolve path, trying .csv/.cvs swap if needed.
/// Returns (actual_path, used_alt)
fn resolve_path(raw: &str) -> Result<(PathBuf, bool)> {
    let p = Path::new(raw);
    if p.exists() {
        return Ok((p.to_path_buf(), false));
    }
    if let Some(alt) = swap_ext(p) {
        if alt.exists() {
            return Ok((alt, true));
        }
    }
    anyhow::bail!("file not found: {}", p.display());
}

fn swap_ext(p: &Path) -> Option<PathBuf> {
    let mut alt = p.to_path_buf();
    let ext = p.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "cvs" => {
            alt.set_extension("csv");
            Some(alt)
        }
        "csv" => {
            alt.set_extension("cvs");
            Some(alt)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_csv_is_an_error_not_a_panic() {
        let err = load_csv("definitely/not/here.csv").unwrap_err();
        assert!(err.to_string().contains("file not found"), "{err}");
    }

    #[test]
    fn swapped_extension_is_found() {
        let dir = std::env::temp_dir().join(format!("popularity-demo-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let real = dir.join("export.cvs");
        std::fs::write(&real, "Month,v\n2021-01,10\n").unwrap();

        let asked = dir.join("export.csv");
        let (name, contents) = load_csv(asked.to_str().unwrap()).unwrap();
        assert_eq!(name, "export.cvs");
        assert!(contents.starts_with("Month"));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn swap_ext_ignores_other_extensions() {
        assert_eq!(swap_ext(Path::new("a.txt")), None);
        assert_eq!(swap_ext(Path::new("a.CSV")), Some(PathBuf::from("a.cvs")));
    }
}
