mod app;
mod config;
mod skills;
mod util;

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{CliOverrides, DashboardConfig, load_file_config};
use crate::skills::{CsvFileSource, DataSource, Selection, build_grid};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// CSV table with relative skill group penetration by country.
    #[arg(long, value_name = "PATH")]
    data: Option<PathBuf>,

    /// JSON file with `data_path`, `skills` and `countries` defaults.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Skill group to select initially; repeat for several.
    #[arg(long = "skill", value_name = "NAME")]
    skills: Vec<String>,

    /// Country to select initially; repeat for several.
    #[arg(long = "country", value_name = "NAME")]
    countries: Vec<String>,

    /// Print the dense grid for the initial selection as JSON and exit.
    #[arg(long)]
    print_grid: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let file_config = load_file_config(args.config.as_deref())?;
    let config = DashboardConfig::resolve(
        file_config,
        CliOverrides {
            data_path: args.data,
            skills: args.skills,
            countries: args.countries,
        },
    );
    let source = CsvFileSource::new(&config.data_path);

    if args.print_grid {
        return print_grid(&source, &config.initial_selection);
    }

    run_dashboard(source, config.initial_selection)
}

fn print_grid(source: &dyn DataSource, selection: &Selection) -> Result<()> {
    let table = source
        .read_table()
        .with_context(|| format!("failed to load {}", source.describe()))?;
    let grid = build_grid(&table, selection.countries(), selection.skills());
    info!(entries = grid.len(), "writing dense grid");

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &grid.columns())
        .context("failed to serialise dense grid")?;
    writeln!(stdout)?;
    Ok(())
}

fn run_dashboard(source: CsvFileSource, initial_selection: Selection) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1440.0, 920.0])
            .with_title(app::TITLE),
        ..Default::default()
    };

    let source: Arc<dyn DataSource> = Arc::new(source);
    eframe::run_native(
        app::TITLE,
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::DashboardApp::new(
                cc,
                source,
                initial_selection,
            )))
        }),
    )
    .map_err(|error| anyhow!("dashboard window failed: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeatable_selection_flags() {
        let args = Args::try_parse_from([
            "skill-penetration",
            "--skill",
            "Digital Literacy",
            "--country",
            "Kenya",
            "--country",
            "Ghana",
            "--print-grid",
        ])
        .unwrap();

        assert_eq!(args.skills, vec!["Digital Literacy"]);
        assert_eq!(args.countries, vec!["Kenya", "Ghana"]);
        assert!(args.print_grid);
        assert!(args.data.is_none());
    }
}
