use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use urania::chart::WireChart;
use urania::geocoding::DEFAULT_SEARCH_LIMIT;
use urania::ImageFormat;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Svg,
    Png,
}

impl From<Format> for ImageFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Svg => ImageFormat::Svg,
            Format::Png => ImageFormat::Png,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Natal chart calculator")]
struct Args {
    /// Settings file (default: configs/urania.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a birth chart, print it as JSON and optionally draw it.
    Chart(ChartArgs),
    /// List places whose name contains the query, most populous first.
    Search {
        query: String,
        #[arg(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: usize,
    },
    /// Draw a chart from JSON previously printed by `chart`.
    Render {
        /// Chart JSON file.
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long, value_enum)]
        format: Option<Format>,
    },
}

#[derive(ClapArgs, Debug)]
struct ChartArgs {
    /// Birth date, YYYY-MM-DD.
    #[arg(long)]
    date: String,

    /// Local clock time, HH:MM or HH:MM:SS.
    #[arg(long)]
    time: String,

    /// Birth place as "City, Region" (e.g. "Austin, TX").
    #[arg(long)]
    place: String,

    /// Write the chart wheel to this file.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Image format; inferred from the output extension when omitted.
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Also write the chart JSON to this file.
    #[arg(long)]
    json: Option<PathBuf>,

    /// Do not print the chart JSON to stdout.
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let settings = urania_config::load_settings(args.config.as_deref())?;
    let service = settings.build_service()?;

    match args.command {
        Command::Chart(chart_args) => {
            let chart = service
                .resolve_positions(&chart_args.date, &chart_args.time, &chart_args.place)
                .await
                .with_context(|| {
                    format!(
                        "Failed to resolve chart for {} {} {}",
                        chart_args.date, chart_args.time, chart_args.place
                    )
                })?;

            let fallback = chart.fallback_bodies();
            if !fallback.is_empty() {
                log::warn!("Estimated positions used for: {:?}", fallback);
            }

            let json = chart.to_wire().to_json_pretty()?;
            if !chart_args.quiet {
                println!("{json}");
            }
            if let Some(path) = &chart_args.json {
                write_file(path, json.as_bytes())?;
            }

            if let Some(output) = &chart_args.output {
                let format = pick_format(chart_args.format, output, settings.output_format);
                let bytes = service.render_chart(&chart, format)?;
                write_file(output, &bytes)?;
            }
        }
        Command::Search { query, limit } => {
            for city in service.search_places(&query, limit).await {
                println!(
                    "{}\t{:.4}\t{:.4}\t{}",
                    city.full_name(),
                    city.latitude,
                    city.longitude,
                    city.population
                );
            }
        }
        Command::Render {
            input,
            output,
            format,
        } => {
            let raw = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let wire = WireChart::from_json(&raw)
                .with_context(|| format!("Failed to parse {}", input.display()))?;
            let format = pick_format(format, &output, settings.output_format);
            let bytes = service.render_wire(&wire, format)?;
            write_file(&output, &bytes)?;
        }
    }

    Ok(())
}

/// Explicit flag, then output extension, then the configured default.
fn pick_format(flag: Option<Format>, output: &Path, default: ImageFormat) -> ImageFormat {
    if let Some(f) = flag {
        return f.into();
    }
    output
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| ext.parse::<ImageFormat>().ok())
        .unwrap_or(default)
}

fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_flag_wins() {
        let f = pick_format(Some(Format::Svg), Path::new("chart.png"), ImageFormat::Png);
        assert_eq!(f, ImageFormat::Svg);
    }

    #[test]
    fn test_format_from_extension_then_default() {
        assert_eq!(
            pick_format(None, Path::new("out/chart.PNG"), ImageFormat::Svg),
            ImageFormat::Png
        );
        assert_eq!(
            pick_format(None, Path::new("chart.dat"), ImageFormat::Svg),
            ImageFormat::Svg
        );
    }

    #[test]
    fn test_parent_dirs_are_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("chart.svg");
        write_file(&path, b"<svg/>").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"<svg/>");
    }

    #[test]
    fn test_cli_parses_chart_command() {
        let args = Args::parse_from([
            "natal", "chart", "--date", "1990-07-04", "--time", "14:30", "--place", "Austin, TX",
        ]);
        match args.command {
            Command::Chart(c) => assert_eq!(c.place, "Austin, TX"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
