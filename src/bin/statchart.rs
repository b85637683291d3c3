use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use statchart::color::{LegendEntry, Rgb};
use statchart::config::{Binning, PaletteMode, ScaleType};
use statchart::range::RangeLayout;
use statchart::{ChartConfig, allocate, grid, stats, storage};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "statchart",
    version,
    about = "Compute unit allocations, grid fits, color scales and range-chart geometry"
)]
struct Cli {
    /// JSON chart config (camelCase keys, all optional).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split a unit total across `label,value` rows.
    Allocate(AllocateArgs),
    /// Fit a row/column grid for N elements.
    Grid(GridArgs),
    /// Map `label,value` rows to fill and text colors.
    Colors(ColorsArgs),
    /// Lay out a composition-range chart from `group,start,end,weight` rows.
    Range(RangeArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct AllocateArgs {
    /// CSV with a header row; first column label, second column value.
    #[arg(short, long)]
    input: PathBuf,
    /// Number of units to distribute (overrides config).
    #[arg(long)]
    total: Option<u32>,
    /// Save results to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Print summary statistics of the input values to stderr.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

#[derive(Args, Debug)]
struct GridArgs {
    /// Number of elements to place.
    #[arg(short = 'n', long)]
    items: usize,
    #[arg(long)]
    width: Option<f64>,
    #[arg(long)]
    height: Option<f64>,
    /// Fixed element size.
    #[arg(long)]
    size: Option<f64>,
    /// Smallest element size; with --max-size the size is chosen to fill the area.
    #[arg(long, requires = "max_size")]
    min_size: Option<f64>,
    #[arg(long, requires = "min_size")]
    max_size: Option<f64>,
    #[arg(long)]
    spacing_h: Option<f64>,
    #[arg(long)]
    spacing_v: Option<f64>,
    /// Write JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PaletteArg {
    Sequential,
    Diverging,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ScaleArg {
    Continuous,
    Binned,
    Quantile,
}

#[derive(Args, Debug)]
struct ColorsArgs {
    /// CSV with a header row; first column label, second column value.
    #[arg(short, long)]
    input: PathBuf,
    #[arg(long, value_enum)]
    palette: Option<PaletteArg>,
    #[arg(long, value_enum)]
    scale: Option<ScaleArg>,
    #[arg(long)]
    divisions: Option<usize>,
    /// Diverging midpoint (defaults to the domain center).
    #[arg(long)]
    midpoint: Option<f64>,
    /// Write JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RangeArgs {
    /// CSV with a header row: group, range start, range end, weight.
    #[arg(short, long)]
    input: PathBuf,
    /// Use a logarithmic value axis.
    #[arg(long, default_value_t = false)]
    log: bool,
    /// First row has no lower bound.
    #[arg(long, default_value_t = false)]
    open_start: bool,
    /// Last row has no upper bound.
    #[arg(long, default_value_t = false)]
    open_end: bool,
    /// Pixel width of the bar and the value axis.
    #[arg(long)]
    width: Option<f64>,
    #[arg(long)]
    min_label_distance: Option<f64>,
    /// Write JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Serialize)]
struct ColoredCategory {
    label: String,
    value: f64,
    fill: Rgb,
    text: Rgb,
    bucket: Option<usize>,
}

#[derive(Serialize)]
struct ColorsReport {
    domain: (f64, f64),
    legend: Vec<LegendEntry>,
    categories: Vec<ColoredCategory>,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ChartConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ChartConfig::default(),
    };
    match cli.cmd {
        Command::Allocate(args) => cmd_allocate(config, args),
        Command::Grid(args) => cmd_grid(config, args),
        Command::Colors(args) => cmd_colors(config, args),
        Command::Range(args) => cmd_range(config, args),
    }
}

fn emit<T: Serialize>(value: &T, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            storage::save_json(value, path)
                .with_context(|| format!("writing {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => storage::write_json(std::io::stdout().lock(), value)?,
    }
    Ok(())
}

fn cmd_allocate(config: ChartConfig, args: AllocateArgs) -> Result<()> {
    let categories = storage::load_categories(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let total = args.total.unwrap_or(config.total_units);
    if total == 0 {
        anyhow::bail!("--total must be at least 1");
    }
    let allocations = allocate::allocate(&categories, total);
    if allocations.is_empty() {
        eprintln!("No positive values in {}", args.input.display());
    }

    if args.stats {
        let values: Vec<f64> = categories.iter().map(|c| c.value).collect();
        let s = stats::summary(&values);
        eprintln!(
            "count={} missing={}  min={} max={} mean={} median={}",
            s.count,
            s.missing,
            fmt_opt(s.min),
            fmt_opt(s.max),
            fmt_opt(s.mean),
            fmt_opt(s.median)
        );
    }

    match args.out.as_ref() {
        Some(path) => {
            let fmt = match args.format {
                Some(OutFormat::Csv) => "csv",
                Some(OutFormat::Json) => "json",
                None => path.extension().and_then(|e| e.to_str()).unwrap_or("json"),
            }
            .to_ascii_lowercase();
            match fmt.as_str() {
                "csv" => storage::save_allocations_csv(&allocations, path)?,
                "json" => storage::save_json(&allocations, path)?,
                other => anyhow::bail!("unsupported format: {}", other),
            }
            eprintln!("Saved {} rows to {}", allocations.len(), path.display());
        }
        None => emit(&allocations, None)?,
    }
    Ok(())
}

fn cmd_grid(config: ChartConfig, args: GridArgs) -> Result<()> {
    let width = args.width.unwrap_or(config.available_width);
    let height = args.height.unwrap_or(config.available_height);
    let spacing_h = args.spacing_h.unwrap_or(config.spacing_h);
    let spacing_v = args.spacing_v.unwrap_or(config.spacing_v);
    let bounds = match (args.min_size, args.max_size) {
        (Some(lo), Some(hi)) => Some((lo, hi)),
        _ => config.min_element_size.zip(config.max_element_size),
    };
    let fit = match (args.size, bounds) {
        (None, Some((lo, hi))) => {
            grid::fit_with_size_bounds(args.items, width, height, lo, hi, spacing_h, spacing_v)
        }
        (size, _) => grid::fit(
            args.items,
            width,
            height,
            size.unwrap_or(config.element_size),
            spacing_h,
            spacing_v,
        ),
    };
    if fit.overflow {
        eprintln!(
            "warning: {} elements do not fit in {}x{}; falling back to one column",
            args.items, width, height
        );
    }
    emit(&fit, args.out.as_deref())
}

fn cmd_colors(mut config: ChartConfig, args: ColorsArgs) -> Result<()> {
    if let Some(p) = args.palette {
        config.palette_mode = match p {
            PaletteArg::Sequential => PaletteMode::Sequential,
            PaletteArg::Diverging => PaletteMode::Diverging,
        };
    }
    if let Some(s) = args.scale {
        (config.scale_type, config.binning) = match s {
            ScaleArg::Continuous => (ScaleType::Continuous, config.binning),
            ScaleArg::Binned => (ScaleType::Binned, Binning::EqualWidth),
            ScaleArg::Quantile => (ScaleType::Binned, Binning::Quantile),
        };
    }
    if let Some(d) = args.divisions {
        config.divisions = d;
    }
    if args.midpoint.is_some() {
        config.midpoint = args.midpoint;
    }
    config.validate()?;

    let categories = storage::load_categories(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let values: Vec<f64> = categories.iter().map(|c| c.value).collect();
    let scale = config.color_scale_for(&values);
    let contrast = config.contrast();
    let report = ColorsReport {
        domain: scale.domain(),
        legend: scale.legend(5),
        categories: categories
            .into_iter()
            .map(|c| {
                let fill = scale.color(c.value);
                ColoredCategory {
                    bucket: scale.bucket(c.value),
                    text: contrast.pick(fill),
                    fill,
                    label: c.label,
                    value: c.value,
                }
            })
            .collect(),
    };
    emit(&report, args.out.as_deref())
}

fn cmd_range(mut config: ChartConfig, args: RangeArgs) -> Result<()> {
    config.use_log_scale |= args.log;
    config.open_start_range |= args.open_start;
    config.open_end_range |= args.open_end;
    if let Some(w) = args.width {
        config.available_width = w;
    }
    if args.min_label_distance.is_some() {
        config.min_label_distance = args.min_label_distance;
    }
    config.validate()?;

    let rows = storage::load_range_rows(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let options = config.range_options();
    let n = rows
        .iter()
        .filter(|r| r.weight.is_finite() && r.weight > 0.0)
        .count()
        .max(1);
    let segment_colors = statchart::ColorScale::build(
        (0.0, (n - 1) as f64),
        statchart::ScaleMode::Continuous,
        config.palette(),
    );
    let layout = RangeLayout::compute(&rows, &options, |i| segment_colors.color(i as f64));
    if layout.scale.was_floored() {
        eprintln!(
            "note: log axis starts at {} (data minimum was not positive)",
            statchart::range::LOG_FLOOR
        );
    }
    emit(&layout, args.out.as_deref())
}
