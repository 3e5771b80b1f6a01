use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use coin_packer_core::config::{PackStrategy, SortOrder};
use coin_packer_core::{
    Denomination, Layout, LayoutItem, LayoutStats, PackableItem, PackerConfig, PackingEngine,
    Shape, format_amount, pack_layout, pack_piles, render_json, to_json_array, to_json_hash,
    total_cents,
};
use globset::{Glob, GlobSetBuilder};
use handlebars::Handlebars;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(
    name = "coin-packer",
    about = "Pack coins and bills into compact piles",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show progress bars (disable with --progress false or --quiet)
    #[arg(long, default_value_t = true, action=ArgAction::Set, global=true, help_heading = "Logging/UX")]
    progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pack item files (one pile per file) and export layouts
    Pack(PackArgs),
    /// Pack a single pile of denominations and print it as JSON
    Coins(CoinsArgs),
    /// Simple timing bench (packs a random pile once, prints time + quality)
    Bench(BenchArgs),
}

/// Container and engine tuning shared by every subcommand.
#[derive(Args, Debug, Clone)]
struct EngineArgs {
    /// Container width
    #[arg(long, default_value_t = 300.0, help_heading = "Container")]
    width: f64,
    /// Container height
    #[arg(long, default_value_t = 300.0, help_heading = "Container")]
    height: f64,
    /// Gap kept between coins
    #[arg(long, default_value_t = 2.0, help_heading = "Container")]
    padding: f64,
    /// Margin around the pile when deciding whether to shrink it
    #[arg(long, default_value_t = 10.0, help_heading = "Container")]
    bounds_margin: f64,

    /// Strategy: relaxation | radial | auto
    #[arg(long, value_parser = ["relaxation", "radial", "auto"], default_value = "relaxation", help_heading = "Engine")]
    strategy: String,
    /// Sort order: size_desc | area_desc | key_asc | none
    #[arg(long, default_value = "size_desc", help_heading = "Engine")]
    sort_order: String,
    /// Upper bound on relaxation passes
    #[arg(long, default_value_t = 150, help_heading = "Engine")]
    max_iterations: usize,
    /// Initial per-pass step ceiling
    #[arg(long, default_value_t = 0.5, help_heading = "Engine")]
    step_size: f64,
    /// Step ceiling decay per pass
    #[arg(long, default_value_t = 0.98, help_heading = "Engine")]
    decay: f64,
    /// Pull towards the centre
    #[arg(long, default_value_t = 0.01, help_heading = "Engine")]
    gravity: f64,
    /// Stop once a pass moves less than this in total
    #[arg(long, default_value_t = 0.5, help_heading = "Engine")]
    convergence_threshold: f64,
    /// Separation sweeps after relaxation (0 disables)
    #[arg(long, default_value_t = 100, help_heading = "Engine")]
    separation_passes: usize,
    /// Angular step of the radial scan, in degrees
    #[arg(long, default_value_t = 10.0, help_heading = "Radial scan")]
    scan_angle_step_deg: f64,
    /// Distance between radial scan rings
    #[arg(long, default_value_t = 10.0, help_heading = "Radial scan")]
    scan_radial_step: f64,
    /// Farthest ring the radial scan tries
    #[arg(long, default_value_t = 500.0, help_heading = "Radial scan")]
    scan_max_distance: f64,
    /// Pack piles in parallel (requires core feature `parallel`)
    #[arg(long, default_value_t = false, help_heading = "Engine")]
    parallel: bool,
}

impl EngineArgs {
    fn to_config(&self) -> anyhow::Result<PackerConfig> {
        Ok(PackerConfig::builder()
            .with_container(self.width, self.height)
            .padding(self.padding)
            .bounds_margin(self.bounds_margin)
            .strategy(parse_strategy(&self.strategy)?)
            .sort_order(parse_sort_order(&self.sort_order)?)
            .max_iterations(self.max_iterations)
            .step_size(self.step_size)
            .decay(self.decay)
            .gravity_factor(self.gravity)
            .convergence_threshold(self.convergence_threshold)
            .separation_passes(self.separation_passes)
            .scan_angle_step_deg(self.scan_angle_step_deg)
            .scan_radial_step(self.scan_radial_step)
            .scan_max_distance(self.scan_max_distance)
            .parallel(self.parallel)
            .build())
    }
}

#[derive(Parser, Debug, Clone)]
struct PackArgs {
    // Input/Output
    /// Item file (.json/.yaml/.yml) or a directory of them
    #[arg(help_heading = "Input/Output")]
    input: PathBuf,
    /// Output directory
    #[arg(short, long, default_value = "out", help_heading = "Input/Output")]
    out_dir: PathBuf,
    /// YAML config file path (overrides container/engine options)
    #[arg(long, help_heading = "Input/Output")]
    config: Option<PathBuf>,
    /// Include patterns (glob). If set, only files matching any pattern are considered
    #[arg(long, help_heading = "Input/Output")]
    include: Vec<String>,
    /// Exclude patterns (glob). Files matching any pattern will be ignored
    #[arg(long, help_heading = "Input/Output")]
    exclude: Vec<String>,

    #[command(flatten)]
    engine_args: EngineArgs,

    // Export
    /// Metadata format: json-array | json (alias) | json-hash | template
    #[arg(long, default_value = "json-array", help_heading = "Export")]
    metadata: String,
    /// Built-in template (implies --metadata template): csv | css
    #[arg(long, help_heading = "Export")]
    engine: Option<String>,
    /// External template file (handlebars), used when --metadata template
    #[arg(long, help_heading = "Export")]
    template: Option<PathBuf>,
    /// Export per-pile stats (JSON) to this file
    #[arg(long, help_heading = "Export")]
    export_stats: Option<PathBuf>,
    /// Print the merged configuration (after CLI/YAML) and exit
    #[arg(long, default_value_t = false, help_heading = "Export")]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "json", value_parser = ["json", "yaml"], help_heading = "Export")]
    print_config_format: String,
    /// Dry run: compute layouts and stats but do not write files
    #[arg(long, default_value_t = false, help_heading = "Export")]
    dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
struct CoinsArgs {
    /// Comma-separated values: cents (25), names (quarter) or dollars ($1)
    #[arg(long, value_delimiter = ',', required = true)]
    values: Vec<String>,
    /// Output shape: json-array | json-hash
    #[arg(long, default_value = "json-array", value_parser = ["json-array", "json-hash"])]
    metadata: String,
    #[command(flatten)]
    engine_args: EngineArgs,
}

#[derive(Parser, Debug, Clone)]
struct BenchArgs {
    /// Number of random coins and bills
    #[arg(long, default_value_t = 50)]
    count: usize,
    /// Seed for the random pile
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[command(flatten)]
    engine_args: EngineArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Pack(args) => run_pack(args, cli.progress && !cli.quiet),
        Commands::Coins(args) => run_coins(args),
        Commands::Bench(b) => run_bench(b),
    }
}

fn run_pack(cli: &PackArgs, show_progress: bool) -> anyhow::Result<()> {
    let mut cfg = cli.engine_args.to_config()?;
    if let Some(path) = &cli.config {
        let file = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let y: YamlConfig = serde_yaml::from_str(&file)
            .with_context(|| format!("parse config {}", path.display()))?;
        cfg = y.into_packer_config(cfg)?;
    }

    if cli.print_config {
        match cli.print_config_format.as_str() {
            "yaml" => println!("{}", serde_yaml::to_string(&cfg)?),
            _ => println!("{}", serde_json::to_string_pretty(&cfg)?),
        }
        return Ok(());
    }
    cfg.validate()?;

    let metadata = if cli.engine.is_some() {
        "template"
    } else {
        cli.metadata.as_str()
    };
    let renderer = match metadata {
        "json-array" | "json" | "json-hash" => None,
        "template" => Some(TemplateRenderer::new(cli)?),
        other => anyhow::bail!("unknown metadata format: {}", other),
    };

    let paths = gather_paths(&cli.input, &cli.include, &cli.exclude)?;
    if paths.is_empty() {
        warn!(input = %cli.input.display(), "no item files found");
        return Ok(());
    }
    let piles = load_piles_with_progress(&cli.input, &paths, show_progress)?;
    info!(count = piles.len(), "loaded item files");

    let (names, items): (Vec<String>, Vec<Vec<LayoutItem<String>>>) = piles.into_iter().unzip();
    ensure_unique_names(&names)?;
    let layouts = pack_piles(items, cfg.clone())?;

    if !cli.dry_run {
        fs::create_dir_all(&cli.out_dir)
            .with_context(|| format!("create out_dir {}", cli.out_dir.display()))?;
    }

    let mut pile_stats = Vec::with_capacity(layouts.len());
    for (name, layout) in names.iter().zip(&layouts) {
        let stats = layout.stats();
        info!(pile = %name, "{}", stats.summary());
        if layout.report.residual_overlaps > 0 {
            warn!(pile = %name, overlaps = layout.report.residual_overlaps, "pile still overlaps");
        }
        pile_stats.push(PileStats {
            name: name.clone(),
            stats,
        });

        let (text, ext) = match (metadata, &renderer) {
            ("json-hash", _) => (render_json(&to_json_hash(layout))?, "json".to_string()),
            (_, Some(r)) => (r.render(name, layout, &cfg)?, r.extension.clone()),
            _ => (render_json(&to_json_array(layout))?, "json".to_string()),
        };
        if !cli.dry_run {
            let out_path = cli.out_dir.join(format!("{}.{}", name, ext));
            fs::write(&out_path, text).with_context(|| format!("write {}", out_path.display()))?;
            info!(?out_path, items = layout.placements.len(), "layout written");
        }
    }

    if let Some(stats_path) = &cli.export_stats {
        let total_items: usize = pile_stats.iter().map(|p| p.stats.num_items).sum();
        let value = serde_json::json!({
            "piles": pile_stats,
            "total_items": total_items,
        });
        if !cli.dry_run {
            fs::write(stats_path, serde_json::to_string_pretty(&value)?)
                .with_context(|| format!("write {}", stats_path.display()))?;
            info!(?stats_path, "stats exported");
        } else {
            for p in &pile_stats {
                println!("{}: {}", p.name, p.stats.summary());
            }
        }
    }
    Ok(())
}

fn run_coins(args: &CoinsArgs) -> anyhow::Result<()> {
    let values = args
        .values
        .iter()
        .map(|v| v.parse::<Denomination>())
        .collect::<Result<Vec<_>, _>>()?;
    info!(
        coins = values.len(),
        total = %format_amount(total_cents(&values)),
        "packing pile"
    );

    let layout = pack_layout(coin_packer_core::coin_items(&values), args.engine_args.to_config()?)?;
    let value = match args.metadata.as_str() {
        "json-hash" => to_json_hash(&layout),
        _ => to_json_array(&layout),
    };
    println!("{}", render_json(&value)?);
    Ok(())
}

fn run_bench(b: &BenchArgs) -> anyhow::Result<()> {
    use rand::{Rng, SeedableRng, rngs::StdRng};

    let mut rng = StdRng::seed_from_u64(b.seed);
    let mut items: Vec<PackableItem> = (0..b.count)
        .map(|_| {
            let d = Denomination::ALL[rng.gen_range(0..Denomination::ALL.len())];
            PackableItem::new(d.shape())
        })
        .collect();
    // largest first, as the keyed pipeline would order them
    items.sort_by(|x, y| y.shape.extent().total_cmp(&x.shape.extent()));

    let engine = PackingEngine::new(b.engine_args.to_config()?)?;
    let start = Instant::now();
    let report = engine.pack(&mut items);
    let dur = start.elapsed();
    println!(
        "items={} strategy={:?} iterations={} converged={} scale={:.3} overlaps={} time={}",
        items.len(),
        report.strategy,
        report.iterations,
        report.converged,
        report.scale_factor,
        report.residual_overlaps,
        bench_fmt_dur(dur)
    );
    Ok(())
}

fn bench_fmt_dur(d: Duration) -> String {
    let ms = d.as_secs_f64() * 1000.0;
    if ms >= 1.0 {
        format!("{:.1}ms", ms)
    } else {
        format!("{}us", d.as_micros())
    }
}

fn parse_strategy(s: &str) -> anyhow::Result<PackStrategy> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("unknown strategy: {}", s))
}

fn parse_sort_order(s: &str) -> anyhow::Result<SortOrder> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("unknown sort order: {}", s))
}

fn gather_paths(
    path: &Path,
    include: &[String],
    exclude: &[String],
) -> anyhow::Result<Vec<PathBuf>> {
    let inc_set = build_globset(include)?;
    let exc_set = build_globset(exclude)?;
    let mut list: Vec<PathBuf> = Vec::new();
    if path.is_file() {
        if !should_skip(path, inc_set.as_ref(), exc_set.as_ref()) && is_item_file(path) {
            list.push(path.to_path_buf());
        }
    } else {
        for entry in WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let p = entry.path();
            if p.is_file() && !should_skip(p, inc_set.as_ref(), exc_set.as_ref()) && is_item_file(p)
            {
                list.push(p.to_path_buf());
            }
        }
    }
    Ok(list)
}

fn build_globset(patterns: &[String]) -> anyhow::Result<Option<globset::GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut b = GlobSetBuilder::new();
    for pat in patterns {
        b.add(Glob::new(pat).with_context(|| format!("bad glob {}", pat))?);
    }
    Ok(Some(b.build()?))
}

fn should_skip(
    p: &Path,
    include: Option<&globset::GlobSet>,
    exclude: Option<&globset::GlobSet>,
) -> bool {
    let s = p.to_string_lossy().replace('\\', "/");
    if let Some(ex) = exclude {
        if ex.is_match(&s) {
            return true;
        }
    }
    if let Some(inc) = include {
        if !inc.is_match(&s) {
            return true;
        }
    }
    false
}

fn is_item_file(p: &Path) -> bool {
    file_format(p).is_some()
}

#[derive(Debug, Clone, Copy)]
enum FileFormat {
    Json,
    Yaml,
}

fn file_format(p: &Path) -> Option<FileFormat> {
    match p
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_ascii_lowercase())
        .as_deref()
    {
        Some("json") => Some(FileFormat::Json),
        Some("yaml" | "yml") => Some(FileFormat::Yaml),
        _ => None,
    }
}

/// Pile name for an item file: its stem prefixed by the directories between
/// `root` and the file, joined with `_` (`a/left.json` -> `a_left`), or
/// `pile_<n>` when it has no stem.
fn pile_name(root: &Path, p: &Path, index: usize) -> String {
    let Some(stem) = p.file_stem().and_then(|s| s.to_str()) else {
        return format!("pile_{}", index);
    };
    let dirs: Vec<&str> = p
        .strip_prefix(root)
        .ok()
        .and_then(Path::parent)
        .map(|d| {
            d.components()
                .filter_map(|c| match c {
                    Component::Normal(s) => s.to_str(),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();
    if dirs.is_empty() {
        stem.to_string()
    } else {
        format!("{}_{}", dirs.join("_"), stem)
    }
}

/// Fails when two piles would be written to the same output file.
fn ensure_unique_names(names: &[String]) -> anyhow::Result<()> {
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(names.len());
    for (index, name) in names.iter().enumerate() {
        if let Some(first) = seen.insert(name.as_str(), index) {
            anyhow::bail!(
                "item files #{} and #{} both map to output name '{}'; rename one of them",
                first,
                index,
                name
            );
        }
    }
    Ok(())
}

fn load_piles_with_progress(
    root: &Path,
    paths: &[PathBuf],
    progress: bool,
) -> anyhow::Result<Vec<(String, Vec<LayoutItem<String>>)>> {
    use indicatif::{ProgressBar, ProgressStyle};
    let bar = if progress {
        let b = ProgressBar::new(paths.len() as u64);
        b.set_style(ProgressStyle::with_template(
            "{spinner:.green} loading {pos}/{len} [{elapsed_precise}] {wide_msg}",
        )?);
        Some(b)
    } else {
        None
    };
    let mut list = Vec::with_capacity(paths.len());
    for (index, p) in paths.iter().enumerate() {
        let msg = p.file_name().and_then(|s| s.to_str()).unwrap_or("");
        if let Some(b) = &bar {
            b.set_message(msg.to_string());
        }
        match load_item_file(p) {
            Ok(items) => list.push((pile_name(root, p, index), items)),
            Err(e) => {
                error!(?p, error = %e, "skip item file");
            }
        }
        if let Some(b) = &bar {
            b.inc(1);
        }
    }
    if let Some(b) = &bar {
        b.finish_and_clear();
    }
    Ok(list)
}

/// Item files are either `{ items: [...] }` or a bare list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ItemFile {
    Wrapped { items: Vec<ItemEntry> },
    Bare(Vec<ItemEntry>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ItemEntry {
    Coin {
        #[serde(default)]
        key: Option<String>,
        denomination: DenominationSpec,
    },
    Shape {
        key: String,
        #[serde(flatten)]
        shape: Shape,
    },
}

/// `25` or `"quarter"` / `"$1"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DenominationSpec {
    Cents(Denomination),
    Text(String),
}

impl DenominationSpec {
    fn resolve(&self) -> coin_packer_core::Result<Denomination> {
        match self {
            DenominationSpec::Cents(d) => Ok(*d),
            DenominationSpec::Text(s) => s.parse(),
        }
    }
}

fn load_item_file(p: &Path) -> anyhow::Result<Vec<LayoutItem<String>>> {
    let text = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    let file: ItemFile = match file_format(p) {
        Some(FileFormat::Yaml) => {
            serde_yaml::from_str(&text).with_context(|| format!("parse {}", p.display()))?
        }
        _ => serde_json::from_str(&text).with_context(|| format!("parse {}", p.display()))?,
    };
    let entries = match file {
        ItemFile::Wrapped { items } | ItemFile::Bare(items) => items,
    };

    let mut items = Vec::with_capacity(entries.len());
    for (i, entry) in entries.into_iter().enumerate() {
        let item = match entry {
            ItemEntry::Coin { key, denomination } => {
                let d = denomination
                    .resolve()
                    .with_context(|| format!("{}: item #{}", p.display(), i))?;
                let key = key.unwrap_or_else(|| format!("{}_{}", d.name(), i));
                LayoutItem::new(key, d.shape())
            }
            ItemEntry::Shape { key, shape } => LayoutItem::new(key, shape),
        };
        items.push(item);
    }
    Ok(items)
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}

#[derive(Serialize)]
struct PileStats {
    name: String,
    stats: LayoutStats,
}

#[derive(Serialize)]
struct TemplateItem {
    index: usize,
    key: String,
    shape: &'static str,
    is_circle: bool,
    x: f64,
    y: f64,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

#[derive(Serialize)]
struct TemplateContext {
    name: String,
    container: serde_json::Value,
    items: Vec<TemplateItem>,
    meta: serde_json::Value,
    report: serde_json::Value,
}

#[inline]
fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn build_template_context(
    name: &str,
    layout: &Layout,
    cfg: &PackerConfig,
) -> anyhow::Result<TemplateContext> {
    let items = layout
        .placements
        .iter()
        .enumerate()
        .map(|(index, p)| {
            let b = p.bounds();
            TemplateItem {
                index,
                key: p.key.clone(),
                shape: if p.shape.is_circle() {
                    "circle"
                } else {
                    "rectangle"
                },
                is_circle: p.shape.is_circle(),
                x: round2(p.x),
                y: round2(p.y),
                left: round2(b.left),
                top: round2(b.top),
                width: round2(b.width()),
                height: round2(b.height()),
            }
        })
        .collect();
    Ok(TemplateContext {
        name: name.to_string(),
        container: serde_json::json!({"w": cfg.container_width, "h": cfg.container_height}),
        items,
        meta: serde_json::to_value(&layout.meta)?,
        report: serde_json::to_value(&layout.report)?,
    })
}

struct TemplateRenderer {
    registry: Handlebars<'static>,
    extension: String,
}

impl TemplateRenderer {
    fn new(cli: &PackArgs) -> anyhow::Result<Self> {
        let (source, extension) = if let Some(engine) = &cli.engine {
            match engine.to_ascii_lowercase().as_str() {
                "csv" => (include_str!("templates/csv.hbs").to_string(), "csv"),
                "css" => (include_str!("templates/css.hbs").to_string(), "css"),
                other => anyhow::bail!("unknown engine template: {}", other),
            }
        } else if let Some(path) = &cli.template {
            let text = fs::read_to_string(path)
                .with_context(|| format!("read template {}", path.display()))?;
            (text, "txt")
        } else {
            // default to csv if not specified
            (include_str!("templates/csv.hbs").to_string(), "csv")
        };

        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        registry.register_template_string("tpl", source)?;
        Ok(Self {
            registry,
            extension: extension.to_string(),
        })
    }

    fn render(&self, name: &str, layout: &Layout, cfg: &PackerConfig) -> anyhow::Result<String> {
        let ctx = build_template_context(name, layout, cfg)?;
        Ok(self.registry.render("tpl", &ctx)?)
    }
}

#[derive(Debug, Deserialize, Default)]
struct YamlConfig {
    container_width: Option<f64>,
    container_height: Option<f64>,
    padding: Option<f64>,
    max_iterations: Option<usize>,
    step_size: Option<f64>,
    decay: Option<f64>,
    gravity_factor: Option<f64>,
    convergence_threshold: Option<f64>,
    separation_passes: Option<usize>,
    bounds_margin: Option<f64>,
    strategy: Option<String>,
    sort_order: Option<String>,
    scan_angle_step_deg: Option<f64>,
    scan_radial_step: Option<f64>,
    scan_max_distance: Option<f64>,
    parallel: Option<bool>,
}

impl YamlConfig {
    fn into_packer_config(self, mut cfg: PackerConfig) -> anyhow::Result<PackerConfig> {
        if let Some(v) = self.container_width {
            cfg.container_width = v;
        }
        if let Some(v) = self.container_height {
            cfg.container_height = v;
        }
        if let Some(v) = self.padding {
            cfg.padding = v;
        }
        if let Some(v) = self.max_iterations {
            cfg.max_iterations = v;
        }
        if let Some(v) = self.step_size {
            cfg.step_size = v;
        }
        if let Some(v) = self.decay {
            cfg.decay = v;
        }
        if let Some(v) = self.gravity_factor {
            cfg.gravity_factor = v;
        }
        if let Some(v) = self.convergence_threshold {
            cfg.convergence_threshold = v;
        }
        if let Some(v) = self.separation_passes {
            cfg.separation_passes = v;
        }
        if let Some(v) = self.bounds_margin {
            cfg.bounds_margin = v;
        }
        if let Some(v) = self.strategy {
            cfg.strategy = parse_strategy(&v)?;
        }
        if let Some(v) = self.sort_order {
            cfg.sort_order = parse_sort_order(&v)?;
        }
        if let Some(v) = self.scan_angle_step_deg {
            cfg.scan_angle_step_deg = v;
        }
        if let Some(v) = self.scan_radial_step {
            cfg.scan_radial_step = v;
        }
        if let Some(v) = self.scan_max_distance {
            cfg.scan_max_distance = v;
        }
        if let Some(v) = self.parallel {
            cfg.parallel = v;
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_entries_accept_shapes_and_denominations() {
        let json = r#"{ "items": [
            {"key": "a", "shape": "circle", "radius": 20},
            {"key": "b", "shape": "rectangle", "width": 100, "height": 40},
            {"denomination": 25},
            {"key": "buck", "denomination": "$1"}
        ] }"#;
        let file: ItemFile = serde_json::from_str(json).unwrap();
        let ItemFile::Wrapped { items } = file else {
            panic!("expected wrapped item file");
        };
        assert_eq!(items.len(), 4);
        assert!(matches!(&items[0], ItemEntry::Shape { key, shape } if key == "a" && *shape == Shape::circle(20.0)));
        assert!(matches!(&items[2], ItemEntry::Coin { key: None, .. }));
        match &items[3] {
            ItemEntry::Coin { denomination, .. } => {
                assert_eq!(denomination.resolve().unwrap(), Denomination::Dollar)
            }
            other => panic!("unexpected entry {:?}", other),
        }
    }

    #[test]
    fn yaml_item_list_parses() {
        let yaml = "- key: c\n  shape: circle\n  radius: 5\n- denomination: dime\n";
        let file: ItemFile = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(file, ItemFile::Bare(ref v) if v.len() == 2));
    }

    #[test]
    fn yaml_config_overrides_cli_values() {
        let y: YamlConfig =
            serde_yaml::from_str("container_width: 640\nstrategy: auto\nsort_order: key_asc\n")
                .unwrap();
        let cfg = y.into_packer_config(PackerConfig::default()).unwrap();
        assert_eq!(cfg.container_width, 640.0);
        assert_eq!(cfg.container_height, 300.0);
        assert_eq!(cfg.strategy, PackStrategy::Auto);
        assert_eq!(cfg.sort_order, SortOrder::KeyAsc);

        let bad: YamlConfig = serde_yaml::from_str("strategy: skyline\n").unwrap();
        assert!(bad.into_packer_config(PackerConfig::default()).is_err());
    }

    #[test]
    fn builtin_templates_render() {
        let layout = pack_layout(
            vec![
                LayoutItem::new("bill", Shape::rectangle(100.0, 40.0)),
                LayoutItem::new("coin", Shape::circle(20.0)),
            ],
            PackerConfig::default(),
        )
        .unwrap();
        let cfg = PackerConfig::default();

        for (engine, needle) in [("csv", "key,shape,x,y,width,height"), ("css", ".pile .coin")] {
            let args = PackArgs::parse_from(["pack", "items.json", "--engine", engine]);
            let renderer = TemplateRenderer::new(&args).unwrap();
            let text = renderer.render("pile", &layout, &cfg).unwrap();
            assert!(text.contains(needle), "{}: {}", engine, text);
            assert!(text.contains("bill"));
        }
    }

    #[test]
    fn pile_names_come_from_file_stems() {
        let root = Path::new("piles");
        assert_eq!(pile_name(root, Path::new("piles/left.json"), 0), "left");
        assert_eq!(pile_name(Path::new("piles/left.json"), Path::new("piles/left.json"), 0), "left");
        assert_eq!(pile_name(root, Path::new(""), 3), "pile_3");
    }

    #[test]
    fn nested_piles_keep_their_directories() {
        let root = Path::new("piles");
        assert_eq!(pile_name(root, Path::new("piles/a/left.json"), 0), "a_left");
        assert_eq!(pile_name(root, Path::new("piles/b/left.json"), 1), "b_left");
        assert_eq!(pile_name(root, Path::new("piles/a/x/right.yml"), 2), "a_x_right");
    }

    #[test]
    fn clashing_pile_names_are_rejected() {
        let root = Path::new("piles");
        let names: Vec<String> = ["piles/left.json", "piles/left.yaml", "piles/a/left.json"]
            .iter()
            .enumerate()
            .map(|(i, p)| pile_name(root, Path::new(p), i))
            .collect();

        let err = ensure_unique_names(&names).unwrap_err();
        assert!(err.to_string().contains("'left'"), "{}", err);
        assert!(ensure_unique_names(&names[1..]).is_ok());
    }

    #[test]
    fn radial_scan_flags_reach_the_config() {
        let args = CoinsArgs::parse_from([
            "coins",
            "--values",
            "25,10",
            "--scan-angle-step-deg",
            "5",
            "--scan-radial-step",
            "4",
            "--scan-max-distance",
            "120",
        ]);
        let cfg = args.engine_args.to_config().unwrap();
        assert_eq!(cfg.scan_angle_step_deg, 5.0);
        assert_eq!(cfg.scan_radial_step, 4.0);
        assert_eq!(cfg.scan_max_distance, 120.0);

        let defaults = CoinsArgs::parse_from(["coins", "--values", "25"]);
        let cfg = defaults.engine_args.to_config().unwrap();
        assert_eq!(cfg.scan_angle_step_deg, PackerConfig::default().scan_angle_step_deg);
    }
}
