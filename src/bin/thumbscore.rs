use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use thumbscore::{
    Analysis, AnalysisSession, BrandColor, CpuRasterizer, RasterOpts, Rasterizer, Scene,
    SessionOpts,
};

const DEFAULT_BRAND: &str = "#ef4444";
const WATCH_POLL: Duration = Duration::from_millis(50);

#[derive(Parser, Debug)]
#[command(name = "thumbscore", version, about = "Score thumbnail compositions")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a scene and print its score and findings.
    Analyze(AnalyzeArgs),
    /// Rasterize a scene to a PNG.
    Render(RenderArgs),
    /// Re-analyze a scene file whenever it changes.
    Watch(WatchArgs),
    /// Write the editor's default scene.
    Init(InitArgs),
}

#[derive(Parser, Debug)]
struct AnalyzeArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Brand color as `#rrggbb`.
    #[arg(long, default_value = DEFAULT_BRAND)]
    brand: String,

    /// Font file for glyph rendering (defaults to `$THUMBSCORE_FONT`; text is greeked without one).
    #[arg(long)]
    font: Option<PathBuf>,

    /// Print the analysis as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Font file for glyph rendering.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct WatchArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Brand color as `#rrggbb`.
    #[arg(long, default_value = DEFAULT_BRAND)]
    brand: String,

    /// Quiet period after a change before re-analysing.
    #[arg(long, default_value_t = 300)]
    debounce_ms: u64,

    /// Font file for glyph rendering.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Print the analysis as JSON.
    #[arg(long)]
    json: bool,

    /// Exit after this many analyses.
    #[arg(long)]
    max_runs: Option<u64>,
}

#[derive(Parser, Debug)]
struct InitArgs {
    /// Output scene JSON path.
    #[arg(long)]
    out: PathBuf,

    /// Brand color used by the subtitle.
    #[arg(long, default_value = DEFAULT_BRAND)]
    brand: String,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Analyze(args) => cmd_analyze(args),
        Command::Render(args) => cmd_render(args),
        Command::Watch(args) => cmd_watch(args),
        Command::Init(args) => cmd_init(args),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();
}

fn read_scene(path: &Path) -> anyhow::Result<Scene> {
    let scene =
        Scene::from_path(path).with_context(|| format!("read scene '{}'", path.display()))?;
    scene
        .validate()
        .with_context(|| format!("validate scene '{}'", path.display()))?;
    Ok(scene)
}

fn rasterizer_for(scene_path: &Path, font: Option<PathBuf>) -> CpuRasterizer {
    let assets_root = scene_path.parent().unwrap_or_else(|| Path::new("."));
    let mut opts = RasterOpts::from_env().with_assets_root(assets_root);
    if font.is_some() {
        opts = opts.with_font(font);
    }
    CpuRasterizer::new(opts)
}

fn cmd_analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    let brand = BrandColor::parse(&args.brand)?;
    let scene = read_scene(&args.in_path)?;
    let mut rasterizer = rasterizer_for(&args.in_path, args.font);
    let analysis = thumbscore::run_analysis_with(&mut rasterizer, &scene, &brand.to_string())?;
    print_analysis(&analysis, args.json)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let scene = read_scene(&args.in_path)?;
    let mut rasterizer = rasterizer_for(&args.in_path, args.font);
    let out = rasterizer.rasterize(&scene)?;
    for id in &out.skipped {
        eprintln!("skipped object '{id}'");
    }
    thumbscore::export_png(&out.buffer, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_watch(args: WatchArgs) -> anyhow::Result<()> {
    let brand = BrandColor::parse(&args.brand)?;
    let mut rasterizer = rasterizer_for(&args.in_path, args.font);
    let mut session = AnalysisSession::new(SessionOpts {
        debounce: Duration::from_millis(args.debounce_ms),
        ..SessionOpts::default()
    });

    let mut seen = modified_at(&args.in_path)?;
    let mut runs = 0u64;
    let mut pending_first = true;
    loop {
        let now = Instant::now();
        let modified = modified_at(&args.in_path)?;
        if modified != seen {
            seen = modified;
            session.notify_edit(now);
        }

        if pending_first || session.due(now) {
            pending_first = false;
            match read_scene(&args.in_path) {
                Ok(scene) if session.needs_run(&scene, brand) => {
                    let ticket = session.begin(&scene, brand);
                    match thumbscore::run_analysis_with(&mut rasterizer, &scene, &brand.to_string())
                    {
                        Ok(analysis) => {
                            if session.complete(ticket, analysis) {
                                if let Some(latest) = session.latest() {
                                    print_analysis(latest, args.json)?;
                                }
                                runs += 1;
                            }
                        }
                        Err(e) => eprintln!("error: analyse '{}': {e:#}", args.in_path.display()),
                    }
                }
                Ok(_) => tracing::debug!("scene unchanged, skipping analysis"),
                Err(e) => eprintln!("error: {e:#}"),
            }
            if args.max_runs.is_some_and(|max| runs >= max) {
                return Ok(());
            }
        }

        std::thread::sleep(WATCH_POLL);
    }
}

fn cmd_init(args: InitArgs) -> anyhow::Result<()> {
    let brand = BrandColor::parse(&args.brand)?;
    let scene = thumbscore::default_scene(brand.color())?;
    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, scene.to_json_pretty()?)
        .with_context(|| format!("write scene '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn modified_at(path: &Path) -> anyhow::Result<SystemTime> {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .with_context(|| format!("stat '{}'", path.display()))
}

fn print_analysis(analysis: &Analysis, json: bool) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string(analysis).context("encode analysis JSON")?
        );
        return Ok(());
    }
    println!("score: {} ({})", analysis.score, analysis.grade());
    for f in &analysis.findings {
        let mark = if f.ok { "ok  " } else { "FAIL" };
        match &f.detail {
            Some(d) => println!("  [{mark}] {}: {d}", f.label),
            None => println!("  [{mark}] {}", f.label),
        }
    }
    Ok(())
}
