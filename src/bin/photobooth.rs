use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use photobooth::{
    BoothSettings, BorderStyle, CaptureSequencer, CaptureState, Compositor, DirectorySink,
    EditSession, FilterSpec, HtmlFilePrintSurface, LayoutPresenter, PrintOutcome,
    PrintSetBuilder, RawPhoto, StillCamera, TickOutcome,
};

#[derive(Parser, Debug)]
#[command(name = "photobooth", version)]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite one image with a border and filter into an 800x600 JPEG.
    Compose(ComposeArgs),
    /// Composite four images and export them as a print sheet plus downloads.
    Strip(StripArgs),
    /// Run a full capture + edit + export session against still frames.
    Session(SessionArgs),
}

#[derive(Args, Debug)]
struct LookArgs {
    /// Border style: none, hearts, stars, flowers, rainbow.
    #[arg(long, default_value = "none")]
    border: String,

    /// Filter: none, warm, cool, vintage, bright.
    #[arg(long, default_value = "none")]
    filter: String,
}

impl LookArgs {
    fn border(&self) -> BorderStyle {
        BorderStyle::parse(&self.border)
    }

    fn filter(&self) -> FilterSpec {
        FilterSpec::parse(&self.filter)
    }
}

#[derive(Args, Debug)]
struct ComposeArgs {
    /// Source image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JPEG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    look: LookArgs,

    /// Settings JSON.
    #[arg(long)]
    settings: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct StripArgs {
    /// Source image; pass exactly four times.
    #[arg(long = "in", required = true)]
    in_paths: Vec<PathBuf>,

    /// Directory for the downloads and `print.html`.
    #[arg(long)]
    out_dir: PathBuf,

    #[command(flatten)]
    look: LookArgs,

    /// Settings JSON.
    #[arg(long)]
    settings: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SessionArgs {
    /// Frame served by the still camera; repeat to rotate through several.
    #[arg(long = "frame", required = true)]
    frames: Vec<PathBuf>,

    /// Directory for the downloads and `print.html`.
    #[arg(long)]
    out_dir: PathBuf,

    #[command(flatten)]
    look: LookArgs,

    /// Settings JSON.
    #[arg(long)]
    settings: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json);
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args).await,
        Command::Strip(args) => cmd_strip(args).await,
        Command::Session(args) => cmd_session(args).await,
    }
}

fn init_logging(json: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<BoothSettings> {
    let settings = match path {
        Some(p) => BoothSettings::from_path(p)?,
        None => BoothSettings::from_env()?,
    };
    Ok(settings)
}

fn read_raw(path: &Path) -> anyhow::Result<RawPhoto> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    Ok(RawPhoto::from_encoded(bytes))
}

fn now_ms() -> anyhow::Result<u64> {
    let since = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .context("system clock is before the UNIX epoch")?;
    Ok(u64::try_from(since.as_millis()).unwrap_or(u64::MAX))
}

async fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let settings = load_settings(args.settings.as_deref())?;
    let compositor = Compositor::new(settings.compose);
    let raw = read_raw(&args.in_path)?;
    let photo = compositor
        .compose(compositor.request(raw, args.look.border(), args.look.filter()))
        .await
        .with_context(|| format!("compose '{}'", args.in_path.display()))?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, photo.encoded())
        .with_context(|| format!("write jpeg '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

async fn cmd_strip(args: StripArgs) -> anyhow::Result<()> {
    let settings = load_settings(args.settings.as_deref())?;
    let compositor = Compositor::new(settings.compose);

    let mut builder = PrintSetBuilder::new();
    for path in &args.in_paths {
        let raw = read_raw(path)?;
        let photo = compositor
            .compose(compositor.request(raw, args.look.border(), args.look.filter()))
            .await
            .with_context(|| format!("compose '{}'", path.display()))?;
        builder.push(photo)?;
    }
    let presenter = LayoutPresenter::new(builder.finish()?);
    export(&presenter, &args.out_dir)
}

async fn cmd_session(args: SessionArgs) -> anyhow::Result<()> {
    let settings = load_settings(args.settings.as_deref())?;

    let mut frames = Vec::with_capacity(args.frames.len());
    for path in &args.frames {
        let img = image::open(path)
            .with_context(|| format!("open frame '{}'", path.display()))?
            .to_rgba8();
        frames.push(img);
    }
    let camera = StillCamera::new(frames)?;

    let mut sequencer = CaptureSequencer::new(
        camera,
        settings.capture.clone(),
        settings.compose.jpeg_quality,
    )?;
    sequencer.start_camera().await?;
    while sequencer.state() != CaptureState::Complete {
        let shot = sequencer.photo_number();
        match sequencer.run_countdown().await? {
            TickOutcome::Captured { .. } | TickOutcome::Complete => {
                eprintln!("captured photo {shot}");
            }
            TickOutcome::Counting(_) => {}
        }
    }
    let photos = sequencer.take_photos()?;

    let mut editor = EditSession::new(Compositor::new(settings.compose), photos)?;
    let set = loop {
        editor.select_border(args.look.border());
        editor.select_filter(args.look.filter());
        if let Some(set) = editor.save().await? {
            break set;
        }
    };

    export(&LayoutPresenter::new(set), &args.out_dir)
}

fn export(presenter: &LayoutPresenter, out_dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("create output dir '{}'", out_dir.display()))?;

    let mut sink = DirectorySink::new(out_dir);
    let notice = presenter.download_all(&mut sink, now_ms()?)?;
    eprintln!("{} {}", notice.title, notice.description);

    let mut surface = HtmlFilePrintSurface::new(out_dir.join("print.html"));
    match presenter.print(&mut surface) {
        PrintOutcome::Sent => eprintln!("wrote {}", surface.path().display()),
        PrintOutcome::SurfaceUnavailable => {
            anyhow::bail!("could not write '{}'", surface.path().display())
        }
    }
    Ok(())
}
