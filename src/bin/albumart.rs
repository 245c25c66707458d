use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use sha2::Digest as _;

use albumart::{
    ArtSession, Compositor, FontSet, ImageSource, StyleConfig, Surface, TextColor, TextLayout,
    TextPosition, TrackLibrary,
};

#[derive(Parser, Debug)]
#[command(name = "albumart", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a cover to a PNG file.
    Render(RenderArgs),
    /// Render a cover and store it in a JSON track library.
    Save(SaveArgs),
    /// Render a cover and print it as a PNG data URI.
    DataUri(ComposeArgs),
    /// Inspect style JSON.
    Style(StyleArgs),
}

#[derive(Args, Debug)]
struct ComposeArgs {
    /// Background image: a path, `file://` URL, `data:` URI or http(s) URL.
    #[arg(long)]
    image: ImageSource,

    /// Track title (drawn bold).
    #[arg(long, default_value = "")]
    title: String,

    /// Artist name.
    #[arg(long, default_value = "")]
    artist: String,

    /// Style JSON; the flags below override its fields.
    #[arg(long)]
    style: Option<PathBuf>,

    /// straight, curved-top or curved-bottom.
    #[arg(long)]
    layout: Option<TextLayout>,

    /// Anchor for straight text, e.g. bottom-left.
    #[arg(long)]
    position: Option<TextPosition>,

    /// Rotation of straight text in degrees.
    #[arg(long, allow_hyphen_values = true)]
    rotation: Option<i32>,

    /// Distance between character centers on curved layouts.
    #[arg(long)]
    letter_spacing: Option<f64>,

    /// Title size in pixels.
    #[arg(long)]
    title_size: Option<u32>,

    /// Artist size in pixels.
    #[arg(long)]
    artist_size: Option<u32>,

    /// Text color (#rrggbb, #rgb, rgb(..), rgba(..)).
    #[arg(long)]
    color: Option<TextColor>,

    /// Font file for the title.
    #[arg(long)]
    font_bold: Option<PathBuf>,

    /// Font file for the artist line.
    #[arg(long)]
    font_regular: Option<PathBuf>,

    /// Print diagnostics about font resolution (family name + SHA-256 of font bytes).
    #[arg(long)]
    dump_fonts: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    compose: ComposeArgs,

    /// Output PNG path.
    #[arg(long, conflicts_with = "download_dir", required_unless_present = "download_dir")]
    out: Option<PathBuf>,

    /// Directory to write `<artist> - <title>.png` into.
    #[arg(long)]
    download_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SaveArgs {
    #[command(flatten)]
    compose: ComposeArgs,

    /// Track library JSON file (created when missing).
    #[arg(long)]
    library: PathBuf,

    /// Attach the art to this existing track instead of creating a new one.
    #[arg(long)]
    track_id: Option<String>,
}

#[derive(Args, Debug)]
struct StyleArgs {
    /// Print the default style as JSON.
    #[arg(long, conflicts_with = "check")]
    print_default: bool,

    /// Validate a style JSON file and print it normalized.
    #[arg(long)]
    check: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Save(args) => cmd_save(args),
        Command::DataUri(args) => cmd_data_uri(args),
        Command::Style(args) => cmd_style(args),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let session = compose(&args.compose)?;
    let path = match (args.out, args.download_dir) {
        (Some(out), _) => {
            if let Some(parent) = out.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let png = albumart::encode_png(session.surface())?;
            std::fs::write(&out, png).with_context(|| format!("write png '{}'", out.display()))?;
            out
        }
        (None, Some(dir)) => session.to_download(&dir)?,
        (None, None) => anyhow::bail!("either --out or --download-dir is required"),
    };
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_save(args: SaveArgs) -> anyhow::Result<()> {
    let session = compose(&args.compose)?;
    let mut library = TrackLibrary::open(&args.library)?;
    library.set_pending_credits(&args.compose.title, &args.compose.artist);
    session.save(&mut library, args.track_id.as_deref())?;
    eprintln!(
        "saved album art to {} ({} tracks)",
        library.path().display(),
        library.tracks().len()
    );
    Ok(())
}

fn cmd_data_uri(args: ComposeArgs) -> anyhow::Result<()> {
    let session = compose(&args)?;
    println!("{}", session.to_saved_artifact()?);
    Ok(())
}

fn cmd_style(args: StyleArgs) -> anyhow::Result<()> {
    let style = match args.check {
        Some(path) => StyleConfig::from_path(&path)?,
        None if args.print_default => StyleConfig::default(),
        None => anyhow::bail!("pass --print-default or --check <style.json>"),
    };
    println!("{}", style.to_json_pretty()?);
    Ok(())
}

fn compose(args: &ComposeArgs) -> anyhow::Result<ArtSession> {
    let style = style_from_args(args)?;
    let fonts = resolve_fonts(args)?;
    let compositor = Compositor::new(&fonts)?;
    if args.dump_fonts {
        dump_font_diagnostics(&fonts, &compositor);
    }

    let bytes = args
        .image
        .load_bytes()
        .with_context(|| format!("load image '{}'", args.image))?;
    let image = albumart::decode_image(&bytes)
        .with_context(|| format!("decode image '{}'", args.image))?;

    let mut session = ArtSession::with_compositor(compositor, Surface::album()?)?;
    session.set_style(style)?;
    session.set_title(args.title.as_str())?;
    session.set_artist(args.artist.as_str())?;
    session.set_image(image)?;
    Ok(session)
}

fn style_from_args(args: &ComposeArgs) -> anyhow::Result<StyleConfig> {
    let mut style = match &args.style {
        Some(path) => StyleConfig::from_path(path)?,
        None => StyleConfig::default(),
    };
    if let Some(layout) = args.layout {
        style.text_layout = layout;
    }
    if let Some(position) = args.position {
        style.text_position = position;
    }
    if let Some(rotation) = args.rotation {
        style.text_rotation = rotation;
    }
    if let Some(spacing) = args.letter_spacing {
        style.letter_spacing = spacing;
    }
    if let Some(size) = args.title_size {
        style.title_font_size = size;
    }
    if let Some(size) = args.artist_size {
        style.artist_font_size = size;
    }
    if let Some(color) = args.color {
        style.text_color = color;
    }
    style.validate()?;
    Ok(style)
}

fn resolve_fonts(args: &ComposeArgs) -> anyhow::Result<FontSet> {
    Ok(FontSet::resolve_with_env(
        args.font_bold.as_deref(),
        args.font_regular.as_deref(),
    )?)
}

fn dump_font_diagnostics(fonts: &FontSet, compositor: &Compositor) {
    let (title_family, artist_family) = compositor.families();
    eprintln!("font diagnostics:");
    for (role, face, family) in [
        ("title", &fonts.bold, title_family),
        ("artist", &fonts.regular, artist_family),
    ] {
        eprintln!("  {role}:");
        eprintln!("    source:  {}", face.label);
        eprintln!("    family:  {family}");
        eprintln!("    sha256:  {}", sha256_hex(&face.bytes));
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
