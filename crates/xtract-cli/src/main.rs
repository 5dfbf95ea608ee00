use miette::{IntoDiagnostic, Result, WrapErr, miette};
use std::io::Read;
use std::path::{Path, PathBuf};
use xtract_renderer::raw::parse_json;
use xtract_renderer::{NormalizedPost, PostResponse, RawPost, TransformConfig, transform_post_with};

use clap::Parser;

#[derive(Parser)]
#[command(version, about = "Xtract - readable text and media from saved post payloads", long_about = None)]
struct Cli {
    /// Post payload as JSON: a bare post or an API response. `-` reads stdin
    #[arg(default_value = "-")]
    input: PathBuf,

    /// JSON file with transform settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Follow at most this many levels of quoted posts
    #[arg(long)]
    max_quote_depth: Option<usize>,

    /// Leave shortened links as they are
    #[arg(long)]
    no_expand_urls: bool,

    /// Print only the post text instead of the full JSON record
    #[arg(long)]
    text: bool,

    /// Pretty-print the JSON record
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    init_miette()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => TransformConfig::default(),
    };
    if let Some(depth) = cli.max_quote_depth {
        config.max_quote_depth = depth;
    }
    if cli.no_expand_urls {
        config.expand_urls = false;
    }

    let payload = read_input(&cli.input)?;
    let value = parse_json(&payload)?;

    let post = if value.get("data").is_some() {
        PostResponse::from_value(value)?
            .into_post()?
            .ok_or_else(|| miette!("response contains no post"))?
    } else {
        RawPost::from_value(value)?
    };

    tracing::debug!("transforming post {}", post.id());
    let normalized = transform_post_with(&post, &config);
    print_post(&normalized, &cli)
}

fn print_post(post: &NormalizedPost, cli: &Cli) -> Result<()> {
    if cli.text {
        println!("{}", post.text);
        return Ok(());
    }
    let json = if cli.pretty {
        serde_json::to_string_pretty(post)
    } else {
        serde_json::to_string(post)
    };
    println!("{}", json.into_diagnostic()?);
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .into_diagnostic()
            .wrap_err("failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to read {}", path.display()))
    }
}

fn load_config(path: &Path) -> Result<TransformConfig> {
    let raw = std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
    TransformConfig::from_json(&raw)
        .into_diagnostic()
        .wrap_err("invalid config")
}

fn init_miette() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .with_cause_chain()
                .context_lines(5)
                .tab_width(2)
                .break_words(true)
                .build(),
        )
    }))
    .into_diagnostic()?;
    miette::set_panic_hook();
    Ok(())
}
