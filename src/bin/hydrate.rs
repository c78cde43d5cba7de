use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser as ClapParser;

use adom::Dom;
use landing::check::unresolved_bindings;
use landing::config::Config;
use landing::markers::Markers;
use landing::pipeline::Hydrator;
use landing::warn;

#[derive(clap::Parser, Debug)]
/// Hydrate a landing page: bind the values from a JSON config file
/// into the page's data-* markers and print the finished page. When
/// the config cannot be read the page is passed through as served.
struct Args {
    /// The HTML page to hydrate.
    page: PathBuf,

    /// The config file; defaults to config/config.json next to the page.
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Write the result here instead of to stdout.
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Write nothing; list the bindings on the page that the config
    /// cannot satisfy and fail when there are any.
    #[clap(long)]
    check: bool,
}

fn default_config_path(page: &Path) -> PathBuf {
    page.parent()
        .unwrap_or_else(|| Path::new("."))
        .join("config/config.json")
}

fn main() -> Result<()> {
    let args = Args::parse();

    let text = std::fs::read_to_string(&args.page)
        .with_context(|| anyhow!("reading page {:?}", args.page))?;
    let mut dom = Dom::parse_document(&text)
        .with_context(|| anyhow!("parsing page {:?}", args.page))?;
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| default_config_path(&args.page));
    let markers = Markers::default();

    if args.check {
        let config = Config::load(&config_path)?;
        let unresolved = unresolved_bindings(&dom, &markers, &config.content);
        if !unresolved.is_empty() {
            let mut outp = std::io::stdout().lock();
            for binding in &unresolved {
                writeln!(&mut outp, "{}: {}", binding.marker, binding.path)?;
            }
            bail!("{} unresolved binding(s) in {:?}", unresolved.len(), args.page);
        }
        return Ok(());
    }

    let config = match Config::load(&config_path) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("no config, passing the page through: {:#}", e);
            None
        }
    };
    Hydrator::with_markers(markers).hydrate(&mut dom, config.as_ref());

    let html = dom.to_html();
    match &args.output {
        Some(path) => std::fs::write(path, &html)
            .with_context(|| anyhow!("writing {path:?}"))?,
        None => std::io::stdout().lock().write_all(html.as_bytes())?,
    }
    Ok(())
}
