use anyhow::Context;
use inlinemark::{HtmlRenderer, Options, Parser};
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use tracing_subscriber::{
    Layer, Registry, filter::Targets, layer::SubscriberExt, util::SubscriberInitExt,
};

fn install_tracing() -> anyhow::Result<()> {
    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let filter = Targets::from_str(&rust_log).context("Invalid RUST_LOG filter")?;
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .without_time()
        .with_target(true);
    Registry::default().with(layer.with_filter(filter)).init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    install_tracing()?;

    let mut print_tree = false;
    let mut options = Options::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--tree" => print_tree = true,
            "--config" => {
                let path = args.next().context("--config requires a path")?;
                options = Options::load_from_path(&path)?;
                tracing::info!("Loaded options from {path}: {options:?}");
            }
            other => anyhow::bail!("Unknown argument: {other}"),
        }
    }

    let parser = Parser::with_options(options);
    let renderer = HtmlRenderer::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read stdin")?;
        if line.is_empty() {
            continue;
        }
        let document = parser.parse(&line);
        writeln!(out, "{}", renderer.render(&document))?;
        if print_tree {
            writeln!(out, "{}", serde_json::to_string_pretty(&document.nodes)?)?;
        }
    }
    Ok(())
}
