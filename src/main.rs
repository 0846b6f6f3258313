use std::{io::Read, sync::Arc};

use anyhow::{bail, Context};
use bcve::{
    config::Config,
    embed::{EmbedRewriter, Hooks},
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn read_markup(file: Option<String>) -> anyhow::Result<String> {
    match file {
        Some(path) => {
            std::fs::read_to_string(&path).with_context(|| format!("failed to read {path}"))
        }
        None => {
            let mut markup = String::new();
            std::io::stdin()
                .read_to_string(&mut markup)
                .context("failed to read stdin")?;
            Ok(markup)
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let args = cli::Args::parse();
    let config = Config::load()?;
    let rewriter = EmbedRewriter::from_config(&config, Hooks::new())?;

    match args.command {
        cli::Command::Render { attrs, file } => {
            let attrs = cli::parse_attrs(&attrs)?;
            let markup = read_markup(file)?;

            print!("{}", rewriter.render_block(&attrs, &markup));
            Ok(())
        }

        cli::Command::Thumbnail { url } => match rewriter.thumbnail_for(&url) {
            Some((resolved, thumbnail_url)) => {
                log::info!("provider={} id={}", resolved.provider, resolved.video_id);
                println!("{thumbnail_url}");
                Ok(())
            }
            None => bail!("no thumbnail found for {url}"),
        },

        cli::Command::Daemon { listen } => {
            let listen_addr = listen.unwrap_or_else(|| config.listen_addr.clone());
            bcve::web::start_daemon(Arc::new(rewriter), &listen_addr)
        }
    }
}
