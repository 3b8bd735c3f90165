//! term-motd: format message-of-the-day banners with ANSI escape codes.

mod cli;
mod config;
mod motd;
mod paths;

use ablog_news::{NewsEntry, PostInfo, SplitUrl};
use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, ConfigAction, WrapArgs};
use config::{Config, init_config, load_config, load_config_from_path, schema};
use motd::{MotdParts, MotdSettings, accommodate_motd};
use paths::{bottom_dir, change_file_extension, file_extension, resolve_path};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG, when set, overrides the verbosity flag.
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    match &cli.command {
        Commands::Completions { shell } => {
            Cli::print_completions(*shell);
            return Ok(());
        }
        Commands::Config { action } => {
            return handle_config_command(action);
        }
        _ => {}
    }

    let config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };
    log::debug!("Loaded config: {:?}", config);

    match cli.command {
        Commands::Wrap { file, wrap } => run_wrap(file.as_deref(), &wrap, config),
        Commands::Motd {
            body,
            head,
            foot,
            link,
            wrap,
        } => {
            let parts = MotdParts {
                body,
                head,
                foot,
                link,
            };
            run_motd(&parts, &wrap, config)
        }
        Commands::News {
            feed,
            base_url,
            posts_dir,
            json,
        } => run_news(&feed, base_url.as_ref(), posts_dir.as_deref(), json),
        Commands::Post { file, json } => run_post(&file, json),
        Commands::Completions { .. } | Commands::Config { .. } => Ok(()),
    }
}

/// Handle config subcommands.
fn handle_config_command(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Init { force } => {
            let path = init_config(*force)?;
            println!("Configuration file created at: {}", path.display());
            Ok(())
        }
        ConfigAction::Schema => {
            let schema = schema::generate_schema().context("Failed to serialize schema")?;
            println!("{}", schema);
            Ok(())
        }
    }
}

/// Apply command line overrides to the wrap configuration.
fn apply_wrap_args(config: &mut Config, args: &WrapArgs) {
    if let Some(width) = args.width {
        config.wrap.width = width;
    }
    if let Some(match_window) = args.match_window {
        config.wrap.match_window = usize::from(match_window);
    }
}

fn run_wrap(file: Option<&Path>, args: &WrapArgs, mut config: Config) -> Result<()> {
    apply_wrap_args(&mut config, args);
    let wrapper = config.wrap.wrapper();

    let text = match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read text file: '{}'", path.display()))?,
        None => io::read_to_string(io::stdin()).context("Failed to read standard input")?,
    };

    let mut out = io::stdout().lock();
    for line in text.lines() {
        for wrapped in wrapper.wrap(line) {
            writeln!(out, "{}", wrapped)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn run_motd(parts: &MotdParts, args: &WrapArgs, mut config: Config) -> Result<()> {
    apply_wrap_args(&mut config, args);
    let settings = MotdSettings {
        wrapper: config.wrap.wrapper(),
        indent: config.motd.indent,
        link_header: config.motd.link_header,
    };

    let path = accommodate_motd(parts, &settings)?;
    log::info!("MOTD file updated: '{}'", resolve_path(&path).display());
    Ok(())
}

/// Top news entry, with the post it links to when found.
#[derive(Debug, Serialize)]
struct NewsReport {
    #[serde(flatten)]
    entry: NewsEntry,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    post: Option<PostInfo>,
}

fn run_news(
    feed: &Path,
    base_url: Option<&SplitUrl>,
    posts_dir: Option<&Path>,
    json: bool,
) -> Result<()> {
    let feed = resolve_path(feed);
    log::info!(
        "Reading newsfeed of section '{}'",
        bottom_dir(&feed.to_string_lossy())
    );

    let entry = ablog_news::read_top_news(&feed)?;
    let url = base_url.map(|base| base.join(&entry.html_link).to_string());

    let rst = match posts_dir {
        Some(dir) => ablog_news::rst_path_in_dir(&entry.html_link, dir),
        None => ablog_news::rst_path_from_html_link(&entry.html_link, &feed),
    };
    let post = match rst {
        Ok(path) => Some(ablog_news::read_post_info(&path)?),
        Err(e) => {
            log::warn!("{}", e);
            None
        }
    };

    let report = NewsReport { entry, url, post };
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("title: {}", report.entry.title);
    println!("date: {}", report.entry.date);
    println!("link: {}", report.entry.html_link);
    if let Some(url) = &report.url {
        println!("url: {}", url);
    }
    if let Some(post) = &report.post {
        println!("source: {}", post.source.display());
        println!("post title: {}", post.title);
        println!("post date: {}", post.date);
    }
    Ok(())
}

/// Post metadata with the name of the page Sphinx renders it to.
#[derive(Debug, Serialize)]
struct PostReport {
    #[serde(flatten)]
    info: PostInfo,
    page: String,
}

fn run_post(file: &Path, json: bool) -> Result<()> {
    let extension = file_extension(file);
    if extension != ".rst" {
        log::warn!(
            "Expected an RST file, got '{}' extension: '{}'",
            extension,
            file.display()
        );
    }

    let info = ablog_news::read_post_info(file)?;
    let page = change_file_extension(&info.source, ".html");
    let report = PostReport { info, page };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("title: {}", report.info.title);
    println!("date: {}", report.info.date);
    println!("source: {}", report.info.source.display());
    println!("page: {}", report.page);
    Ok(())
}
