//! Command-line interface definition using clap.

use crate::paths::valid_dirpath;
use ablog_news::SplitUrl;
use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueHint};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;

/// Format message-of-the-day banners with ANSI escape codes.
#[derive(Parser, Debug)]
#[command(name = "term-motd")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Increase logging verbosity (-v: info, -vv: debug)
    ///
    /// RUST_LOG takes precedence when set.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by the commands that wrap text.
#[derive(clap::Args, Debug, Default)]
pub struct WrapArgs {
    /// Maximum number of visible characters per line (0 disables wrapping)
    ///
    /// Config: wrap.width
    #[arg(short, long)]
    pub width: Option<usize>,

    /// Number of characters used to match wrapped text with the escaped text
    ///
    /// Config: wrap.match_window
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub match_window: Option<u16>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Wrap lines of ANSI text to a fixed width and print them
    Wrap {
        /// Text file to wrap (reads standard input if omitted)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,

        #[command(flatten)]
        wrap: WrapArgs,
    },
    /// Wrap, indent and add header/footer to a MOTD file, in place
    Motd {
        /// Text file with the MOTD body, it will be updated
        #[arg(value_hint = ValueHint::FilePath)]
        body: PathBuf,

        /// Text file prepended to the body
        #[arg(long, value_hint = ValueHint::FilePath)]
        head: Option<PathBuf>,

        /// Text file appended to the body
        #[arg(long, value_hint = ValueHint::FilePath)]
        foot: Option<PathBuf>,

        /// URL added as an extra link after the body
        #[arg(long, value_hint = ValueHint::Url)]
        link: Option<String>,

        #[command(flatten)]
        wrap: WrapArgs,
    },
    /// Show the latest entry of an ABlog HTML newsfeed
    News {
        /// HTML page of the newsfeed, inside the `_website` directory of the site
        #[arg(value_hint = ValueHint::FilePath)]
        feed: PathBuf,

        /// URL the newsfeed page is published at, used to print the post URL
        #[arg(long, value_hint = ValueHint::Url, value_parser = parse_base_url)]
        base_url: Option<SplitUrl>,

        /// Directory of the Sphinx project holding the RST posts
        ///
        /// Defaults to the parent of the `_website` directory of the feed.
        #[arg(long, value_hint = ValueHint::DirPath, value_parser = valid_dirpath)]
        posts_dir: Option<PathBuf>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show title and date of an RST news post
    Post {
        /// RST file of the news post
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create a default configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Print the JSON schema of the configuration file
    Schema,
}

/// Clap value parser for site URLs.
fn parse_base_url(s: &str) -> Result<SplitUrl, String> {
    ablog_news::parse_url(s).map_err(|e| e.to_string())
}

impl Cli {
    /// Print shell completions to stdout.
    pub fn print_completions(shell: Shell) {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "term-motd", &mut io::stdout());
    }

    /// Log level selected by the verbosity flag.
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }
}
