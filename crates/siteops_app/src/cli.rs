use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "siteops",
    version,
    about = "Run one maintenance operation against a set of sites"
)]
pub struct Args {
    /// RON file with the script root and the site/operation catalog.
    #[arg(long, default_value = "siteops.ron")]
    pub config: PathBuf,

    /// Overrides `script_root` from the config file.
    #[arg(long, value_name = "URL")]
    pub script_root: Option<String>,

    /// Site to include; repeat for several sites.
    #[arg(long = "site", value_name = "SITE")]
    pub sites: Vec<String>,

    /// Select every site in the catalog.
    #[arg(long)]
    pub all_sites: bool,

    /// Operation to perform.
    #[arg(long, value_name = "OP")]
    pub op: Option<String>,

    /// Ask the server for detailed messages.
    #[arg(short, long)]
    pub verbose: bool,

    /// Ask the server to simulate the operation.
    #[arg(short, long)]
    pub dry_run: bool,

    /// Pick the site and operation from numbered menus instead of flags.
    #[arg(short, long)]
    pub interactive: bool,

    /// Print the site and operation catalog, then exit.
    #[arg(long)]
    pub list: bool,

    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    pub log: LogTarget,

    /// Log at debug level.
    #[arg(long)]
    pub debug: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
}
