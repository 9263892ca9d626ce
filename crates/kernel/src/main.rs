//! Navi
//!
//! Dumps a CMS menu export as a nested navigation tree (JSON on stdout).
//!
//! Usage:
//!   navi --input menus.json --location primary_navigation --pretty
//!   cat items.json | navi --raw

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use navi_kernel::Navi;
use navi_kernel::config::Config;
use navi_kernel::menu::{MAX_DEPTH_LIMIT, MenuRef, StaticMenuSource, TreeStrategy};
use navi_sdk::types::{MenuId, RawMenuItem};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Command line options. Flags override `NAVI_*` environment variables.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Menu export: a `{locations, menus}` object or a bare item array. `-` reads stdin.
    #[arg(long, short, default_value = "-")]
    input: PathBuf,

    /// Theme location to load.
    #[arg(long)]
    location: Option<String>,

    /// Menu id to load, bypassing location lookup.
    #[arg(long, conflicts_with = "location")]
    menu_id: Option<u64>,

    /// Print the flat item list keyed by id instead of the tree.
    #[arg(long)]
    raw: bool,

    /// Fail on invalid, duplicate or unreachable items.
    #[arg(long)]
    strict: bool,

    /// Tree assembly strategy: `scan` or `indexed`.
    #[arg(long)]
    strategy: Option<TreeStrategy>,

    /// Maximum nesting depth (1 to 1024).
    #[arg(long, value_parser = parse_max_depth)]
    max_depth: Option<usize>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let args = Args::parse();
    let config = apply_args(Config::from_env().context("failed to load configuration")?, &args);
    let options = config.build_options();

    let input = read_input(&args.input)?;
    let navi = load_navi(&input, &args, &config)?;
    info!(
        items = navi.len(),
        menu = ?navi.menu_id(),
        strategy = ?options.strategy,
        "menu loaded"
    );

    if args.raw {
        println!("{}", navi.raw_json(args.pretty)?);
        return Ok(());
    }

    let outcome = navi
        .tree_with_report()
        .context("failed to build menu tree")?;
    if !outcome.report.is_clean() {
        warn!(
            invalid = outcome.report.invalid_records.len(),
            duplicates = outcome.report.duplicate_ids.len(),
            unreachable = outcome.report.unreachable.len(),
            "some menu items were left out"
        );
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&outcome.tree)?
    } else {
        serde_json::to_string(&outcome.tree)?
    };
    println!("{json}");

    Ok(())
}

fn apply_args(mut config: Config, args: &Args) -> Config {
    if let Some(location) = &args.location {
        config.location = location.clone();
    }
    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }
    if let Some(max_depth) = args.max_depth {
        config.max_depth = max_depth;
    }
    config.strict |= args.strict;
    config
}

fn parse_max_depth(value: &str) -> Result<usize, String> {
    let depth: usize = value.parse().map_err(|e: std::num::ParseIntError| e.to_string())?;
    if depth == 0 || depth > MAX_DEPTH_LIMIT {
        return Err(format!("must be between 1 and {MAX_DEPTH_LIMIT}"));
    }
    Ok(depth)
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read menu export from stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn load_navi(input: &str, args: &Args, config: &Config) -> Result<Navi> {
    let value: serde_json::Value =
        serde_json::from_str(input).context("menu export is not valid JSON")?;
    let options = config.build_options();

    match value {
        serde_json::Value::Array(_) => {
            if args.menu_id.is_some() {
                warn!("--menu-id is ignored for a bare item array");
            }
            let items: Vec<RawMenuItem> =
                serde_json::from_value(value).context("failed to decode menu items")?;
            Ok(Navi::from_items(items, options))
        }
        serde_json::Value::Object(_) => {
            let source: StaticMenuSource =
                serde_json::from_value(value).context("failed to decode menu export")?;
            let menu = match args.menu_id {
                Some(id) => MenuRef::Id(MenuId(id)),
                None => MenuRef::location(config.location.clone()),
            };
            Ok(Navi::build(&source, menu, options))
        }
        _ => bail!("menu export must be a JSON object or array"),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn max_depth_flag_is_bounded() {
        assert_eq!(parse_max_depth("3").unwrap(), 3);
        assert_eq!(parse_max_depth("1024").unwrap(), MAX_DEPTH_LIMIT);
        assert!(parse_max_depth("0").is_err());
        assert!(parse_max_depth("1025").is_err());
        assert!(parse_max_depth("deep").is_err());
    }
}
