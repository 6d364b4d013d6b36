use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::navigation::config::{self, Config};
use crate::navigation::tracker::{FALLBACK_START, FALLBACK_TERMINAL};
use crate::navigation::{logging, Category, NavigationStore, UserPosition, UserType, Vec3};
use crate::phrasebook::Language;

pub mod ask;
pub mod locations;
pub mod prefs;
pub mod route;
pub mod track;

#[derive(Args, Debug, Clone, Default)]
pub struct CommonOpts {
    /// Location catalog: JSON file path or http(s) URL (default: built-in layout or WAYFINDER_CATALOG)
    #[arg(long, global = true)]
    pub catalog: Option<String>,
    /// Preferences SQLite DB (default: repo_root/wayfinder.db or WAYFINDER_PREFS_DB)
    #[arg(long = "prefs-db", global = true)]
    pub prefs_db: Option<PathBuf>,
    /// Number of worker threads (rayon)
    #[arg(long, global = true)]
    pub threads: Option<usize>,
    /// Log level (trace|debug|info|warn|error)
    #[arg(long = "log-level", global = true)]
    pub log_level: Option<String>,
    /// Seconds between simulated tracking steps
    #[arg(long = "track-interval", global = true)]
    pub track_interval_secs: Option<u64>,
    /// Walking speed in scene units per minute
    #[arg(long = "walk-speed", global = true)]
    pub walk_speed: Option<f64>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum WayfinderCommand {
    /// List points of interest matching a search
    Locations {
        #[arg(long, default_value = "")]
        query: String,
        /// Category filters (comma-separated or repeated)
        #[arg(long = "filter", value_delimiter = ',')]
        filters: Vec<Category>,
        /// passenger|visitor (default: stored preference)
        #[arg(long = "user-type")]
        user_type: Option<UserType>,
        #[arg(long)]
        json: bool,
    },
    /// Plan a route from the user to one location
    Route {
        /// Destination location id
        #[arg(long)]
        to: String,
        /// Start position x,y,z (default: 5,0,5)
        #[arg(long, value_parser = parse_position_arg)]
        from: Option<Vec3>,
        #[arg(long)]
        json: bool,
    },
    /// Plan routes to every visible location
    Routes {
        #[arg(long, value_parser = parse_position_arg)]
        from: Option<Vec3>,
        #[arg(long = "user-type")]
        user_type: Option<UserType>,
    },
    /// Simulate position tracking
    Track {
        #[arg(long, default_value_t = 3)]
        ticks: u32,
        /// RNG seed for reproducible movement
        #[arg(long)]
        seed: Option<u64>,
        /// Wait the real interval between steps
        #[arg(long)]
        realtime: bool,
        #[arg(long, value_parser = parse_position_arg)]
        from: Option<Vec3>,
    },
    /// Ask the assistant a question
    Ask {
        message: String,
        /// fr|en|ar (default: stored preference)
        #[arg(long)]
        language: Option<Language>,
        /// Answer immediately
        #[arg(long = "no-delay")]
        no_delay: bool,
    },
    /// Read or change stored preferences
    Prefs {
        #[command(subcommand)]
        action: prefs::PrefsAction,
    },
}

fn parse_position_arg(s: &str) -> std::result::Result<Vec3, String> {
    config::parse_position(s).ok_or_else(|| format!("invalid position '{}', expected x,y,z", s))
}

pub fn resolve_config(common: &CommonOpts) -> Config {
    cli_config(common).overlay(Config::from_env_defaults())
}

/// CLI options alone, with out-of-range values dropped.
pub fn cli_config(common: &CommonOpts) -> Config {
    Config {
        catalog: common.catalog.clone(),
        prefs_db: common.prefs_db.clone(),
        threads: common.threads,
        log_level: common.log_level.clone(),
        track_interval_secs: common.track_interval_secs,
        walk_speed: common.walk_speed,
    }
    .validated()
}

pub fn cmd_wayfinder(common: CommonOpts, sub: WayfinderCommand) -> Result<()> {
    let cfg = resolve_config(&common);

    logging::init(cfg.log_level.as_deref());
    if let Some(n) = cfg.threads {
        let _ = rayon::ThreadPoolBuilder::new().num_threads(n).build_global();
    }

    match sub {
        WayfinderCommand::Locations { query, filters, user_type, json } => {
            let user_type = match user_type {
                Some(t) => t,
                None => stored_user_type(&cfg)?,
            };
            locations::cmd_locations(&cfg, &query, &filters, user_type, json)
        }
        WayfinderCommand::Route { to, from, json } => route::cmd_route(&cfg, &to, from, json),
        WayfinderCommand::Routes { from, user_type } => {
            let user_type = match user_type {
                Some(t) => t,
                None => stored_user_type(&cfg)?,
            };
            route::cmd_routes(&cfg, from, user_type)
        }
        WayfinderCommand::Track { ticks, seed, realtime, from } => {
            track::cmd_track(&cfg, ticks, seed, realtime, from)
        }
        WayfinderCommand::Ask { message, language, no_delay } => {
            let language = match language {
                Some(l) => l,
                None => stored_language(&cfg)?,
            };
            ask::cmd_ask(&message, language, no_delay)
        }
        WayfinderCommand::Prefs { action } => prefs::cmd_prefs(&cfg, action),
    }
}

/// Store with the catalog loaded.
pub fn open_store(cfg: &Config) -> Result<NavigationStore> {
    let mut store = NavigationStore::from_config(cfg);
    store
        .initialize_locations()
        .with_context(|| format!("load catalog from {:?}", cfg.catalog_source()))?;
    Ok(store)
}

/// Position the presentation layer assumes before any real report arrives.
pub fn start_position(from: Option<Vec3>) -> UserPosition {
    UserPosition::new(from.unwrap_or(FALLBACK_START), Some(FALLBACK_TERMINAL), Utc::now())
}

fn stored_user_type(cfg: &Config) -> Result<UserType> {
    let path = cfg.prefs_db_path();
    if !path.exists() {
        return Ok(UserType::default());
    }
    crate::db::user_type(&crate::db::open_rw(&path)?)
}

fn stored_language(cfg: &Config) -> Result<Language> {
    let path = cfg.prefs_db_path();
    if !path.exists() {
        return Ok(Language::default());
    }
    crate::db::language(&crate::db::open_rw(&path)?)
}
