use chrono::Duration;
use log::warn;
use std::{env, path::PathBuf};

use super::catalog::CatalogSource;
use super::models::Vec3;
use super::planner::RoutePolicy;
use super::tracker::DEFAULT_INTERVAL_SECS;

#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Catalog path or http(s) URL; `None` means the built-in layout.
    pub catalog: Option<String>,
    pub prefs_db: Option<PathBuf>,
    pub threads: Option<usize>,
    pub log_level: Option<String>,
    pub track_interval_secs: Option<u64>,
    pub walk_speed: Option<f64>,
}

impl Config {
    pub fn from_env_defaults() -> Self {
        let catalog = env::var("WAYFINDER_CATALOG").ok().filter(|s| !s.trim().is_empty());
        let prefs_db = env::var("WAYFINDER_PREFS_DB").ok().map(PathBuf::from);
        let threads = env::var("WAYFINDER_THREADS").ok().and_then(|s| s.parse::<usize>().ok());
        let log_level = env::var("WAYFINDER_LOG_LEVEL").ok();
        let track_interval_secs = env::var("WAYFINDER_TRACK_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok());
        let walk_speed = env::var("WAYFINDER_WALK_SPEED").ok().and_then(|s| s.parse::<f64>().ok());
        Self { catalog, prefs_db, threads, log_level, track_interval_secs, walk_speed }.validated()
    }

    /// Drops out-of-range values so the defaults apply instead.
    pub fn validated(mut self) -> Self {
        if let Some(secs) = self.track_interval_secs {
            if interval_from_secs(secs).is_none() {
                warn!("ignoring track interval of {}s", secs);
                self.track_interval_secs = None;
            }
        }
        if let Some(speed) = self.walk_speed {
            if !valid_walk_speed(speed) {
                warn!("ignoring walk speed {}", speed);
                self.walk_speed = None;
            }
        }
        self
    }

    /// Env values replace CLI values whenever they are set.
    pub fn overlay(mut self, env_cfg: Config) -> Self {
        if env_cfg.catalog.is_some() { self.catalog = env_cfg.catalog; }
        if env_cfg.prefs_db.is_some() { self.prefs_db = env_cfg.prefs_db; }
        if env_cfg.threads.is_some() { self.threads = env_cfg.threads; }
        if env_cfg.log_level.is_some() { self.log_level = env_cfg.log_level; }
        if env_cfg.track_interval_secs.is_some() { self.track_interval_secs = env_cfg.track_interval_secs; }
        if env_cfg.walk_speed.is_some() { self.walk_speed = env_cfg.walk_speed; }
        self
    }

    pub fn catalog_source(&self) -> CatalogSource {
        self.catalog.as_deref().map(CatalogSource::parse).unwrap_or(CatalogSource::Builtin)
    }

    pub fn prefs_db_path(&self) -> PathBuf {
        self.prefs_db.clone().unwrap_or_else(crate::util::default_prefs_db)
    }

    pub fn track_interval(&self) -> Duration {
        self.track_interval_secs
            .and_then(interval_from_secs)
            .unwrap_or_else(|| Duration::seconds(DEFAULT_INTERVAL_SECS))
    }

    pub fn walk_speed(&self) -> f64 {
        self.walk_speed
            .filter(|v| valid_walk_speed(*v))
            .unwrap_or(RoutePolicy::default().walk_speed)
    }
}

/// Positive interval that fits in a `Duration`.
pub fn interval_from_secs(secs: u64) -> Option<Duration> {
    if secs == 0 { return None; }
    i64::try_from(secs).ok().and_then(Duration::try_seconds)
}

pub fn valid_walk_speed(speed: f64) -> bool {
    speed.is_finite() && speed > 0.0
}

/// Parses `x,y,z`.
pub fn parse_position(input: &str) -> Option<Vec3> {
    let parts: Vec<&str> = input.split(',').collect();
    if parts.len() != 3 { return None; }
    let x = parts[0].trim().parse::<f64>().ok()?;
    let y = parts[1].trim().parse::<f64>().ok()?;
    let z = parts[2].trim().parse::<f64>().ok()?;
    let v = Vec3::new(x, y, z);
    if v.is_finite() { Some(v) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("5,0,5"), Some(Vec3::new(5.0, 0.0, 5.0)));
        assert_eq!(parse_position(" -40.5, 0 ,-30"), Some(Vec3::new(-40.5, 0.0, -30.0)));
        assert_eq!(parse_position("1,2"), None);
        assert_eq!(parse_position("a,b,c"), None);
        assert_eq!(parse_position("inf,0,0"), None);
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.catalog_source(), CatalogSource::Builtin);
        assert_eq!(cfg.track_interval(), Duration::seconds(5));
        assert_eq!(cfg.walk_speed(), 5.0);
    }

    #[test]
    fn test_out_of_range_values_fall_back_to_defaults() {
        for speed in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let cfg = Config { walk_speed: Some(speed), ..Config::default() };
            assert_eq!(cfg.walk_speed(), 5.0);
            assert_eq!(cfg.validated().walk_speed, None);
        }
        for secs in [0, u64::MAX, 10_000_000_000_000_000] {
            let cfg = Config { track_interval_secs: Some(secs), ..Config::default() };
            assert_eq!(cfg.track_interval(), Duration::seconds(5));
            assert_eq!(cfg.validated().track_interval_secs, None);
        }
        let ok = Config { walk_speed: Some(2.5), track_interval_secs: Some(30), ..Config::default() }.validated();
        assert_eq!(ok.walk_speed(), 2.5);
        assert_eq!(ok.track_interval(), Duration::seconds(30));
    }

    #[test]
    fn test_overlay_prefers_env_values() {
        let cli = Config { threads: Some(2), walk_speed: Some(4.0), ..Config::default() };
        let env_cfg = Config { threads: Some(8), ..Config::default() };
        let merged = cli.overlay(env_cfg);
        assert_eq!(merged.threads, Some(8));
        assert_eq!(merged.walk_speed, Some(4.0));
    }

    #[test]
    fn test_from_env_defaults_reads_values() {
        std::env::set_var("WAYFINDER_CATALOG", "/tmp/pois.json");
        std::env::set_var("WAYFINDER_PREFS_DB", "/tmp/prefs.db");
        std::env::set_var("WAYFINDER_THREADS", "3");
        std::env::set_var("WAYFINDER_LOG_LEVEL", "debug");
        std::env::set_var("WAYFINDER_TRACK_INTERVAL_SECS", "2");
        std::env::set_var("WAYFINDER_WALK_SPEED", "7.5");

        let cfg = Config::from_env_defaults();
        assert_eq!(cfg.catalog_source(), CatalogSource::File(PathBuf::from("/tmp/pois.json")));
        assert_eq!(cfg.prefs_db_path(), PathBuf::from("/tmp/prefs.db"));
        assert_eq!(cfg.threads, Some(3));
        assert_eq!(cfg.log_level.as_deref(), Some("debug"));
        assert_eq!(cfg.track_interval(), Duration::seconds(2));
        assert_eq!(cfg.walk_speed(), 7.5);

        // cleanup
        std::env::remove_var("WAYFINDER_CATALOG");
        std::env::remove_var("WAYFINDER_PREFS_DB");
        std::env::remove_var("WAYFINDER_THREADS");
        std::env::remove_var("WAYFINDER_LOG_LEVEL");
        std::env::remove_var("WAYFINDER_TRACK_INTERVAL_SECS");
        std::env::remove_var("WAYFINDER_WALK_SPEED");
    }
}
