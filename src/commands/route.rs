use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::navigation::config::Config;
use crate::navigation::{MapLocation, NavigationPath, NavigationPlanner, UserPosition, UserType, Vec3};

pub fn cmd_route(cfg: &Config, to: &str, from: Option<Vec3>, json: bool) -> Result<()> {
    let mut store = super::open_store(cfg)?;
    store.set_user_position(super::start_position(from));
    store.navigate_to_id(to).with_context(|| format!("navigate to {}", to))?;

    let Some(path) = store.state().current_path() else {
        anyhow::bail!("no route produced for {}", to);
    };
    if json {
        println!("{}", serde_json::to_string_pretty(path)?);
    } else {
        println!("{}", render_path(path));
    }
    Ok(())
}

pub fn cmd_routes(cfg: &Config, from: Option<Vec3>, user_type: UserType) -> Result<()> {
    let mut store = super::open_store(cfg)?;
    store.set_user_type(user_type);
    let user = super::start_position(from);
    let visible = store.state().visible_locations();
    for path in plan_all(store.planner(), &user, &visible) {
        println!("{}", render_path(&path));
    }
    Ok(())
}

/// Plans routes to every destination in parallel; output order matches `destinations`.
pub fn plan_all(planner: &NavigationPlanner, from: &UserPosition, destinations: &[&MapLocation]) -> Vec<NavigationPath> {
    destinations.par_iter().map(|dest| planner.plan_route(from, dest)).collect()
}

pub fn render_path(path: &NavigationPath) -> String {
    format!(
        "{:<10} {:<26} {:>7.2} units  ~{} min  {} -> {}",
        path.end.id,
        path.end.name,
        path.distance_units,
        path.estimated_minutes,
        path.start.position,
        path.end.position,
    )
}
