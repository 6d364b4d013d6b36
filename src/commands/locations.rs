use anyhow::Result;
use log::info;

use crate::navigation::config::Config;
use crate::navigation::{Category, MapLocation, UserType, WaitLevel};

pub fn cmd_locations(cfg: &Config, query: &str, filters: &[Category], user_type: UserType, json: bool) -> Result<()> {
    let mut store = super::open_store(cfg)?;
    store.set_user_type(user_type);
    store.set_search_query(query);
    for c in filters {
        if !store.state().active_filters().contains(c) {
            store.toggle_filter(*c);
        }
    }

    let visible = store.state().visible_locations();
    info!("{} of {} locations visible to {}", visible.len(), store.state().locations().len(), user_type.key());

    if json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }
    for loc in visible {
        println!("{}", render_line(loc));
    }
    Ok(())
}

pub fn render_line(loc: &MapLocation) -> String {
    let mut line = format!("{:<10} {:<26} [{}]", loc.id, loc.name, loc.category);
    if let Some(t) = &loc.terminal {
        line.push_str(&format!(" terminal {}", t));
    }
    match loc.is_open {
        Some(true) => line.push_str(" open"),
        Some(false) => line.push_str(" closed"),
        None => {}
    }
    if let Some(m) = loc.wait_time_minutes {
        let band = match loc.wait_level() {
            WaitLevel::Unknown => "?",
            WaitLevel::Short => "short",
            WaitLevel::Moderate => "moderate",
            WaitLevel::Long => "long",
        };
        line.push_str(&format!(" wait {} min ({})", m, band));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_line_shows_wait_band() {
        let loc = MapLocation::new("security1", "Contrôle Sécurité A", Category::Security, [-40.0, 0.0, 0.0]).with_wait_time(15);
        let line = render_line(&loc);
        assert!(line.starts_with("security1"));
        assert!(line.contains("[security]"));
        assert!(line.ends_with("wait 15 min (moderate)"));
    }

    #[test]
    fn render_line_shows_terminal_and_status() {
        let loc = MapLocation::new("A1", "Porte A1", Category::Gate, [0.0, 0.0, 0.0]).with_terminal("A").with_open(false);
        assert!(render_line(&loc).ends_with("terminal A closed"));
    }
}
