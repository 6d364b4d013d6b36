use anyhow::Result;
use chrono::Utc;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::thread;

use crate::navigation::config::Config;
use crate::navigation::Vec3;

pub fn cmd_track(cfg: &Config, ticks: u32, seed: Option<u64>, realtime: bool, from: Option<Vec3>) -> Result<()> {
    let mut store = super::open_store(cfg)?;
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    store.set_user_position(super::start_position(from));

    let interval = store.state().tracker().interval();
    let mut now = Utc::now();
    store.start_tracking(now);
    let sub = store.subscribe(|st| {
        if let Some(p) = st.user_position() {
            println!("{}  {}  terminal {}", p.last_updated_at.format("%H:%M:%S"), p.position, p.terminal.as_deref().unwrap_or("-"));
        }
    });

    for _ in 0..ticks {
        if realtime {
            thread::sleep(interval.to_std()?);
            now = Utc::now();
        } else {
            now += interval;
        }
        store.tick(now, &mut rng);
    }

    store.unsubscribe(sub);
    store.stop_tracking();
    info!("tracking stopped after {} steps", ticks);
    Ok(())
}
