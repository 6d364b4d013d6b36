use anyhow::{bail, Result};
use clap::Subcommand;

use crate::db::{self, KEY_LANGUAGE, KEY_USER_TYPE};
use crate::navigation::config::Config;
use crate::navigation::UserType;
use crate::phrasebook::Language;

#[derive(Subcommand, Debug, Clone)]
pub enum PrefsAction {
    /// Print one preference (language|user-type)
    Get { key: String },
    /// Store a preference after validating it
    Set { key: String, value: String },
    /// Forget all stored preferences
    Clear,
}

pub fn cmd_prefs(cfg: &Config, action: PrefsAction) -> Result<()> {
    let path = cfg.prefs_db_path();
    let conn = db::open_rw(&path)?;
    match action {
        PrefsAction::Get { key } => {
            let k = storage_key(&key)?;
            match db::get_pref(&conn, k)? {
                Some(v) => println!("{}", v),
                None => println!("(unset)"),
            }
        }
        PrefsAction::Set { key, value } => {
            let k = storage_key(&key)?;
            let normalized = normalize(k, &value)?;
            db::set_pref(&conn, k, normalized)?;
            println!("{} = {}", key, normalized);
        }
        PrefsAction::Clear => {
            let n = db::clear_prefs(&conn)?;
            println!("cleared {} preferences in {}", n, path.display());
        }
    }
    Ok(())
}

fn storage_key(key: &str) -> Result<&'static str> {
    match key {
        "language" => Ok(KEY_LANGUAGE),
        "user-type" | "user_type" => Ok(KEY_USER_TYPE),
        other => bail!("unknown preference '{}' (expected language or user-type)", other),
    }
}

fn normalize(storage_key: &str, value: &str) -> Result<&'static str> {
    if storage_key == KEY_LANGUAGE {
        let l: Language = value.parse().map_err(anyhow::Error::msg)?;
        Ok(l.key())
    } else {
        let t: UserType = value.parse().map_err(anyhow::Error::msg)?;
        Ok(t.key())
    }
}
