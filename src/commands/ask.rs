use anyhow::Result;
use log::debug;
use std::thread;

use crate::phrasebook::{Language, Phrasebook, REPLY_DELAY};

pub fn cmd_ask(message: &str, language: Language, no_delay: bool) -> Result<()> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        anyhow::bail!("empty message");
    }
    let book = Phrasebook::new(language);
    debug!("assistant language {}", language.key());
    if !no_delay {
        thread::sleep(REPLY_DELAY);
    }
    println!("{}", book.reply(trimmed));
    Ok(())
}
