pub mod commands;
pub mod db;
pub mod navigation;
pub mod phrasebook;
pub mod util;
