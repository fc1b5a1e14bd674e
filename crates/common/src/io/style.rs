#![allow(missing_docs)]
use anstyle::*;

pub const ERROR: Style = AnsiColor::Red.on_default().effects(Effects::BOLD);
pub const WARN: Style = AnsiColor::Yellow.on_default().effects(Effects::BOLD);
pub const SUCCESS: Style = AnsiColor::Green.on_default().effects(Effects::BOLD);
pub const HEADING: Style = AnsiColor::Cyan.on_default().effects(Effects::BOLD);
pub const STREAK: Style = AnsiColor::BrightYellow.on_default().effects(Effects::BOLD);
pub const DIM: Style = Style::new().effects(Effects::DIMMED);
