use core::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering::SeqCst;

use lazy_static::lazy_static;
use yansi::{Color, Style};

static ASCII_MODE: AtomicBool = AtomicBool::new(false);

pub fn ascii_mode() {
    ASCII_MODE.store(true, SeqCst);
}

pub fn no_color_mode() {
    yansi::disable();
}

pub static ATTENTION: Style = Style::new().fg(Color::Yellow).bold();
pub static ERROR: Style = Style::new().fg(Color::Red).bold();
pub static EMPH: Style = Style::new().bold();
pub static OK: Style = Style::new().fg(Color::Green).bold();
pub static MUTED: Style = Style::new().dim();

lazy_static! {
    pub static ref ATTENTION_PREFIX: String = (if ASCII_MODE.load(SeqCst) { "!" } else { "⚠︎" }).to_string();
    pub static ref CAPTION_PREFIX: String = (if ASCII_MODE.load(SeqCst) { ">" } else { "▶︎" }).to_string();
    pub static ref ERROR_PREFIX: String = (if ASCII_MODE.load(SeqCst) { "!" } else { "⚡︎" }).to_string();
    pub static ref INFO_PREFIX: String = (if ASCII_MODE.load(SeqCst) { "-" } else { "▸" }).to_string();
    pub static ref ITEMAZATION_PREFIX: String = (if ASCII_MODE.load(SeqCst) { "*" } else { "∙" }).to_string();
    pub static ref FINISHED_PREFIX: String = (if ASCII_MODE.load(SeqCst) { "+" } else { "❖" }).to_string();
}

/// The render style for a trust level in console output.
pub fn trust_style(level: crate::variant::TrustLevel) -> Style {
    use crate::variant::TrustLevel::*;
    match level {
        Critical | HighRisk => ERROR,
        Suspicious | LowTrust => ATTENTION,
        Moderate | Unknown => EMPH,
        Established => OK,
        Unregistered => MUTED,
    }
}
