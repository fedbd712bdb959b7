// src/display/mod.rs
//! Status output for the send loop

pub mod terminal;

use crate::{config::SenderConfig, error::{Result, SenderError}, sender::TickReport};

pub use terminal::TerminalDisplay;

/// Sink for the sender's human-readable progress messages
pub trait StatusDisplay {
    /// Print the configuration banner before the first tick
    fn show_start(&mut self, config: &SenderConfig) -> Result<()>;

    /// Print the line for a datagram that was just sent
    fn show_tick(&mut self, report: &TickReport) -> Result<()>;

    /// Print the clean-stop message after an interrupt
    fn show_stopped(&mut self) -> Result<()>;

    /// Print an error that ended the loop
    fn show_error(&mut self, error: &SenderError) -> Result<()>;
}
