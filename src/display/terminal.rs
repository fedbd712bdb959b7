// src/display/terminal.rs
//! Terminal status output for the sender

use super::StatusDisplay;
use crate::{
    config::SenderConfig,
    error::{Result, SenderError},
    gps::DataFormat,
    sender::TickReport,
};
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::{self, Stdout, Write};

/// Writes the banner and per-tick lines to any writer (stdout by default)
pub struct TerminalDisplay<W: Write = Stdout> {
    out: W,
}

impl TerminalDisplay<Stdout> {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for TerminalDisplay<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush().map_err(SenderError::Io)
    }
}

impl<W: Write> StatusDisplay for TerminalDisplay<W> {
    fn show_start(&mut self, config: &SenderConfig) -> Result<()> {
        queue!(
            self.out,
            SetForegroundColor(Color::Green),
            Print("Starting GPS UDP sender...\n"),
            ResetColor,
            Print(format!("Target: {}\n", config.target())),
            Print(format!("Format: {}\n", config.format)),
            Print(format!("Interval: {:?}s\n", config.interval)),
            Print(format!("Movement: {}\n", config.movement_mode())),
        )
        .map_err(SenderError::Io)?;

        if config.format == DataFormat::Nmea {
            queue!(
                self.out,
                Print(format!("NMEA checksum: {}\n", config.nmea_checksum))
            )
            .map_err(SenderError::Io)?;
        }

        if let Some(count) = config.count {
            queue!(self.out, Print(format!("Count: {}\n", count))).map_err(SenderError::Io)?;
        }

        queue!(self.out, Print("Press Ctrl+C to stop\n\n")).map_err(SenderError::Io)?;
        self.finish()
    }

    fn show_tick(&mut self, report: &TickReport) -> Result<()> {
        let pos = &report.position;
        queue!(
            self.out,
            SetForegroundColor(Color::Cyan),
            Print(format!("[{}]", report.at.format("%H:%M:%S"))),
            ResetColor,
            Print(format!(
                " Sent: Lat={:.6}, Lon={:.6}, Alt={:.2}m\n",
                pos.latitude, pos.longitude, pos.altitude
            )),
        )
        .map_err(SenderError::Io)?;
        self.finish()
    }

    fn show_stopped(&mut self) -> Result<()> {
        queue!(
            self.out,
            SetForegroundColor(Color::Yellow),
            Print("\nStopping GPS sender...\n"),
            ResetColor
        )
        .map_err(SenderError::Io)?;
        self.finish()
    }

    fn show_error(&mut self, error: &SenderError) -> Result<()> {
        queue!(
            self.out,
            SetForegroundColor(Color::Red),
            Print(format!("Error: {}\n", error)),
            ResetColor
        )
        .map_err(SenderError::Io)?;
        self.finish()
    }
}
