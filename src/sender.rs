// src/sender.rs
//! Datagram emitter: generate, encode, send, sleep, repeat

use crate::{
    clock::{Clock, SystemClock},
    config::SenderConfig,
    display::{StatusDisplay, TerminalDisplay},
    error::{Result, SenderError},
    gps::{Encoder, GpsSimulator, MovementMode, Position},
};
use chrono::{DateTime, Local};
use std::{
    future::Future,
    io,
    net::{Ipv4Addr, Ipv6Addr, SocketAddr},
};
use tokio::net::{lookup_host, UdpSocket};
use tracing::{debug, error, info};

/// Destination for encoded datagrams
#[allow(async_fn_in_trait)]
pub trait DatagramSink {
    /// Send one payload as a single datagram. No acknowledgement is expected.
    async fn send(&mut self, payload: &[u8]) -> Result<usize>;

    /// Release the underlying socket. Later sends fail.
    fn close(&mut self);
}

enum SinkState {
    /// Host not resolved yet; happens on the first send
    Pending,
    Open { socket: UdpSocket, target: SocketAddr },
    Closed,
}

/// Unconnected UDP socket sending to `host:port`
pub struct UdpSink {
    host: String,
    port: u16,
    state: SinkState,
}

impl UdpSink {
    /// Create a sink for `host:port`. Resolution and binding are deferred to the
    /// first send so failures surface inside the send loop.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            state: SinkState::Pending,
        }
    }

    /// Resolved destination, once the first datagram has gone out
    pub fn target(&self) -> Option<SocketAddr> {
        match &self.state {
            SinkState::Open { target, .. } => Some(*target),
            _ => None,
        }
    }

    /// Resolve the host and bind an ephemeral local socket of the same family
    async fn open(&self) -> Result<(UdpSocket, SocketAddr)> {
        let (host, port) = (self.host.as_str(), self.port);
        let addrs: Vec<SocketAddr> = lookup_host((host, port))
            .await
            .map_err(|e| SenderError::Resolve(format!("Failed to resolve {}:{}: {}", host, port, e)))?
            .collect();

        // Prefer IPv4 so "localhost" reaches receivers bound to 0.0.0.0
        let target = addrs
            .iter()
            .find(|addr| addr.is_ipv4())
            .or_else(|| addrs.first())
            .copied()
            .ok_or_else(|| SenderError::Resolve(format!("No addresses found for {}:{}", host, port)))?;

        let bind_addr: SocketAddr = if target.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(bind_addr).await?;

        info!(dest = %target, local = ?socket.local_addr().ok(), "UDP socket opened");
        Ok((socket, target))
    }
}

impl DatagramSink for UdpSink {
    async fn send(&mut self, payload: &[u8]) -> Result<usize> {
        if let SinkState::Pending = self.state {
            let (socket, target) = self.open().await?;
            self.state = SinkState::Open { socket, target };
        }

        match &self.state {
            SinkState::Open { socket, target } => Ok(socket.send_to(payload, *target).await?),
            _ => Err(SenderError::Io(io::Error::new(
                io::ErrorKind::NotConnected,
                "socket is closed",
            ))),
        }
    }

    fn close(&mut self) {
        if let SinkState::Open { target, .. } = std::mem::replace(&mut self.state, SinkState::Closed) {
            info!(dest = %target, "UDP socket closed");
        }
    }
}

/// Lifecycle of the send loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitterState {
    Running,
    Stopped,
}

/// Why the send loop ended
#[derive(Debug)]
pub enum StopReason {
    /// The shutdown signal fired
    Interrupted,
    /// The configured datagram count was reached
    Completed,
    /// A tick failed; the loop does not retry
    Failed(SenderError),
}

/// Outcome of one successful tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub position: Position,
    pub bytes_sent: usize,
    pub at: DateTime<Local>,
}

/// Owns the sink and simulator; sends one datagram per tick
pub struct GpsSender<S, C = SystemClock, D = TerminalDisplay> {
    config: SenderConfig,
    sink: S,
    clock: C,
    display: D,
    simulator: GpsSimulator,
    encoder: Encoder,
    mode: MovementMode,
    state: EmitterState,
    ticks_sent: u64,
}

impl<S: DatagramSink, C: Clock, D: StatusDisplay> GpsSender<S, C, D> {
    pub fn new(config: SenderConfig, sink: S, clock: C, display: D) -> Self {
        Self::with_simulator(config, sink, clock, display, GpsSimulator::new())
    }

    pub fn with_simulator(
        config: SenderConfig,
        sink: S,
        clock: C,
        display: D,
        simulator: GpsSimulator,
    ) -> Self {
        let encoder = Encoder::new(config.format, config.nmea_checksum);
        let mode = config.movement_mode();
        Self {
            config,
            sink,
            clock,
            display,
            simulator,
            encoder,
            mode,
            state: EmitterState::Running,
            ticks_sent: 0,
        }
    }

    pub fn state(&self) -> EmitterState {
        self.state
    }

    pub fn ticks_sent(&self) -> u64 {
        self.ticks_sent
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// One scheduling step: generate a position, encode it and send it.
    pub async fn tick(&mut self) -> Result<TickReport> {
        if self.state == EmitterState::Stopped {
            return Err(SenderError::Other("sender is stopped".to_string()));
        }

        let now = self.clock.now();
        let position = self.simulator.next_position(self.mode, &now);
        let payload = self.encoder.encode(&position, &now)?;
        let bytes_sent = self.sink.send(&payload).await?;
        self.ticks_sent += 1;

        debug!(
            tick = self.ticks_sent,
            bytes = bytes_sent,
            format = %self.config.format,
            "datagram sent"
        );

        Ok(TickReport {
            position,
            bytes_sent,
            at: now,
        })
    }

    /// Drive ticks until `shutdown` resolves, the count is reached or a tick fails.
    ///
    /// The sink is closed before returning on every path.
    pub async fn run<F>(&mut self, shutdown: F) -> StopReason
    where
        F: Future<Output = ()>,
    {
        let reason = self.drive(shutdown).await;

        match &reason {
            StopReason::Interrupted => {
                info!(ticks = self.ticks_sent, "interrupted");
                if let Err(e) = self.display.show_stopped() {
                    error!(error = %e, "failed to print stop message");
                }
            }
            StopReason::Completed => info!(ticks = self.ticks_sent, "datagram count reached"),
            StopReason::Failed(e) => {
                error!(error = %e, ticks = self.ticks_sent, "send loop failed");
                if let Err(display_err) = self.display.show_error(e) {
                    error!(error = %display_err, "failed to print error message");
                }
            }
        }

        self.stop();
        reason
    }

    async fn drive<F>(&mut self, shutdown: F) -> StopReason
    where
        F: Future<Output = ()>,
    {
        if let Err(e) = self.display.show_start(&self.config) {
            return StopReason::Failed(e);
        }

        let interval = match self.config.interval_duration() {
            Ok(interval) => interval,
            Err(e) => return StopReason::Failed(e),
        };
        tokio::pin!(shutdown);

        loop {
            if self.limit_reached() {
                return StopReason::Completed;
            }

            if let Err(e) = self.step().await {
                return StopReason::Failed(e);
            }

            // Checked again here so the last datagram is not followed by a sleep
            if self.limit_reached() {
                return StopReason::Completed;
            }

            tokio::select! {
                biased;
                _ = &mut shutdown => return StopReason::Interrupted,
                _ = tokio::time::sleep(interval) => {}
            }
        }
    }

    fn limit_reached(&self) -> bool {
        self.config.count.is_some_and(|max| self.ticks_sent >= max)
    }

    async fn step(&mut self) -> Result<()> {
        let report = self.tick().await?;
        self.display.show_tick(&report)
    }

    /// Close the sink once and stop accepting ticks
    pub fn stop(&mut self) {
        if self.state == EmitterState::Running {
            self.sink.close();
            self.state = EmitterState::Stopped;
        }
    }
}

/// Ctrl+C listener registered up front, so an interrupt that arrives before
/// the first wait is still seen as a clean stop.
pub struct Interrupt {
    #[cfg(unix)]
    inner: tokio::signal::unix::Signal,
    #[cfg(windows)]
    inner: tokio::signal::windows::CtrlC,
}

impl Interrupt {
    /// Register the handler. Must be called inside the tokio runtime.
    pub fn install() -> Result<Self> {
        #[cfg(unix)]
        let inner = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())?;
        #[cfg(windows)]
        let inner = tokio::signal::windows::ctrl_c()?;

        Ok(Self { inner })
    }

    /// Resolves on the first interrupt received since `install`
    pub async fn recv(mut self) {
        if self.inner.recv().await.is_none() {
            error!("interrupt listener closed");
            std::future::pending::<()>().await;
        }
    }
}
