// src/main.rs
//! GPS UDP Sender - streams simulated GPS readings to a UDP listener

use clap::Parser;
use gps_udp_sender::{
    clock::SystemClock,
    display::TerminalDisplay,
    logging,
    sender::{GpsSender, Interrupt, UdpSink},
    SenderConfig,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = SenderConfig::parse();
    let interrupt = Interrupt::install()?;
    logging::init()?;
    config.validate()?;

    let sink = UdpSink::new(config.host.clone(), config.port);
    let mut sender = GpsSender::new(config, sink, SystemClock, TerminalDisplay::new());

    // Loop errors, including an unresolvable host, are already reported; they
    // still end in a clean exit
    sender.run(interrupt.recv()).await;

    Ok(())
}
