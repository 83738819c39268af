//! bluepaird - runs the pairing coordinator against console collaborators
//!
//! Simulated stack and board events are read from stdin on a producer
//! thread; the dispatcher runs on the main thread. `--fresh-oob` replaces the
//! configured local OOB random value with a new one.

mod console;

use bluepair::smp::OobData;
use bluepair::{BdAddr, Dispatcher, PeripheralConfig};
use console::{parse_command, ConsoleDisplay, LoggingStack};
use std::io::{self, BufRead};
use std::thread;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = PeripheralConfig::default();
    if std::env::args().skip(1).any(|arg| arg == "--fresh-oob") {
        config.bond.local_oob_random = OobData::random();
        info!("Using a fresh local OOB random value");
    }

    let peer: BdAddr = config.bond.peer_oob.addr;
    let stack = LoggingStack::new(config.bond.peer_oob.confirm);
    let mut dispatcher = Dispatcher::new(config, stack, ConsoleDisplay);

    if let Err(e) = dispatcher.start() {
        error!("Failed to start peripheral: {}", e);
        std::process::exit(1);
    }

    let callbacks = dispatcher.callbacks();
    let spawned = thread::Builder::new()
        .name("console".into())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        error!("stdin: {}", e);
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line) {
                    Ok(command) => command.deliver(&callbacks, peer),
                    Err(e) => warn!("{}", e),
                }
            }
            info!("Console closed, exiting");
            std::process::exit(0);
        });

    if let Err(e) = spawned {
        error!("Failed to spawn console thread: {}", e);
        std::process::exit(1);
    }

    let mut oob_reported = false;
    loop {
        dispatcher.run_once();

        if oob_reported {
            continue;
        }
        if let Some(oob) = dispatcher.context().oob.local_oob_data() {
            info!(
                "Local OOB data: r {} c {}",
                hex::encode_upper(oob.r),
                hex::encode_upper(oob.c)
            );
            oob_reported = true;
        }
    }
}
