//! `prism-demos [triangle|cubes|textured]`
//!
//! Opens one window and runs the chosen demo until Escape or close.

mod demo;

use std::process::ExitCode;

use prism_engine::device::GpuInit;
use prism_engine::logging::{init_logging, LoggingConfig};
use prism_engine::window::{Runtime, RuntimeConfig};

use demo::Demo;

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    let mut args = std::env::args().skip(1);
    let demo = match args.next() {
        None => Demo::default(),
        Some(name) => match name.parse::<Demo>() {
            Ok(d) => d,
            Err(e) => {
                eprintln!("prism-demos: {e}");
                return ExitCode::from(2);
            }
        },
    };
    if args.next().is_some() {
        log::warn!("extra arguments ignored");
    }

    let config = RuntimeConfig {
        title: demo.title().to_string(),
        ..RuntimeConfig::default()
    };

    match Runtime::run(config, GpuInit::default(), |gpu| demo.build(gpu)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("demo '{demo}' failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}
