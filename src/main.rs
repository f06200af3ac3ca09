//! netpulse - network health diagnostic CLI

use clap::Parser;
use netpulse::{app::App, cli::Cli};
use std::process;

/// Exit code when collection completed but one or more probes failed
const EXIT_PROBES_FAILED: i32 = 2;

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(1);
    }));

    let cli = Cli::parse();
    let use_color = !cli.no_color;

    match App::new(cli).run().await {
        // Collection always completes; the exit status carries the
        // overall success/failure signal
        Ok(false) => {}
        Ok(true) => process::exit(EXIT_PROBES_FAILED),
        Err(e) => {
            eprintln!("{}", e.format_for_console(use_color));
            process::exit(e.exit_code());
        }
    }
}
