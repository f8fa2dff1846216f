use miette::Result;
use tracing_subscriber::EnvFilter;
use uom::si::f64::Frequency;
use uom::si::frequency::hertz;

use mors_dance::console::{ConsoleCommandSink, ConsoleLivenessSink, ConsoleModeService};
use mors_dance::{DanceRunner, Routine, ShutdownToken};

const SAMPLE_RATE_HZ: f64 = 100.0;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    miette::set_panic_hook();

    let shutdown = ShutdownToken::new();
    {
        // Ctrl-C asks the sequencer to return to neutral; teardown then runs
        // as on normal completion.
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                shutdown.request();
            }
        });
    }

    let runner = DanceRunner::new(
        ConsoleCommandSink::stdout(),
        ConsoleLivenessSink::default(),
        ConsoleModeService,
        Frequency::new::<hertz>(SAMPLE_RATE_HZ),
        shutdown,
    );
    runner.run(Routine::showtime()).await;

    Ok(())
}
