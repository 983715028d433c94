use clap::Parser;
use meterlog::{Cli, Session, DEBUG_LOG};
use tokio_util::sync::CancellationToken;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug)?;

    // Fatal setup errors surface here, before stdin is touched.
    let session = Session::open(&cli)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let cancel = CancellationToken::new();
    let result = runtime.block_on(async {
        let on_interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                on_interrupt.cancel();
            }
        });

        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        meterlog::pump(stdin, session, std::io::stdout(), &cancel).await
    });

    // A pending stdin read sits on a blocking thread and would hold up a
    // normal runtime shutdown until the next newline arrives.
    runtime.shutdown_background();

    let summary = result?;
    tracing::info!(
        lines = summary.lines,
        events = summary.events,
        skipped = summary.skipped,
        unrecognized = summary.unrecognized.len(),
        interrupted = summary.interrupted,
        "run finished"
    );
    Ok(())
}

fn init_tracing(debug: bool) -> anyhow::Result<()> {
    if debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(DEBUG_LOG)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("meterlog debug log started — tail -f {DEBUG_LOG}");
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }
    Ok(())
}
