use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Install the log subscriber. `RUST_LOG` applies first; each `-v` raises
/// the simulator's and front end's level from `warn`.
pub fn init_tracing(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("wfsim_sim={level}").parse()?)
                .add_directive(format!("wfsim_cli={level}").parse()?),
        )
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
