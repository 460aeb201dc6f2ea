use shiftwise::libs::messages::macros::is_debug_mode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    if is_debug_mode() {
        tracing_subscriber::registry()
            .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("shiftwise=debug")))
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    shiftwise::commands::Cli::menu()
}
