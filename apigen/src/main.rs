use apigen::cmd::ApigenCommand;
use apigen::conf::GenConf;

#[tokio::main]
async fn main() {
    let cmd: ApigenCommand = argh::from_env();

    let default_level = if cmd.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    let conf = GenConf::from_env();
    match cmd.run(conf).await {
        Ok(report) => {
            for notice in &report.notices {
                tracing::warn!("{}", notice);
            }
            tracing::info!(
                "{} files written, {} skipped",
                report.written.len(),
                report.skipped.len()
            );
        }
        Err(err) => {
            tracing::error!("{}", err);
            std::process::exit(1);
        }
    }
}
