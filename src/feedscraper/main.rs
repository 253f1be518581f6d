use std::sync::Arc;

use fscr::{
    config::{Args, Config},
    pipeline::Pipeline,
    schedule::{Schedule, Scheduler},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use clap::Parser;

    pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = Arc::new(Config::from_args(Args::parse()));
    let pipeline = Arc::new(Pipeline::new(config.clone())?);

    pipeline.run().await;

    match Schedule::parse(config.schedule) {
        Ok(schedule) => {
            Scheduler::new(schedule).spawn(move || {
                let pipeline = pipeline.clone();
                async move {
                    pipeline.run().await;
                }
            });
        }
        Err(e) => tracing::error!(target: "schedule", "{e}"),
    }

    fscr::server::serve(config.listen, &config.serve_dir).await?;

    Ok(())
}
