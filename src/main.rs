use dagbok::{run, Config};

fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    dagbok::init_tracing(&config.general.log_level);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(config))
}
