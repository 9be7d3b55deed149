// This main function is the entry point when running `cargo run -p web-server`.
// It serves with whatever `config.toml` and `SAFEGUARDING__*` variables provide.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = configuration::load_settings(None)?;
    settings.validate()?;
    let _log_guard = configuration::init_tracing(&settings.logging)?;
    web_server::run_server(settings).await
}
