use std::net::SocketAddr;

// This main function is the entry point when running `cargo run -p web-server`.
// Its only job is to build the default state and hand off to `run_server`.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = configuration::load_config()?;
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    let state = web_server::build_state(config);
    web_server::run_server(addr, state).await
}
