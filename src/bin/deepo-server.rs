use deepo::config::Config;
use deepo::{logger, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init("deepo-server.log");
    let mut cfg = Config::load();
    cfg.apply_env();

    let listener = tokio::net::TcpListener::bind(&cfg.server_addr).await?;
    println!("deepo-server listening on http://{}", listener.local_addr()?);

    server::serve(listener, async {
        let _ = tokio::signal::ctrl_c().await;
        logger::log("Server: Ctrl-C received");
    })
    .await
}
