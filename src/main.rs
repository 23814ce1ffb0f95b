use log::error;
use timetable_generator::server;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let addr = std::env::var("TIMETABLE_ADDR").unwrap_or_else(|_| server::DEFAULT_ADDR.to_string());

    if let Err(e) = server::run_server(&addr).await {
        error!("Server on {} stopped: {}", addr, e);
        std::process::exit(1);
    }
}
