use cicerone::config::Config;
use cicerone::engine::Engine;
use cicerone::server::serve;
use cicerone::simulation::Executor;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env().unwrap();
    let addr = config.listen_addr;

    let engine = Engine::new(config);

    if std::env::args().nth(1).as_deref() == Some("simulate") {
        Executor::new(engine).run().await;
        return;
    }

    serve(engine, addr).await;
}
