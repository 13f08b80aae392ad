use std::error::Error;
use std::sync::Arc;
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::JoinSet;
use vhttp::Settings;
use vhttp::server::Server;
use vhttp::service::{Composite, Ping};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let runtime = Runtime::new()?;

    // vhosts with `workers` get their own executor
    let mut dedicated = Vec::new();
    let mut executors = Vec::new();
    for vhost in settings.vhosts() {
        match vhost.workers() {
            Some(workers) => {
                let rt = Builder::new_multi_thread()
                    .worker_threads(workers)
                    .thread_name(format!("vhost-{}", vhost.port()))
                    .enable_all()
                    .build()?;
                executors.push(rt.handle().clone());
                dedicated.push(rt);
            }
            None => executors.push(runtime.handle().clone()),
        }
    }

    runtime.block_on(serve(&settings, executors))?;

    let timeout = settings.terminate_timeout();
    for rt in dedicated {
        rt.shutdown_timeout(timeout);
    }
    runtime.shutdown_timeout(timeout);
    log::info!("terminated");

    Ok(())
}

async fn serve(settings: &Settings, executors: Vec<Handle>) -> std::io::Result<()> {
    let handler = Arc::new(Composite::new().with(Ping));
    let mut servers = JoinSet::new();

    for (vhost, executor) in settings.vhosts().iter().zip(executors) {
        let server = Server::bind(vhost, Arc::clone(&handler), *settings.parsing()).await?;
        log::info!("vhost {} on {}", vhost.address(), server.local_addr()?);
        servers.spawn(server.serve_on(executor));
    }

    tokio::signal::ctrl_c().await?;
    log::info!("shutting down, waiting up to {:?}", settings.terminate_timeout());
    servers.shutdown().await;

    Ok(())
}
