use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use socket2::{Domain, Protocol, Socket, Type};
use std::sync::Arc;
use tokio::net::TcpListener;

mod config;
mod db;
mod handler;
mod http;
mod logger;
mod routing;
mod search;
mod state;
mod templates;
mod visitor;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;

    // A log file that cannot be opened is not fatal; keep stdout only
    if let Err(e) = logger::init(&cfg) {
        eprintln!("Error opening logfile: {} -> {e}", cfg.resources.log_file);
        let _ = logger::init_stdout_only();
    }

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;

    logger::log_info("Starting service.");

    if let Some(msg_file) = &cfg.resources.msg_file {
        // Accepted for deployment parity; nothing reads it downstream
        logger::log_info(&format!("Message file configured: {msg_file}"));
    }

    // A failed connection degrades to per-request insert errors
    let store = db::MessageStore::connect(&cfg.database).await;

    // The template set is part of the deployment; a broken one is fatal
    let tera = templates::load(&cfg.resources.static_root)?;

    let search_client = search::SearchClient::new(&cfg.search);

    if let Err(e) = tokio::fs::create_dir_all(&cfg.resources.capture_dir).await {
        logger::log_error(&format!(
            "Capture directory '{}': {e}",
            cfg.resources.capture_dir
        ));
    }

    // Listener failure is the one fatal runtime error
    let listener = create_listener(addr)?;

    logger::log_server_start(&addr, &cfg);

    let state = Arc::new(state::AppState::new(cfg, store, tera, search_client));

    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                handle_connection(stream, peer_addr, Arc::clone(&state));
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}

/// Handle a single connection in a spawned task.
///
/// Serves HTTP/1.1 with keep-alive and applies the blanket
/// per-connection timeout of max(read, write) timeout.
fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    state: Arc<state::AppState>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let keep_alive_timeout = state.config.performance.keep_alive_timeout;
        let timeout_duration = std::time::Duration::from_secs(std::cmp::max(
            state.config.performance.read_timeout,
            state.config.performance.write_timeout,
        ));

        let mut builder = http1::Builder::new();
        if keep_alive_timeout > 0 {
            builder.keep_alive(true);
        }

        let conn = builder.serve_connection(
            io,
            service_fn(move |req| {
                let state = Arc::clone(&state);
                async move { handler::handle_request(req, state, peer_addr).await }
            }),
        );

        match tokio::time::timeout(timeout_duration, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => logger::log_warning(&format!(
                "Connection timeout after {} seconds",
                timeout_duration.as_secs()
            )),
        }
    });
}

/// Create a `TcpListener` with `SO_REUSEADDR` enabled, so a restart
/// can rebind a port still in TIME_WAIT.
fn create_listener(addr: std::net::SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;

    // Non-blocking mode for async compatibility
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
