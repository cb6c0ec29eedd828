use crate::runner::{Phase, Session};
use crate::sink::{snapshot, SharedState, VizState};
use crate::ui::layout::SceneLayout;
use axum::serve;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::io;
use std::net::SocketAddr;
use std::sync::{mpsc, Arc};
use std::thread;
use tokio::{net::TcpListener, runtime::Runtime, sync::oneshot, sync::Mutex};
use tracing::{error, info};

const WEB_INDEX_HTML: &str = include_str!("web/index.html");

/// Serves a session over HTTP on localhost. The session lives on the server's
/// own runtime, so runs keep pacing while the calling thread blocks.
pub struct WebVisualizer {
    state: SharedState,
    shutdown_tx: Option<oneshot::Sender<()>>,
    server_thread: Option<thread::JoinHandle<()>>,
    address: SocketAddr,
    finished: bool,
}

impl WebVisualizer {
    pub fn for_session(session: Session, port: u16) -> io::Result<Self> {
        let state = session.state();
        let (server_thread, shutdown_tx, address) = spawn_web_server(session, port)?;
        info!(%address, "web visualizer listening");
        Ok(Self {
            state,
            shutdown_tx: Some(shutdown_tx),
            server_thread: Some(server_thread),
            address,
            finished: false,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.address)
    }

    pub fn snapshot(&self) -> VizState {
        snapshot(&self.state)
    }

    pub fn finish(&mut self) -> io::Result<()> {
        if self.finished {
            return Ok(());
        }
        self.shutdown_server();
        self.finished = true;
        Ok(())
    }

    pub fn wait_for_exit(&mut self) -> io::Result<()> {
        if self.finished {
            return Ok(());
        }
        println!("Open {} in your browser to drive the run.", self.base_url());
        println!("Press Enter once you're done to shut down the server.");
        let mut buffer = String::new();
        io::stdin().read_line(&mut buffer)?;
        self.finish()
    }

    fn shutdown_server(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.server_thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for WebVisualizer {
    fn drop(&mut self) {
        let _ = self.finish();
    }
}

#[derive(Clone)]
struct WebAppState {
    session: Arc<Mutex<Session>>,
    state: SharedState,
}

#[derive(Serialize)]
struct WebSnapshot {
    #[serde(flatten)]
    state: VizState,
    scene: Option<SceneLayout>,
}

#[derive(Serialize)]
struct ControlResponse {
    accepted: bool,
    phase: Phase,
    speed: u32,
}

type ServerHandle = (thread::JoinHandle<()>, oneshot::Sender<()>, SocketAddr);

fn spawn_web_server(session: Session, port: u16) -> io::Result<ServerHandle> {
    let (ready_tx, ready_rx) = mpsc::channel::<io::Result<SocketAddr>>();
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let handle = thread::spawn(move || {
        let runtime = match Runtime::new() {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ready_tx.send(Err(err));
                return;
            }
        };
        let app_state = WebAppState {
            state: session.state(),
            session: Arc::new(Mutex::new(session)),
        };
        runtime.block_on(async move {
            let app = Router::new()
                .route("/", get(index_handler))
                .route("/snapshot", get(snapshot_handler))
                .route("/start", post(start_handler))
                .route("/stop", post(stop_handler))
                .route("/reset", post(reset_handler))
                .route("/speed/:speed", post(speed_handler))
                .with_state(app_state.clone());

            let bind_addr = SocketAddr::from(([127, 0, 0, 1], port));
            let listener = match TcpListener::bind(bind_addr).await {
                Ok(listener) => listener,
                Err(err) => {
                    let _ = ready_tx.send(Err(err));
                    return;
                }
            };
            let _ = ready_tx.send(listener.local_addr());

            let server = serve(listener, app);
            let shutdown = async move {
                let _ = shutdown_rx.await;
            };
            if let Err(err) = server.with_graceful_shutdown(shutdown).await {
                error!(%err, "web visualizer server exited with error");
            }

            let mut session = app_state.session.lock().await;
            session.control().request_stop();
            if let Err(err) = session.wait().await {
                error!(%err, "run did not shut down cleanly");
            }
        });
    });

    let address = ready_rx
        .recv()
        .map_err(|_| io::Error::new(io::ErrorKind::Other, "web visualizer failed to start"))??;

    Ok((handle, shutdown_tx, address))
}

async fn index_handler() -> impl IntoResponse {
    Html(WEB_INDEX_HTML)
}

async fn snapshot_handler(State(app): State<WebAppState>) -> impl IntoResponse {
    let state = snapshot(&app.state);
    let scene = SceneLayout::for_state(&state);
    Json(WebSnapshot { state, scene })
}

async fn start_handler(State(app): State<WebAppState>) -> impl IntoResponse {
    let mut session = app.session.lock().await;
    let accepted = session.start();
    Json(control_response(&session, accepted))
}

async fn stop_handler(State(app): State<WebAppState>) -> impl IntoResponse {
    let session = app.session.lock().await;
    let accepted = session.phase() == Phase::Running;
    session.stop();
    Json(control_response(&session, accepted))
}

async fn reset_handler(State(app): State<WebAppState>) -> impl IntoResponse {
    let mut session = app.session.lock().await;
    let accepted = match session.reset().await {
        Ok(()) => true,
        Err(err) => {
            error!(%err, "reset failed");
            false
        }
    };
    Json(control_response(&session, accepted))
}

async fn speed_handler(
    State(app): State<WebAppState>,
    Path(speed): Path<u32>,
) -> impl IntoResponse {
    let session = app.session.lock().await;
    session.set_speed(speed);
    Json(control_response(&session, true))
}

fn control_response(session: &Session, accepted: bool) -> ControlResponse {
    ControlResponse {
        accepted,
        phase: session.phase(),
        speed: session.control().speed(),
    }
}
