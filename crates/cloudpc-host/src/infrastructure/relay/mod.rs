//! WebSocket transport to the relay server.
//!
//! [`run_relay_session`] drives one relay connection from open to close:
//!
//! 1. Connect to `ws://<relay>:8080` and send `connect-host`.
//! 2. Feed every text frame, in order, to [`HostController::handle_text`].
//! 3. Poll the capture process on a timer so a crashed ffmpeg is noticed.
//! 4. On operator shutdown or loss of the connection: stop capture, send
//!    `disconnect-host` (if the relay assigned an id), then close the socket.
//!
//! The loop is single-task: frames, timer ticks and the shutdown signal are
//! multiplexed with `tokio::select!`, so the controller is never shared.

use std::future::Future;

use anyhow::Context;
use futures_util::{Sink, SinkExt, StreamExt};
use tokio::sync::oneshot;
use tokio::time::{interval, MissedTickBehavior};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{Error as WsError, Message as WsMessage};
use tracing::{debug, error, info, warn};

use cloudpc_core::{encode_outbound, OutboundEnvelope};

use crate::application::host_session::{Dispatched, HostController, HostError};
use crate::domain::HostConfig;

/// Why a relay session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// The operator asked the host to stop.
    Shutdown,
    /// The relay closed the connection or it failed.
    TransportLost(String),
}

/// Runs one relay session until `shutdown` resolves or the connection drops.
///
/// # Errors
///
/// Returns an error if the relay cannot be reached or the `connect-host`
/// announcement cannot be sent.  Failures after that end the session with
/// [`SessionEnd::TransportLost`] instead.
pub async fn run_relay_session<F>(
    controller: &mut HostController,
    config: &HostConfig,
    shutdown: F,
) -> anyhow::Result<SessionEnd>
where
    F: Future<Output = ()>,
{
    let url = config.relay_url();
    let (ws, _response) = connect_async(url.as_str())
        .await
        .with_context(|| format!("failed to connect to relay at {url}"))?;
    info!("connected to relay at {url}");

    let (mut sink, mut stream) = ws.split();

    let announcement = controller.on_transport_open()?;
    send_envelope(&mut sink, &announcement)
        .await
        .context("failed to announce host to relay")?;

    tokio::pin!(shutdown);
    let mut capture_poll = interval(config.capture_poll_interval);
    capture_poll.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let end = loop {
        tokio::select! {
            () = &mut shutdown => break SessionEnd::Shutdown,

            _ = capture_poll.tick() => {
                controller.check_capture();
            }

            frame = stream.next() => match frame {
                Some(Ok(WsMessage::Text(text))) => {
                    if let Some(Dispatched::HostIdAssigned(host_id)) = controller.handle_text(&text) {
                        println!("Your host id is {host_id}.");
                    }
                }
                Some(Ok(WsMessage::Binary(_))) => debug!("ignoring binary frame from relay"),
                Some(Ok(WsMessage::Close(frame))) => {
                    let reason = frame
                        .map(|f| format!("closed by relay ({}: {})", f.code, f.reason))
                        .unwrap_or_else(|| "closed by relay".to_string());
                    break SessionEnd::TransportLost(reason);
                }
                // Ping/pong are answered by tungstenite itself.
                Some(Ok(_)) => {}
                Some(Err(e)) => break SessionEnd::TransportLost(e.to_string()),
                None => break SessionEnd::TransportLost("connection ended".to_string()),
            },
        }
    };

    if let SessionEnd::TransportLost(reason) = &end {
        warn!("{}", HostError::Transport(reason.clone()));
    }

    if let Some(notice) = controller.shutdown() {
        if let Err(e) = send_envelope(&mut sink, &notice).await {
            warn!("could not send disconnect-host: {e:#}");
        }
    }
    if let Err(e) = sink.close().await {
        debug!("closing relay connection: {e}");
    }

    Ok(end)
}

async fn send_envelope<S>(sink: &mut S, envelope: &OutboundEnvelope) -> anyhow::Result<()>
where
    S: Sink<WsMessage, Error = WsError> + Unpin,
{
    let text = encode_outbound(envelope)?;
    sink.send(WsMessage::Text(text)).await?;
    Ok(())
}

/// Resolves when the operator presses Enter or Ctrl+C.
///
/// If stdin is closed (e.g. running as a service) only Ctrl+C applies.
pub async fn operator_shutdown() {
    let enter = async {
        if enter_pressed().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl+C, shutting down"),
            Err(e) => {
                error!("failed to listen for Ctrl+C signal: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        () = enter => info!("shutdown requested from console"),
        () = ctrl_c => {}
    }
}

/// Reads one line on a plain thread so a pending read never holds up runtime
/// shutdown.  Errors if stdin reaches EOF or fails.
fn enter_pressed() -> oneshot::Receiver<()> {
    let (tx, rx) = oneshot::channel();
    std::thread::spawn(move || {
        let mut line = String::new();
        if matches!(std::io::stdin().read_line(&mut line), Ok(n) if n > 0) {
            let _ = tx.send(());
        }
    });
    rx
}
