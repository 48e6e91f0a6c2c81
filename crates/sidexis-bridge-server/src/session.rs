//! Single-shot WebSocket session.
//!
//! One accepted connection, one upgrade, one patient frame, one status
//! reply. Anything unexpected ends the session: the connector process is
//! short-lived and the web client recovers by relaunching it.

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use sidexis_bridge_core::tokens::SkipReason;
use sidexis_bridge_core::ws;
use sidexis_bridge_core::{
    Addressing, Mailslot, PatientPayload, PatientRecord, PracticeContext, TokenBuilder,
};

use crate::config::BridgeConfig;
use crate::launcher::{ImagingApp, SidexisLauncher};
use crate::logfile::LogFile;

/// Status texts sent back to the web client. Both fit the 125-byte frame.
const STATUS_OK: &str = "Success: Sidexis launched and patient data sent.";
const STATUS_NO_SIDEXIS: &str = "Could not open Sidexis.";

/// Upgrade requests larger than this are not a browser handshake.
const MAX_REQUEST_LEN: usize = 16 * 1024;

/// Everything one session needs, passed explicitly rather than living in
/// process-wide state.
pub struct SessionContext<'a, L: ImagingApp> {
    pub config: &'a BridgeConfig,
    pub log: &'a LogFile,
    pub mailslot: Mailslot,
    pub addressing: Addressing,
    pub launcher: L,
}

impl<'a> SessionContext<'a, SidexisLauncher> {
    pub fn new(config: &'a BridgeConfig, log: &'a LogFile) -> anyhow::Result<Self> {
        let launcher = SidexisLauncher::new(&config.sidexis_path);
        Self::with_launcher(config, log, launcher)
    }
}

impl<'a, L: ImagingApp> SessionContext<'a, L> {
    pub fn with_launcher(
        config: &'a BridgeConfig,
        log: &'a LogFile,
        launcher: L,
    ) -> anyhow::Result<Self> {
        let addressing = Addressing::local(
            &config.station_name,
            &config.sender_app,
            &config.receiver_app,
        )
        .context("invalid sender/receiver configuration")?;

        Ok(Self {
            config,
            log,
            mailslot: Mailslot::new(&config.slida_path),
            addressing,
            launcher,
        })
    }
}

/// Drive one connection through handshake, patient handoff, and status
/// reply.
pub async fn run<S, L>(mut stream: S, ctx: &SessionContext<'_, L>) -> anyhow::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
    L: ImagingApp,
{
    // Upgrade first. The client opens with a plain HTTP GET.
    let request = read_upgrade_request(&mut stream).await?;
    if !ws::is_upgrade_request(&request) {
        anyhow::bail!("first message is not an HTTP upgrade request");
    }
    let response = ws::upgrade_response(&request)?;
    stream.write_all(&response).await?;
    debug!("handshake complete");

    // One data frame with the patient JSON.
    let frame_bytes = read_frame_bytes(&mut stream).await?;
    let frame = ws::decode_text_frame(&frame_bytes)?;
    for anomaly in &frame.anomalies {
        ctx.log.append(anomaly.describe());
    }

    // A payload that is not valid patient JSON is fatal: no partial tokens.
    let payload: PatientPayload =
        serde_json::from_str(&frame.text).context("patient payload is not valid JSON")?;

    let practice = PracticeContext::now(&ctx.config.station_name);
    let mut record = PatientRecord::from_payload(&payload, practice, &ctx.addressing);

    let report = TokenBuilder::new(&ctx.mailslot).emit(&mut record);
    for skip in &report.skipped {
        match &skip.reason {
            SkipReason::AmbiguousUpdate => ctx.log.append(
                "Cannot update patient data: DateOfBirth and Name updated simultaneously",
            ),
            SkipReason::WriteFailed(err) => ctx
                .log
                .append(&format!("token {} dropped: {err}", skip.letter)),
        }
    }
    info!(emitted = ?report.emitted, "token messages written");

    let status = match ctx.launcher.launch() {
        Ok(()) => STATUS_OK,
        Err(err) => {
            ctx.log.append(&format!("could not start Sidexis: {err}"));
            STATUS_NO_SIDEXIS
        }
    };

    let status_frame = ws::encode_status_frame(status)?;
    stream.write_all(&status_frame).await?;
    stream.shutdown().await.ok();
    Ok(())
}

/// Read until the blank line that ends the HTTP header block.
async fn read_upgrade_request<S: AsyncRead + Unpin>(stream: &mut S) -> anyhow::Result<String> {
    let mut buf = Vec::with_capacity(1024);
    loop {
        let read = stream.read_buf(&mut buf).await?;
        if read == 0 {
            anyhow::bail!("connection closed during handshake");
        }
        if buf.windows(4).any(|window| window == b"\r\n\r\n") {
            return Ok(String::from_utf8_lossy(&buf).into_owned());
        }
        if buf.len() > MAX_REQUEST_LEN {
            anyhow::bail!("upgrade request exceeds {MAX_REQUEST_LEN} bytes");
        }
    }
}

/// Read whatever the client sent as one frame.
///
/// The known client writes each frame in a single segment; partial frames
/// are not reassembled here.
async fn read_frame_bytes<S: AsyncRead + Unpin>(stream: &mut S) -> anyhow::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(4096);
    let read = stream.read_buf(&mut buf).await?;
    if read == 0 {
        anyhow::bail!("connection closed before patient data arrived");
    }
    Ok(buf)
}
