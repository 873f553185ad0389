use leaderboard_common::snapshot::{ServerEvent, Snapshot};
use log::{error, info, warn};
use std::net::IpAddr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;

/// Parses one line of the event stream. Anything that isn't a well formed event is discarded.
pub fn parse_event(line: &str) -> Option<Snapshot> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match ServerEvent::from_json(line) {
        Ok(ServerEvent::UpdateLeaderboard(snapshot)) => Some(snapshot),
        Err(e) => {
            warn!("Corrupted event discarded: {e}");
            None
        }
    }
}

/// Forwards every snapshot read from `reader` until the stream ends or the receiving side hangs
/// up.
pub async fn forward_snapshots<R: AsyncBufRead + Unpin>(
    reader: R,
    tx: &crossbeam_channel::Sender<Snapshot>,
) -> std::io::Result<()> {
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if let Some(snapshot) = parse_event(&line) {
            if tx.send(snapshot).is_err() {
                warn!("Display stopped receiving snapshots");
                break;
            }
        }
    }
    Ok(())
}

#[tokio::main]
pub async fn networking_thread(
    tx: crossbeam_channel::Sender<Snapshot>,
    server_ip: IpAddr,
    server_port: u16,
) {
    info!("Attempting leaderboard server connection!");
    let stream = loop {
        match TcpStream::connect((server_ip, server_port)).await {
            Ok(stream) => break stream,
            Err(e) => {
                warn!("Couldn't reach {server_ip}:{server_port}: {e}. Trying again in 1 second.");
                tokio::time::sleep(std::time::Duration::from_secs(1)).await;
            }
        }
    };
    info!("Connected to leaderboard server!");

    match forward_snapshots(BufReader::new(stream), &tx).await {
        Ok(()) => error!("Connection to leaderboard server closed!"),
        Err(e) => error!("Connection to leaderboard server lost: {e}"),
    }
}
