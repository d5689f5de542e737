use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use super::error::TrackerError;
use super::response::{parse_announce_response, AnnounceResponse};
use crate::metainfo::InfoHash;
use crate::peer::PeerId;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// An HTTP tracker client.
///
/// ```no_run
/// use minnow::metainfo::Metainfo;
/// use minnow::peer::PeerId;
/// use minnow::tracker::HttpTracker;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let meta = Metainfo::from_file("example.torrent")?;
/// let tracker = HttpTracker::new(&meta.announce)?;
/// let response = tracker
///     .announce(&meta.info_hash, &PeerId::generate(), 6881, 0, 0, meta.info.length)
///     .await?;
/// println!("{} peers", response.peers.len());
/// # Ok(())
/// # }
/// ```
pub struct HttpTracker {
    client: Client,
    url: String,
}

impl HttpTracker {
    pub fn new(url: &str) -> Result<Self, TrackerError> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(TrackerError::InvalidUrl(url.to_string()));
        }

        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(TrackerError::Http)?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// Announces to the tracker and returns its peer list.
    ///
    /// The info hash travels as its 20 raw bytes, percent-encoded; the
    /// query is built by hand so no URL library re-interprets them as text.
    pub async fn announce(
        &self,
        info_hash: &InfoHash,
        peer_id: &PeerId,
        port: u16,
        uploaded: u64,
        downloaded: u64,
        left: u64,
    ) -> Result<AnnounceResponse, TrackerError> {
        let url = build_announce_url(
            &self.url, info_hash, peer_id, port, uploaded, downloaded, left,
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TrackerError::Unavailable(status));
        }

        let body = response.bytes().await?;
        let announce = parse_announce_response(&body)?;
        debug!(
            interval = announce.interval,
            peers = announce.peers.len(),
            "tracker announce ok"
        );

        Ok(announce)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

pub(super) fn build_announce_url(
    base: &str,
    info_hash: &InfoHash,
    peer_id: &PeerId,
    port: u16,
    uploaded: u64,
    downloaded: u64,
    left: u64,
) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!(
        "{base}{separator}info_hash={}&peer_id={}&port={port}&uploaded={uploaded}&downloaded={downloaded}&left={left}&compact=1",
        info_hash.url_encode(),
        url_encode(peer_id.as_bytes()),
    )
}

fn url_encode(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| {
            if b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b'.' || b == b'~' {
                (b as char).to_string()
            } else {
                format!("%{b:02X}")
            }
        })
        .collect()
}
