//! Reading GPX traces from disk or over HTTP, and writing them back.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use gpx::Gpx;
use reqwest::blocking::Client;
use tracing::{debug, info};

use super::sanitize::sanitize_gpx_text;
use crate::error::{Result, ThirstyError};
use crate::progress::ProgressObserver;

const DOWNLOAD_CHUNK_SIZE: usize = 1024;
/// Upper bound on the buffer preallocated from `Content-Length`
const MAX_PREALLOC: u64 = 16 * 1024 * 1024;

/// True when `input` should be fetched over HTTP rather than opened locally
pub fn is_remote(input: &str) -> bool {
    input.starts_with("http")
}

/// Parse a GPX document from any reader
pub fn read_gpx<R: Read>(reader: R) -> Result<Gpx> {
    Ok(gpx::read(reader)?)
}

pub fn read_gpx_file<P: AsRef<Path>>(path: P) -> Result<Gpx> {
    let path = path.as_ref();
    debug!("Reading GPX from {}", path.display());
    let file = File::open(path)?;
    read_gpx(BufReader::new(file))
}

/// Download a GPX document, reporting received bytes to `progress`
pub fn download_gpx(
    client: &Client,
    url: &str,
    progress: &mut dyn ProgressObserver,
) -> Result<Gpx> {
    info!("Downloading GPX from {}", url);

    let mut response = client.get(url).send()?;
    if !response.status().is_success() {
        return Err(ThirstyError::RemoteQuery(format!(
            "download of {} failed with status {}",
            url,
            response.status()
        )));
    }

    let total_size = response.content_length().unwrap_or(0);
    let data = read_with_progress(&mut response, total_size, progress)
        .map_err(|e| ThirstyError::RemoteQuery(format!("download of {} failed: {}", url, e)))?;

    debug!("Downloaded {} bytes", data.len());
    read_gpx(data.as_slice())
}

fn read_with_progress<R: Read>(
    reader: &mut R,
    total_size: u64,
    progress: &mut dyn ProgressObserver,
) -> std::io::Result<Vec<u8>> {
    progress.start("Downloading", total_size);

    let mut data = Vec::with_capacity(total_size.min(MAX_PREALLOC) as usize);
    let mut chunk = [0u8; DOWNLOAD_CHUNK_SIZE];
    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        data.extend_from_slice(&chunk[..n]);
        progress.advance(n as u64);
    }

    progress.finish();
    Ok(data)
}

/// Serialize the GPX document and repair unescaped ampersands
pub fn to_sanitized_xml(gpx: &Gpx) -> Result<String> {
    let mut buf = Vec::new();
    gpx::write(gpx, &mut buf)?;
    let text = String::from_utf8(buf)
        .map_err(|e| ThirstyError::Parse(format!("GPX writer produced invalid UTF-8: {}", e)))?;
    Ok(sanitize_gpx_text(&text))
}
