//! QR scan integration
//!
//! The camera decoder itself is an external collaborator behind
//! [`QrDecoder`]. This module owns its lifecycle: one decoded string per
//! session, "no code in this frame" is routine, and the camera is released
//! exactly once on whichever path ends the session first.

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::app::{InputError, Route};

/// Per-frame decode failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Nothing decodable in this frame; keep scanning
    #[error("no QR code in frame")]
    NoCode,

    /// The device is unusable; the session ends
    #[error("scanner device error: {0}")]
    Device(String),
}

/// Scan session failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("scanner failed: {0}")]
    Device(String),

    #[error("scan session already finished")]
    Finished,
}

/// A camera-backed QR decoder
#[async_trait]
pub trait QrDecoder: Send {
    /// Wait for the next frame and try to decode it
    async fn next_frame(&mut self) -> Result<String, DecodeError>;

    /// Free the camera. Called at most once.
    fn release(&mut self) -> Result<(), DecodeError>;
}

/// Exclusive ownership of a decoder for one scan
#[derive(Debug)]
pub struct ScanSession<D: QrDecoder> {
    decoder: Option<D>,
}

impl<D: QrDecoder> ScanSession<D> {
    pub fn new(decoder: D) -> Self {
        tracing::debug!("Scan session started");
        Self {
            decoder: Some(decoder),
        }
    }

    /// Whether the decoder is still held
    pub fn is_active(&self) -> bool {
        self.decoder.is_some()
    }

    /// Scan until a code decodes, then stop and release the decoder
    pub async fn scan(&mut self) -> Result<String, ScanError> {
        let decoder = self.decoder.as_mut().ok_or(ScanError::Finished)?;
        let outcome = loop {
            match decoder.next_frame().await {
                Ok(text) => break Ok(text),
                Err(DecodeError::NoCode) => continue,
                Err(DecodeError::Device(msg)) => break Err(ScanError::Device(msg)),
            }
        };
        match &outcome {
            Ok(text) => tracing::info!(decoded = %text, "QR code scanned"),
            Err(e) => tracing::warn!("Scan aborted: {e}"),
        }
        self.release();
        outcome
    }

    /// Release the decoder now; later calls are no-ops
    pub fn release(&mut self) {
        if let Some(mut decoder) = self.decoder.take() {
            if let Err(e) = decoder.release() {
                tracing::error!("Failed to release QR scanner: {e}");
            } else {
                tracing::debug!("QR scanner released");
            }
        }
    }
}

impl<D: QrDecoder> Drop for ScanSession<D> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Decoder fed by an external scanner process that prints one symbol per
/// line (e.g. `zbarcam --raw`, or `zbarcam` with its `QR-Code:` prefix)
#[derive(Debug)]
pub struct LineDecoder<R> {
    lines: Lines<R>,
}

impl<R: AsyncBufRead + Unpin + Send> LineDecoder<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> QrDecoder for LineDecoder<R> {
    async fn next_frame(&mut self) -> Result<String, DecodeError> {
        match self.lines.next_line().await {
            Ok(Some(line)) => {
                let line = line.trim();
                let text = line.strip_prefix("QR-Code:").unwrap_or(line).trim();
                if text.is_empty() {
                    Err(DecodeError::NoCode)
                } else {
                    Ok(text.to_string())
                }
            }
            Ok(None) => Err(DecodeError::Device("scanner input closed".to_string())),
            Err(e) => Err(DecodeError::Device(e.to_string())),
        }
    }

    fn release(&mut self) -> Result<(), DecodeError> {
        Ok(())
    }
}

/// Parse decoded QR text as a product ID (a positive integer)
pub fn parse_product_id(text: &str) -> Result<i64, InputError> {
    match text.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(InputError::InvalidProductId(text.to_string())),
    }
}

/// Where a scanned code leads
pub fn route_for_scan(text: &str) -> Result<Route, InputError> {
    parse_product_id(text).map(Route::Trace)
}
