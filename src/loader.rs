//! Background image decoding.
//!
//! Each panel rebuild spawns one worker thread that decodes the batch's
//! sources with the `image` crate and sends results back over an mpsc
//! channel. The engine drains the channel once per frame on the UI thread.
//!
//! Results are tagged with the rebuild generation that requested them. A
//! resize discards the old panel list without waiting for in-flight
//! decodes, so a result whose generation no longer matches is dropped at
//! drain time instead of mutating a discarded panel.

use std::path::PathBuf;
use std::sync::mpsc::Sender;

use image::RgbaImage;

use crate::error::ArcslideError;

/// One decoded (or failed) panel image, delivered on the UI thread.
pub struct DecodeResult {
    /// Rebuild generation that requested this decode.
    pub generation: u64,
    /// Index of the panel this image belongs to.
    pub panel_index: usize,
    /// The decoded RGBA pixels, or a decode error message.
    pub result: Result<RgbaImage, String>,
}

/// Spawn a worker that decodes `sources` and sends each result tagged with
/// `generation`. Completion order within the batch is sequential, but
/// callers must not rely on ordering across batches.
///
/// The worker exits early if the receiving end has been dropped.
///
/// # Errors
///
/// Returns [`ArcslideError::ThreadSpawn`] if the OS refuses the thread.
pub fn spawn_decode_batch(
    tx: Sender<DecodeResult>,
    generation: u64,
    sources: Vec<(usize, PathBuf)>,
) -> Result<(), ArcslideError> {
    let handle = std::thread::Builder::new()
        .name(format!("arcslide-decode-{generation}"))
        .spawn(move || {
            for (panel_index, path) in sources {
                let result = match image::open(&path) {
                    Ok(img) => Ok(img.to_rgba8()),
                    Err(e) => {
                        Err(format!("{}: {e}", path.display()))
                    }
                };
                let msg = DecodeResult {
                    generation,
                    panel_index,
                    result,
                };
                if tx.send(msg).is_err() {
                    // Engine dropped; nothing left to deliver to.
                    return;
                }
            }
        })
        .map_err(ArcslideError::ThreadSpawn)?;
    // The worker is fire-and-forget; results arrive over the channel.
    drop(handle);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn missing_file_reports_failure_with_matching_tags() {
        let (tx, rx) = mpsc::channel();
        spawn_decode_batch(
            tx,
            7,
            vec![(3, PathBuf::from("/nonexistent/arcslide-test.png"))],
        )
        .unwrap();

        let msg = rx
            .recv_timeout(std::time::Duration::from_secs(10))
            .unwrap();
        assert_eq!(msg.generation, 7);
        assert_eq!(msg.panel_index, 3);
        assert!(msg.result.is_err());
    }

    #[test]
    fn batch_delivers_one_result_per_source() {
        let (tx, rx) = mpsc::channel();
        let sources: Vec<(usize, PathBuf)> = (0..4)
            .map(|i| (i, PathBuf::from(format!("/nonexistent/{i}.jpg"))))
            .collect();
        spawn_decode_batch(tx, 1, sources).unwrap();

        let mut seen = Vec::new();
        for _ in 0..4 {
            let msg = rx
                .recv_timeout(std::time::Duration::from_secs(10))
                .unwrap();
            seen.push(msg.panel_index);
        }
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }

    #[test]
    fn worker_stops_when_receiver_is_dropped() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        // Must not error or hang even though nothing can be delivered.
        spawn_decode_batch(
            tx,
            2,
            vec![(0, PathBuf::from("/nonexistent/x.png"))],
        )
        .unwrap();
    }
}
