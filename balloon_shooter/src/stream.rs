//! Landmark helper process — real camera + hand model.
//!
//! Capture and inference run in an external helper. The crate ships one,
//! `helper/hand_landmarks.py` ([`HELPER_SCRIPT`]): OpenCV capture, frame
//! mirrored, MediaPipe hands limited to one hand at 0.7 detection
//! confidence. `--camera` runs it; `--landmarks CMD` runs any other helper
//! speaking the same protocol. The helper writes one JSON object per frame
//! to its stdout:
//!
//! ```text
//! {"ok": true,  "hands": [{"landmarks": [{"x": 0.51, "y": 0.43, "z": -0.02}, ...]}]}
//! {"ok": true,  "hands": []}
//! {"ok": false}
//! ```
//!
//! `ok: false` marks a failed camera read. Only the first hand is used and
//! it must carry all 21 landmarks. Anything unreadable counts as a dropped
//! frame, and so does end-of-stream: a helper that died looks exactly like
//! a dead camera and the game keeps running.

use std::io::{BufRead, BufReader};
use std::process::{Child, ChildStdout, Command, Stdio};

use log::{info, warn};
use serde::Deserialize;
use thiserror::Error;

use balloon_field::{HandLandmarks, Landmark, LANDMARK_COUNT};

use crate::error::ShooterError;
use crate::gesture::{GestureSource, Reading};

/// The bundled webcam helper.
pub const HELPER_SCRIPT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/helper/hand_landmarks.py");

/// Shell command that runs [`HELPER_SCRIPT`] on the default camera.
pub fn camera_command() -> String {
    format!("python3 '{}'", HELPER_SCRIPT)
}

// ════════════════════════════════════════════════════════════════════════════
// Wire format
// ════════════════════════════════════════════════════════════════════════════

#[derive(Deserialize, Debug)]
struct FrameJson {
    ok: bool,
    #[serde(default)]
    hands: Vec<HandJson>,
}

#[derive(Deserialize, Debug)]
struct HandJson {
    landmarks: Vec<LandmarkJson>,
}

#[derive(Deserialize, Debug)]
struct LandmarkJson {
    x: f32,
    y: f32,
    #[serde(default)]
    z: f32,
}

#[derive(Error, Debug)]
enum LineError {
    #[error("not a frame object: {0}")]
    Json(#[from] serde_json::Error),
    #[error("hand has {0} landmarks, expected 21")]
    LandmarkCount(usize),
}

fn parse_line(line: &str) -> Result<Reading, LineError> {
    let frame: FrameJson = serde_json::from_str(line)?;
    if !frame.ok {
        return Ok(Reading::Dropped);
    }
    let Some(hand) = frame.hands.into_iter().next() else {
        return Ok(Reading::NoHand);
    };
    if hand.landmarks.len() != LANDMARK_COUNT {
        return Err(LineError::LandmarkCount(hand.landmarks.len()));
    }

    let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
    for (slot, lm) in landmarks.iter_mut().zip(hand.landmarks) {
        *slot = Landmark { x: lm.x, y: lm.y, z: lm.z };
    }
    Ok(Reading::Hand(HandLandmarks::new(landmarks)))
}

// ════════════════════════════════════════════════════════════════════════════
// LandmarkStream
// ════════════════════════════════════════════════════════════════════════════

/// Reads one [`Reading`] per line from a landmark helper.
pub struct LandmarkStream<R: BufRead> {
    reader:    R,
    line:      String,
    /// Flip x for helpers that feed the model an unmirrored image.
    mirror:    bool,
    exhausted: bool,
    child:     Option<Child>,
}

impl<R: BufRead> LandmarkStream<R> {
    /// Read frames from any line source.
    pub fn from_reader(reader: R, mirror: bool) -> Self {
        LandmarkStream { reader, line: String::new(), mirror, exhausted: false, child: None }
    }
}

impl LandmarkStream<BufReader<ChildStdout>> {
    /// Start `command` through `sh -c` and read frames from its stdout.
    pub fn spawn(command: &str, mirror: bool) -> Result<Self, ShooterError> {
        let mut child = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| ShooterError::HelperSpawn { command: command.to_string(), source })?;

        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill();
            return Err(ShooterError::HelperStdout(command.to_string()));
        };
        info!("landmark helper started (pid {}): {}", child.id(), command);

        let mut stream = LandmarkStream::from_reader(BufReader::new(stdout), mirror);
        stream.child = Some(child);
        Ok(stream)
    }
}

impl<R: BufRead> GestureSource for LandmarkStream<R> {
    fn poll(&mut self) -> Reading {
        if self.exhausted {
            return Reading::Dropped;
        }

        self.line.clear();
        match self.reader.read_line(&mut self.line) {
            Ok(0) => {
                warn!("landmark helper closed its output; every frame is now dropped");
                self.exhausted = true;
                return Reading::Dropped;
            }
            Ok(_) => {}
            Err(e) => {
                warn!("landmark helper read failed: {}", e);
                return Reading::Dropped;
            }
        }

        match parse_line(self.line.trim()) {
            Ok(Reading::Hand(hand)) if self.mirror => Reading::Hand(hand.mirrored()),
            Ok(reading) => reading,
            Err(e) => {
                warn!("malformed helper line ({}): {:?}", e, self.line.trim());
                Reading::Dropped
            }
        }
    }
}

impl<R: BufRead> Drop for LandmarkStream<R> {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
            info!("landmark helper stopped");
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn hand(index: (f32, f32), thumb: (f32, f32)) -> String {
        let points: Vec<String> = (0..LANDMARK_COUNT)
            .map(|i| {
                let (x, y) = match i {
                    4 => thumb,
                    8 => index,
                    _ => (0.5, 0.9),
                };
                format!(r#"{{"x":{},"y":{},"z":0.0}}"#, x, y)
            })
            .collect();
        format!(r#"{{"landmarks":[{}]}}"#, points.join(","))
    }

    fn frame(hands: &[String]) -> String {
        format!("{{\"ok\":true,\"hands\":[{}]}}\n", hands.join(","))
    }

    fn stream(text: String, mirror: bool) -> LandmarkStream<Cursor<Vec<u8>>> {
        LandmarkStream::from_reader(Cursor::new(text.into_bytes()), mirror)
    }

    #[test]
    fn parses_a_hand() {
        let mut s = stream(frame(&[hand((0.25, 0.75), (0.3, 0.7))]), false);
        match s.poll() {
            Reading::Hand(h) => {
                assert_eq!(h.index_tip().x, 0.25);
                assert_eq!(h.index_tip().y, 0.75);
                assert_eq!(h.thumb_tip().x, 0.3);
            }
            other => panic!("expected a hand, got {:?}", other),
        }
    }

    #[test]
    fn bundled_helper_is_present() {
        let path = std::path::Path::new(HELPER_SCRIPT);
        assert!(path.is_file(), "missing {}", HELPER_SCRIPT);
        let src = std::fs::read_to_string(path).unwrap();
        assert!(src.contains("max_num_hands=1"));
        assert!(src.contains("min_detection_confidence=0.7"));
        assert!(src.contains("cv2.flip(frame, 1)"));
        assert!(camera_command().contains("hand_landmarks.py"));
    }

    #[test]
    fn parses_helper_output_lines() {
        // Shape of `json.dumps` output from the bundled helper.
        let points: Vec<String> = (0..LANDMARK_COUNT)
            .map(|i| {
                let (x, y) = match i {
                    4 => (0.412345, 0.587654),
                    8 => (0.43, 0.56),
                    _ => (0.5, 0.8),
                };
                format!(r#"{{"x": {}, "y": {}, "z": -0.031207}}"#, x, y)
            })
            .collect();
        let text = format!(
            "{{\"ok\": true, \"hands\": [{{\"landmarks\": [{}]}}]}}\n\
             {{\"ok\": true, \"hands\": []}}\n\
             {{\"ok\": false}}\n",
            points.join(", "),
        );
        let mut s = stream(text, false);
        match s.poll() {
            Reading::Hand(h) => {
                assert_eq!(h.index_tip().x, 0.43);
                assert_eq!(h.thumb_tip().y, 0.587654);
                assert_eq!(h.index_tip().z, -0.031207);
            }
            other => panic!("expected a hand, got {:?}", other),
        }
        assert_eq!(s.poll(), Reading::NoHand);
        assert_eq!(s.poll(), Reading::Dropped);
    }

    #[test]
    fn empty_hands_is_no_hand() {
        let mut s = stream("{\"ok\":true,\"hands\":[]}\n{\"ok\":true}\n".into(), false);
        assert_eq!(s.poll(), Reading::NoHand);
        assert_eq!(s.poll(), Reading::NoHand);
    }

    #[test]
    fn failed_camera_read_is_dropped() {
        let mut s = stream("{\"ok\":false}\n".into(), false);
        assert_eq!(s.poll(), Reading::Dropped);
    }

    #[test]
    fn malformed_lines_are_dropped_and_stream_continues() {
        let short = r#"{"landmarks":[{"x":0.1,"y":0.1}]}"#.to_string();
        let text = format!(
            "garbage\n{}{}",
            frame(&[short]),
            frame(&[hand((0.5, 0.5), (0.9, 0.9))]),
        );
        let mut s = stream(text, false);
        assert_eq!(s.poll(), Reading::Dropped); // not JSON
        assert_eq!(s.poll(), Reading::Dropped); // one landmark only
        assert!(matches!(s.poll(), Reading::Hand(_)));
    }

    #[test]
    fn end_of_stream_drops_forever() {
        let mut s = stream("{\"ok\":true,\"hands\":[]}\n".into(), false);
        assert_eq!(s.poll(), Reading::NoHand);
        for _ in 0..5 {
            assert_eq!(s.poll(), Reading::Dropped);
        }
        assert!(s.exhausted);
    }

    #[test]
    fn mirror_flips_landmarks() {
        let mut s = stream(frame(&[hand((0.25, 0.5), (0.5, 0.5))]), true);
        match s.poll() {
            Reading::Hand(h) => assert!((h.index_tip().x - 0.75).abs() < 1e-6),
            other => panic!("expected a hand, got {:?}", other),
        }
    }

    #[test]
    fn only_first_hand_is_used() {
        let text = frame(&[hand((0.1, 0.1), (0.9, 0.9)), hand((0.6, 0.6), (0.9, 0.9))]);
        let mut s = stream(text, false);
        match s.poll() {
            Reading::Hand(h) => assert_eq!(h.index_tip().x, 0.1),
            other => panic!("expected a hand, got {:?}", other),
        }
    }
}
