//! Audio playback helpers
//!
//! All sound that is not produced by the system TTS engine goes through
//! here: remote synthesis payloads, custom voice clips, and the selection
//! feedback click. Each call opens the default output device, plays to
//! completion, and releases the stream and sink on return — success or not.

use crate::{Result, VoicelinkError};
use log::debug;
use rodio::source::SineWave;
use rodio::{Decoder, OutputStream, Sink, Source};
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;
use std::time::Duration;

/// Feedback click parameters
const CLICK_FREQ_HZ: f32 = 880.0;
const CLICK_LENGTH: Duration = Duration::from_millis(60);
const CLICK_GAIN: f32 = 0.25;

fn open_sink() -> Result<(OutputStream, Sink)> {
    let (stream, handle) = OutputStream::try_default()
        .map_err(|e| VoicelinkError::Audio(format!("no audio output device: {}", e)))?;
    let sink = Sink::try_new(&handle)
        .map_err(|e| VoicelinkError::Audio(format!("failed to open audio sink: {}", e)))?;
    Ok((stream, sink))
}

/// Play an encoded audio payload (e.g. MPEG from the remote voice provider)
/// at the given playback speed, blocking until playback ends
pub fn play_encoded(bytes: Vec<u8>, speed: f32) -> Result<()> {
    debug!("Playing {} bytes of encoded audio at {}x", bytes.len(), speed);
    let source = Decoder::new(Cursor::new(bytes))
        .map_err(|e| VoicelinkError::Audio(format!("could not decode audio payload: {}", e)))?;

    let (_stream, sink) = open_sink()?;
    sink.set_speed(speed);
    sink.append(source);
    sink.sleep_until_end();
    Ok(())
}

/// Play an audio file at the given playback speed, blocking until done
pub fn play_file(path: &Path, speed: f32) -> Result<()> {
    debug!("Playing audio file {:?} at {}x", path, speed);
    let file = File::open(path)
        .map_err(|e| VoicelinkError::Audio(format!("could not open {:?}: {}", path, e)))?;
    let source = Decoder::new(BufReader::new(file))
        .map_err(|e| VoicelinkError::Audio(format!("could not decode {:?}: {}", path, e)))?;

    let (_stream, sink) = open_sink()?;
    sink.set_speed(speed);
    sink.append(source);
    sink.sleep_until_end();
    Ok(())
}

/// Verify a file decodes as audio without playing it
pub fn probe_file(path: &Path) -> Result<()> {
    let file = File::open(path)
        .map_err(|e| VoicelinkError::Audio(format!("could not open {:?}: {}", path, e)))?;
    Decoder::new(BufReader::new(file))
        .map_err(|e| VoicelinkError::Audio(format!("not a playable audio file {:?}: {}", path, e)))?;
    Ok(())
}

/// Short feedback click for symbol selection and speak dispatch
pub fn click() -> Result<()> {
    let (_stream, sink) = open_sink()?;
    let tone = SineWave::new(CLICK_FREQ_HZ)
        .take_duration(CLICK_LENGTH)
        .amplify(CLICK_GAIN);
    sink.append(tone);
    sink.sleep_until_end();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_probe_rejects_non_audio() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"definitely not audio").unwrap();
        assert!(probe_file(file.path()).is_err());
    }

    #[test]
    fn test_probe_missing_file() {
        assert!(probe_file(Path::new("/nonexistent/clip.wav")).is_err());
    }
}
