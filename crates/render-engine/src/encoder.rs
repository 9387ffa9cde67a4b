//! Video encoding backends.
//!
//! Frames are streamed as raw RGB24 into an external encoder process.
//! The `FrameSink` backend records frame counts for tests.

use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::time::Duration;

use image::RgbaImage;

use bloomlog_common::{BloomlogError, BloomlogResult};

/// Trait for video encoding backends.
pub trait VideoEncoder: Send {
    /// Backend name.
    fn name(&self) -> &str;

    /// Check if this backend is usable on the system.
    fn is_available(&self) -> bool;

    /// Open the output stream for `width` x `height` frames at `fps`.
    fn start(&mut self, width: u32, height: u32, fps: u32) -> BloomlogResult<()>;

    /// Append one frame. Frames must match the dimensions given to `start`.
    fn write_frame(&mut self, frame: &RgbaImage) -> BloomlogResult<()>;

    /// Flush and close the stream, returning the output path.
    fn finish(&mut self) -> BloomlogResult<PathBuf>;

    /// Optional delay between frame submissions, for backends that
    /// cannot absorb a burst. The default is no pacing.
    fn pacing(&self) -> Option<Duration> {
        None
    }
}

/// Encodes H.264 MP4 via an ffmpeg subprocess reading rawvideo on stdin.
pub struct FfmpegEncoder {
    output: PathBuf,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    width: u32,
    height: u32,
}

impl FfmpegEncoder {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            child: None,
            stdin: None,
            width: 0,
            height: 0,
        }
    }
}

impl VideoEncoder for FfmpegEncoder {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    fn is_available(&self) -> bool {
        command_exists("ffmpeg")
    }

    fn start(&mut self, width: u32, height: u32, fps: u32) -> BloomlogResult<()> {
        if let Some(parent) = self.output.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let size = format!("{width}x{height}");
        let rate = fps.to_string();
        let args = [
            "-y",
            "-hide_banner",
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgb24",
            "-s",
            size.as_str(),
            "-r",
            rate.as_str(),
            "-i",
            "-",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ];

        tracing::debug!(output = %self.output.display(), %size, %rate, "Starting ffmpeg");
        let mut child = Command::new("ffmpeg")
            .args(args)
            .arg(&self.output)
            .stdin(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| BloomlogError::timelapse(format!("Failed to start ffmpeg: {e}")))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| BloomlogError::timelapse("Failed to open ffmpeg stdin"))?;

        self.width = width;
        self.height = height;
        self.child = Some(child);
        self.stdin = Some(stdin);
        Ok(())
    }

    fn write_frame(&mut self, frame: &RgbaImage) -> BloomlogResult<()> {
        if frame.width() != self.width || frame.height() != self.height {
            return Err(BloomlogError::timelapse(format!(
                "Frame size {}x{} does not match stream {}x{}",
                frame.width(),
                frame.height(),
                self.width,
                self.height
            )));
        }
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| BloomlogError::timelapse("Encoder not started"))?;

        // ffmpeg expects packed rgb24, so drop the alpha channel.
        let mut rgb = Vec::with_capacity((self.width * self.height * 3) as usize);
        for px in frame.pixels() {
            rgb.extend_from_slice(&px.0[..3]);
        }
        stdin
            .write_all(&rgb)
            .map_err(|e| BloomlogError::timelapse(format!("Failed writing frame: {e}")))?;
        Ok(())
    }

    fn finish(&mut self) -> BloomlogResult<PathBuf> {
        // Closing stdin signals end-of-stream.
        drop(self.stdin.take());

        let mut child = self
            .child
            .take()
            .ok_or_else(|| BloomlogError::timelapse("Encoder not started"))?;

        let mut stderr_output = String::new();
        if let Some(mut stderr) = child.stderr.take() {
            let _ = stderr.read_to_string(&mut stderr_output);
        }

        let status = child
            .wait()
            .map_err(|e| BloomlogError::timelapse(format!("Failed to wait on ffmpeg: {e}")))?;
        if !status.success() {
            return Err(BloomlogError::timelapse(format!(
                "ffmpeg failed (status {}): {}",
                status,
                stderr_output.trim()
            )));
        }

        tracing::info!(output = %self.output.display(), "Encoding finished");
        Ok(self.output.clone())
    }
}

/// Test backend that counts frames instead of encoding them.
#[derive(Debug, Default)]
pub struct FrameSink {
    pub frames: usize,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

impl FrameSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VideoEncoder for FrameSink {
    fn name(&self) -> &str {
        "frame-sink"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn start(&mut self, width: u32, height: u32, fps: u32) -> BloomlogResult<()> {
        self.width = width;
        self.height = height;
        self.fps = fps;
        self.frames = 0;
        Ok(())
    }

    fn write_frame(&mut self, frame: &RgbaImage) -> BloomlogResult<()> {
        if frame.width() != self.width || frame.height() != self.height {
            return Err(BloomlogError::timelapse("Frame size mismatch"));
        }
        self.frames += 1;
        Ok(())
    }

    fn finish(&mut self) -> BloomlogResult<PathBuf> {
        Ok(PathBuf::from(format!("sink-{}-frames.mp4", self.frames)))
    }
}

fn command_exists(binary: &str) -> bool {
    Command::new("sh")
        .arg("-c")
        .arg(format!("command -v {binary} >/dev/null 2>&1"))
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_sink_counts_frames() {
        let mut sink = FrameSink::new();
        sink.start(64, 64, 30).unwrap();
        for _ in 0..10 {
            sink.write_frame(&RgbaImage::new(64, 64)).unwrap();
        }
        assert_eq!(sink.frames, 10);
        let out = sink.finish().unwrap();
        assert_eq!(out, PathBuf::from("sink-10-frames.mp4"));
    }

    #[test]
    fn test_frame_sink_rejects_wrong_size() {
        let mut sink = FrameSink::new();
        sink.start(64, 64, 30).unwrap();
        assert!(sink.write_frame(&RgbaImage::new(32, 32)).is_err());
    }

    #[test]
    fn test_ffmpeg_encoder_requires_start() {
        let mut enc = FfmpegEncoder::new("/tmp/out.mp4");
        assert!(enc.write_frame(&RgbaImage::new(2, 2)).is_err());
        assert!(enc.finish().is_err());
    }
}
