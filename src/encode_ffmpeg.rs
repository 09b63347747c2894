use std::{
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
};

use image::RgbaImage;

use crate::error::{StoryreelError, StoryreelResult};

/// Slideshow pacing: how long each still is held, and the stream frame rate.
#[derive(Clone, Copy, Debug)]
pub struct SlideshowOpts {
    pub seconds_per_image: u32,
    pub fps: u32,
    pub overwrite: bool,
}

impl Default for SlideshowOpts {
    fn default() -> Self {
        Self {
            seconds_per_image: 2,
            fps: 24,
            overwrite: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct EncodeConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub out_path: PathBuf,
    pub overwrite: bool,
}

impl EncodeConfig {
    pub fn validate(&self) -> StoryreelResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(StoryreelError::validation(
                "encode width/height must be non-zero",
            ));
        }
        if self.fps == 0 {
            return Err(StoryreelError::validation("encode fps must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            // With the default settings we target yuv420p output for maximum compatibility.
            return Err(StoryreelError::validation(
                "encode width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        Ok(())
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn ensure_parent_dir(path: &Path) -> StoryreelResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Pipes raw RGBA frames into a system `ffmpeg` child process producing an
/// x264/yuv420p MP4. We intentionally shell out rather than link FFmpeg to
/// avoid native dev header/lib requirements.
struct SlideshowEncoder {
    cfg: EncodeConfig,
    child: Child,
    stdin: Option<ChildStdin>,
}

impl SlideshowEncoder {
    fn new(cfg: EncodeConfig) -> StoryreelResult<Self> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(StoryreelError::validation(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(StoryreelError::encode(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        if cfg.overwrite {
            cmd.arg("-y");
        } else {
            cmd.arg("-n");
        }

        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &cfg.fps.to_string(),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ])
        .arg(&cfg.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            StoryreelError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| StoryreelError::encode("failed to open ffmpeg stdin (unexpected)"))?;

        Ok(Self {
            cfg,
            child,
            stdin: Some(stdin),
        })
    }

    /// Writes one still `repeats` times; a held slide is just the same raw
    /// frame repeated at the stream frame rate.
    fn encode_still(&mut self, frame: &RgbaImage, repeats: u32) -> StoryreelResult<()> {
        let (w, h) = frame.dimensions();
        if w != self.cfg.width || h != self.cfg.height {
            return Err(StoryreelError::validation(format!(
                "frame size mismatch: got {w}x{h}, expected {}x{}",
                self.cfg.width, self.cfg.height
            )));
        }

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(StoryreelError::encode("ffmpeg encoder is already finalized"));
        };

        use std::io::Write as _;
        for _ in 0..repeats {
            stdin.write_all(frame.as_raw()).map_err(|e| {
                StoryreelError::encode(format!("failed to write frame to ffmpeg stdin: {e}"))
            })?;
        }

        Ok(())
    }

    fn finish(mut self) -> StoryreelResult<()> {
        drop(self.stdin.take());

        let output = self.child.wait_with_output().map_err(|e| {
            StoryreelError::encode(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(StoryreelError::encode(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

/// Concatenates the given stills, in order, into one MP4. Each image is
/// held for `opts.seconds_per_image` at `opts.fps`. Frame order is
/// positional: the sequence of `image_paths` is the timeline.
#[tracing::instrument(skip(image_paths), fields(images = image_paths.len()))]
pub fn assemble_slideshow(
    image_paths: &[PathBuf],
    out_path: &Path,
    opts: SlideshowOpts,
) -> StoryreelResult<()> {
    if image_paths.is_empty() {
        return Err(StoryreelError::validation(
            "slideshow needs at least one image",
        ));
    }
    if opts.seconds_per_image == 0 {
        return Err(StoryreelError::validation(
            "slideshow seconds_per_image must be non-zero",
        ));
    }

    let first = decode_still(&image_paths[0])?;
    let (width, height) = first.dimensions();

    let cfg = EncodeConfig {
        width,
        height,
        fps: opts.fps,
        out_path: out_path.to_path_buf(),
        overwrite: opts.overwrite,
    };
    let mut encoder = SlideshowEncoder::new(cfg)?;

    let repeats = opts.seconds_per_image * opts.fps;
    encoder.encode_still(&first, repeats)?;
    for path in &image_paths[1..] {
        let still = decode_still(path)?;
        encoder.encode_still(&still, repeats)?;
    }

    encoder.finish()?;
    tracing::info!(out = %out_path.display(), "wrote slideshow video");
    Ok(())
}

fn decode_still(path: &Path) -> StoryreelResult<RgbaImage> {
    Ok(image::open(path)
        .map_err(|e| StoryreelError::asset(format!("open slide '{}': {e}", path.display())))?
        .to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_validation_catches_bad_values() {
        assert!(
            EncodeConfig {
                width: 0,
                height: 10,
                fps: 30,
                out_path: PathBuf::from("out.mp4"),
                overwrite: true,
            }
            .validate()
            .is_err()
        );

        assert!(
            EncodeConfig {
                width: 11,
                height: 10,
                fps: 30,
                out_path: PathBuf::from("out.mp4"),
                overwrite: true,
            }
            .validate()
            .is_err()
        );

        assert!(
            EncodeConfig {
                width: 10,
                height: 10,
                fps: 0,
                out_path: PathBuf::from("out.mp4"),
                overwrite: true,
            }
            .validate()
            .is_err()
        );
    }

    #[test]
    fn default_pacing_matches_the_slideshow_contract() {
        let opts = SlideshowOpts::default();
        assert_eq!(opts.seconds_per_image, 2);
        assert_eq!(opts.fps, 24);
        assert_eq!(opts.seconds_per_image * opts.fps, 48);
    }

    #[test]
    fn empty_slideshow_is_rejected() {
        let result = assemble_slideshow(&[], Path::new("out.mp4"), SlideshowOpts::default());
        assert!(matches!(result, Err(StoryreelError::Validation(_))));
    }
}
