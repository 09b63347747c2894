//! Storyreel renders a calendar of dated events into story-format day
//! cards (one 1080x1920 PNG per distinct date) and stitches them into a
//! short MP4 slideshow via a system `ffmpeg` child process.

#![forbid(unsafe_code)]

pub mod card;
pub mod encode_ffmpeg;
pub mod error;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod weekday;

pub use card::{CANVAS_HEIGHT, CANVAS_WIDTH, CardTheme, card_file_name, render_day_card};
pub use encode_ffmpeg::{EncodeConfig, SlideshowOpts, assemble_slideshow, is_ffmpeg_on_path};
pub use error::{StoryreelError, StoryreelResult};
pub use loader::read_events;
pub use model::{DaySchedule, EventRecord};
pub use pipeline::{PipelineOpts, run_pipeline, run_pipeline_with_video};
pub use weekday::{DEFAULT_ASSUMED_YEAR, UNKNOWN_DAY, resolve_weekday};
