use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use image::{Rgba, RgbaImage, imageops};
use imageproc::drawing::{draw_text_mut, text_size};

use crate::{
    error::{StoryreelError, StoryreelResult},
    model::EventRecord,
    weekday::resolve_weekday,
};

/// Portrait story canvas, fixed.
pub const CANVAS_WIDTH: u32 = 1080;
pub const CANVAS_HEIGHT: u32 = 1920;

const TEXT_COLOR: Rgba<u8> = Rgba([72, 45, 2, 255]);
const BASE_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

const TITLE_SCALE: f32 = 60.0;
const DATE_SCALE: f32 = 38.0;
const EVENT_SCALE: f32 = 39.0;

const TITLE_Y: i32 = 180;
const DATE_Y: i32 = 250;
const EVENT_BASE_Y: i32 = 380;
const EVENT_STEP_Y: i32 = 70;
const EVENT_MARGIN_X: i32 = 30;

const BULLET: char = '\u{2022}';

/// Shared read-only assets and settings for card rendering: the composited
/// background, the font used at all three text sizes, and the year assumed
/// when resolving weekday titles.
pub struct CardTheme {
    background: RgbaImage,
    font: FontVec,
    pub assumed_year: i32,
}

impl CardTheme {
    /// Loads the background and font from disk. Both are configuration:
    /// a missing file, an undecodable font, or a background that is not
    /// exactly canvas-sized is fatal here rather than degraded at render
    /// time.
    pub fn load(
        background_path: &Path,
        font_path: &Path,
        assumed_year: i32,
    ) -> StoryreelResult<Self> {
        let background = image::open(background_path)
            .map_err(|e| {
                StoryreelError::asset(format!(
                    "open background image '{}': {e}",
                    background_path.display()
                ))
            })?
            .to_rgba8();

        let (w, h) = background.dimensions();
        if (w, h) != (CANVAS_WIDTH, CANVAS_HEIGHT) {
            return Err(StoryreelError::asset(format!(
                "background image '{}' is {w}x{h}, expected {CANVAS_WIDTH}x{CANVAS_HEIGHT}",
                background_path.display()
            )));
        }

        let font_bytes = std::fs::read(font_path).map_err(|e| {
            StoryreelError::asset(format!("read font '{}': {e}", font_path.display()))
        })?;
        let font = FontVec::try_from_vec(font_bytes).map_err(|e| {
            StoryreelError::asset(format!("parse font '{}': {e}", font_path.display()))
        })?;

        Ok(Self {
            background,
            font,
            assumed_year,
        })
    }
}

/// Vertical position of the i-th event line (0-indexed).
pub fn event_line_y(index: usize) -> i32 {
    EVENT_BASE_Y + index as i32 * EVENT_STEP_Y
}

/// Horizontal position that centers text of the given pixel width. Text
/// wider than the canvas goes negative and clips on both sides.
pub fn centered_x(text_width: i32) -> i32 {
    (CANVAS_WIDTH as i32 - text_width) / 2
}

/// "<bullet> <title> - <time>", exactly as drawn.
pub fn event_line_text(record: &EventRecord) -> String {
    format!("{BULLET} {} - {}", record.title, record.time)
}

/// Output file name for a day card, derived from the raw date key so that
/// re-runs overwrite the same file.
pub fn card_file_name(date: &str) -> String {
    format!("{date}_events.png")
}

/// Renders one day card: background over an opaque base, centered weekday
/// title and date line, then one left-aligned line per event stacked at a
/// fixed step. No wrapping; lines past the canvas bounds clip silently.
pub fn render_day_card(
    theme: &CardTheme,
    date: &str,
    events: &[EventRecord],
) -> StoryreelResult<RgbaImage> {
    let mut canvas = RgbaImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, BASE_COLOR);
    imageops::overlay(&mut canvas, &theme.background, 0, 0);

    let weekday = resolve_weekday(date, theme.assumed_year);
    let title = format!("{weekday}'s Events:");
    let (title_w, _) = text_size(PxScale::from(TITLE_SCALE), &theme.font, &title);
    draw_text_mut(
        &mut canvas,
        TEXT_COLOR,
        centered_x(title_w as i32),
        TITLE_Y,
        PxScale::from(TITLE_SCALE),
        &theme.font,
        &title,
    );

    let date_line = format!("Date: {date}");
    let (date_w, _) = text_size(PxScale::from(DATE_SCALE), &theme.font, &date_line);
    draw_text_mut(
        &mut canvas,
        TEXT_COLOR,
        centered_x(date_w as i32),
        DATE_Y,
        PxScale::from(DATE_SCALE),
        &theme.font,
        &date_line,
    );

    for (i, event) in events.iter().enumerate() {
        let line = event_line_text(event);
        draw_text_mut(
            &mut canvas,
            TEXT_COLOR,
            EVENT_MARGIN_X,
            event_line_y(i),
            PxScale::from(EVENT_SCALE),
            &theme.font,
            &line,
        );
    }

    Ok(canvas)
}

/// Renders and persists one day card into `out_dir`, returning the written
/// path.
#[tracing::instrument(skip(theme, events), fields(events = events.len()))]
pub fn write_day_card(
    theme: &CardTheme,
    date: &str,
    events: &[EventRecord],
    out_dir: &Path,
) -> StoryreelResult<PathBuf> {
    let canvas = render_day_card(theme, date, events)?;
    let path = out_dir.join(card_file_name(date));
    canvas
        .save(&path)
        .map_err(|e| StoryreelError::asset(format!("write day card '{}': {e}", path.display())))?;
    Ok(path)
}
