use std::path::{Path, PathBuf};

use crate::{
    card::{CardTheme, write_day_card},
    encode_ffmpeg::{SlideshowOpts, assemble_slideshow},
    error::{StoryreelError, StoryreelResult},
    loader::read_events,
    model::DaySchedule,
};

/// Everything the pipeline needs, passed explicitly: no process-global
/// state, no ambient paths.
#[derive(Clone, Debug)]
pub struct PipelineOpts {
    /// Delimited event table with a header row.
    pub input: PathBuf,
    /// Directory receiving one `{date}_events.png` per distinct date.
    pub out_dir: PathBuf,
    /// Background image, exactly canvas-sized.
    pub background: PathBuf,
    /// Font used for all card text.
    pub font: PathBuf,
    /// Year assumed when resolving weekday titles.
    pub assumed_year: i32,
}

/// Runs the image half of the pipeline: load records, group by raw date,
/// render one card per group. Returns the card paths in group order, which
/// is the timeline order for any downstream video assembly.
///
/// Fatal errors abort the run; cards written before the failure stay on
/// disk (there is no rollback).
#[tracing::instrument(skip(opts), fields(input = %opts.input.display()))]
pub fn run_pipeline(opts: &PipelineOpts) -> StoryreelResult<Vec<PathBuf>> {
    let records = read_events(&opts.input)?;
    let schedule = DaySchedule::from_records(records);
    let theme = CardTheme::load(&opts.background, &opts.font, opts.assumed_year)?;

    std::fs::create_dir_all(&opts.out_dir).map_err(|e| {
        StoryreelError::input(format!(
            "create output directory '{}': {e}",
            opts.out_dir.display()
        ))
    })?;

    let mut artifacts = Vec::with_capacity(schedule.len());
    for (date, events) in schedule.iter() {
        let path = write_day_card(&theme, date, events, &opts.out_dir)?;
        tracing::info!(date, events = events.len(), path = %path.display(), "wrote day card");
        artifacts.push(path);
    }

    Ok(artifacts)
}

/// Full pipeline: day cards plus the stitched slideshow. The card order
/// produced by [`run_pipeline`] is handed to the assembler positionally.
pub fn run_pipeline_with_video(
    opts: &PipelineOpts,
    video_out: &Path,
    slideshow: SlideshowOpts,
) -> StoryreelResult<Vec<PathBuf>> {
    let artifacts = run_pipeline(opts)?;
    assemble_slideshow(&artifacts, video_out, slideshow)?;
    Ok(artifacts)
}
