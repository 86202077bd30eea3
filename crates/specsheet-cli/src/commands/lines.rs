//! Lines command implementation.

use crate::cli::LinesArgs;
use crate::config::Profile;
use crate::error::Result;
use crate::output::Formatter;
use specsheet_domain::traits::RecordSink;
use specsheet_extractor::Pipeline;
use specsheet_sink::{ImageRenderer, JsonFileSink};
use specsheet_source::TextLineSource;
use tracing::info;

/// Execute the lines command.
pub fn execute_lines(args: LinesArgs, profile: &Profile, formatter: &Formatter) -> Result<()> {
    let output = args.output.unwrap_or_else(|| profile.output_path.clone());

    let source = TextLineSource::new(&args.input)
        .with_start_line(args.start_line)
        .skip_lines_without_units(profile.skip_lines_without_units && !args.keep_unitless);

    let renderer = ImageRenderer::new(args.images.apply(profile.images.clone()))?;
    let pipeline = Pipeline::new(profile.extractor.clone())?;

    info!("Extracting lines of {} into {}", args.input.display(), output.display());
    let outcome = pipeline.run(&source)?;

    let mut sink = JsonFileSink::new(&output, renderer);
    sink.write(&outcome.records)?;

    println!("{}", formatter.format_run(&outcome, &output)?);
    Ok(())
}
