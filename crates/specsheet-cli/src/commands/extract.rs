//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::config::Profile;
use crate::error::Result;
use crate::output::Formatter;
use specsheet_domain::traits::RecordSink;
use specsheet_extractor::Pipeline;
use specsheet_sink::{ImageRenderer, JsonFileSink};
use specsheet_source::CsvSource;
use tracing::info;

/// Execute the extract command.
pub fn execute_extract(args: ExtractArgs, profile: &Profile, formatter: &Formatter) -> Result<()> {
    let mut config = profile.extractor.clone();
    if let Some(start_row) = args.start_row {
        config.start_row_offset = start_row;
    }

    let input = args.input.unwrap_or_else(|| profile.input_path.clone());
    let output = args.output.unwrap_or_else(|| profile.output_path.clone());
    let delimiter = Profile::delimiter_byte(args.delimiter.unwrap_or(profile.delimiter))?;

    let mut source = CsvSource::new(&input)
        .with_delimiter(delimiter)
        .with_start_row(config.start_row_offset);
    if let Some(dir) = args.images_dir.or_else(|| profile.images_dir.clone()) {
        source = source.with_images_dir(dir);
    }

    let renderer = ImageRenderer::new(args.images.apply(profile.images.clone()))?;
    let pipeline = Pipeline::new(config)?;

    info!("Extracting {} into {}", input.display(), output.display());
    let outcome = pipeline.run(&source)?;

    let mut sink = JsonFileSink::new(&output, renderer);
    sink.write(&outcome.records)?;

    println!("{}", formatter.format_run(&outcome, &output)?);
    Ok(())
}
