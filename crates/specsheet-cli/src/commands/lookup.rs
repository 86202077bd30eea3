//! Lookup command implementation.

use crate::cli::LookupArgs;
use crate::config::Profile;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use specsheet_extractor::Pipeline;
use specsheet_sink::{CatalogEntry, ImageRenderer, StagedImages};
use specsheet_source::CsvSource;

/// Execute the lookup command.
pub fn execute_lookup(args: LookupArgs, profile: &Profile, formatter: &Formatter) -> Result<()> {
    if args.model.trim().is_empty() {
        return Err(CliError::InvalidInput("Model must not be empty".to_string()));
    }

    let input = args.input.unwrap_or_else(|| profile.input_path.clone());
    let delimiter = Profile::delimiter_byte(args.delimiter.unwrap_or(profile.delimiter))?;

    let mut source = CsvSource::new(&input)
        .with_delimiter(delimiter)
        .with_start_row(profile.extractor.start_row_offset);
    if let Some(dir) = args.images_dir.or_else(|| profile.images_dir.clone()) {
        source = source.with_images_dir(dir);
    }

    let renderer = ImageRenderer::new(args.images.apply(profile.images.clone()))?;
    let pipeline = Pipeline::new(profile.extractor.clone())?;

    let result = pipeline.lookup(&source, &args.model)?;
    let mut staged = StagedImages::new();
    let image = renderer.render(&result.record, &mut staged);
    staged.commit()?;
    let entry = CatalogEntry::new(&result.record, image);

    println!(
        "{}",
        formatter.format_lookup(&entry, result.row_index, &result.cells)?
    );
    Ok(())
}
