//! Profile command implementation.

use crate::cli::{ProfileAction, ProfileArgs};
use crate::config::{Config, Profile};
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the profile command.
pub fn execute_profile(
    args: ProfileArgs,
    config: &mut Config,
    config_path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ProfileAction::List => list_profiles(config, formatter),
        ProfileAction::Show => show_active_profile(config, formatter),
        ProfileAction::Switch { name } => switch_profile(config, config_path, name, formatter),
    }
}

/// List all profiles.
fn list_profiles(config: &Config, formatter: &Formatter) -> Result<()> {
    if config.profiles.is_empty() {
        println!("{}", formatter.info("No profiles configured"));
        return Ok(());
    }

    println!("Available profiles:");
    for (name, profile) in &config.profiles {
        let marker = if name == &config.active_profile {
            "* "
        } else {
            "  "
        };
        println!(
            "{}{}",
            marker,
            if name == &config.active_profile {
                formatter.success(name)
            } else {
                name.clone()
            }
        );
        println!("    Input: {}", profile.input_path.display());
        println!("    Output: {}", profile.output_path.display());
    }

    Ok(())
}

/// Show the active profile.
fn show_active_profile(config: &Config, formatter: &Formatter) -> Result<()> {
    let profile = config.get_active_profile()?;

    println!("Active profile: {}", formatter.success(&config.active_profile));
    for line in describe(profile) {
        println!("  {}", line);
    }

    Ok(())
}

/// Human-readable lines describing a profile.
fn describe(profile: &Profile) -> Vec<String> {
    let extractor = &profile.extractor;
    let mut lines = vec![
        format!("Input: {}", profile.input_path.display()),
        format!("Output: {}", profile.output_path.display()),
    ];
    if let Some(dir) = &profile.images_dir {
        lines.push(format!("Images: {}", dir.display()));
    }
    lines.push(format!("Image mode: {}", profile.images.mode));
    lines.push(format!("Model prefix: {}", extractor.model_prefix_filter));
    lines.push(format!(
        "Columns: model {}, image {}, spec {:?}",
        extractor.model_column, extractor.image_column_index, extractor.spec_columns
    ));
    lines.push(format!("Header rows: {}", extractor.start_row_offset));
    lines
}

/// Switch to a different profile.
fn switch_profile(
    config: &mut Config,
    config_path: &Path,
    name: String,
    formatter: &Formatter,
) -> Result<()> {
    config.switch_profile(name.clone())?;
    config.save_to(config_path)?;
    println!(
        "{}",
        formatter.success(&format!("Switched to profile '{}'", name))
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use tempfile::TempDir;

    #[test]
    fn test_switch_profile_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        let formatter = Formatter::new(OutputFormat::Table, false);

        switch_profile(&mut config, &path, "price-list".to_string(), &formatter).unwrap();
        assert_eq!(config.active_profile, "price-list");

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.active_profile, "price-list");
    }

    #[test]
    fn test_switch_to_unknown_profile() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        let formatter = Formatter::new(OutputFormat::Table, false);

        assert!(switch_profile(&mut config, &path, "nope".to_string(), &formatter).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_describe_profile() {
        let lines = describe(&Profile::price_list());
        assert!(lines.contains(&"Image mode: url".to_string()));
        assert!(lines.contains(&"Header rows: 4".to_string()));
    }
}
