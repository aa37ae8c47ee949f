pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::ExtractorConfig;
pub use error::{ExtractorError, Result, UserFriendlyError};
pub use extractor::{split_api_list, ExtractionMode, Extractor};
pub use ui::{OutputFormatter, OutputMode};

use std::path::Path;

/// Loads a configuration file and builds validated extraction settings,
/// optionally redirecting the output folder.
pub fn load_extractor<P: AsRef<Path>>(config_path: P, output_dir: Option<&Path>) -> Result<Extractor> {
    let config = ExtractorConfig::load_from_file(config_path)?;
    match output_dir {
        Some(dir) => Extractor::with_output_dir(&config, dir),
        None => Extractor::new(&config),
    }
}

/// Writes a sample configuration file
pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
    ExtractorConfig::sample().save_to_file(output_path)
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sample_config_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("apimextract.toml");

        generate_sample_config(&config_path).unwrap();
        assert!(config_path.exists());

        let extractor = load_extractor(&config_path, None).unwrap();
        assert_eq!(extractor.source_apim_name(), "my-source-apim");
        assert_eq!(extractor.file_folder(), Path::new("./templates"));
        assert_eq!(extractor.mode(), &ExtractionMode::WholeService);
    }

    #[test]
    fn test_sample_json_config_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("extractor.json");

        generate_sample_config(&config_path).unwrap();

        let loaded = ExtractorConfig::load_from_file(&config_path).unwrap();
        assert_eq!(loaded, ExtractorConfig::sample());

        let extractor = load_extractor(&config_path, None).unwrap();
        assert_eq!(extractor.destination_apim_name(), "my-destination-apim");
    }

    #[test]
    fn test_load_extractor_with_output_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("apimextract.toml");
        generate_sample_config(&config_path).unwrap();

        let extractor = load_extractor(&config_path, Some(temp_dir.path())).unwrap();
        assert_eq!(extractor.file_folder(), temp_dir.path());
    }

    #[test]
    fn test_version_info() {
        assert!(!version_info().is_empty());
    }
}
