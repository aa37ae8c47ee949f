use apimextract::{Cli, OutputFormat, OutputFormatter, OutputMode, UserFriendlyError};
use clap::Parser;
use std::process;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    setup_logging();

    let cli = Cli::parse();
    process::exit(run(&cli));
}

fn run(cli: &Cli) -> i32 {
    if cli.generate_config {
        return handle_generate_config(cli);
    }

    let formatter = OutputFormatter::new(output_mode(cli), cli.verbosity_level(), cli.quiet);
    formatter.start_operation("Validating extraction settings");
    if let Some(ref path) = cli.config {
        formatter.info(&format!("Using configuration file: {}", path.display()));
    }

    match cli.build_extractor() {
        Ok(extractor) => {
            debug!(mode = %extractor.mode(), "configuration accepted");
            if !extractor.api_names().is_empty() {
                formatter.debug(&format!("Selected APIs: {}", extractor.api_names().join(", ")));
            }
            formatter.print_extraction_plan(&extractor);
            // The plan is the whole JSON result
            if formatter.mode() != OutputMode::Json {
                formatter.success("Extraction settings are valid");
            }
            0
        }
        Err(e) => {
            debug!(error = %e, "configuration rejected");
            formatter.print_user_friendly_error(&e);
            e.exit_code()
        }
    }
}

fn output_mode(cli: &Cli) -> OutputMode {
    match cli.output_format {
        OutputFormat::Human => OutputMode::Human,
        OutputFormat::Json => OutputMode::Json,
        OutputFormat::Plain => OutputMode::Plain,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "apimextract.toml".to_string());

    match apimextract::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  apimextract --config {}", config_path);
            println!("\nEdit the file to describe your API Management services.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn setup_logging() {
    // Diagnostics go to stderr so JSON output on stdout stays parseable
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_env("APIMEXTRACT_LOG"))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["apimextract"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_generate_config_command() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");
        let path = config_path.to_string_lossy().to_string();

        let cli = parse(&["--generate-config", "--config", &path]);
        assert_eq!(run(&cli), 0);
        assert!(config_path.exists());

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("sourceApimName"));
    }

    #[test]
    fn test_valid_configuration_exit_code() {
        let cli = parse(&[
            "--source-apim-name",
            "src",
            "--destination-apim-name",
            "dst",
            "--resource-group",
            "rg",
            "--file-folder",
            "./out",
            "--output-format",
            "plain",
            "-q",
        ]);
        assert_eq!(run(&cli), 0);
    }

    #[test]
    fn test_invalid_configuration_exit_codes() {
        let cli = parse(&["--source-apim-name", "src", "-q"]);
        assert_eq!(run(&cli), 2);

        let cli = parse(&[
            "--source-apim-name",
            "src",
            "--destination-apim-name",
            "dst",
            "--resource-group",
            "rg",
            "--file-folder",
            "./out",
            "--split-apis",
            "true",
            "--api-name",
            "echo",
            "-q",
        ]);
        assert_eq!(run(&cli), 3);
    }
}
