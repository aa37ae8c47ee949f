use crate::config::ExtractorConfig;
use crate::error::Result;
use crate::extractor::Extractor;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "apimextract")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Validate API Management template extraction settings")]
#[command(
    long_about = "apimextract assembles extraction settings for an API Management service \
                  from a configuration file and command-line flags, checks that the selected \
                  options can be used together, and prints the resulting extraction plan."
)]
#[command(after_help = "EXAMPLES:\n  \
    apimextract --source-apim-name contoso --destination-apim-name contoso-prod \\\n    \
        --resource-group apim-rg --file-folder ./templates\n  \
    apimextract --config extractor.json --api-name echo-api --include-all-revisions true\n  \
    apimextract --config apimextract.toml --multiple-apis echo,petstore --output ./out\n  \
    apimextract --generate-config --config apimextract.toml")]
pub struct Cli {
    /// Source API Management name
    #[arg(long, alias = "sourceApimName")]
    pub source_apim_name: Option<String>,

    /// Destination API Management name
    #[arg(long, alias = "destinationApimName")]
    pub destination_apim_name: Option<String>,

    /// Resource group name
    #[arg(long, alias = "resourceGroup")]
    pub resource_group: Option<String>,

    /// ARM template files folder
    #[arg(long, alias = "fileFolder")]
    pub file_folder: Option<String>,

    /// Single API to extract
    #[arg(long, alias = "apiName")]
    pub api_name: Option<String>,

    /// Comma-separated list of API names
    #[arg(long, alias = "mutipleAPIs")]
    pub multiple_apis: Option<String>,

    /// Name of the API version set to extract
    #[arg(long, alias = "apiVersionSetName")]
    pub api_version_set_name: Option<String>,

    /// Split APIs into one template each ("true" to enable)
    #[arg(long, alias = "splitAPIs")]
    pub split_apis: Option<String>,

    /// Include all revisions of the API given with --api-name ("true" to enable)
    #[arg(long, alias = "includeAllRevisions")]
    pub include_all_revisions: Option<String>,

    /// Base URL for linked templates referenced by a master template
    #[arg(long, alias = "linkedTemplatesBaseUrl")]
    pub linked_templates_base_url: Option<String>,

    /// SAS token appended to linked template URIs
    #[arg(long, alias = "linkedTemplatesSasToken")]
    pub linked_templates_sas_token: Option<String>,

    /// Query string appended to linked template URIs
    #[arg(long, alias = "linkedTemplatesUrlQueryString")]
    pub linked_templates_url_query_string: Option<String>,

    /// Remote folder policy XML files are deployed to
    #[arg(long, alias = "policyXMLBaseUrl")]
    pub policy_xml_base_url: Option<String>,

    /// SAS token appended to policy XML URIs
    #[arg(long, alias = "policyXMLSasToken")]
    pub policy_xml_sas_token: Option<String>,

    /// Configuration file path (TOML, or JSON with a .json extension)
    #[arg(short, long, alias = "extractorConfig")]
    pub config: Option<PathBuf>,

    /// Write templates here instead of the configured file folder
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    /// Loads the configuration file (if any) and applies command-line values on top.
    pub fn load_config(&self) -> Result<ExtractorConfig> {
        let mut config = ExtractorConfig::load_with_defaults(self.config.as_ref())?;
        config.merge_with_cli_args(&self.create_cli_overrides());
        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> ExtractorConfig {
        ExtractorConfig {
            source_apim_name: self.source_apim_name.clone(),
            destination_apim_name: self.destination_apim_name.clone(),
            resource_group: self.resource_group.clone(),
            file_folder: self.file_folder.clone(),
            api_name: self.api_name.clone(),
            mutiple_apis: self.multiple_apis.clone(),
            linked_templates_base_url: self.linked_templates_base_url.clone(),
            linked_templates_sas_token: self.linked_templates_sas_token.clone(),
            linked_templates_url_query_string: self.linked_templates_url_query_string.clone(),
            policy_xml_base_url: self.policy_xml_base_url.clone(),
            policy_xml_sas_token: self.policy_xml_sas_token.clone(),
            split_apis: self.split_apis.clone(),
            api_version_set_name: self.api_version_set_name.clone(),
            include_all_revisions: self.include_all_revisions.clone(),
        }
    }

    /// Validates the merged configuration and builds the extraction settings.
    pub fn build_extractor(&self) -> Result<Extractor> {
        let config = self.load_config()?;
        match self.output {
            Some(ref dir) => Extractor::with_output_dir(&config, dir),
            None => Extractor::new(&config),
        }
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
