use crate::config::{flag_enabled, ExtractorConfig};
use crate::error::Result;
use crate::extractor::ExtractionMode;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read-only settings handed to the template extraction pipeline.
///
/// Built from an [`ExtractorConfig`] after validation; text flags are
/// already narrowed to booleans and the selection options to an
/// [`ExtractionMode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Extractor {
    source_apim_name: String,
    destination_apim_name: String,
    resource_group: String,
    file_folder: PathBuf,
    linked_templates_base_url: Option<String>,
    #[serde(skip_serializing)]
    linked_templates_sas_token: Option<String>,
    linked_templates_url_query_string: Option<String>,
    #[serde(rename = "policyXMLBaseUrl")]
    policy_xml_base_url: Option<String>,
    #[serde(skip_serializing)]
    policy_xml_sas_token: Option<String>,
    api_version_set_name: Option<String>,
    include_all_revisions: bool,
    #[serde(rename = "splitAPIs")]
    split_apis: bool,
    mode: ExtractionMode,
}

impl Extractor {
    /// Validates `config` and projects it, writing into its own `fileFolder`.
    pub fn new(config: &ExtractorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_validated(config, None))
    }

    /// Validates `config` and projects it, writing into `dir_name` instead
    /// of the configured folder.
    pub fn with_output_dir<P: AsRef<Path>>(config: &ExtractorConfig, dir_name: P) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_validated(config, Some(dir_name.as_ref())))
    }

    /// Projects `config` without validating it.
    ///
    /// The caller must have run [`ExtractorConfig::validate`] successfully;
    /// absent required fields become empty strings.
    pub fn from_validated(config: &ExtractorConfig, dir_name: Option<&Path>) -> Self {
        let file_folder = match dir_name {
            Some(dir) => dir.to_path_buf(),
            None => PathBuf::from(config.file_folder.clone().unwrap_or_default()),
        };

        let extractor = Self {
            source_apim_name: config.source_apim_name.clone().unwrap_or_default(),
            destination_apim_name: config.destination_apim_name.clone().unwrap_or_default(),
            resource_group: config.resource_group.clone().unwrap_or_default(),
            file_folder,
            linked_templates_base_url: config.linked_templates_base_url.clone(),
            linked_templates_sas_token: config.linked_templates_sas_token.clone(),
            linked_templates_url_query_string: config.linked_templates_url_query_string.clone(),
            policy_xml_base_url: config.policy_xml_base_url.clone(),
            policy_xml_sas_token: config.policy_xml_sas_token.clone(),
            api_version_set_name: config.api_version_set_name.clone(),
            include_all_revisions: flag_enabled(config.include_all_revisions.as_deref()),
            split_apis: flag_enabled(config.split_apis.as_deref()),
            mode: ExtractionMode::resolve(config),
        };

        debug!(
            source = %extractor.source_apim_name,
            destination = %extractor.destination_apim_name,
            folder = %extractor.file_folder.display(),
            mode = %extractor.mode,
            "resolved extraction settings"
        );

        extractor
    }

    pub fn source_apim_name(&self) -> &str {
        &self.source_apim_name
    }

    pub fn destination_apim_name(&self) -> &str {
        &self.destination_apim_name
    }

    pub fn resource_group(&self) -> &str {
        &self.resource_group
    }

    pub fn file_folder(&self) -> &Path {
        &self.file_folder
    }

    pub fn linked_templates_base_url(&self) -> Option<&str> {
        self.linked_templates_base_url.as_deref()
    }

    pub fn linked_templates_sas_token(&self) -> Option<&str> {
        self.linked_templates_sas_token.as_deref()
    }

    pub fn linked_templates_url_query_string(&self) -> Option<&str> {
        self.linked_templates_url_query_string.as_deref()
    }

    pub fn policy_xml_base_url(&self) -> Option<&str> {
        self.policy_xml_base_url.as_deref()
    }

    pub fn policy_xml_sas_token(&self) -> Option<&str> {
        self.policy_xml_sas_token.as_deref()
    }

    pub fn api_version_set_name(&self) -> Option<&str> {
        self.api_version_set_name.as_deref()
    }

    pub fn include_all_revisions(&self) -> bool {
        self.include_all_revisions
    }

    pub fn split_apis(&self) -> bool {
        self.split_apis
    }

    pub fn mode(&self) -> &ExtractionMode {
        &self.mode
    }

    /// True when a master template linking to per-resource templates is wanted.
    pub fn uses_linked_templates(&self) -> bool {
        self.linked_templates_base_url.is_some()
    }

    /// True when policies go to separate XML files instead of inline content.
    pub fn externalizes_policies(&self) -> bool {
        self.policy_xml_base_url.is_some()
    }

    /// Names of the explicitly selected APIs; empty for service-wide modes.
    pub fn api_names(&self) -> Vec<&str> {
        match &self.mode {
            ExtractionMode::SingleApi(name) => vec![name.as_str()],
            ExtractionMode::MultipleApis(names) => names.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }
}
