use crate::error::{ExtractorError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// User-supplied extraction settings.
///
/// Every field is optional at the type level; presence rules are only
/// enforced by [`ExtractorConfig::validate`]. Field names serialize with the
/// spelling used by existing `extractorConfig` JSON files, so those files load
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractorConfig {
    /// Source API Management name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_apim_name: Option<String>,
    /// Destination API Management name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_apim_name: Option<String>,
    /// Resource Group name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    /// ARM Template files folder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_folder: Option<String>,
    /// Single API to extract
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_name: Option<String>,
    /// Comma-separated list of API names
    #[serde(rename = "mutipleAPIs", skip_serializing_if = "Option::is_none")]
    pub mutiple_apis: Option<String>,
    /// Base URL of the linked templates referenced by the master template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_templates_base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_templates_sas_token: Option<String>,
    /// Query string appended to linked template URIs for private storage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_templates_url_query_string: Option<String>,
    /// Remote folder policy XML files are deployed to
    #[serde(rename = "policyXMLBaseUrl", skip_serializing_if = "Option::is_none")]
    pub policy_xml_base_url: Option<String>,
    #[serde(rename = "policyXMLSasToken", skip_serializing_if = "Option::is_none")]
    pub policy_xml_sas_token: Option<String>,
    /// "true" splits APIs into one template each
    #[serde(rename = "splitAPIs", skip_serializing_if = "Option::is_none")]
    pub split_apis: Option<String>,
    /// Version set to extract
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version_set_name: Option<String>,
    /// "true" includes every revision of `api_name`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_all_revisions: Option<String>,
}

const DEFAULT_CONFIG_PATHS: [&str; 3] = [
    "apimextract.toml",
    "apimextract.json",
    ".apimextract.toml",
];

/// Only the exact literal `"true"` enables a textual flag.
pub(crate) fn flag_enabled(value: Option<&str>) -> bool {
    value == Some("true")
}

/// JSON for a `.json` extension, TOML for anything else.
fn is_json_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}

fn take_override(target: &mut Option<String>, value: &Option<String>) {
    if let Some(ref v) = value {
        *target = Some(v.clone());
    }
}

impl ExtractorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ExtractorError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path)?;

        let config: ExtractorConfig = if is_json_path(path) {
            serde_json::from_str(&content).map_err(|e| ExtractorError::Config {
                message: format!("Failed to parse config file {}: {}", path.display(), e),
            })?
        } else {
            toml::from_str(&content).map_err(|e| ExtractorError::Config {
                message: format!("Failed to parse config file {}: {}", path.display(), e),
            })?
        };

        debug!(path = %path.display(), "loaded extractor configuration");
        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                for default_path in &DEFAULT_CONFIG_PATHS {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                // Everything may still come from the command line
                Ok(Self::default())
            }
        }
    }

    /// Replaces each field for which `overrides` carries a value.
    pub fn merge_with_cli_args(&mut self, overrides: &ExtractorConfig) {
        take_override(&mut self.source_apim_name, &overrides.source_apim_name);
        take_override(&mut self.destination_apim_name, &overrides.destination_apim_name);
        take_override(&mut self.resource_group, &overrides.resource_group);
        take_override(&mut self.file_folder, &overrides.file_folder);
        take_override(&mut self.api_name, &overrides.api_name);
        take_override(&mut self.mutiple_apis, &overrides.mutiple_apis);
        take_override(
            &mut self.linked_templates_base_url,
            &overrides.linked_templates_base_url,
        );
        take_override(
            &mut self.linked_templates_sas_token,
            &overrides.linked_templates_sas_token,
        );
        take_override(
            &mut self.linked_templates_url_query_string,
            &overrides.linked_templates_url_query_string,
        );
        take_override(&mut self.policy_xml_base_url, &overrides.policy_xml_base_url);
        take_override(&mut self.policy_xml_sas_token, &overrides.policy_xml_sas_token);
        take_override(&mut self.split_apis, &overrides.split_apis);
        take_override(&mut self.api_version_set_name, &overrides.api_version_set_name);
        take_override(&mut self.include_all_revisions, &overrides.include_all_revisions);
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = if is_json_path(path) {
            serde_json::to_string_pretty(self).map_err(|e| ExtractorError::Config {
                message: format!("Failed to serialize config: {}", e),
            })?
        } else {
            toml::to_string_pretty(self).map_err(|e| ExtractorError::Config {
                message: format!("Failed to serialize config: {}", e),
            })?
        };

        std::fs::write(path, content)?;
        debug!(path = %path.display(), "saved extractor configuration");

        Ok(())
    }

    /// Checks required parameters and option exclusivity.
    ///
    /// Required parameters are checked first, in a fixed order, then the
    /// selection rules. The first failing check is reported; the config is
    /// not modified.
    pub fn validate(&self) -> Result<()> {
        if is_blank(self.source_apim_name.as_deref()) {
            return Err(ExtractorError::missing("sourceApimName"));
        }
        if is_blank(self.destination_apim_name.as_deref()) {
            return Err(ExtractorError::missing("destinationApimName"));
        }
        if is_blank(self.resource_group.as_deref()) {
            return Err(ExtractorError::missing("resourceGroup"));
        }
        if is_blank(self.file_folder.as_deref()) {
            return Err(ExtractorError::missing("fileFolder"));
        }

        let should_split_apis = flag_enabled(self.split_apis.as_deref());
        let has_version_set_name = self.api_version_set_name.is_some();
        let has_single_api = self.api_name.is_some();
        let include_revisions = flag_enabled(self.include_all_revisions.as_deref());
        let has_multiple_apis = self.mutiple_apis.is_some();

        debug!(
            should_split_apis,
            has_version_set_name,
            has_single_api,
            include_revisions,
            has_multiple_apis,
            "validating extraction options"
        );

        if should_split_apis && has_single_api {
            return Err(ExtractorError::unsupported(
                "Can't use splitAPIs and apiName at same time",
            ));
        }

        if should_split_apis && has_version_set_name {
            return Err(ExtractorError::unsupported(
                "Can't use splitAPIs and apiVersionSetName at same time",
            ));
        }

        if has_single_api && has_version_set_name {
            return Err(ExtractorError::unsupported(
                "Can't use apiName and apiVersionSetName at same time",
            ));
        }

        if has_multiple_apis && (has_single_api || has_version_set_name) {
            return Err(ExtractorError::unsupported(
                "Can't use mutipleAPIs with apiName or apiVersionSetName at the same time",
            ));
        }

        // splitAPIs + mutipleAPIs is accepted

        if include_revisions && !has_single_api {
            return Err(ExtractorError::unsupported(
                "\"includeAllRevisions\" can be used when you specify the API you want to extract with \"apiName\"",
            ));
        }

        Ok(())
    }

    /// Sample configuration with placeholder values for the required fields.
    pub fn sample() -> Self {
        Self {
            source_apim_name: Some("my-source-apim".to_string()),
            destination_apim_name: Some("my-destination-apim".to_string()),
            resource_group: Some("my-resource-group".to_string()),
            file_folder: Some("./templates".to_string()),
            linked_templates_base_url: Some(
                "https://mystorageaccount.blob.core.windows.net/templates".to_string(),
            ),
            ..Self::default()
        }
    }

    pub fn create_sample_config() -> String {
        toml::to_string_pretty(&Self::sample()).unwrap_or_else(|_| String::new())
    }
}
