use crate::config::{flag_enabled, ExtractorConfig};
use serde::Serialize;
use std::fmt;

/// Which APIs of the source service an extraction covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ExtractionMode {
    /// Every API, in a single set of templates
    WholeService,
    SingleApi(String),
    MultipleApis(Vec<String>),
    VersionSet(String),
    /// Every API, one template per API
    SplitAll,
}

impl ExtractionMode {
    /// Resolves the mode of an already validated config.
    ///
    /// A split request combined with an API list resolves to
    /// `MultipleApis`; the split flag itself is kept on the `Extractor`.
    pub(crate) fn resolve(config: &ExtractorConfig) -> Self {
        if let Some(ref name) = config.api_name {
            ExtractionMode::SingleApi(name.clone())
        } else if let Some(ref names) = config.mutiple_apis {
            ExtractionMode::MultipleApis(split_api_list(names))
        } else if let Some(ref version_set) = config.api_version_set_name {
            ExtractionMode::VersionSet(version_set.clone())
        } else if flag_enabled(config.split_apis.as_deref()) {
            ExtractionMode::SplitAll
        } else {
            ExtractionMode::WholeService
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ExtractionMode::WholeService => "whole service",
            ExtractionMode::SingleApi(_) => "single API",
            ExtractionMode::MultipleApis(_) => "multiple APIs",
            ExtractionMode::VersionSet(_) => "version set",
            ExtractionMode::SplitAll => "split per API",
        }
    }
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionMode::SingleApi(name) => write!(f, "{} ({})", self.description(), name),
            ExtractionMode::MultipleApis(names) => {
                write!(f, "{} ({})", self.description(), names.join(", "))
            }
            ExtractionMode::VersionSet(name) => write!(f, "{} ({})", self.description(), name),
            _ => f.write_str(self.description()),
        }
    }
}

/// Splits a comma-separated API list, trimming entries and dropping empty ones.
pub fn split_api_list(names: &str) -> Vec<String> {
    names
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ExtractorConfig {
        ExtractorConfig::sample()
    }

    #[test]
    fn test_split_api_list() {
        assert_eq!(split_api_list("a, b ,c"), vec!["a", "b", "c"]);
        assert_eq!(split_api_list("a,,b,"), vec!["a", "b"]);
        assert!(split_api_list(" , ").is_empty());
    }

    #[test]
    fn test_resolve_whole_service() {
        assert_eq!(ExtractionMode::resolve(&config()), ExtractionMode::WholeService);

        let mut config = config();
        config.split_apis = Some("false".to_string());
        assert_eq!(ExtractionMode::resolve(&config), ExtractionMode::WholeService);
    }

    #[test]
    fn test_resolve_selection_modes() {
        let mut single = config();
        single.api_name = Some("echo".to_string());
        assert_eq!(
            ExtractionMode::resolve(&single),
            ExtractionMode::SingleApi("echo".to_string())
        );

        let mut multiple = config();
        multiple.mutiple_apis = Some("echo, petstore".to_string());
        assert_eq!(
            ExtractionMode::resolve(&multiple),
            ExtractionMode::MultipleApis(vec!["echo".to_string(), "petstore".to_string()])
        );

        let mut version_set = config();
        version_set.api_version_set_name = Some("v1".to_string());
        assert_eq!(
            ExtractionMode::resolve(&version_set),
            ExtractionMode::VersionSet("v1".to_string())
        );

        let mut split = config();
        split.split_apis = Some("true".to_string());
        assert_eq!(ExtractionMode::resolve(&split), ExtractionMode::SplitAll);
    }

    #[test]
    fn test_split_with_list_resolves_to_list() {
        let mut config = config();
        config.mutiple_apis = Some("a,b".to_string());
        config.split_apis = Some("true".to_string());
        assert!(matches!(
            ExtractionMode::resolve(&config),
            ExtractionMode::MultipleApis(_)
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(ExtractionMode::SplitAll.to_string(), "split per API");
        assert_eq!(
            ExtractionMode::MultipleApis(vec!["a".to_string(), "b".to_string()]).to_string(),
            "multiple APIs (a, b)"
        );
    }
}
