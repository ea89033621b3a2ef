use reqwest::Url;
use tracing::{info, warn};

use super::source::TargetSource;
use crate::error::StartupError;
use crate::models::{Target, TargetList};

/// Strips one trailing slash from `base` and appends `suffix`.
pub fn normalize_url(base: &str, suffix: &str) -> String {
    let base = base.trim();
    let base = base.strip_suffix('/').unwrap_or(base);
    format!("{}{}", base, suffix)
}

fn validate_url(index: usize, url: &str) -> Result<(), StartupError> {
    let invalid = |reason: String| StartupError::InvalidTargetUrl {
        index,
        url: url.to_string(),
        reason,
    };
    let parsed = Url::parse(url).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reads targets 1, 2, 3, ... from `source` until the first index without a url.
///
/// Every url gets `heartbeat_path` appended; unnamed targets are called `website<i>`.
///
/// # Errors
///
/// Fails when no target is found or when a url does not parse as an http(s) url.
pub fn load_targets<S>(source: &S, heartbeat_path: &str) -> Result<TargetList, StartupError>
where
    S: TargetSource + ?Sized,
{
    let mut targets = Vec::new();
    let mut index = 1;

    while let Some(base) = non_blank(source.url(index)) {
        let url = normalize_url(&base, heartbeat_path);
        validate_url(index, &url)?;
        let name = non_blank(source.name(index)).unwrap_or_else(|| format!("website{}", index));
        targets.push(Target::new(name, url));
        index += 1;
    }

    // The scan stops at the first gap, later entries are not loaded.
    if non_blank(source.url(index + 1)).is_some() {
        warn!(
            event_name = "targets.load.gap",
            event_domain = "targets",
            gap_index = index,
            "target {} has no url; targets configured after it are ignored",
            index
        );
    }

    let targets = TargetList::new(targets).ok_or(StartupError::NoTargets)?;
    info!(
        event_name = "targets.load.success",
        event_domain = "targets",
        target_count = targets.len(),
        "Loaded {} target(s): {}",
        targets.len(),
        targets.names().join(", ")
    );
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TargetConfig;
    use crate::targets::EnvTargets;

    const SUFFIX: &str = "/api/heart-beat";

    fn urls(list: &TargetList) -> Vec<&str> {
        list.iter().map(Target::url).collect()
    }

    #[test]
    fn normalizes_with_and_without_trailing_slash() {
        let source = EnvTargets::from_vars([
            ("WEBSITE_URL1", "https://a.test/"),
            ("WEBSITE_URL2", "https://b.test"),
        ]);
        let list = load_targets(&source, SUFFIX).unwrap();
        assert_eq!(
            urls(&list),
            vec!["https://a.test/api/heart-beat", "https://b.test/api/heart-beat"]
        );
    }

    #[test]
    fn strips_only_one_trailing_slash() {
        assert_eq!(
            normalize_url("https://a.test//", SUFFIX),
            "https://a.test//api/heart-beat"
        );
        assert_eq!(
            normalize_url("  https://a.test/base/ ", SUFFIX),
            "https://a.test/base/api/heart-beat"
        );
    }

    #[test]
    fn length_matches_contiguous_indices() {
        let source = EnvTargets::from_vars([
            ("WEBSITE_URL1", "https://a.test"),
            ("WEBSITE_URL2", "https://b.test"),
            ("WEBSITE_URL3", "https://c.test"),
        ]);
        assert_eq!(load_targets(&source, SUFFIX).unwrap().len(), 3);
    }

    #[test]
    fn empty_configuration_is_fatal() {
        let source = EnvTargets::default();
        assert!(matches!(
            load_targets(&source, SUFFIX),
            Err(StartupError::NoTargets)
        ));
    }

    #[test]
    fn blank_first_url_counts_as_missing() {
        let source = EnvTargets::from_vars([("WEBSITE_URL1", "   ")]);
        assert!(matches!(
            load_targets(&source, SUFFIX),
            Err(StartupError::NoTargets)
        ));
    }

    // A missing url at index 2 ends the scan even though index 3 is set.
    #[test]
    fn gap_stops_the_scan() {
        let source = EnvTargets::from_vars([
            ("WEBSITE_URL1", "https://a.test"),
            ("WEBSITE_URL3", "https://c.test"),
        ]);
        let list = load_targets(&source, SUFFIX).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(urls(&list), vec!["https://a.test/api/heart-beat"]);
    }

    #[test]
    fn gap_in_config_list_stops_the_scan() {
        let targets = vec![
            TargetConfig {
                name: Some("a".into()),
                url: Some("https://a.test".into()),
            },
            TargetConfig {
                name: Some("no url".into()),
                url: None,
            },
            TargetConfig {
                name: Some("c".into()),
                url: Some("https://c.test".into()),
            },
        ];
        let list = load_targets(targets.as_slice(), SUFFIX).unwrap();
        assert_eq!(list.names(), vec!["a"]);
    }

    #[test]
    fn missing_or_blank_names_are_synthesized() {
        let source = EnvTargets::from_vars([
            ("WEBSITE_URL1", "https://a.test"),
            ("WEBSITE_NAME1", "alpha"),
            ("WEBSITE_URL2", "https://b.test"),
            ("WEBSITE_URL3", "https://c.test"),
            ("WEBSITE_NAME3", " "),
        ]);
        let list = load_targets(&source, SUFFIX).unwrap();
        assert_eq!(list.names(), vec!["alpha", "website2", "website3"]);
    }

    #[test]
    fn invalid_url_names_its_index() {
        let source = EnvTargets::from_vars([
            ("WEBSITE_URL1", "https://a.test"),
            ("WEBSITE_URL2", "not a url"),
        ]);
        match load_targets(&source, SUFFIX) {
            Err(StartupError::InvalidTargetUrl { index, .. }) => assert_eq!(index, 2),
            other => panic!("expected invalid url error, got {:?}", other),
        }
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let source = EnvTargets::from_vars([("WEBSITE_URL1", "ftp://a.test")]);
        assert!(matches!(
            load_targets(&source, SUFFIX),
            Err(StartupError::InvalidTargetUrl { index: 1, .. })
        ));
    }
}
