// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jason Ish

//! Checks GitHub releases for a newer product version.

use serde::Deserialize;
use tracing::debug;

use crate::config::UpdateSettings;
use crate::error::{Error, Result};
use crate::version::VERSION;

#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// Result of checking for an upgrade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpgradeStatus {
    /// A newer version is available.
    Available { latest: String, url: String },
    /// Already on the latest version.
    UpToDate,
}

/// Fetch the latest release and compare it with `current`.
pub async fn check_for_upgrade(current: &str, settings: &UpdateSettings) -> Result<UpgradeStatus> {
    let release = fetch_latest_release(settings).await?;
    Ok(evaluate(current, &release, settings))
}

pub async fn fetch_latest_release(settings: &UpdateSettings) -> Result<Release> {
    let url = settings.latest_release_url();
    debug!(%url, "fetching latest release");

    let client = reqwest::Client::new();
    let response = client
        .get(&url)
        .header("User-Agent", format!("product-version/{}", VERSION))
        .header("Accept", "application/vnd.github+json")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(Error::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(response.json().await?)
}

/// Decide whether `release` is an upgrade over `current`.
///
/// Dotted numeric versions are compared component by component. When either
/// side has no numeric component any difference counts as an upgrade.
pub fn evaluate(current: &str, release: &Release, settings: &UpdateSettings) -> UpgradeStatus {
    // Strip 'v' prefix if present for comparison
    let latest_version = release.tag_name.trim_start_matches('v');
    let current_version = current.trim_start_matches('v');

    if latest_version.is_empty() {
        return UpgradeStatus::UpToDate;
    }

    let comparable = !parse_version(latest_version).parts.is_empty()
        && !parse_version(current_version).parts.is_empty();
    let newer = if comparable {
        is_newer_version(latest_version, current_version)
    } else {
        latest_version != current_version
    };

    if !newer {
        return UpgradeStatus::UpToDate;
    }

    let url = release
        .html_url
        .clone()
        .unwrap_or_else(|| settings.release_page_url(&release.tag_name));
    UpgradeStatus::Available {
        latest: latest_version.to_string(),
        url,
    }
}

struct ParsedVersion<'a> {
    parts: Vec<u64>,
    pre_release: Option<&'a str>,
}

/// Split `3.4.0-beta+build.5` into `[3, 4, 0]` and `beta`.
///
/// Numeric parts stop at the first component that is not a number, so
/// `1.x.3` reads as `[1]`.
fn parse_version(v: &str) -> ParsedVersion<'_> {
    let v = v.split_once('+').map_or(v, |(core, _build)| core);
    let (core, pre_release) = match v.split_once('-') {
        Some((core, pre)) => (core, Some(pre)),
        None => (v, None),
    };

    ParsedVersion {
        parts: core
            .split('.')
            .map_while(|part| part.parse::<u64>().ok())
            .collect(),
        pre_release,
    }
}

/// Compare two semantic version strings.
/// Returns true if `latest` is newer than `current`.
pub fn is_newer_version(latest: &str, current: &str) -> bool {
    let latest = parse_version(latest);
    let current = parse_version(current);

    for (l, c) in latest.parts.iter().zip(current.parts.iter()) {
        match l.cmp(c) {
            std::cmp::Ordering::Greater => return true,
            std::cmp::Ordering::Less => return false,
            std::cmp::Ordering::Equal => continue,
        }
    }

    // If all compared parts are equal, check if latest has more parts
    if latest.parts.len() != current.parts.len() {
        return latest.parts.len() > current.parts.len();
    }

    // A release supersedes its own pre-releases
    latest.pre_release.is_none() && current.pre_release.is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(tag: &str, url: Option<&str>) -> Release {
        Release {
            tag_name: tag.to_string(),
            html_url: url.map(str::to_string),
        }
    }

    #[test]
    fn test_is_newer_version() {
        // Newer versions
        assert!(is_newer_version("1.0.0", "0.1.0"));
        assert!(is_newer_version("0.2.0", "0.1.0"));
        assert!(is_newer_version("0.1.1", "0.1.0"));
        assert!(is_newer_version("2.0.0", "1.99.99"));
        assert!(is_newer_version("1.0.0.1", "1.0.0"));

        // Release after its pre-release
        assert!(is_newer_version("3.4.0", "3.4.0-beta"));
        assert!(!is_newer_version("3.4.0-beta", "3.4.0"));
        assert!(!is_newer_version("3.4.0-rc.1", "3.4.0-beta"));

        // Same version
        assert!(!is_newer_version("0.1.0", "0.1.0"));
        assert!(!is_newer_version("1.0.0+build.2", "1.0.0+build.1"));

        // Older versions
        assert!(!is_newer_version("0.1.0", "0.2.0"));
        assert!(!is_newer_version("0.0.9", "0.1.0"));
    }

    #[test]
    fn test_parse_version() {
        let version = parse_version("3.4.0-beta+build.7");
        assert_eq!(version.parts, vec![3, 4, 0]);
        assert_eq!(version.pre_release, Some("beta"));

        assert_eq!(parse_version("1.2").parts, vec![1, 2]);
        assert!(parse_version("1.2").pre_release.is_none());
        assert!(parse_version("nightly").parts.is_empty());
    }

    #[test]
    fn test_parse_version_stops_at_bad_component() {
        assert_eq!(parse_version("1.x.3").parts, vec![1]);
        assert!(!is_newer_version("1.x.3", "1.2.0"));
        assert!(is_newer_version("1.3.0", "1.x.9"));
        assert_eq!(parse_version("5000000000.1").parts, vec![5_000_000_000, 1]);
    }

    #[test]
    fn test_evaluate_release_after_pre_release() {
        let settings = UpdateSettings::default();
        assert!(matches!(
            evaluate("3.4.0-beta", &release("v3.4.0", None), &settings),
            UpgradeStatus::Available { ref latest, .. } if latest == "3.4.0"
        ));
        assert_eq!(
            evaluate("3.4.0", &release("v3.4.0-beta", None), &settings),
            UpgradeStatus::UpToDate
        );
    }

    #[test]
    fn test_evaluate_newer_release() {
        let settings = UpdateSettings::default();
        let status = evaluate(
            "0.1.0",
            &release("v0.2.0", Some("https://example.com/r/v0.2.0")),
            &settings,
        );
        assert_eq!(
            status,
            UpgradeStatus::Available {
                latest: "0.2.0".to_string(),
                url: "https://example.com/r/v0.2.0".to_string(),
            }
        );
    }

    #[test]
    fn test_evaluate_same_or_older_release() {
        let settings = UpdateSettings::default();
        assert_eq!(
            evaluate("0.2.0", &release("v0.2.0", None), &settings),
            UpgradeStatus::UpToDate
        );
        assert_eq!(
            evaluate("v0.3.0", &release("0.2.0", None), &settings),
            UpgradeStatus::UpToDate
        );
    }

    #[test]
    fn test_evaluate_falls_back_to_release_page() {
        let settings = UpdateSettings::default();
        let status = evaluate("1.0.0", &release("v1.1.0", None), &settings);
        assert_eq!(
            status,
            UpgradeStatus::Available {
                latest: "1.1.0".to_string(),
                url: "https://github.com/alexboutros/numbers/releases/tag/v1.1.0".to_string(),
            }
        );
    }

    #[test]
    fn test_evaluate_non_numeric_tags_compare_textually() {
        let settings = UpdateSettings::default();
        assert!(matches!(
            evaluate("", &release("v1.0.0", None), &settings),
            UpgradeStatus::Available { .. }
        ));
        assert!(matches!(
            evaluate("1.0.0", &release("nightly", None), &settings),
            UpgradeStatus::Available { .. }
        ));
        assert_eq!(
            evaluate("nightly", &release("nightly", None), &settings),
            UpgradeStatus::UpToDate
        );
        assert_eq!(
            evaluate("1.0.0", &release("", None), &settings),
            UpgradeStatus::UpToDate
        );
    }

    #[test]
    fn test_release_deserializes_without_url() {
        let release: Release = serde_json::from_str(r#"{"tag_name":"v2.0.0"}"#).unwrap();
        assert_eq!(release.tag_name, "v2.0.0");
        assert!(release.html_url.is_none());
    }

    fn mock_settings(server: &wiremock::MockServer) -> UpdateSettings {
        UpdateSettings {
            repository: "example/app".to_string(),
            api_base: server.uri(),
        }
    }

    #[tokio::test]
    async fn test_fetch_latest_release_sends_github_headers() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/repos/example/app/releases/latest"))
            .and(wiremock::matchers::header(
                "Accept",
                "application/vnd.github+json",
            ))
            .and(wiremock::matchers::header(
                "User-Agent",
                format!("product-version/{}", VERSION).as_str(),
            ))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(
                serde_json::json!({
                    "tag_name": "v2.1.0",
                    "html_url": "https://github.com/example/app/releases/tag/v2.1.0"
                }),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let release = fetch_latest_release(&mock_settings(&server)).await.unwrap();
        assert_eq!(release.tag_name, "v2.1.0");
        assert_eq!(
            release.html_url.as_deref(),
            Some("https://github.com/example/app/releases/tag/v2.1.0")
        );
    }

    #[tokio::test]
    async fn test_fetch_latest_release_maps_error_status() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/repos/example/app/releases/latest"))
            .respond_with(wiremock::ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&server)
            .await;

        let err = fetch_latest_release(&mock_settings(&server))
            .await
            .unwrap_err();
        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not Found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_latest_release_rejects_bad_body() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = fetch_latest_release(&mock_settings(&server))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }

    #[tokio::test]
    async fn test_check_for_upgrade_against_server() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/repos/example/app/releases/latest"))
            .respond_with(
                wiremock::ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "tag_name": "v1.1.0" })),
            )
            .mount(&server)
            .await;
        let settings = mock_settings(&server);

        assert_eq!(
            check_for_upgrade("1.1.0", &settings).await.unwrap(),
            UpgradeStatus::UpToDate
        );
        assert_eq!(
            check_for_upgrade("1.0.0", &settings).await.unwrap(),
            UpgradeStatus::Available {
                latest: "1.1.0".to_string(),
                url: "https://github.com/example/app/releases/tag/v1.1.0".to_string(),
            }
        );
    }
}
