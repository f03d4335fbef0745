//! Site identity: the descriptive values every page is parameterized with,
//! plus the canonical origin derived from the deployment's base url.
//!
//! Call [`init_from_env`] once at startup. Afterwards [`get`] hands out the
//! same read-only [`SiteConfig`] for the rest of the process.

use std::sync::OnceLock;

use serde::Serialize;
use url::Url;

use crate::errors::ConfigError;

pub const SITE_TITLE: &str = "Frontend Stack Lab";
pub const SITE_DESCRIPTION: &str = "Explore cutting-edge web development insights at Frontend Stack Lab! Our site offers comprehensive tutorials, expert advice on interview questions, and the latest trends in modern web development.";
pub const TWITTER_HANDLE: &str = "@RSypchenko";
pub const MY_NAME: &str = "FrontendStackLab";

pub const DEFAULT_SITE_ID: &str = "frontend-stack-lab";

/// Path under which articles are published, relative to the origin.
pub const ARTICLE_PATH_PREFIX: &str = "/blog/";

const BASE_URL_VAR: &str = "SITE";
const SITE_ID_VAR: &str = "SITE_ID";
const TITLE_VAR: &str = "SITE_TITLE";
const DESCRIPTION_VAR: &str = "SITE_DESCRIPTION";
const HANDLE_VAR: &str = "TWITTER_HANDLE";
const NAME_VAR: &str = "MY_NAME";

static SITE_CONFIG: OnceLock<SiteConfig> = OnceLock::new();

/// Literal values shipped with the crate for a known site.
#[derive(Debug, Clone, Copy)]
pub struct SiteProfile {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub social_handle: &'static str,
    pub owner_name: &'static str,
}

pub const PROFILES: &[SiteProfile] = &[SiteProfile {
    id: DEFAULT_SITE_ID,
    title: SITE_TITLE,
    description: SITE_DESCRIPTION,
    social_handle: TWITTER_HANDLE,
    owner_name: MY_NAME,
}];

pub fn profile(site_id: &str) -> Option<&'static SiteProfile> {
    PROFILES.iter().find(|profile| profile.id == site_id)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    #[serde(rename = "id")]
    pub site_id: String,
    pub title: String,
    pub description: String,
    pub social_handle: String,
    pub owner_name: String,
    pub origin: String,
}

/// Reduce an absolute url to its origin (`scheme://host[:port]`).
///
/// Default ports are elided, as are path, query and fragment.
pub fn canonical_origin(base: &str) -> Result<String, ConfigError> {
    let url = Url::parse(base.trim()).map_err(|source| ConfigError::InvalidBaseUrl {
        input: base.to_owned(),
        source,
    })?;
    let origin = url.origin();
    if !origin.is_tuple() {
        return Err(ConfigError::OpaqueOrigin(base.to_owned()));
    }
    Ok(origin.ascii_serialization())
}

impl SiteConfig {
    pub fn from_profile(profile: &SiteProfile, base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            site_id: profile.id.to_owned(),
            title: profile.title.to_owned(),
            description: profile.description.to_owned(),
            social_handle: profile.social_handle.to_owned(),
            owner_name: profile.owner_name.to_owned(),
            origin: canonical_origin(base_url)?,
        })
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Empty values count as unset. Sites without a built-in profile must
    /// supply every descriptive value themselves.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let base_url = read(BASE_URL_VAR).ok_or(ConfigError::MissingVar(BASE_URL_VAR))?;
        let origin = canonical_origin(&base_url)?;
        let site_id = read(SITE_ID_VAR).unwrap_or_else(|| DEFAULT_SITE_ID.to_owned());
        let known = profile(&site_id);

        let value = |key: &'static str, fallback: Option<&'static str>| {
            read(key)
                .or_else(|| fallback.map(str::to_owned))
                .ok_or(ConfigError::MissingVar(key))
        };

        Ok(Self {
            title: value(TITLE_VAR, known.map(|p| p.title))?,
            description: value(DESCRIPTION_VAR, known.map(|p| p.description))?,
            social_handle: value(HANDLE_VAR, known.map(|p| p.social_handle))?,
            owner_name: value(NAME_VAR, known.map(|p| p.owner_name))?,
            site_id,
            origin,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Join a site-relative path onto the origin.
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}/{}", self.origin, path.trim_start_matches('/'))
    }

    pub fn article_url(&self, slug: &str) -> String {
        self.absolute_url(&format!("{ARTICLE_PATH_PREFIX}{slug}"))
    }
}

/// Install the process-wide configuration. Only the first call succeeds.
pub fn init(config: SiteConfig) -> Result<&'static SiteConfig, ConfigError> {
    SITE_CONFIG
        .set(config)
        .map_err(|_| ConfigError::AlreadyInitialized)?;
    SITE_CONFIG.get().ok_or(ConfigError::AlreadyInitialized)
}

pub fn init_from_env() -> Result<&'static SiteConfig, ConfigError> {
    let config = SiteConfig::from_env()?;
    tracing::info!(site = %config.site_id, origin = %config.origin, "site configuration loaded");
    init(config)
}

pub fn get() -> Option<&'static SiteConfig> {
    SITE_CONFIG.get()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn origin_strips_path_and_query() {
        assert_eq!(
            canonical_origin("https://example.com/some/path?x=1").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn origin_keeps_non_default_port() {
        assert_eq!(
            canonical_origin("http://localhost:4321/blog/#top").unwrap(),
            "http://localhost:4321"
        );
        assert_eq!(
            canonical_origin("https://example.com:443/").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn origin_lowercases_host() {
        assert_eq!(
            canonical_origin("HTTPS://Example.COM/Path").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn malformed_base_url_fails() {
        for input in ["not-a-url", "", "/relative/path", "http://"] {
            assert!(
                matches!(
                    canonical_origin(input),
                    Err(ConfigError::InvalidBaseUrl { .. })
                ),
                "expected {input:?} to be rejected"
            );
        }
    }

    #[test]
    fn opaque_origin_fails() {
        assert!(matches!(
            canonical_origin("mailto:someone@example.com"),
            Err(ConfigError::OpaqueOrigin(_))
        ));
    }

    #[test]
    fn default_profile_from_lookup() {
        let config =
            SiteConfig::from_lookup(lookup_from(&[("SITE", "https://example.com/x")])).unwrap();
        assert_eq!(config.site_id, DEFAULT_SITE_ID);
        assert_eq!(config.title, SITE_TITLE);
        assert_eq!(config.description, SITE_DESCRIPTION);
        assert_eq!(config.social_handle, TWITTER_HANDLE);
        assert_eq!(config.owner_name, MY_NAME);
        assert_eq!(config.origin, "https://example.com");
    }

    #[test]
    fn missing_base_url_fails() {
        let result = SiteConfig::from_lookup(lookup_from(&[("SITE", "  ")]));
        assert!(matches!(result, Err(ConfigError::MissingVar("SITE"))));
    }

    #[test]
    fn overrides_win_over_profile() {
        let config = SiteConfig::from_lookup(lookup_from(&[
            ("SITE", "https://example.com"),
            ("SITE_TITLE", "Another Title"),
            ("MY_NAME", ""),
        ]))
        .unwrap();
        assert_eq!(config.title, "Another Title");
        assert_eq!(config.owner_name, MY_NAME);
    }

    #[test]
    fn unknown_site_requires_every_value() {
        let result = SiteConfig::from_lookup(lookup_from(&[
            ("SITE", "https://second.example"),
            ("SITE_ID", "second-site"),
            ("SITE_TITLE", "Second"),
            ("SITE_DESCRIPTION", "Second site"),
        ]));
        assert!(matches!(result, Err(ConfigError::MissingVar("TWITTER_HANDLE"))));

        let config = SiteConfig::from_lookup(lookup_from(&[
            ("SITE", "https://second.example"),
            ("SITE_ID", "second-site"),
            ("SITE_TITLE", "Second"),
            ("SITE_DESCRIPTION", "Second site"),
            ("TWITTER_HANDLE", "@second"),
            ("MY_NAME", "Second Owner"),
        ]))
        .unwrap();
        assert_eq!(config.site_id, "second-site");
        assert_eq!(config.origin, "https://second.example");
    }

    #[test]
    fn article_links_use_origin() {
        let config =
            SiteConfig::from_profile(&PROFILES[0], "https://example.com/ignored/").unwrap();
        assert_eq!(
            config.article_url("rust-ownership"),
            "https://example.com/blog/rust-ownership"
        );
        assert_eq!(config.absolute_url("/rss.xml"), "https://example.com/rss.xml");
        assert_eq!(config.absolute_url("about"), "https://example.com/about");
    }

    #[test]
    fn constants_are_stable() {
        let first = SITE_TITLE;
        let second = SITE_TITLE;
        assert_eq!(first, second);
        assert_eq!(profile(DEFAULT_SITE_ID).unwrap().title, first);
    }

    #[test]
    fn init_happens_once() {
        let config = SiteConfig::from_profile(&PROFILES[0], "https://example.com").unwrap();
        // Only this test touches the global.
        let stored = init(config.clone()).unwrap();
        assert_eq!(stored, &config);
        assert!(matches!(
            init(config),
            Err(ConfigError::AlreadyInitialized)
        ));
        let a = get().unwrap();
        let b = get().unwrap();
        assert!(std::ptr::eq(a, b));
        assert_eq!(a.title, SITE_TITLE);
    }

    #[test]
    fn serializes_camel_case() {
        let config = SiteConfig::from_profile(&PROFILES[0], "https://example.com").unwrap();
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["id"], DEFAULT_SITE_ID);
        assert_eq!(value["socialHandle"], TWITTER_HANDLE);
        assert_eq!(value["ownerName"], MY_NAME);
        assert_eq!(value["origin"], "https://example.com");
    }
}
