//! Randomized browser user-agent generation.
//!
//! Each crawl session identifies itself with a user agent drawn from the
//! browser families an engine accepts. A family generator combines a release
//! version and a platform descriptor, both drawn independently from
//! [`UserAgentPools`].

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Result, SearchError};

/// Browser family a user agent can imitate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowserFamily {
    /// Desktop Chrome.
    Chrome,
    /// Desktop Firefox.
    Firefox,
    /// Desktop Opera (Presto).
    Opera,
    /// Chrome on Android.
    ChromeMobile,
    /// Firefox on Android.
    FirefoxMobile,
}

/// Set of browser families that produce plausible traffic for an engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserConfig {
    pub chrome: bool,
    pub firefox: bool,
    pub opera: bool,
    pub chrome_mobile: bool,
    pub firefox_mobile: bool,
}

impl BrowserConfig {
    /// Desktop Chrome and Firefox.
    pub const fn desktop() -> Self {
        Self {
            chrome: true,
            firefox: true,
            opera: false,
            chrome_mobile: false,
            firefox_mobile: false,
        }
    }

    /// Desktop and mobile Chrome and Firefox.
    pub const fn desktop_and_mobile() -> Self {
        Self {
            chrome: true,
            firefox: true,
            opera: false,
            chrome_mobile: true,
            firefox_mobile: true,
        }
    }

    /// Exactly one family.
    pub fn only(family: BrowserFamily) -> Self {
        let mut config = Self::default();
        match family {
            BrowserFamily::Chrome => config.chrome = true,
            BrowserFamily::Firefox => config.firefox = true,
            BrowserFamily::Opera => config.opera = true,
            BrowserFamily::ChromeMobile => config.chrome_mobile = true,
            BrowserFamily::FirefoxMobile => config.firefox_mobile = true,
        }
        config
    }

    /// Whether the family is enabled.
    pub fn allows(&self, family: BrowserFamily) -> bool {
        match family {
            BrowserFamily::Chrome => self.chrome,
            BrowserFamily::Firefox => self.firefox,
            BrowserFamily::Opera => self.opera,
            BrowserFamily::ChromeMobile => self.chrome_mobile,
            BrowserFamily::FirefoxMobile => self.firefox_mobile,
        }
    }

    /// Enabled families in a fixed order.
    pub fn families(&self) -> Vec<BrowserFamily> {
        [
            BrowserFamily::Chrome,
            BrowserFamily::Firefox,
            BrowserFamily::Opera,
            BrowserFamily::ChromeMobile,
            BrowserFamily::FirefoxMobile,
        ]
        .into_iter()
        .filter(|family| self.allows(*family))
        .collect()
    }
}

const FIREFOX_VERSIONS: &[&str] = &[
    "69.0", "68.0", "67.0", "66.0", "65.0", "64.0", "63.0", "62.0", "60.0", "59.0", "58.0",
    "57.0", "56.0", "52.0", "48.0", "41.0", "40.0",
];

const CHROME_VERSIONS: &[&str] = &[
    "37.0.2062.124",
    "40.0.2214.93",
    "41.0.2228.0",
    "49.0.2623.112",
    "55.0.2883.87",
    "56.0.2924.87",
    "57.0.2987.133",
    "61.0.3163.100",
    "63.0.3239.132",
    "64.0.3282.0",
    "65.0.3325.146",
    "68.0.3440.106",
    "69.0.3497.100",
    "70.0.3538.102",
    "74.0.3729.169",
    "75.0.3770.0",
    "76.0.3809.0",
    "77.0.3865.166",
];

const OPERA_VERSIONS: &[&str] = &[
    "2.7.62 Version/11.00",
    "2.2.15 Version/10.10",
    "2.9.168 Version/11.50",
    "2.2.15 Version/10.00",
    "2.8.131 Version/11.11",
    "2.5.24 Version/10.54",
];

const ANDROID_VERSIONS: &[&str] = &[
    "4.4.2", "4.4.4", "5.0", "5.0.1", "5.0.2", "5.1", "5.1.1", "5.1.2", "6.0", "6.0.1", "7.0",
    "7.1.1", "7.1.2", "8.0.0", "8.1.0", "9", "10",
];

const ANDROID_DEVICES: &[&str] = &["GM1913", "A3001", "lettuce", "Pixel 2", "Mi Mix"];

const ANDROID_FORM_FACTORS: &[&str] = &["Mobile", "Tablet"];

const DESKTOP_PLATFORMS: &[&str] = &[
    "Macintosh; Intel Mac OS X",
    "Macintosh; PPC Mac OS X",
    "Windows NT 10.0",
    "Windows NT 5.1",
    "Windows NT 6.1; WOW64",
    "Windows NT 6.1; Win64; x64",
    "X11; Linux x86_64",
    "X11; Linux i686",
];

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

/// Version, platform and device tables the generator draws from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAgentPools {
    pub firefox_versions: Vec<String>,
    pub chrome_versions: Vec<String>,
    pub opera_versions: Vec<String>,
    pub android_versions: Vec<String>,
    pub android_devices: Vec<String>,
    pub android_form_factors: Vec<String>,
    pub desktop_platforms: Vec<String>,
}

impl Default for UserAgentPools {
    fn default() -> Self {
        Self {
            firefox_versions: owned(FIREFOX_VERSIONS),
            chrome_versions: owned(CHROME_VERSIONS),
            opera_versions: owned(OPERA_VERSIONS),
            android_versions: owned(ANDROID_VERSIONS),
            android_devices: owned(ANDROID_DEVICES),
            android_form_factors: owned(ANDROID_FORM_FACTORS),
            desktop_platforms: owned(DESKTOP_PLATFORMS),
        }
    }
}

/// Generates user agents from an immutable set of pools.
#[derive(Debug, Clone, Default)]
pub struct UserAgentGenerator {
    pools: UserAgentPools,
}

impl UserAgentGenerator {
    /// Creates a generator over the given pools.
    pub fn new(pools: UserAgentPools) -> Self {
        Self { pools }
    }

    /// Returns the pools.
    pub fn pools(&self) -> &UserAgentPools {
        &self.pools
    }

    /// Picks an enabled family uniformly at random and generates a user agent for it.
    pub fn generate<R: Rng + ?Sized>(&self, config: &BrowserConfig, rng: &mut R) -> Result<String> {
        let family = *config
            .families()
            .choose(rng)
            .ok_or(SearchError::NoBrowserFamilies)?;
        Ok(self.generate_family(family, rng))
    }

    /// Generates a user agent for one family.
    pub fn generate_family<R: Rng + ?Sized>(&self, family: BrowserFamily, rng: &mut R) -> String {
        let pools = &self.pools;
        match family {
            BrowserFamily::Chrome => {
                let version = pick(&pools.chrome_versions, rng);
                let platform = pick(&pools.desktop_platforms, rng);
                format!(
                    "Mozilla/5.0 ({}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{} Safari/537.36",
                    platform, version
                )
            }
            BrowserFamily::Firefox => {
                let version = pick(&pools.firefox_versions, rng);
                let platform = pick(&pools.desktop_platforms, rng);
                format!(
                    "Mozilla/5.0 ({}; rv:{}) Gecko/20100101 Firefox/{}",
                    platform, version, version
                )
            }
            BrowserFamily::Opera => {
                let version = pick(&pools.opera_versions, rng);
                let platform = pick(&pools.desktop_platforms, rng);
                format!("Opera/9.80 ({}; U; en) Presto/{}", platform, version)
            }
            BrowserFamily::ChromeMobile => {
                let version = pick(&pools.chrome_versions, rng);
                let android = pick(&pools.android_versions, rng);
                let device = pick(&pools.android_devices, rng);
                format!(
                    "Mozilla/5.0 (Linux; Android {}; {}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{} Mobile Safari/537.36",
                    android, device, version
                )
            }
            BrowserFamily::FirefoxMobile => {
                let version = pick(&pools.firefox_versions, rng);
                let android = pick(&pools.android_versions, rng);
                let form_factor = pick(&pools.android_form_factors, rng);
                format!(
                    "Mozilla/5.0 (Android {}; {}; rv:{}) Gecko/{} Firefox/{}",
                    android, form_factor, version, version, version
                )
            }
        }
    }
}

fn pick<'a, R: Rng + ?Sized>(pool: &'a [String], rng: &mut R) -> &'a str {
    pool.choose(rng).map(String::as_str).unwrap_or_default()
}
