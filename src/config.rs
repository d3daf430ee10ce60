use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// Search queries used when none are given on the command line
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "WH-1000XM4",
    "wf1000xm4",
    "wf1000xm5",
    "wh1000xm5",
    "Nintendo Switch",
    "ニンテンドースイッチアクセサリー(ニンテンドースイッチ テレビゲーム)",
    "DualSense",
    "「ps5コントローラー」(アクセサリ、周辺機器)",
    "amazon kindle 10",
    "Amazon Kindle",
    "電子ブックリーダー",
    "DualShock 4",
    "PS Vita本体",
    "ニンテンドー3DS本体(ニンテンドー3DS テレビゲーム)",
];

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/136.0.0.0 Safari/537.36";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Proxy URLs from `PROXY_1..n`, then `PROXY_SOCKS5`
    pub proxies: Vec<String>,
    /// User agents from `USER_AGENT_1..n`
    pub user_agents: Vec<String>,
    /// Yen per euro for the export price column
    pub yen_to_eur: f64,
    pub results_dir: PathBuf,
    pub archive_dir: PathBuf,
    pub sheets_dir: PathBuf,
    /// Write every fetched page to `debug_dir`
    pub debug_mode: bool,
    pub debug_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proxies: Vec::new(),
            user_agents: vec![DEFAULT_USER_AGENT.to_string()],
            yen_to_eur: 165.0,
            results_dir: PathBuf::from("results"),
            archive_dir: PathBuf::from("results_archive"),
            sheets_dir: PathBuf::from("sheets"),
            debug_mode: false,
            debug_dir: PathBuf::from("debug_html"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        let _ = dotenv();
        let defaults = Self::default();

        let mut proxies = numbered_vars("PROXY");
        if let Ok(socks) = env::var("PROXY_SOCKS5") {
            if !socks.trim().is_empty() {
                proxies.push(socks);
            }
        }

        let mut user_agents = numbered_vars("USER_AGENT");
        if user_agents.is_empty() {
            user_agents = env::var("USER_AGENT")
                .map(|ua| vec![ua])
                .unwrap_or(defaults.user_agents);
        }

        Ok(Self {
            proxies,
            user_agents,
            yen_to_eur: match env::var("YEN_TO_EUR") {
                Ok(rate) => rate.parse().context("YEN_TO_EUR must be a number")?,
                Err(_) => defaults.yen_to_eur,
            },
            results_dir: path_var("RESULTS_DIR", defaults.results_dir),
            archive_dir: path_var("ARCHIVE_DIR", defaults.archive_dir),
            sheets_dir: path_var("SHEETS_DIR", defaults.sheets_dir),
            debug_mode: match env::var("DEBUG_MODE") {
                Ok(flag) => parse_flag(&flag).context("DEBUG_MODE must be true or false")?,
                Err(_) => defaults.debug_mode,
            },
            debug_dir: path_var("DEBUG_DIR", defaults.debug_dir),
        })
    }
}

/// `PREFIX_1`, `PREFIX_2`, ... up to the first unset or empty one
fn numbered_vars(prefix: &str) -> Vec<String> {
    (1..)
        .map(|i| env::var(format!("{prefix}_{i}")))
        .take_while(|v| v.as_ref().map(|s| !s.trim().is_empty()).unwrap_or(false))
        .filter_map(Result::ok)
        .collect()
}

fn path_var(name: &str, default: PathBuf) -> PathBuf {
    env::var(name).map(PathBuf::from).unwrap_or(default)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn numbered_vars_stop_at_gap() {
        env::set_var("SCOUT_TEST_UA_1", "first");
        env::set_var("SCOUT_TEST_UA_2", "second");
        env::set_var("SCOUT_TEST_UA_4", "unreachable");
        assert_eq!(numbered_vars("SCOUT_TEST_UA"), ["first", "second"]);
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.yen_to_eur, 165.0);
        assert_eq!(config.results_dir, PathBuf::from("results"));
        assert!(config.proxies.is_empty());
        assert_eq!(config.user_agents.len(), 1);
    }
}
