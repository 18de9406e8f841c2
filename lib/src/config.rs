// Copyright 2023 System76 <info@system76.com>
// SPDX-License-Identifier: MPL-2.0

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

const CONFIG_DIR: &str = "headctl";
const CONFIG_FILE: &str = "config.toml";

/// User-configured aliases for raw output names, loaded from the
/// `[monitors]` table of the config file.
///
/// Config trouble is never fatal: an unreadable or malformed file
/// degrades to an empty mapping, so every output keeps its raw name.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Raw output name to alias. Insertion order follows the file, so the
    /// first alias configured for an output wins.
    aliases: IndexMap<String, String>,
}

impl Config {
    /// Loads the alias table, trying an explicit override path first, then
    /// `$XDG_CONFIG_HOME/headctl/config.toml`, then the same path under
    /// `~/.config`. The first readable file wins; none readable yields an
    /// empty mapping.
    #[must_use]
    pub fn load(path_override: Option<&Path>) -> Self {
        if let Some(path) = path_override {
            return match fs::read_to_string(path) {
                Ok(text) => Self::parse(&text),
                Err(why) => {
                    tracing::warn!(path = %path.display(), "could not read config file: {why}");
                    Self::default()
                }
            };
        }

        for path in candidate_paths() {
            if let Ok(text) = fs::read_to_string(&path) {
                return Self::parse(&text);
            }
        }

        Self::default()
    }

    /// Parses the TOML alias table. Unknown sections and malformed entries
    /// are warned about and skipped, never fatal.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let table = match text.parse::<toml::Table>() {
            Ok(table) => table,
            Err(why) => {
                tracing::warn!("config file is not valid TOML: {why}");
                return Self::default();
            }
        };

        let mut aliases = IndexMap::new();

        for (section, value) in table {
            match (section.as_str(), value) {
                ("monitors", toml::Value::Table(monitors)) => {
                    for (alias, value) in monitors {
                        if let toml::Value::String(output) = value {
                            aliases.entry(output).or_insert(alias);
                        } else {
                            tracing::warn!("config key 'monitors.{alias}' is not a string");
                        }
                    }
                }

                ("monitors", _) => {
                    tracing::warn!("config section 'monitors' is not a table");
                }

                (other, _) => {
                    tracing::warn!("unknown config section '{other}'");
                }
            }
        }

        Self { aliases }
    }

    /// The alias configured for an output, or the raw name itself when no
    /// alias exists. Total; never fails.
    #[must_use]
    pub fn alias_of<'a>(&'a self, output: &'a str) -> &'a str {
        self.aliases
            .get(output)
            .map_or(output, String::as_str)
    }
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(2);

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        paths.push(PathBuf::from(xdg).join(CONFIG_DIR).join(CONFIG_FILE));
    }

    if let Some(base) = directories_next::BaseDirs::new() {
        paths.push(
            base.home_dir()
                .join(".config")
                .join(CONFIG_DIR)
                .join(CONFIG_FILE),
        );
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn alias_of_round_trips_without_config() {
        let config = Config::default();
        assert_eq!(config.alias_of("DP-1"), "DP-1");
    }

    #[test]
    fn parses_monitor_aliases() {
        let config = Config::parse("[monitors]\nlaptop = \"eDP-1\"\nexternal = \"DP-1\"\n");
        assert_eq!(config.alias_of("eDP-1"), "laptop");
        assert_eq!(config.alias_of("DP-1"), "external");
        assert_eq!(config.alias_of("HDMI-1"), "HDMI-1");
    }

    #[test]
    fn first_alias_for_an_output_wins() {
        let config = Config::parse("[monitors]\nzz = \"DP-1\"\naa = \"DP-1\"\n");
        assert_eq!(config.alias_of("DP-1"), "zz");
    }

    #[test]
    fn unknown_sections_are_ignored() {
        let config = Config::parse("[monitors]\nlaptop = \"eDP-1\"\n\n[laptop]\nmode = \"1920x1080\"\n");
        assert_eq!(config.alias_of("eDP-1"), "laptop");
    }

    #[test]
    fn malformed_toml_degrades_to_empty_mapping() {
        let config = Config::parse("[monitors\nlaptop = eDP-1");
        assert_eq!(config.alias_of("eDP-1"), "eDP-1");
    }

    #[test]
    fn load_reads_an_explicit_override_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[monitors]\nlaptop = \"eDP-1\"\n").unwrap();

        let config = Config::load(Some(file.path()));
        assert_eq!(config.alias_of("eDP-1"), "laptop");
    }

    #[test]
    fn load_with_unreadable_override_is_empty() {
        let config = Config::load(Some(Path::new("/nonexistent/headctl/config.toml")));
        assert_eq!(config.alias_of("eDP-1"), "eDP-1");
    }
}
