use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use styled_html_engine::{
    EveryLevelListMarkers, ImageResolver, InterpretedSyntax, MarkResolver, NestedListMarkers,
    Options, StyleResolver,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to read symbols file at {symbols_path}: {source}")]
    SymbolsReadError {
        symbols_path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Syntax {
    Full,
    #[default]
    InlineOnly,
    InlineOnlyPreservingWhitespace,
}

impl Syntax {
    pub fn interpreted(self) -> InterpretedSyntax {
        match self {
            Syntax::Full => InterpretedSyntax::Full(None),
            Syntax::InlineOnly => InterpretedSyntax::InlineOnly,
            Syntax::InlineOnlyPreservingWhitespace => InterpretedSyntax::InlineOnlyPreservingWhitespace,
        }
    }
}

impl std::str::FromStr for Syntax {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Syntax::Full),
            "inline-only" => Ok(Syntax::InlineOnly),
            "inline-only-preserving-whitespace" => Ok(Syntax::InlineOnlyPreservingWhitespace),
            other => Err(format!("unknown syntax '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkPreset {
    StronglyEmphasized,
    DimUnmarked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StylePreset {
    ForegroundColor,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListMarkerPolicy {
    #[default]
    Nested,
    EveryLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub syntax: Syntax,
    pub allows_links: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark: Option<MarkPreset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StylePreset>,
    pub list_markers: ListMarkerPolicy,
    /// Image sources shown as symbol attachments.
    pub symbols: Vec<String>,
    /// Additional symbol names, one per line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbols_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            syntax: Syntax::default(),
            allows_links: true,
            mark: None,
            style: None,
            list_markers: ListMarkerPolicy::default(),
            symbols: Vec::new(),
            symbols_file: None,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the symbols file path
        config.symbols_file = config
            .symbols_file
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/styled-html");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Symbol names from `symbols` followed by those listed in `symbols_file`.
    pub fn symbol_names(&self) -> Result<Vec<String>, ConfigError> {
        let mut names = self.symbols.clone();
        if let Some(symbols_path) = &self.symbols_file {
            let content = std::fs::read_to_string(symbols_path).map_err(|source| {
                ConfigError::SymbolsReadError {
                    symbols_path: symbols_path.clone(),
                    source,
                }
            })?;
            names.extend(
                content
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty() && !line.starts_with('#'))
                    .map(String::from),
            );
        }
        Ok(names)
    }

    /// Builder options described by this configuration.
    pub fn options(&self) -> Result<Options, ConfigError> {
        let mut options = Options::new(self.syntax.interpreted()).with_links(self.allows_links);

        options = match self.mark {
            Some(MarkPreset::StronglyEmphasized) => options.with_mark(MarkResolver::strongly_emphasized()),
            Some(MarkPreset::DimUnmarked) => options.with_mark(MarkResolver::dim_unmarked()),
            None => options,
        };
        if let Some(StylePreset::ForegroundColor) = self.style {
            options = options.with_style(StyleResolver::foreground_color());
        }
        options = match self.list_markers {
            ListMarkerPolicy::Nested => options.with_list_markers(NestedListMarkers),
            ListMarkerPolicy::EveryLevel => options.with_list_markers(EveryLevelListMarkers),
        };

        let names = self.symbol_names()?;
        if !names.is_empty() {
            options = options.with_image(ImageResolver::symbols(move |name| {
                names.iter().any(|known| known == name)
            }));
        }
        Ok(options)
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::env;
    use styled_html_engine::parse;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/styled-html/config.toml"));
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.allows_links);
        assert_eq!(config.syntax, Syntax::InlineOnly);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            syntax: Syntax::Full,
            allows_links: false,
            mark: Some(MarkPreset::DimUnmarked),
            style: Some(StylePreset::ForegroundColor),
            list_markers: ListMarkerPolicy::EveryLevel,
            symbols: vec!["bus.fill".to_string()],
            symbols_file: None,
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_kebab_case_keys() {
        let config: Config = toml::from_str(
            r#"
syntax = "inline-only-preserving-whitespace"
mark = "strongly-emphasized"
style = "foreground-color"
list_markers = "every-level"
symbols = ["bicycle"]
"#,
        )
        .unwrap();

        assert_eq!(config.syntax, Syntax::InlineOnlyPreservingWhitespace);
        assert_eq!(config.mark, Some(MarkPreset::StronglyEmphasized));
        assert_eq!(config.style, Some(StylePreset::ForegroundColor));
        assert_eq!(config.list_markers, ListMarkerPolicy::EveryLevel);
        assert_eq!(config.symbols, vec!["bicycle".to_string()]);
    }

    #[rstest]
    #[case("full", Some(Syntax::Full))]
    #[case("inline-only", Some(Syntax::InlineOnly))]
    #[case("inline-only-preserving-whitespace", Some(Syntax::InlineOnlyPreservingWhitespace))]
    #[case("Full", None)]
    #[case("", None)]
    fn test_syntax_from_str(#[case] input: &str, #[case] expected: Option<Syntax>) {
        assert_eq!(input.parse::<Syntax>().ok(), expected);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "syntax = \"markdown\"").unwrap();

        let result = Config::load_from_path(&config_file);

        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let test_config = Config {
            mark: Some(MarkPreset::StronglyEmphasized),
            symbols: vec!["bus.fill".to_string(), "bicycle".to_string()],
            ..Config::default()
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_symbols_file_with_env_var() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("symbols.txt"),
            "# transport\nbus.fill\n\n  bicycle  \n",
        )
        .unwrap();
        unsafe {
            env::set_var("STYLED_HTML_TEST_SYMBOLS", temp_dir.path());
        }

        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            "symbols = [\"cablecar\"]\nsymbols_file = \"$STYLED_HTML_TEST_SYMBOLS/symbols.txt\"\n",
        )
        .unwrap();
        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(config.symbols_file, Some(temp_dir.path().join("symbols.txt")));
        assert_eq!(
            config.symbol_names().unwrap(),
            vec!["cablecar".to_string(), "bus.fill".to_string(), "bicycle".to_string()]
        );

        unsafe {
            env::remove_var("STYLED_HTML_TEST_SYMBOLS");
        }
    }

    #[test]
    fn test_missing_symbols_file() {
        let config = Config {
            symbols_file: Some(PathBuf::from("/nonexistent/symbols.txt")),
            ..Config::default()
        };

        assert!(matches!(config.options(), Err(ConfigError::SymbolsReadError { .. })));
    }

    #[test]
    fn test_options_from_config() {
        let config = Config {
            allows_links: false,
            mark: Some(MarkPreset::StronglyEmphasized),
            symbols: vec!["bus.fill".to_string()],
            ..Config::default()
        };
        let options = config.options().unwrap();

        assert!(!options.allows_links);
        let text = parse(
            "<ul><li><img src=\"bus.fill\"> <mark>Bus</mark> <a href=\"https://example.com\">times</a></li></ul>",
            &options,
        )
        .unwrap();
        assert_eq!(text.text(), "• \u{fffc} Bus times");
        assert!(text.runs().iter().all(|run| run.attributes.link.is_none()));
    }

    #[test]
    fn test_every_level_markers_from_config() {
        let config = Config {
            list_markers: ListMarkerPolicy::EveryLevel,
            ..Config::default()
        };
        let text = parse(
            "<ol><li>a<ol><li>b</li></ol></li></ol>",
            &config.options().unwrap(),
        )
        .unwrap();

        assert_eq!(text.text(), "1. a\n1. 1. b");
    }
}
