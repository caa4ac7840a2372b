//! Animation options with TOML preset support.
//!
//! Everything a caller can tweak (texts, timing, loop/reverse/visibility
//! behavior, cursor, styling) is consolidated here. Options serialize
//! to/from TOML for presets stored in `presets/`.

mod behavior;
mod cursor;
mod style;
mod text;
mod timing;

use std::path::Path;

pub use behavior::BehaviorOptions;
pub use cursor::CursorOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use style::StyleOptions;
pub use text::TextSource;
pub use timing::{SpeedRangeOptions, TimingOptions};

use crate::error::TextypeError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[timing]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// The string or strings to animate.
    pub texts: TextSource,
    /// Per-character speeds and hold times.
    pub timing: TimingOptions,
    /// Loop, reverse and visibility policy.
    pub behavior: BehaviorOptions,
    /// Caret display policy.
    pub cursor: CursorOptions,
    /// Root element and color styling.
    pub style: StyleOptions,
}

impl Options {
    /// Default options animating the given strings.
    #[must_use]
    pub fn with_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            texts: TextSource::Many(texts.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, TextypeError> {
        toml::from_str(content)
            .map_err(|e| TextypeError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, TextypeError> {
        let content =
            std::fs::read_to_string(path).map_err(TextypeError::Io)?;
        let options = Self::from_toml_str(&content)?;
        log::info!("Loaded preset '{}'", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), TextypeError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TextypeError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(TextypeError::Io)?;
        }
        std::fs::write(path, content).map_err(TextypeError::Io)?;
        log::info!("Saved preset '{}'", path.display());
        Ok(())
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::with_texts(["Hello", "World"]);
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
texts = "About Me"

[timing]
typing_speed_ms = 75.0

[behavior]
loop = false
start_on_visible = true
"#;
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.texts, TextSource::Single("About Me".to_owned()));
        assert_eq!(opts.timing.typing_speed_ms, 75.0);
        assert!(!opts.behavior.looping);
        assert!(opts.behavior.start_on_visible);
        // Everything else should be default
        assert_eq!(opts.timing.pause_duration_ms, 2000.0);
        assert_eq!(opts.cursor.character, "|");
        assert_eq!(opts.style.tag, "div");
    }

    #[test]
    fn variable_speed_parses_as_table() {
        let toml_str = r"
texts = ['a', 'b']

[timing.variable_speed]
min_ms = 20.0
max_ms = 80.0
";
        let opts = Options::from_toml_str(toml_str).unwrap();
        let range = opts.timing.variable_speed.unwrap();
        assert_eq!(range.min_ms, 20.0);
        assert_eq!(range.max_ms, 80.0);
        assert_eq!(opts.texts.len(), 2);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml_str("texts = [1, ").unwrap_err();
        assert!(matches!(err, TextypeError::OptionsParse(_)));
    }

    #[test]
    fn save_then_load_and_list_presets() {
        let dir = std::env::temp_dir()
            .join(format!("textype-presets-{}", std::process::id()));
        let mut opts = Options::with_texts(["one"]);
        opts.style.text_colors = vec!["#ff0000".to_owned()];
        opts.save(&dir.join("hero.toml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let loaded = Options::load(&dir.join("hero.toml")).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(Options::list_presets(&dir), vec!["hero".to_owned()]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn loading_missing_file_is_io_error() {
        let err =
            Options::load(Path::new("/nonexistent/textype.toml")).unwrap_err();
        assert!(matches!(err, TextypeError::Io(_)));
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("texts"));
        assert!(props.contains_key("timing"));
        assert!(props.contains_key("behavior"));
        assert!(props.contains_key("cursor"));
        assert!(props.contains_key("style"));

        // `loop` keeps its serialized name
        let behavior = &props["behavior"]["properties"];
        assert!(behavior.get("loop").is_some());
        assert!(behavior.get("looping").is_none());

        // Class names are not exposed to the UI
        let cursor = &props["cursor"]["properties"];
        assert!(cursor.get("character").is_some());
        assert!(cursor.get("class_name").is_none());
    }

    #[test]
    fn bundled_presets_parse() {
        let heading = Options::from_toml_str(include_str!(
            "../../presets/section_heading.toml"
        ))
        .unwrap();
        assert_eq!(heading.style.tag, "h2");
        assert!(heading.behavior.start_on_visible);
        assert!(!heading.behavior.looping);

        let hero =
            Options::from_toml_str(include_str!("../../presets/hero.toml"))
                .unwrap();
        assert_eq!(hero.texts.len(), 3);
        assert!(hero.timing.variable_speed.is_some());
        assert_eq!(hero.style.color_for(4), Some("#29335c"));

        // Bundled presets load without speed corrections
        for opts in [&heading, &hero] {
            assert!(opts.timing.typing_speed_ms >= 1.0);
            assert!(opts.timing.deleting_speed_ms >= 1.0);
            assert!(opts.timing.pause_duration_ms >= 0.0);
        }
    }
}
