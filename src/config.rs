//! Generator settings: JSON file, then CLI flags on top.
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::naming::NameStyle;

/// How counted sequences are marshalled between Go slices and C arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArrayMarshal {
    /// `ToC` / `NewXFromC` per element.
    #[default]
    ElementWise,
    /// One `memcpy` behind the layout-size guard.
    RawCopy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub package: String,
    /// Native prefix stripped from every name.
    pub prefix: String,
    /// Lines placed in the cgo comment above `import "C"`.
    pub cgo_preamble: Vec<String>,
    pub name_style: NameStyle,
    pub array_marshal: ArrayMarshal,
    pub types_file_name: String,
    pub functions_file_name: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            package: "sfml".to_string(),
            prefix: "sf".to_string(),
            cgo_preamble: [
                "#cgo LDFLAGS: -lcsfml-graphics -lcsfml-window -lcsfml-system -lcsfml-audio",
                "#include <stdlib.h>",
                "#include <string.h>",
                "#include <SFML/Audio.h>",
                "#include <SFML/Graphics.h>",
                "#include <SFML/System.h>",
                "#include <SFML/Window.h>",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            name_style: NameStyle::Verbatim,
            array_marshal: ArrayMarshal::ElementWise,
            types_file_name: "go_types.go".to_string(),
            functions_file_name: "go_functions.go".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Defaults when `path` is `None`; missing keys in the file keep their
    /// defaults too.
    pub fn load(path: Option<&Path>) -> Result<Self, LoadError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let bytes = std::fs::read(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
        crate::path_de::from_slice_with_path(&bytes, "config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: GeneratorConfig =
            crate::path_de::from_str_with_path(r#"{"package": "gfx", "array_marshal": "raw-copy"}"#, "config").unwrap();
        assert_eq!(config.package, "gfx");
        assert_eq!(config.array_marshal, ArrayMarshal::RawCopy);
        assert_eq!(config.prefix, "sf");
        assert_eq!(config.name_style, NameStyle::Verbatim);
    }

    #[test]
    fn unknown_keys_are_rejected_with_a_path() {
        let err = crate::path_de::from_str_with_path::<GeneratorConfig>(r#"{"pakage": "gfx"}"#, "config").unwrap_err();
        assert!(err.to_string().contains("pakage"), "{err}");
    }
}
