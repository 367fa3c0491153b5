//! Selection and loading of the puzzle layout.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use phrase_push_core::Layout;

use crate::layout_code;

/// Layout played when neither a file nor a code is supplied.
const DEFAULT_LAYOUT: &str = include_str!("../puzzles/contact.toml");

/// Resolves the layout from a TOML file, a share code, or the built-in puzzle.
pub(crate) fn load(path: Option<&Path>, code: Option<&str>) -> Result<Layout> {
    let layout = match (path, code) {
        (Some(path), _) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read layout at {}", path.display()))?;
            parse_layout(&contents)
                .with_context(|| format!("invalid layout file {}", path.display()))?
        }
        (None, Some(code)) => layout_code::decode(code).context("failed to decode layout code")?,
        (None, None) => parse_layout(DEFAULT_LAYOUT).context("built-in layout is malformed")?,
    };

    layout.validate().context("puzzle layout is invalid")?;
    Ok(layout)
}

fn parse_layout(contents: &str) -> Result<Layout> {
    toml::from_str(contents).context("failed to parse layout toml contents")
}

#[cfg(test)]
mod tests {
    use super::*;
    use phrase_push_core::DEFAULT_PUSH_LIMIT;

    #[test]
    fn built_in_layout_is_the_contact_card() {
        let layout = load(None, None).expect("built-in layout loads");
        assert_eq!(layout.side, 10);
        assert_eq!(layout.player, 33);
        assert_eq!(layout.phrase, "toemah@protonmail.com");
        assert_eq!(layout.push_limit, DEFAULT_PUSH_LIMIT);
        let fragments: String = layout
            .blocks
            .iter()
            .map(|block| block.fragment.as_str())
            .collect();
        assert_eq!(fragments, "toemah@protonmail.com");
    }

    #[test]
    fn layout_toml_defaults_optional_fields() {
        let layout = parse_layout(
            r#"
            side = 4
            player = 0
            phrase = "ab"
            "#,
        )
        .expect("layout parses");
        assert_eq!(layout.push_limit, DEFAULT_PUSH_LIMIT);
        assert!(layout.blocks.is_empty());
    }

    #[test]
    fn layout_toml_requires_a_phrase() {
        let error = parse_layout("side = 4\nplayer = 0\n").expect_err("phrase required");
        assert!(error.to_string().contains("failed to parse layout toml"));
    }

    #[test]
    fn share_code_round_trips_through_loader() {
        let original = load(None, None).expect("built-in layout loads");
        let code = layout_code::encode(&original).expect("layout encodes");
        assert_eq!(load(None, Some(&code)).expect("code loads"), original);
    }

    #[test]
    fn invalid_layout_is_rejected_after_parsing() {
        let original = load(None, None).expect("built-in layout loads");
        let broken = Layout {
            player: 12,
            ..original
        };
        let code = layout_code::encode(&broken).expect("layout encodes");
        let error = load(None, Some(&code)).expect_err("invalid layout rejected");
        assert_eq!(error.to_string(), "puzzle layout is invalid");
    }

    #[test]
    fn missing_file_reports_path() {
        let error = load(Some(Path::new("/nonexistent/puzzle.toml")), None)
            .expect_err("missing file rejected");
        assert!(error.to_string().contains("/nonexistent/puzzle.toml"));
    }
}
