use anyhow::{Context, Result};

use crate::deck::DeckMeta;

/// Split optional YAML frontmatter from the body of a deck file.
///
/// Frontmatter must open on the very first line with `---` and close with the next
/// `---` line. Anything else is treated as body.
pub fn extract(content: &str) -> Result<(DeckMeta, String)> {
    let content = content.replace("\r\n", "\n");
    let mut lines = content.split('\n');

    if lines.next().map(str::trim) != Some("---") {
        return Ok((DeckMeta::default(), content));
    }

    let mut yaml = Vec::new();
    let mut closed = false;
    for line in lines.by_ref() {
        if line.trim() == "---" {
            closed = true;
            break;
        }
        yaml.push(line);
    }

    if !closed {
        // A lone leading separator is not frontmatter.
        return Ok((DeckMeta::default(), content));
    }

    let yaml = yaml.join("\n");
    let meta: DeckMeta = if yaml.trim().is_empty() {
        DeckMeta::default()
    } else {
        serde_yaml::from_str(&yaml).context("Invalid frontmatter")?
    };
    let body = lines.collect::<Vec<_>>().join("\n");
    Ok((meta, body))
}
