/// Split a deck body (after frontmatter extraction) into raw slide strings.
///
/// Three mechanisms create slide breaks:
/// 1. `---` with blank lines on both sides
/// 2. Three or more consecutive blank lines
/// 3. A `# ` heading when the current slide already has content
pub fn split(body: &str) -> Vec<String> {
    let body = body.replace("\r\n", "\n");
    let lines: Vec<&str> = body.split('\n').collect();

    let mut chunks: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut blank_run = 0;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim();

        if is_dash_separator(trimmed) {
            let prev_blank = current.last().is_none_or(|l| l.trim().is_empty());
            let next_blank = lines.get(i + 1).is_none_or(|l| l.trim().is_empty());
            if prev_blank && next_blank {
                flush(&mut current, &mut chunks);
                blank_run = 0;
                i += 1;
                continue;
            }
        }

        if trimmed.is_empty() {
            blank_run += 1;
            if blank_run == 3 {
                flush(&mut current, &mut chunks);
            }
        } else {
            blank_run = 0;
        }
        current.push(line);
        i += 1;
    }
    flush(&mut current, &mut chunks);

    let mut slides = Vec::new();
    for chunk in chunks {
        split_by_heading_inference(&chunk, &mut slides);
    }
    slides
}

fn flush(current: &mut Vec<&str>, chunks: &mut Vec<String>) {
    let chunk = current.join("\n").trim().to_string();
    if !chunk.is_empty() {
        chunks.push(chunk);
    }
    current.clear();
}

/// Start a new slide at every `# ` heading that follows content.
/// Directives directly above such a heading travel with it.
fn split_by_heading_inference(chunk: &str, slides: &mut Vec<String>) {
    let mut current = String::new();
    let mut has_content = false;
    let mut in_code_fence = false;

    for line in chunk.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_code_fence = !in_code_fence;
        }

        if !in_code_fence && line.starts_with("# ") && has_content {
            let (content_part, trailing_directives) = strip_trailing_directives(current.trim());
            if !content_part.is_empty() {
                slides.push(content_part);
            }
            current = trailing_directives;
            if !current.is_empty() {
                current.push('\n');
            }
            has_content = false;
        }

        if !current.is_empty() && !current.ends_with('\n') {
            current.push('\n');
        }
        current.push_str(line);

        if !trimmed.is_empty() && !is_directive(trimmed) {
            has_content = true;
        }
    }

    let slide_text = current.trim().to_string();
    if !slide_text.is_empty() {
        slides.push(slide_text);
    }
}

/// Returns `(content, directives)` where `directives` holds the `@key: value` lines
/// found at the very end of `text`.
fn strip_trailing_directives(text: &str) -> (String, String) {
    let lines: Vec<&str> = text.lines().collect();

    let mut split_at = lines.len();
    for (i, line) in lines.iter().enumerate().rev() {
        let trimmed = line.trim();
        if trimmed.is_empty() || is_directive(trimmed) {
            split_at = i;
        } else {
            break;
        }
    }

    let content = lines[..split_at].join("\n").trim().to_string();
    let directives = lines[split_at..]
        .iter()
        .filter(|l| !l.trim().is_empty())
        .copied()
        .collect::<Vec<&str>>()
        .join("\n");
    (content, directives)
}

fn is_dash_separator(line: &str) -> bool {
    line.len() >= 3 && line.chars().all(|c| c == '-')
}

pub(crate) fn is_directive(line: &str) -> bool {
    let Some(rest) = line.strip_prefix('@') else {
        return false;
    };
    match rest.find(':') {
        Some(colon) => {
            colon > 0
                && rest[..colon]
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_separator() {
        let slides = split("# One\n\n---\n\n# Two");
        assert_eq!(slides, vec!["# One", "# Two"]);
    }

    #[test]
    fn test_blank_line_split() {
        let slides = split("Slide one\n\n\n\nSlide two");
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[1], "Slide two");
    }

    #[test]
    fn test_dash_without_blank_lines_is_content() {
        let slides = split("Text\n---\nMore");
        assert_eq!(slides.len(), 1);
    }

    #[test]
    fn test_heading_inference_carries_directives() {
        let body = "@bg: #111111\n# First\n![a](a.png)\n\n@bg: #222222\n# Second\n![b](b.png)";
        let slides = split(body);
        assert_eq!(slides.len(), 2);
        assert!(slides[0].starts_with("@bg: #111111"));
        assert!(!slides[0].contains("#222222"));
        assert!(slides[1].starts_with("@bg: #222222\n# Second"));
    }

    #[test]
    fn test_first_heading_does_not_split() {
        let slides = split("@bg: #000\n# Only\n\nContent");
        assert_eq!(slides.len(), 1);
    }

    #[test]
    fn test_heading_in_code_block_no_split() {
        let slides = split("# Title\n\n```sh\n# comment\n```");
        assert_eq!(slides.len(), 1);
    }

    #[test]
    fn test_combined_separators_make_one_break() {
        let slides = split("Slide one\n\n\n\n---\n\n\n\nSlide two");
        assert_eq!(slides.len(), 2);
    }

    #[test]
    fn test_is_directive() {
        assert!(is_directive("@bg: #fff"));
        assert!(!is_directive("@: nope"));
        assert!(!is_directive("@bg #fff"));
        assert!(!is_directive("bg: #fff"));
    }
}
