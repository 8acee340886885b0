use corpus_protocol::{Heading, LinkRef};
use once_cell::sync::Lazy;
use regex::Regex;

static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]*\]\(([^)]+)\)").expect("valid regex"));
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`[^`]*`").expect("valid regex"));
static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.*)$").expect("valid regex"));
static BARE_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s)(\.\.?/[A-Za-z0-9_./-]+\.md)").expect("valid regex"));

/// Placeholder targets used by document templates; never real links.
const PLACEHOLDERS: &[&str] = &["url", "link", "image-url"];

/// Extract ordered headings, skipping fenced code blocks.
#[must_use]
pub fn extract_headings(text: &str) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut in_fence = false;

    for line in text.lines() {
        if is_fence_delimiter(line) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some(caps) = HEADING.captures(line) {
            headings.push(Heading {
                level: caps[1].len() as u8,
                text: caps[2].trim().to_string(),
            });
        }
    }

    headings
}

/// Extract ordered link references with 1-based line numbers.
///
/// Markdown `[text](target)` links plus bare `./x.md` relative path tokens;
/// fenced blocks and inline code spans are skipped, template placeholder
/// targets are ignored, `#anchor` suffixes split off.
#[must_use]
pub fn extract_links(text: &str) -> Vec<LinkRef> {
    let mut links = Vec::new();
    let mut in_fence = false;

    for (idx, line) in text.lines().enumerate() {
        if is_fence_delimiter(line) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        let line = INLINE_CODE.replace_all(line, "");

        for caps in LINK.captures_iter(&line) {
            push_target(caps[1].trim(), idx + 1, &mut links);
        }
        for caps in BARE_PATH.captures_iter(&line) {
            // Markdown targets sit behind a paren, so the bare pattern
            // only sees paths outside link syntax.
            push_target(caps[1].trim(), idx + 1, &mut links);
        }
    }

    links
}

fn push_target(raw: &str, line: usize, links: &mut Vec<LinkRef>) {
    if raw.is_empty() || PLACEHOLDERS.contains(&raw) {
        return;
    }

    let (target, anchor) = match raw.split_once('#') {
        Some((path, anchor)) => (path.trim(), Some(anchor.trim().to_string())),
        None => (raw, None),
    };

    links.push(LinkRef {
        target: target.to_string(),
        anchor: anchor.filter(|a| !a.is_empty()),
        line,
    });
}

fn is_fence_delimiter(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_links_with_line_numbers() {
        let text = "intro\n[a](./a.md)\n\n[b](../up/b.md) and [c](docs/c.md)\n";
        let links = extract_links(text);
        assert_eq!(links.len(), 3);
        assert_eq!(links[0].target, "./a.md");
        assert_eq!(links[0].line, 2);
        assert_eq!(links[1].line, 4);
        assert_eq!(links[2].line, 4);
    }

    #[test]
    fn splits_anchor_suffix() {
        let links = extract_links("[s](./a.md#setup)\n[t](#local)\n");
        assert_eq!(links[0].target, "./a.md");
        assert_eq!(links[0].anchor.as_deref(), Some("setup"));
        assert_eq!(links[1].target, "");
        assert_eq!(links[1].anchor.as_deref(), Some("local"));
    }

    #[test]
    fn skips_fenced_and_inline_code() {
        let text = "```\n[x](./fenced.md)\n```\nuse `[y](./inline.md)` here\n[z](./real.md)\n";
        let links = extract_links(text);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].target, "./real.md");
    }

    #[test]
    fn ignores_template_placeholders() {
        let links = extract_links("[example](url) [img](image-url)\n");
        assert!(links.is_empty());
    }

    #[test]
    fn captures_bare_relative_paths() {
        let links = extract_links("see ./guides/setup.md for details\n");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].target, "./guides/setup.md");
    }

    #[test]
    fn bare_path_inside_markdown_link_is_not_doubled() {
        let links = extract_links("[setup](./guides/setup.md)\n");
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn extracts_headings_outside_fences() {
        let text = "# Title\n```\n# not a heading\n```\n## Level 2: Core\n";
        let headings = extract_headings(text);
        assert_eq!(
            headings,
            vec![
                Heading {
                    level: 1,
                    text: "Title".to_string()
                },
                Heading {
                    level: 2,
                    text: "Level 2: Core".to_string()
                },
            ]
        );
    }
}
