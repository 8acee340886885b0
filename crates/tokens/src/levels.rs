use once_cell::sync::Lazy;
use regex::Regex;

static LEVEL2_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mi)^#{1,6}[ \t]+level[ \t]*2\b").expect("valid regex"));
static LEVEL3_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mi)^#{1,6}[ \t]+level[ \t]*3\b").expect("valid regex"));

/// The three progressive-disclosure segments of a document.
///
/// `level2`/`level3` are `None` when the corresponding heading marker never
/// occurs; that is a structural finding, not an empty segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSplit<'a> {
    pub level1: &'a str,
    pub level2: Option<&'a str>,
    pub level3: Option<&'a str>,
}

/// Split `text` on the first case-insensitive `Level 2` / `Level 3` heading
/// markers. Text before the first marker is Level 1, text from a marker runs
/// to the next marker or end of input. The segments always cover the whole
/// input exactly once, whatever order the markers appear in.
#[must_use]
pub fn split_levels(text: &str) -> LevelSplit<'_> {
    let m2 = LEVEL2_MARKER.find(text).map(|m| m.start());
    let m3 = LEVEL3_MARKER.find(text).map(|m| m.start());

    let mut boundaries: Vec<usize> = m2.into_iter().chain(m3).collect();
    boundaries.sort_unstable();

    let first = boundaries.first().copied().unwrap_or(text.len());
    let end_of = |start: usize| {
        boundaries
            .iter()
            .copied()
            .find(|&b| b > start)
            .unwrap_or(text.len())
    };

    LevelSplit {
        level1: &text[..first],
        level2: m2.map(|s| &text[s..end_of(s)]),
        level3: m3.map(|s| &text[s..end_of(s)]),
    }
}
