use corpus_protocol::CorpusSnapshot;

/// Resolve an internal link target to a corpus path.
///
/// `source` is the linking document's corpus path; `target` is the raw link
/// target with any anchor already stripped. Resolution is purely lexical
/// against the snapshot, the filesystem is never consulted:
///
/// - relative targets resolve against the source document's directory;
/// - a leading `/` means corpus-root relative;
/// - a target without an extension also tries an implicit `.md`;
/// - a target naming a directory resolves to its `README.md`;
/// - a target escaping the corpus root does not resolve (flagged upstream
///   as a broken link).
#[must_use]
pub fn resolve_target(source: &str, target: &str, snapshot: &CorpusSnapshot) -> Option<String> {
    let target = target.trim();
    if target.is_empty() {
        return None;
    }

    let joined = if let Some(rooted) = target.strip_prefix('/') {
        normalize(rooted)?
    } else {
        let base = source.rsplit_once('/').map_or("", |(dir, _)| dir);
        if base.is_empty() {
            normalize(target)?
        } else {
            normalize(&format!("{base}/{target}"))?
        }
    };

    if snapshot.contains_path(&joined) {
        return Some(joined);
    }

    // Implicit .md extension, only when the last segment has none.
    let last = joined.rsplit('/').next().unwrap_or(&joined);
    if !last.contains('.') {
        let with_md = format!("{joined}.md");
        if snapshot.contains_path(&with_md) {
            return Some(with_md);
        }
    }

    // Directory landing page.
    let readme = format!("{joined}/README.md");
    if snapshot.contains_path(&readme) {
        return Some(readme);
    }

    None
}

/// Lexically normalize `.` and `..` segments. `None` when `..` would climb
/// above the corpus root.
fn normalize(path: &str) -> Option<String> {
    let mut stack: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                stack.pop()?;
            }
            other => stack.push(other),
        }
    }
    if stack.is_empty() {
        None
    } else {
        Some(stack.join("/"))
    }
}
