//! Unified diff text parser.
//!
//! Input is split into per-file sections on `diff --git` header lines.
//! Sections whose header does not carry an `a/<old> b/<new>` pair are
//! dropped without error, so callers detect them by absence.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{DiffFile, DiffHunk, DiffLine};

const SECTION_MARKER: &str = "diff --git ";

static FILE_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"a/(.+?) b/(.+)$").unwrap());
static HUNK_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@").unwrap());

/// Parse raw (possibly multi-file) unified diff text.
///
/// Never fails: malformed sections yield fewer files.
pub fn parse_diff(text: &str) -> Vec<DiffFile> {
    let sections = split_sections(text);
    let total = sections.len();

    let files: Vec<DiffFile> = sections.into_iter().filter_map(parse_section).collect();

    if files.len() < total {
        tracing::debug!(
            sections = total,
            parsed = files.len(),
            "dropped diff sections without a usable header"
        );
    }
    files
}

/// Split into sections, each starting at a `diff --git` line.
///
/// Text before the first marker is not a section.
fn split_sections(text: &str) -> Vec<&str> {
    let mut starts = Vec::new();
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.starts_with(SECTION_MARKER) {
            starts.push(offset);
        }
        offset += line.len();
    }

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            &text[start..end]
        })
        .collect()
}

fn parse_section(section: &str) -> Option<DiffFile> {
    let mut lines = section.lines();
    let header = lines.next()?.trim_end_matches('\r');
    let filename = FILE_HEADER.captures(header)?.get(2)?.as_str().to_string();

    let mut hunks: Vec<DiffHunk> = Vec::new();
    let mut current: Option<DiffHunk> = None;
    let mut old_line = 0u32;
    let mut new_line = 0u32;

    for raw in lines {
        let line = raw.trim_end_matches('\r');

        if let Some(hunk) = parse_hunk_header(line) {
            if let Some(done) = current.take() {
                hunks.push(done);
            }
            old_line = hunk.old_start;
            new_line = hunk.new_start;
            current = Some(hunk);
            continue;
        }

        // File headers (`---`/`+++`, `index`, mode lines) precede the first
        // hunk, so everything outside a hunk is ignored.
        let Some(hunk) = current.as_mut() else {
            continue;
        };

        match line.as_bytes().first() {
            Some(b' ') => {
                hunk.lines.push(DiffLine::context(&line[1..], old_line, new_line));
                old_line = old_line.saturating_add(1);
                new_line = new_line.saturating_add(1);
            }
            Some(b'+') => {
                hunk.lines.push(DiffLine::added(&line[1..], new_line));
                new_line = new_line.saturating_add(1);
            }
            Some(b'-') => {
                hunk.lines.push(DiffLine::removed(&line[1..], old_line));
                old_line = old_line.saturating_add(1);
            }
            // "\ No newline at end of file" and stray text
            _ => {}
        }
    }

    if let Some(done) = current {
        hunks.push(done);
    }

    Some(DiffFile {
        filename,
        raw: section.to_string(),
        hunks,
    })
}

fn parse_hunk_header(line: &str) -> Option<DiffHunk> {
    let caps = HUNK_HEADER.captures(line)?;
    let number = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());

    let old_start = number(1)?;
    let new_start = number(3)?;
    Some(DiffHunk::new(
        old_start,
        number(2).unwrap_or(1),
        new_start,
        number(4).unwrap_or(1),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffLineKind;

    const TWO_FILES: &str = "\
diff --git a/src/Form.tsx b/src/Form.tsx
index 1111111..2222222 100644
--- a/src/Form.tsx
+++ b/src/Form.tsx
@@ -3,3 +3,3 @@ export function Form() {
   return (
-    <button data-test-id=\"old\">Go</button>
+    <button data-test-id=\"new\">Go</button>
   );
diff --git a/src/util.ts b/src/util.ts
--- a/src/util.ts
+++ b/src/util.ts
@@ -1 +1,2 @@
 export const a = 1;
+export const b = 2;
";

    #[test]
    fn test_parse_two_files() {
        let files = parse_diff(TWO_FILES);
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].filename, "src/Form.tsx");
        assert_eq!(files[1].filename, "src/util.ts");
        assert!(files[0].raw.starts_with("diff --git a/src/Form.tsx"));
        assert!(!files[0].raw.contains("src/util.ts"));
    }

    #[test]
    fn test_line_numbering() {
        let files = parse_diff(TWO_FILES);
        let hunk = &files[0].hunks[0];
        assert_eq!((hunk.old_start, hunk.old_count), (3, 3));
        assert_eq!((hunk.new_start, hunk.new_count), (3, 3));

        let kinds: Vec<_> = hunk.lines.iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DiffLineKind::Context,
                DiffLineKind::Removed,
                DiffLineKind::Added,
                DiffLineKind::Context,
            ]
        );

        assert_eq!(hunk.lines[0].old_line, Some(3));
        assert_eq!(hunk.lines[0].new_line, Some(3));
        assert_eq!(hunk.lines[1].old_line, Some(4));
        assert_eq!(hunk.lines[1].new_line, None);
        assert_eq!(hunk.lines[2].old_line, None);
        assert_eq!(hunk.lines[2].new_line, Some(4));
        assert_eq!(hunk.lines[3].old_line, Some(5));
        assert_eq!(hunk.lines[3].new_line, Some(5));
        assert_eq!(hunk.lines[2].content, "    <button data-test-id=\"new\">Go</button>");
    }

    #[test]
    fn test_omitted_counts_default_to_one() {
        let files = parse_diff(TWO_FILES);
        let hunk = &files[1].hunks[0];
        assert_eq!((hunk.old_start, hunk.old_count), (1, 1));
        assert_eq!((hunk.new_start, hunk.new_count), (1, 2));
        assert_eq!(hunk.lines[1].new_line, Some(2));
    }

    #[test]
    fn test_file_headers_not_recorded() {
        let files = parse_diff(TWO_FILES);
        let contents: Vec<_> = files[0]
            .hunks
            .iter()
            .flat_map(|h| h.lines.iter())
            .map(|l| l.content.as_str())
            .collect();
        assert!(contents.iter().all(|c| !c.contains("src/Form.tsx")));
    }

    #[test]
    fn test_malformed_header_dropped() {
        let text = "\
diff --git nonsense
@@ -1 +1 @@
-a
+b
diff --git a/ok.js b/ok.js
@@ -1 +1 @@
-a
+b
";
        let files = parse_diff(text);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].filename, "ok.js");
    }

    #[test]
    fn test_preamble_ignored() {
        let text = "commit abc\nAuthor: someone\n\ndiff --git a/x.js b/y.js\n@@ -1 +1 @@\n-a\n+b\n";
        let files = parse_diff(text);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].filename, "y.js");
    }

    #[test]
    fn test_garbage_yields_nothing() {
        assert!(parse_diff("").is_empty());
        assert!(parse_diff("not a diff at all\n+++\n---\n").is_empty());
    }

    #[test]
    fn test_multiple_hunks_in_order() {
        let text = "\
diff --git a/a.js b/a.js
@@ -1,2 +1,2 @@
-x
+y
 z
@@ -10,1 +10,2 @@
 q
+r
\\ No newline at end of file
";
        let files = parse_diff(text);
        let hunks = &files[0].hunks;
        assert_eq!(hunks.len(), 2);
        assert_eq!(hunks[0].new_start, 1);
        assert_eq!(hunks[1].new_start, 10);
        assert_eq!(hunks[1].lines.len(), 2);
        assert_eq!(hunks[1].lines[1].new_line, Some(11));
    }

    #[test]
    fn test_added_line_starting_with_plus_plus() {
        let text = "diff --git a/a.js b/a.js\n@@ -1 +1,2 @@\n i = 0;\n+++i;\n";
        let files = parse_diff(text);
        let line = &files[0].hunks[0].lines[1];
        assert_eq!(line.kind, DiffLineKind::Added);
        assert_eq!(line.content, "++i;");
    }

    #[test]
    fn test_crlf_input() {
        let text = "diff --git a/a.js b/a.js\r\n@@ -1 +1 @@\r\n-a\r\n+b\r\n";
        let files = parse_diff(text);
        assert_eq!(files[0].filename, "a.js");
        assert_eq!(files[0].hunks[0].lines[1].content, "b");
    }
}
