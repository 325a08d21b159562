/* src/server/injector/rust/src/token.rs */

use crate::ast::{Tag, TagKind, TagMatch};

pub(crate) const BUILD_ID_TOKEN: &str = "{{BUILDID}}";

const DIRECTIVES: &[(&str, TagKind)] = &[
  ("REACT", TagKind::React),
  ("SEO", TagKind::Seo),
  ("OG", TagKind::Og),
  ("LANG", TagKind::Lang),
];

/// Scan a wrapper document for placeholders in one left-to-right pass.
///
/// Matches never overlap and come back ordered by start offset: the cursor
/// always resumes after the end of the previous match. Anything that looks
/// like a placeholder but does not complete (no closing quote, no `/>` on the
/// same line, no `</title>`) is left as literal text.
pub fn scan(document: &str) -> Vec<TagMatch> {
  let mut matches = Vec::new();
  let mut pos = 0;

  while pos < document.len() {
    let Some(rel) = document[pos..].find(|c: char| c == '<' || c == '{') else {
      break;
    };
    let at = pos + rel;
    match match_at(document, at) {
      Some(m) => {
        pos = m.end();
        matches.push(m);
      }
      // '<' and '{' are single-byte, so at + 1 stays on a char boundary
      None => pos = at + 1,
    }
  }

  matches
}

fn match_at(document: &str, at: usize) -> Option<TagMatch> {
  let rest = &document[at..];
  if rest.starts_with(BUILD_ID_TOKEN) {
    return Some(TagMatch { tag: Tag::BuildId, start: at, len: BUILD_ID_TOKEN.len() });
  }
  let after_lt = rest.strip_prefix('<')?;

  for (name, kind) in DIRECTIVES {
    if let Some(tail) = after_lt.strip_prefix(*name)
      && tail.starts_with(|c: char| c.is_whitespace() || c == '"')
    {
      return match_directive(rest, 1 + name.len(), *kind).map(|(tag, len)| TagMatch {
        tag,
        start: at,
        len,
      });
    }
  }

  match_title(rest).map(|(tag, len)| TagMatch { tag, start: at, len })
}

/// `<NAME ... "value" ... />`, confined to a single line.
fn match_directive(rest: &str, name_end: usize, kind: TagKind) -> Option<(Tag, usize)> {
  let line_end = rest.find('\n').unwrap_or(rest.len());
  let line = &rest[..line_end];

  let open = name_end + line[name_end..].find('"')?;
  let close = open + 1 + line[open + 1..].find('"')?;
  let end = close + 1 + line[close + 1..].find("/>")? + 2;
  let value = line[open + 1..close].to_string();

  let tag = match kind {
    TagKind::React => Tag::React { name: value },
    TagKind::Seo => Tag::Seo { field: value },
    TagKind::Og => Tag::Og { field: value },
    TagKind::Lang => Tag::Lang { token: value },
    TagKind::Title | TagKind::BuildId => return None,
  };
  Some((tag, end))
}

/// `<title ...>text</title>`, tag name case-insensitive.
///
/// A title wrapping a single `SEO`/`OG` directive is claimed whole. Any other
/// markup inside leaves the element unclaimed, so nested placeholders are
/// scanned on their own.
fn match_title(rest: &str) -> Option<(Tag, usize)> {
  const OPEN: &str = "<title";
  const CLOSE: &str = "</title";

  if !starts_with_ci(rest, OPEN) {
    return None;
  }
  let after_name = &rest[OPEN.len()..];
  if !after_name.starts_with(|c: char| c == '>' || c.is_whitespace()) {
    return None;
  }

  let content_start = OPEN.len() + after_name.find('>')? + 1;
  let content_len = find_ci(&rest[content_start..], CLOSE)?;
  let content = &rest[content_start..content_start + content_len];
  let inner = if content.contains('<') {
    Some(Box::new(sole_head_directive(content)?))
  } else {
    None
  };

  let close_start = content_start + content_len;
  let end = close_start + rest[close_start..].find('>')? + 1;
  Some((Tag::Title { text: content.to_string(), inner }, end))
}

/// The `SEO`/`OG` directive making up all of `content`, surrounding
/// whitespace aside.
fn sole_head_directive(content: &str) -> Option<Tag> {
  let trimmed = content.trim();
  let m = match_at(trimmed, 0)?;
  let head = matches!(m.tag, Tag::Seo { .. } | Tag::Og { .. });
  (head && m.len == trimmed.len()).then_some(m.tag)
}

fn starts_with_ci(haystack: &str, needle: &str) -> bool {
  haystack.len() >= needle.len()
    && haystack.as_bytes()[..needle.len()].eq_ignore_ascii_case(needle.as_bytes())
}

fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
  haystack.as_bytes().windows(needle.len()).position(|w| w.eq_ignore_ascii_case(needle.as_bytes()))
}
