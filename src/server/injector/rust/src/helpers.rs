/* src/server/injector/rust/src/helpers.rs */

pub(crate) fn escape_html(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for ch in s.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#x27;"),
      c => out.push(c),
    }
  }
  out
}

/// Path component of a request URL with query and fragment dropped.
pub(crate) fn request_path(url: &str) -> &str {
  let end = url.find(&['?', '#'][..]).unwrap_or(url.len());
  &url[..end]
}

/// Request path plus a trailing slash, with the first `//` collapsed.
/// `/about` -> `/about/`, `/` -> `/`, `` -> `/`.
pub(crate) fn normalize_current_path(url: &str) -> String {
  format!("{}/", request_path(url)).replacen("//", "/", 1)
}

/// Collapse runs of `/` in the path part of a URL, leaving the `scheme://`
/// separator alone.
pub(crate) fn collapse_slashes(url: &str) -> String {
  let (prefix, rest) = match url.find("://") {
    Some(idx) => url.split_at(idx + 3),
    None => ("", url),
  };
  let mut out = String::with_capacity(url.len());
  out.push_str(prefix);
  let mut prev_slash = false;
  for ch in rest.chars() {
    if ch == '/' && prev_slash {
      continue;
    }
    prev_slash = ch == '/';
    out.push(ch);
  }
  out
}
