/* src/server/injector/rust/src/ast.rs */

/// A recognized placeholder, carrying only the fields its kind needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
  /// `<REACT "name" />`. `body` means the rendered page body.
  React { name: String },
  /// `<SEO "field" />`
  Seo { field: String },
  /// `<OG "field" />`
  Og { field: String },
  /// A literal `<title>...</title>` element. `inner` is set when the
  /// element wraps exactly one `SEO`/`OG` directive.
  Title { text: String, inner: Option<Box<Tag>> },
  /// `{{BUILDID}}`
  BuildId,
  /// `<LANG "token" />`
  Lang { token: String },
}

impl Tag {
  pub fn kind(&self) -> TagKind {
    match self {
      Self::React { .. } => TagKind::React,
      Self::Seo { .. } => TagKind::Seo,
      Self::Og { .. } => TagKind::Og,
      Self::Title { .. } => TagKind::Title,
      Self::BuildId => TagKind::BuildId,
      Self::Lang { .. } => TagKind::Lang,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
  React,
  Seo,
  Og,
  Title,
  BuildId,
  Lang,
}

impl TagKind {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::React => "REACT",
      Self::Seo => "SEO",
      Self::Og => "OG",
      Self::Title => "TITLE",
      Self::BuildId => "BUILDID",
      Self::Lang => "LANG",
    }
  }
}

/// One scan result. Byte offsets index into the scanned document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMatch {
  pub tag: Tag,
  pub start: usize,
  pub len: usize,
}

impl TagMatch {
  pub fn end(&self) -> usize {
    self.start + self.len
  }

  /// The exact source text this match covers.
  pub fn source<'a>(&self, document: &'a str) -> &'a str {
    &document[self.start..self.end()]
  }
}
