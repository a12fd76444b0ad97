//! Open categorization tags for elements.

use core::fmt;
use std::borrow::Cow;

/// Caller-defined category attached to an element for filtering and UI.
///
/// Tags are opaque to the library: they never influence aggregation. The
/// well-known tags cover the usual modifier sources; anything else can be
/// minted with [`Tag::new`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tag(Cow<'static, str>);

impl Tag {
    /// Innate, always-on modifiers (base walk speed).
    pub const BASIC: Self = Self(Cow::Borrowed("basic"));

    /// Modifiers imposed by terrain or surroundings (mud, ice, wind).
    pub const ENVIRONMENTAL: Self = Self(Cow::Borrowed("environmental"));

    /// Modifiers granted or inflicted by temporary effects.
    pub const BUFF: Self = Self(Cow::Borrowed("buff"));

    /// Create a tag from any string-ish source.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// The tag's name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Tag {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_known_and_custom_tags_compare_by_name() {
        assert_eq!(Tag::BASIC, Tag::new("basic"));
        assert_ne!(Tag::BUFF, Tag::ENVIRONMENTAL);
        assert_eq!(Tag::new(String::from("stun")), Tag::from("stun"));
    }

    #[test]
    fn display_is_the_bare_name() {
        assert_eq!(Tag::ENVIRONMENTAL.to_string(), "environmental");
    }
}
