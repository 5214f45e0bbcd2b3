use unicode_segmentation::UnicodeSegmentation;

/// A first or last name as typed into the newsletter form.
///
/// Must be built with `SubscriberName::parse`: non-blank, at most 256
/// graphemes, none of `/()"<>\{}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberName(String);

const FORBIDDEN_CHARACTERS: [char; 9] = ['/', '(', ')', '"', '<', '>', '\\', '{', '}'];

impl SubscriberName {
    pub fn parse(s: String) -> Result<Self, String> {
        let is_empty_or_whitespace = s.trim().is_empty();
        let is_too_long = s.graphemes(true).count() > 256;
        let contains_forbidden_characters = s.chars().any(|c| FORBIDDEN_CHARACTERS.contains(&c));

        if is_empty_or_whitespace || is_too_long || contains_forbidden_characters {
            Err(format!("{s} is not a valid subscriber name."))
        } else {
            Ok(Self(s))
        }
    }

    /// Blank input means the field was left out of the form.
    pub fn parse_optional(s: Option<String>) -> Result<Option<Self>, String> {
        match s {
            Some(s) if !s.trim().is_empty() => Self::parse(s.trim().to_string()).map(Some),
            _ => Ok(None),
        }
    }
}

impl AsRef<str> for SubscriberName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
