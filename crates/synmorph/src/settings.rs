//! Manipulation settings: the small amount of configuration the edit
//! planner and positional utilities consult when synthesizing new text.

/// New line kind inserted at edit boundaries by the planner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NewLineKind {
    #[default]
    LineFeed,
    CarriageReturnLineFeed,
}

impl NewLineKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LineFeed => "\n",
            Self::CarriageReturnLineFeed => "\r\n",
        }
    }

    /// Detect the predominant newline style already used by a piece of text,
    /// falling back to `LineFeed` when the text has no line breaks.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            Self::CarriageReturnLineFeed
        } else {
            Self::LineFeed
        }
    }
}

/// Manipulation settings threaded through a `GlobalContainer`.
///
/// These are the only knobs the core consults when synthesizing text for an
/// edit; formatting/style policy beyond this is out of scope (§1).
#[derive(Clone, Debug)]
pub struct ManipulationSettings {
    pub new_line_kind: NewLineKind,
    /// One level of indentation, e.g. four spaces or a tab.
    pub indentation_text: String,
}

impl Default for ManipulationSettings {
    fn default() -> Self {
        Self {
            new_line_kind: NewLineKind::default(),
            indentation_text: "    ".to_string(),
        }
    }
}

impl ManipulationSettings {
    #[must_use]
    pub fn new(new_line_kind: NewLineKind, indentation_text: impl Into<String>) -> Self {
        Self {
            new_line_kind,
            indentation_text: indentation_text.into(),
        }
    }

    #[must_use]
    pub fn get_new_line_text(&self) -> &'static str {
        self.new_line_kind.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_crlf_when_present() {
        assert_eq!(NewLineKind::detect("a\r\nb"), NewLineKind::CarriageReturnLineFeed);
        assert_eq!(NewLineKind::detect("a\nb"), NewLineKind::LineFeed);
        assert_eq!(NewLineKind::detect("a"), NewLineKind::LineFeed);
    }

    #[test]
    fn default_indentation_is_four_spaces() {
        assert_eq!(ManipulationSettings::default().indentation_text, "    ");
    }
}
