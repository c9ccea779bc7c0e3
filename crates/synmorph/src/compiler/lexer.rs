//! A small tokenizer for the curly-brace scripting language subset the
//! frontend accepts: class/method/property declarations, decorators,
//! variable statements and namespaces (§8's test scenarios exercise all of
//! these). Trivia (whitespace) is not tokenized — it is recovered by the
//! parser from the gap between consecutive tokens' offsets.

use crate::syntax_kind::SyntaxKind;

#[derive(Clone, Copy, Debug)]
pub(crate) struct Token {
    pub kind: SyntaxKind,
    pub start: u32,
    pub end: u32,
}

const KEYWORDS: &[(&str, SyntaxKind)] = &[
    ("export", SyntaxKind::ExportKeyword),
    ("class", SyntaxKind::ClassKeyword),
    ("const", SyntaxKind::ConstKeyword),
    ("let", SyntaxKind::LetKeyword),
    ("var", SyntaxKind::VarKeyword),
    ("namespace", SyntaxKind::NamespaceKeyword),
];

pub(crate) fn tokenize(text: &str) -> Vec<Token> {
    let bytes = text.as_bytes();
    let len = bytes.len();
    let mut pos = 0usize;
    let mut tokens = Vec::new();

    while pos < len {
        let ch = bytes[pos];

        if ch.is_ascii_whitespace() {
            pos += 1;
            continue;
        }

        if ch == b'/' && pos + 1 < len && bytes[pos + 1] == b'/' {
            while pos < len && bytes[pos] != b'\n' {
                pos += 1;
            }
            continue;
        }

        let start = pos;

        if ch.is_ascii_alphabetic() || ch == b'_' || ch == b'$' {
            while pos < len && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_' || bytes[pos] == b'$') {
                pos += 1;
            }
            let word = &text[start..pos];
            let kind = KEYWORDS
                .iter()
                .find(|(kw, _)| *kw == word)
                .map_or(SyntaxKind::Identifier, |(_, kind)| *kind);
            tokens.push(Token { kind, start: start as u32, end: pos as u32 });
            continue;
        }

        if ch.is_ascii_digit() {
            while pos < len && (bytes[pos].is_ascii_digit() || bytes[pos] == b'.') {
                pos += 1;
            }
            tokens.push(Token {
                kind: SyntaxKind::NumericLiteral,
                start: start as u32,
                end: pos as u32,
            });
            continue;
        }

        if ch == b'"' || ch == b'\'' {
            let quote = ch;
            pos += 1;
            while pos < len && bytes[pos] != quote {
                pos += 1;
            }
            if pos < len {
                pos += 1; // closing quote
            }
            tokens.push(Token {
                kind: SyntaxKind::StringLiteral,
                start: start as u32,
                end: pos as u32,
            });
            continue;
        }

        let single = match ch {
            b'@' => Some(SyntaxKind::AtToken),
            b'(' => Some(SyntaxKind::OpenParenToken),
            b')' => Some(SyntaxKind::CloseParenToken),
            b'{' => Some(SyntaxKind::OpenBraceToken),
            b'}' => Some(SyntaxKind::CloseBraceToken),
            b',' => Some(SyntaxKind::CommaToken),
            b'=' => Some(SyntaxKind::EqualsToken),
            b';' => Some(SyntaxKind::SemicolonToken),
            _ => None,
        };

        if let Some(kind) = single {
            pos += 1;
            tokens.push(Token { kind, start: start as u32, end: pos as u32 });
            continue;
        }

        // Unrecognized byte: skip it rather than failing the whole parse.
        // A production frontend would emit a diagnostic here; this is out
        // of scope (§1 — the frontend is an opaque external dependency).
        pos += 1;
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_class_decl() {
        let tokens = tokenize("class A {}");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::ClassKeyword,
                SyntaxKind::Identifier,
                SyntaxKind::OpenBraceToken,
                SyntaxKind::CloseBraceToken,
            ]
        );
    }

    #[test]
    fn skips_line_comments() {
        let tokens = tokenize("// hi\nclass A {}");
        assert_eq!(tokens[0].kind, SyntaxKind::ClassKeyword);
    }
}
