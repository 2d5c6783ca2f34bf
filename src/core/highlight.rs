//! Cosmetic line tokenizer for "source" documents
//!
//! This is not a parser. Each line is classified on its own with a handful of
//! rules that are good enough to color Kotlin-looking text.

use once_cell::sync::Lazy;
use regex::Regex;

static NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());
static TYPE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][a-zA-Z0-9]*$").unwrap());

const KEYWORDS: &[&str] = &[
    "class", "object", "interface", "fun", "val", "var", "if", "else", "when", "for", "while",
    "return", "package", "import", "data", "sealed", "enum", "companion", "const", "private",
    "public", "internal", "protected", "override", "open", "abstract", "final", "suspend",
];

const PUNCTUATION: &[char] = &['{', '}', '(', ')', '[', ']', ';', ',', '.'];

/// Color class of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Comment,
    Keyword,
    String,
    Number,
    Type,
    Punctuation,
    Whitespace,
    Plain,
}

/// A classified slice of a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Split one line into colored tokens.
///
/// Concatenating the returned texts yields `line` again.
pub fn tokenize_line(line: &str) -> Vec<Token> {
    if line.is_empty() {
        return Vec::new();
    }

    let trimmed = line.trim_start();
    if trimmed.starts_with("//") || trimmed.starts_with('*') || trimmed.starts_with("/**") {
        return vec![Token::new(TokenKind::Comment, line)];
    }

    if line.contains("package ") || line.contains("import ") {
        return tokenize_declaration(line);
    }

    tokenize_code(line)
}

/// Tokenize a whole document, one vector per line
pub fn tokenize(body: &str) -> Vec<Vec<Token>> {
    body.lines().map(tokenize_line).collect()
}

fn tokenize_declaration(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    for (i, part) in line.split(' ').enumerate() {
        if i > 0 {
            tokens.push(Token::new(TokenKind::Whitespace, " "));
        }
        if part.is_empty() {
            continue;
        }
        let kind = if part == "package" || part == "import" {
            TokenKind::Keyword
        } else {
            TokenKind::Plain
        };
        tokens.push(Token::new(kind, part));
    }
    tokens
}

/// Split a non-comment line into tokens.
///
/// A double-quoted run is one `String` token, spaces and punctuation included,
/// up to the closing quote or the end of the line. A quote inside a word stays
/// part of that word.
fn tokenize_code(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word = String::new();
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            flush_word(&mut word, &mut tokens);
            let mut run = String::from(c);
            while let Some(&next) = chars.peek() {
                if !next.is_whitespace() {
                    break;
                }
                run.push(next);
                chars.next();
            }
            tokens.push(Token::new(TokenKind::Whitespace, run));
        } else if PUNCTUATION.contains(&c) {
            flush_word(&mut word, &mut tokens);
            tokens.push(Token::new(TokenKind::Punctuation, c.to_string()));
        } else if c == '"' && word.is_empty() {
            let mut literal = String::from(c);
            for next in chars.by_ref() {
                literal.push(next);
                if next == '"' {
                    break;
                }
            }
            tokens.push(Token::new(TokenKind::String, literal));
        } else {
            word.push(c);
        }
    }
    flush_word(&mut word, &mut tokens);

    tokens
}

fn flush_word(word: &mut String, tokens: &mut Vec<Token>) {
    if word.is_empty() {
        return;
    }
    let text = std::mem::take(word);
    let kind = classify_word(&text);
    tokens.push(Token::new(kind, text));
}

fn classify_word(word: &str) -> TokenKind {
    if KEYWORDS.contains(&word) {
        TokenKind::Keyword
    } else if NUMBER_REGEX.is_match(word) {
        TokenKind::Number
    } else if TYPE_REGEX.is_match(word) {
        TokenKind::Type
    } else {
        TokenKind::Plain
    }
}
