// crates/wrapline-layout/src/tokenize.rs

/// A run of either whitespace or non-whitespace characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub is_whitespace: bool,
}

impl<'a> Token<'a> {
    fn word(text: &'a str) -> Self {
        Self {
            text,
            is_whitespace: false,
        }
    }

    fn space(text: &'a str) -> Self {
        Self {
            text,
            is_whitespace: true,
        }
    }
}

/// Split one logical line into alternating word / separator tokens.
///
/// The result always has even length and starts with a word token, so it can
/// be consumed as `(word, separator)` pairs. Either member of a pair may be
/// empty: a line starting with whitespace gets an empty leading word and a
/// line ending on a word gets an empty trailing separator.
pub fn tokenize(line: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut prev_space = false;

    for (i, c) in line.char_indices() {
        let space = c.is_whitespace();
        if i == 0 {
            if space {
                tokens.push(Token::word(""));
            }
        } else if space != prev_space {
            tokens.push(classify(&line[start..i], prev_space));
            start = i;
        }
        prev_space = space;
    }
    tokens.push(classify(&line[start..], prev_space));

    if tokens.len() % 2 == 1 {
        tokens.push(Token::space(""));
    }
    tokens
}

fn classify(text: &str, is_whitespace: bool) -> Token<'_> {
    if is_whitespace {
        Token::space(text)
    } else {
        Token::word(text)
    }
}

/// Iterate a normalized token sequence as `(word, separator)` pairs.
pub fn pairs<'t, 'a>(tokens: &'t [Token<'a>]) -> impl Iterator<Item = (&'a str, &'a str)> + 't {
    tokens
        .chunks_exact(2)
        .map(|pair| (pair[0].text, pair[1].text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(line: &str) -> Vec<&str> {
        tokenize(line).iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_words_and_separators_alternate() {
        let tokens = tokenize("the quick  brown");
        assert_eq!(
            tokens.iter().map(|t| t.text).collect::<Vec<_>>(),
            vec!["the", " ", "quick", "  ", "brown", ""]
        );
        for (i, token) in tokens.iter().enumerate() {
            assert_eq!(token.is_whitespace, i % 2 == 1, "token {i}: {token:?}");
        }
    }

    #[test]
    fn test_trailing_whitespace_is_final_separator() {
        assert_eq!(texts("a b\t"), vec!["a", " ", "b", "\t"]);
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(texts(""), vec!["", ""]);
    }

    #[test]
    fn test_whitespace_only_line() {
        let tokens = tokenize("   ");
        assert_eq!(tokens, vec![Token::word(""), Token::space("   ")]);
    }

    #[test]
    fn test_leading_whitespace_gets_empty_word() {
        assert_eq!(texts("  ab cd"), vec!["", "  ", "ab", " ", "cd", ""]);
    }

    #[test]
    fn test_unicode_whitespace_and_multibyte_words() {
        // U+3000 ideographic space and U+00A0 no-break space are whitespace
        assert_eq!(texts("héllo\u{3000}wörld"), vec!["héllo", "\u{3000}", "wörld", ""]);
        assert_eq!(texts("a\u{a0}b"), vec!["a", "\u{a0}", "b", ""]);
    }

    #[test]
    fn test_pairs() {
        let tokens = tokenize("one two");
        let collected: Vec<_> = pairs(&tokens).collect();
        assert_eq!(collected, vec![("one", " "), ("two", "")]);
    }
}
