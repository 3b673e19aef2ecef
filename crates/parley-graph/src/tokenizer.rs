//! Line tokenizer for the answer-graph format.
//!
//! A line holds any number of `<TAG:VALUE>` markers mixed with free text.
//! Each marker becomes one [`Token`]; everything outside a marker is ignored.

/// Tag names understood by the graph loader
pub mod tag {
    pub const TYPE: &str = "TYPE";
    pub const ID: &str = "ID";
    pub const ANSWER: &str = "ANSWER";
    pub const PARENT: &str = "PARENT";
    pub const CHILD: &str = "CHILD";
    pub const KEYWORD: &str = "KEYWORD";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub tag: String,
    pub value: String,
}

impl Token {
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            value: value.into(),
        }
    }
}

/// Tokens of a single line, in order of appearance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenLine {
    tokens: Vec<Token>,
}

impl TokenLine {
    /// Value of the first token carrying `tag`
    pub fn first(&self, tag: &str) -> Option<&str> {
        self.tokens
            .iter()
            .find(|token| token.tag == tag)
            .map(|token| token.value.as_str())
    }

    /// Values of every token carrying `tag`, repeats included
    pub fn all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.tokens
            .iter()
            .filter(move |token| token.tag == tag)
            .map(|token| token.value.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl IntoIterator for TokenLine {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl FromIterator<Token> for TokenLine {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

/// Split one line into `(tag, value)` tokens.
///
/// A marker runs from `<` to the next `>` and is split at its first `:`.
/// Markers without a colon are skipped. Scanning stops once no closing `>`
/// is left on the line.
pub fn tokenize(line: &str) -> TokenLine {
    let mut tokens = Vec::new();
    let mut rest = line;

    while let Some(open) = rest.find('<') {
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find('>') else {
            break;
        };

        let span = &after_open[..close];

        if let Some((tag, value)) = span.split_once(':') {
            tokens.push(Token::new(tag, value));
        }

        rest = &after_open[close + 1..];
    }

    TokenLine { tokens }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(line: &TokenLine) -> Vec<(&str, &str)> {
        line.iter()
            .map(|t| (t.tag.as_str(), t.value.as_str()))
            .collect()
    }

    #[test]
    fn test_node_line_keeps_order_and_repeats() {
        let line = tokenize("<TYPE:NODE><ID:3><ANSWER:Hi there><ANSWER:Hello!>");
        assert_eq!(
            pairs(&line),
            vec![
                ("TYPE", "NODE"),
                ("ID", "3"),
                ("ANSWER", "Hi there"),
                ("ANSWER", "Hello!"),
            ]
        );
    }

    #[test]
    fn test_text_between_markers_is_ignored() {
        let line = tokenize("edge  <TYPE:EDGE> from <PARENT:1> to <CHILD:2>  # note");
        assert_eq!(
            pairs(&line),
            vec![("TYPE", "EDGE"), ("PARENT", "1"), ("CHILD", "2")]
        );
    }

    #[test]
    fn test_value_splits_at_first_colon_only() {
        let line = tokenize("<ANSWER:Note: this keeps the colon>");
        assert_eq!(line.first(tag::ANSWER), Some("Note: this keeps the colon"));
    }

    #[test]
    fn test_marker_without_colon_is_skipped() {
        let line = tokenize("<TYPE:NODE><broken><ID:1>");
        assert_eq!(pairs(&line), vec![("TYPE", "NODE"), ("ID", "1")]);
    }

    #[test]
    fn test_unclosed_marker_ends_the_line() {
        let line = tokenize("<TYPE:NODE><ID:1");
        assert_eq!(pairs(&line), vec![("TYPE", "NODE")]);
    }

    #[test]
    fn test_marker_runs_from_first_open_bracket() {
        let line = tokenize("<oops <ID:5>");
        assert_eq!(pairs(&line), vec![("oops <ID", "5")]);

        // the nested TYPE is part of a junk tag, not a record type
        let line = tokenize("<a <TYPE:NODE><ID:1>");
        assert_eq!(pairs(&line), vec![("a <TYPE", "NODE"), ("ID", "1")]);
        assert_eq!(line.first(tag::TYPE), None);
    }

    #[test]
    fn test_empty_and_plain_lines() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("just a comment > with < odd brackets").is_empty());
        assert!(tokenize("> <").is_empty());
    }

    #[test]
    fn test_empty_tag_and_value_are_kept() {
        let line = tokenize("<:>");
        assert_eq!(pairs(&line), vec![("", "")]);
    }

    #[test]
    fn test_all_collects_every_repeat() {
        let line = tokenize("<KEYWORD:hi><ID:1><KEYWORD:hello><KEYWORD:hey>");
        let keywords: Vec<_> = line.all(tag::KEYWORD).collect();
        assert_eq!(keywords, vec!["hi", "hello", "hey"]);
        assert_eq!(line.all(tag::ANSWER).count(), 0);
    }
}
