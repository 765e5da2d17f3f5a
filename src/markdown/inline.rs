//! Inline parser: turns one joined text run into [Inline] nodes.
//!
//! The scanner walks code points left to right. Plain characters collect in a
//! pending buffer that is flushed into a [Inline::Text] whenever another token
//! starts. Emphasis, strike and link text recurse into the same scanner with a
//! depth counter; at [MAX_INLINE_DEPTH] the remaining text stays literal.

use crate::markdown::ast::Inline;
use crate::markdown::links::{autolink_display, sanitize_destination};

/// Recursion ceiling for emphasis, strike and link text.
pub const MAX_INLINE_DEPTH: usize = 128;

/// Parses a text run into inline nodes. Never fails.
pub fn parse_inline(text: &str) -> Vec<Inline> {
    let chars: Vec<char> = text.chars().collect();
    parse_chars(&chars, 0)
}

fn parse_chars(chars: &[char], depth: usize) -> Vec<Inline> {
    if depth >= MAX_INLINE_DEPTH {
        log::trace!("inline depth ceiling reached, keeping text literal");
        return vec![Inline::Text(chars.iter().collect())];
    }
    InlineScanner::new(chars, depth).run()
}

struct InlineScanner<'a> {
    chars: &'a [char],
    pos: usize,
    depth: usize,
    text: String,
    out: Vec<Inline>,
    closers: Vec<Option<usize>>,
}

impl<'a> InlineScanner<'a> {
    fn new(chars: &'a [char], depth: usize) -> Self {
        Self {
            chars,
            pos: 0,
            depth,
            text: String::new(),
            out: Vec::new(),
            closers: pair_brackets(chars),
        }
    }

    fn run(mut self) -> Vec<Inline> {
        while self.pos < self.chars.len() {
            let c = self.chars[self.pos];
            let handled = match c {
                '\\' => self.escape(),
                '\n' => {
                    self.push_node(Inline::LineBreak);
                    self.pos += 1;
                    true
                }
                '`' => self.code_span(),
                '!' if self.peek(1) == Some('[') => self.link(true),
                '[' => self.link(false),
                '<' => self.angle(),
                '*' | '_' => self.emphasis(c),
                '~' => self.strike(),
                _ => false,
            };
            if !handled {
                self.text.push(c);
                self.pos += 1;
            }
        }
        self.flush();
        self.out
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn flush(&mut self) {
        if !self.text.is_empty() {
            self.out.push(Inline::Text(std::mem::take(&mut self.text)));
        }
    }

    fn push_node(&mut self, node: Inline) {
        self.flush();
        self.out.push(node);
    }

    fn push_literal(&mut self, len: usize) {
        self.text.extend(&self.chars[self.pos..self.pos + len]);
        self.pos += len;
    }

    fn escape(&mut self) -> bool {
        match self.peek(1) {
            Some('\n') => {
                self.push_node(Inline::LineBreak);
                self.pos += 2;
            }
            Some(next) => {
                self.text.push(next);
                self.pos += 2;
            }
            None => {
                self.text.push('\\');
                self.pos += 1;
            }
        }
        true
    }

    fn code_span(&mut self) -> bool {
        let open = run_length(self.chars, self.pos, '`');
        match find_backtick_close(self.chars, self.pos + open, open) {
            Some(close) => {
                let literal: String = self.chars[self.pos + open..close].iter().collect();
                self.push_node(Inline::Code(literal));
                self.pos = close + open;
            }
            None => self.push_literal(open),
        }
        true
    }

    /// `[text](dest)` or, with `image`, `![alt](dest)`.
    fn link(&mut self, image: bool) -> bool {
        let open = if image { self.pos + 1 } else { self.pos };
        let Some(close) = self.closers[open] else {
            return false;
        };
        if self.chars.get(close + 1) != Some(&'(') {
            return false;
        }
        let Some(paren_close) = self.closers[close + 1] else {
            return false;
        };

        let raw_dest: String = self.chars[close + 2..paren_close].iter().collect();
        let dest = link_destination(&raw_dest);
        let Some(destination) = sanitize_destination(&dest).map(str::to_string) else {
            return false;
        };

        let label = &self.chars[open + 1..close];
        let node = if image {
            Inline::Image {
                alt: label.iter().collect(),
                destination,
            }
        } else {
            Inline::Link {
                children: parse_chars(label, self.depth + 1),
                destination,
            }
        };
        self.push_node(node);
        self.pos = paren_close + 1;
        true
    }

    /// `<br>` tags and `<autolinks>`.
    fn angle(&mut self) -> bool {
        if let Some(len) = line_break_tag(&self.chars[self.pos..]) {
            self.push_node(Inline::LineBreak);
            self.pos += len;
            return true;
        }

        let start = self.pos + 1;
        let mut i = start;
        while i < self.chars.len() {
            match self.chars[i] {
                '\\' => i += 2,
                '>' => break,
                c if c.is_whitespace() || c == '<' => return false,
                _ => i += 1,
            }
        }
        if i >= self.chars.len() || i == start {
            return false;
        }

        let inner: String = self.chars[start..i].iter().collect();
        let lower = inner.to_ascii_lowercase();
        let dest = if lower.starts_with("http://")
            || lower.starts_with("https://")
            || lower.starts_with("mailto:")
        {
            inner
        } else if inner.contains('@') && inner.contains('.') {
            format!("mailto:{inner}")
        } else {
            return false;
        };

        let Some(dest) = sanitize_destination(&dest) else {
            return false;
        };
        let node = Inline::Link {
            children: vec![Inline::Text(autolink_display(dest).to_string())],
            destination: dest.to_string(),
        };
        self.push_node(node);
        self.pos = i + 1;
        true
    }

    fn emphasis(&mut self, delim: char) -> bool {
        let run = run_length(self.chars, self.pos, delim).min(2);
        if run == 1 && flanked_by_alphanumerics(self.chars, self.pos, 1) {
            self.push_literal(1);
            return true;
        }

        match find_delimiter_close(self.chars, self.pos + run, delim, run) {
            Some(close) => {
                let children = parse_chars(&self.chars[self.pos + run..close], self.depth + 1);
                let node = if run == 2 {
                    Inline::Strong(children)
                } else {
                    Inline::Emphasis(children)
                };
                self.push_node(node);
                self.pos = close + run;
            }
            None => self.push_literal(run),
        }
        true
    }

    fn strike(&mut self) -> bool {
        if run_length(self.chars, self.pos, '~') < 2 {
            return false;
        }
        match find_delimiter_close(self.chars, self.pos + 2, '~', 2) {
            Some(close) => {
                let children = parse_chars(&self.chars[self.pos + 2..close], self.depth + 1);
                self.push_node(Inline::Strike(children));
                self.pos = close + 2;
            }
            None => self.push_literal(2),
        }
        true
    }
}

fn run_length(chars: &[char], start: usize, c: char) -> usize {
    chars[start..].iter().take_while(|&&x| x == c).count()
}

fn is_escaped(chars: &[char], idx: usize) -> bool {
    chars[..idx].iter().rev().take_while(|&&c| c == '\\').count() % 2 == 1
}

/// True when the run at `start..start + len` has an alphanumeric on both sides.
fn flanked_by_alphanumerics(chars: &[char], start: usize, len: usize) -> bool {
    let before = start
        .checked_sub(1)
        .and_then(|i| chars.get(i))
        .is_some_and(|c| c.is_alphanumeric());
    let after = chars
        .get(start + len)
        .is_some_and(|c| c.is_alphanumeric());
    before && after
}

/// Finds a backtick run of exactly `len`, starting at `from`.
fn find_backtick_close(chars: &[char], from: usize, len: usize) -> Option<usize> {
    let mut i = from;
    while i < chars.len() {
        if chars[i] == '`' {
            let run = run_length(chars, i, '`');
            if run == len {
                return Some(i);
            }
            i += run;
        } else {
            i += 1;
        }
    }
    None
}

/// Finds the closing run for an emphasis or strike opener of `len` delimiters.
///
/// Escaped delimiters and code spans are skipped. Single-delimiter closers must not
/// sit between two alphanumerics, and step over double runs so strong text can nest.
fn find_delimiter_close(chars: &[char], from: usize, delim: char, len: usize) -> Option<usize> {
    let mut i = from;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            '`' => {
                let ticks = run_length(chars, i, '`');
                i = match find_backtick_close(chars, i + ticks, ticks) {
                    Some(close) => close + ticks,
                    None => i + ticks,
                };
            }
            c if c == delim => {
                let run = run_length(chars, i, delim);
                let usable = run >= len
                    && i > from
                    && !is_escaped(chars, i)
                    && !(len == 1 && run == 2)
                    && !(len == 1 && flanked_by_alphanumerics(chars, i, 1));
                if usable {
                    return Some(i);
                }
                i += run;
            }
            _ => i += 1,
        }
    }
    None
}

/// Index of the matching `]` for every `[`, and of the matching `)` for every `(`,
/// from one pass over the run. Brackets and parentheses nest independently and
/// backslash-escaped characters never take part.
fn pair_brackets(chars: &[char]) -> Vec<Option<usize>> {
    let mut closers = vec![None; chars.len()];
    let mut brackets = Vec::new();
    let mut parens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '\\' => {
                i += 2;
                continue;
            }
            '[' => brackets.push(i),
            '(' => parens.push(i),
            ']' => {
                if let Some(open) = brackets.pop() {
                    closers[open] = Some(i);
                }
            }
            ')' => {
                if let Some(open) = parens.pop() {
                    closers[open] = Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    closers
}

/// Extracts the destination from the raw `(...)` contents: optional `<...>` wrapping,
/// an ignored title after whitespace, and resolved backslash escapes.
fn link_destination(raw: &str) -> String {
    let raw = raw.trim();
    let dest = if let Some(rest) = raw.strip_prefix('<')
        && let Some(end) = rest.find('>')
    {
        &rest[..end]
    } else {
        raw.split_whitespace().next().unwrap_or("")
    };

    let mut out = String::with_capacity(dest.len());
    let mut chars = dest.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(&next) = chars.peek()
        {
            out.push(next);
            chars.next();
            continue;
        }
        out.push(c);
    }
    out
}

/// Length of a `<br>`, `<br/>` or `<br />` tag at the start of `chars`, any case.
fn line_break_tag(chars: &[char]) -> Option<usize> {
    let end = chars.iter().take(8).position(|&c| c == '>')?;
    let tag: String = chars[..=end]
        .iter()
        .filter(|c| !c.is_whitespace())
        .flat_map(|c| c.to_lowercase())
        .collect();
    matches!(tag.as_str(), "<br>" | "<br/>").then_some(end + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    #[test]
    fn strong_and_emphasis() {
        assert_eq!(
            parse_inline("**bold** and *em*"),
            vec![
                Inline::Strong(vec![text("bold")]),
                text(" and "),
                Inline::Emphasis(vec![text("em")]),
            ]
        );
    }

    #[test]
    fn code_span_is_verbatim() {
        assert_eq!(
            parse_inline("Keep `*stars*` literal"),
            vec![
                text("Keep "),
                Inline::Code("*stars*".into()),
                text(" literal")
            ]
        );
        assert_eq!(
            parse_inline("``a ` b``"),
            vec![Inline::Code("a ` b".into())]
        );
    }

    #[test]
    fn unmatched_backticks_are_literal() {
        assert_eq!(parse_inline("a ``b` c"), vec![text("a ``b` c")]);
    }

    #[test]
    fn snake_case_is_not_emphasis() {
        assert_eq!(parse_inline("snake_case_name"), vec![text("snake_case_name")]);
        assert_eq!(parse_inline("2*3*4"), vec![text("2*3*4")]);
    }

    #[test]
    fn intraword_double_delimiters_still_match() {
        assert_eq!(
            parse_inline("foo__bar__baz"),
            vec![text("foo"), Inline::Strong(vec![text("bar")]), text("baz")]
        );
    }

    #[test]
    fn strong_nests_inside_emphasis() {
        assert_eq!(
            parse_inline("*a **b** c*"),
            vec![Inline::Emphasis(vec![
                text("a "),
                Inline::Strong(vec![text("b")]),
                text(" c"),
            ])]
        );
    }

    #[test]
    fn strike_needs_two_tildes() {
        assert_eq!(
            parse_inline("~~gone~~ ~x~"),
            vec![Inline::Strike(vec![text("gone")]), text(" ~x~")]
        );
    }

    #[test]
    fn escapes_are_literal() {
        assert_eq!(parse_inline(r"\*not em\*"), vec![text("*not em*")]);
        assert_eq!(parse_inline("trailing \\"), vec![text("trailing \\")]);
        assert_eq!(parse_inline(r"a\db"), vec![text("adb")]);
        assert_eq!(parse_inline(r"C:\\dir"), vec![text(r"C:\dir")]);
    }

    #[test]
    fn escaped_brackets_never_pair() {
        assert_eq!(
            parse_inline(r"[a\](b)"),
            vec![text("[a](b)")]
        );
        assert_eq!(
            parse_inline(r"[a](http://x.y/\))"),
            vec![Inline::Link {
                children: vec![text("a")],
                destination: "http://x.y/)".into(),
            }]
        );
    }

    #[test]
    fn unbalanced_brackets_scan_in_linear_time() {
        let started = std::time::Instant::now();
        let input = format!("{}]", "[".repeat(50_000));
        let nodes = parse_inline(&input);
        assert_eq!(nodes, vec![text(&input)]);

        let input = "[a](".repeat(20_000);
        assert_eq!(parse_inline(&input), vec![text(&input)]);
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
    }

    #[test]
    fn links_and_images() {
        assert_eq!(
            parse_inline("see [the *docs*](https://example.com/x) now"),
            vec![
                text("see "),
                Inline::Link {
                    children: vec![text("the "), Inline::Emphasis(vec![text("docs")])],
                    destination: "https://example.com/x".into(),
                },
                text(" now"),
            ]
        );
        assert_eq!(
            parse_inline("![a *b*](img.png \"title\")"),
            vec![Inline::Image {
                alt: "a *b*".into(),
                destination: "img.png".into(),
            }]
        );
    }

    #[test]
    fn nested_brackets_and_parens() {
        assert_eq!(
            parse_inline("[a [b] c](http://x.y/(z))"),
            vec![Inline::Link {
                children: vec![text("a [b] c")],
                destination: "http://x.y/(z)".into(),
            }]
        );
    }

    #[test]
    fn unsafe_links_fall_back_to_text() {
        assert_eq!(
            parse_inline("[x](javascript:alert(1))"),
            vec![text("[x](javascript:alert(1))")]
        );
        assert_eq!(
            parse_inline("[x](//evil.example)"),
            vec![text("[x](//evil.example)")]
        );
        assert_eq!(
            parse_inline("![x](javascript:alert(1))"),
            vec![text("![x](javascript:alert(1))")]
        );
    }

    #[test]
    fn autolinks() {
        assert_eq!(
            parse_inline("<https://example.com>"),
            vec![Inline::Link {
                children: vec![text("https://example.com")],
                destination: "https://example.com".into(),
            }]
        );
        assert_eq!(
            parse_inline("mail <a@b.com>"),
            vec![
                text("mail "),
                Inline::Link {
                    children: vec![text("a@b.com")],
                    destination: "mailto:a@b.com".into(),
                }
            ]
        );
        assert_eq!(parse_inline("<not a link>"), vec![text("<not a link>")]);
        assert_eq!(parse_inline("a < b > c"), vec![text("a < b > c")]);
    }

    #[test]
    fn br_tags_break_lines() {
        assert_eq!(
            parse_inline("a<br>b<BR />c<br/>"),
            vec![
                text("a"),
                Inline::LineBreak,
                text("b"),
                Inline::LineBreak,
                text("c"),
                Inline::LineBreak,
            ]
        );
    }

    #[test]
    fn newline_is_a_line_break() {
        assert_eq!(
            parse_inline("one\ntwo"),
            vec![text("one"), Inline::LineBreak, text("two")]
        );
    }

    #[test]
    fn deep_nesting_is_bounded() {
        let mut input = String::new();
        for _ in 0..10_000 {
            input.push_str("[a");
        }
        input.push_str("x");
        let nodes = parse_inline(&input);
        assert!(!nodes.is_empty());

        let stars = "*".repeat(10_000);
        let nodes = parse_inline(&format!("{stars}a{stars}"));
        assert!(!nodes.is_empty());
    }

    #[test]
    fn depth_ceiling_keeps_text_literal() {
        let chars: Vec<char> = "*x*".chars().collect();
        assert_eq!(
            parse_chars(&chars, MAX_INLINE_DEPTH),
            vec![text("*x*")]
        );
    }
}
