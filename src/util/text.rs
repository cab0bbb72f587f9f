/// Tracks whether a left-to-right scan is inside a literal or a group.
///
/// Quotes toggle only when the scan is not already inside the other kind of
/// literal, and brackets are counted only outside literals, so the contents
/// of `"a[b]"` never open a group. A backslash inside a literal escapes the
/// character after it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Nesting {
    /// Inside a `"..."` literal.
    pub string:    bool,
    /// Inside a `'...'` literal.
    pub character: bool,
    /// Open parenthesis depth.
    pub parens:    usize,
    /// Open square bracket depth.
    pub brackets:  usize,
    escaped:       bool,
}

impl Nesting {
    /// Advances the tracker past one character.
    pub const fn feed(&mut self, c: char) {
        if self.escaped {
            self.escaped = false;
            return;
        }

        match c {
            '\\' if self.in_literal() => self.escaped = true,
            '"' if !self.character => self.string = !self.string,
            '\'' if !self.string => self.character = !self.character,
            _ if self.in_literal() => {},
            '(' => self.parens += 1,
            ')' => self.parens = self.parens.saturating_sub(1),
            '[' => self.brackets += 1,
            ']' => self.brackets = self.brackets.saturating_sub(1),
            _ => {},
        }
    }

    /// Returns `true` while inside a string or char literal.
    #[must_use]
    pub const fn in_literal(&self) -> bool {
        self.string || self.character
    }

    /// Returns `true` while inside any literal or group.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.in_literal() || self.parens > 0 || self.brackets > 0
    }
}

/// Returns `true` if `text` is exactly one balanced `open ... close` group.
///
/// The first character must open the group and its matching closer must be
/// the last character. Delimiters inside string and char literals are
/// ignored.
///
/// # Example
/// ```
/// use cll::util::text::encloses;
///
/// assert!(encloses("[1,[2,3]]", '[', ']'));
/// assert!(encloses("[\"]\"]", '[', ']'));
/// assert!(!encloses("[1][0]", '[', ']'));
/// assert!(!encloses("(a)(b)", '(', ')'));
/// ```
#[must_use]
pub fn encloses(text: &str, open: char, close: char) -> bool {
    if text.len() < 2 || !text.starts_with(open) || !text.ends_with(close) {
        return false;
    }

    let last = text.len() - close.len_utf8();
    let mut nesting = Nesting::default();

    for (i, c) in text.char_indices() {
        nesting.feed(c);
        let depth = if open == '(' { nesting.parens } else { nesting.brackets };
        if depth == 0 && !nesting.in_literal() {
            return i == last;
        }
    }

    false
}

/// Splits `text` at the commas outside of literals and groups, trimming each
/// part.
///
/// # Example
/// ```
/// use cll::util::text::split_top_level;
///
/// assert_eq!(split_top_level("i = 0, f(1, 2), \"a,b\""), ["i = 0", "f(1, 2)", "\"a,b\""]);
/// assert_eq!(split_top_level("x"), ["x"]);
/// ```
#[must_use]
pub fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut nesting = Nesting::default();
    let mut start = 0;

    for (i, c) in text.char_indices() {
        if c == ',' && !nesting.is_open() {
            parts.push(text[start..i].trim());
            start = i + 1;
        }
        nesting.feed(c);
    }
    parts.push(text[start..].trim());

    parts
}

/// Strips the outer delimiters of a group or quoted literal.
///
/// Text shorter than two characters yields an empty string.
#[must_use]
pub fn interior(text: &str) -> &str {
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some(_), Some(_)) => chars.as_str(),
        _ => "",
    }
}

/// Splits `base[index]` at its right-most top-level subscript.
///
/// Returns the base and the index expression text, or `None` if `text` does
/// not end in a subscript or has nothing in front of it. Chained subscripts
/// split at the last pair, so `a[1][2]` gives `("a[1]", "2")`.
///
/// # Example
/// ```
/// use cll::util::text::split_subscript;
///
/// assert_eq!(split_subscript("a[1][2]"), Some(("a[1]", "2")));
/// assert_eq!(split_subscript("s[i + 1]"), Some(("s", "i + 1")));
/// assert_eq!(split_subscript("\"x]\"[0]"), Some(("\"x]\"", "0")));
/// assert_eq!(split_subscript("[1,2]"), None);
/// ```
#[must_use]
pub fn split_subscript(text: &str) -> Option<(&str, &str)> {
    if !text.ends_with(']') {
        return None;
    }

    let mut nesting = Nesting::default();
    let mut last_open = None;

    for (i, c) in text.char_indices() {
        if c == '[' && !nesting.is_open() {
            last_open = Some(i);
        }
        nesting.feed(c);
    }

    let open = last_open.filter(|&open| open > 0)?;
    let subscript = &text[open..];

    encloses(subscript, '[', ']').then(|| (&text[..open], interior(subscript)))
}

/// Splits `name(args)` into the callee name and the argument text.
///
/// The name must be a plain identifier and the parenthesised part must be a
/// single balanced group that ends the text.
///
/// # Example
/// ```
/// use cll::util::text::split_call;
///
/// assert_eq!(split_call("max(a, (b))"), Some(("max", "a, (b)")));
/// assert_eq!(split_call("(a)"), None);
/// assert_eq!(split_call("f(1)(2)"), None);
/// ```
#[must_use]
pub fn split_call(text: &str) -> Option<(&str, &str)> {
    let open = text.find('(')?;
    let (name, group) = text.split_at(open);

    let identifier = !name.is_empty()
                     && name.chars().all(|c| c.is_alphanumeric() || c == '_')
                     && !name.starts_with(|c: char| c.is_ascii_digit());

    (identifier && encloses(group, '(', ')')).then(|| (name, interior(group)))
}

/// Escape sequences recognised inside string and char literals.
const ESCAPES: &[(char, char)] = &[('0', '\0'),
                                   ('n', '\n'),
                                   ('t', '\t'),
                                   ('v', '\u{0B}'),
                                   ('b', '\u{08}'),
                                   ('r', '\r'),
                                   ('f', '\u{0C}'),
                                   ('a', '\u{07}'),
                                   ('\\', '\\'),
                                   ('?', '?'),
                                   ('\'', '\''),
                                   ('"', '"')];

/// Resolves escape sequences in the raw contents of a literal.
///
/// Unknown sequences are kept as written.
///
/// # Example
/// ```
/// use cll::util::text::unescape;
///
/// assert_eq!(unescape(r"a\tb\n"), "a\tb\n");
/// assert_eq!(unescape(r"\q"), r"\q");
/// ```
#[must_use]
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some(code) => match ESCAPES.iter().find(|(k, _)| *k == code) {
                Some((_, resolved)) => out.push(*resolved),
                None => {
                    out.push('\\');
                    out.push(code);
                },
            },
            None => out.push('\\'),
        }
    }

    out
}

/// Writes `text` back in literal form, escaping what [`unescape`] resolves.
///
/// `quote` is the delimiter of the literal being built; only that quote is
/// escaped.
#[must_use]
pub fn escape(text: &str, quote: char) -> String {
    let mut out = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            '\u{0B}' => out.push_str("\\v"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\u{07}' => out.push_str("\\a"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            },
            c => out.push(c),
        }
    }

    out
}
