use crate::{
    interpreter::value::core::{Kind, Value},
    util::text::{escape, interior, split_top_level, unescape},
};

/// Decodes the char held by a char literal such as `'a'` or `'\n'`.
pub(crate) fn decode_char(text: &str) -> Option<char> {
    unescape(interior(text)).chars().next()
}

/// Splits the interior of an array literal at its top-level commas.
fn split_items(text: &str) -> Vec<&str> {
    let inner = interior(text).trim();
    if inner.is_empty() {
        return Vec::new();
    }
    split_top_level(inner)
}

impl Value {
    /// Counts the elements of an array or the chars of a string or char.
    ///
    /// Other kinds report the length of their text.
    ///
    /// # Example
    /// ```
    /// use cll::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::new("[1,[2,3],\"a,b\"]").size(), 3);
    /// assert_eq!(Value::new("[]").size(), 0);
    /// assert_eq!(Value::new("\"a\\nb\"").size(), 3);
    /// ```
    #[must_use]
    pub fn size(&self) -> usize {
        match self.kind {
            Kind::Array => split_items(&self.text).len(),
            Kind::String | Kind::Char => self.as_string().chars().count(),
            _ => self.text.chars().count(),
        }
    }

    /// Returns the elements of an array, or the chars of a string or char.
    #[must_use]
    pub fn elements(&self) -> Vec<Self> {
        match self.kind {
            Kind::Array => split_items(&self.text).into_iter().map(Self::new).collect(),
            Kind::String | Kind::Char => self.as_string().chars().map(Self::character).collect(),
            _ => Vec::new(),
        }
    }

    /// Returns the element at `index`, or the empty value when out of range.
    ///
    /// Array elements keep their own kind. Strings, chars and any other text
    /// yield the char at `index`.
    ///
    /// # Example
    /// ```
    /// use cll::interpreter::value::core::{Kind, Value};
    ///
    /// let a = Value::new("[10,\"x\",[1,2]]");
    ///
    /// assert_eq!(a.element(1).text(), "\"x\"");
    /// assert_eq!(a.element(2).kind(), Kind::Array);
    /// assert!(a.element(3).is_empty());
    /// assert_eq!(Value::new("\"abc\"").element(2).text(), "'c'");
    /// ```
    #[must_use]
    pub fn element(&self, index: usize) -> Self {
        match self.kind {
            Kind::Array => {
                split_items(&self.text).get(index).map_or_else(Self::empty, |item| Self::new(item))
            },
            Kind::String | Kind::Char => {
                self.as_string().chars().nth(index).map_or_else(Self::empty, Self::character)
            },
            _ => self.text.chars().nth(index).map_or_else(Self::empty, Self::character),
        }
    }

    /// Replaces the element at `index` and reclassifies the container.
    ///
    /// Writing the empty value removes the element. Indices past the end and
    /// containers that are not arrays, strings or chars are left untouched.
    /// A string element is replaced by the text of `item`, so writing a
    /// longer string splices it in.
    ///
    /// # Example
    /// ```
    /// use cll::interpreter::value::core::Value;
    ///
    /// let mut a = Value::new("[1,2,3]");
    /// a.set_element(1, &Value::new("9"));
    /// assert_eq!(a.text(), "[1,9,3]");
    ///
    /// let mut s = Value::new("\"abc\"");
    /// s.set_element(0, &Value::new("'z'"));
    /// assert_eq!(s.text(), "\"zbc\"");
    /// ```
    pub fn set_element(&mut self, index: usize, item: &Self) {
        match self.kind {
            Kind::Array => {
                let mut items = split_items(&self.text);
                if index >= items.len() {
                    return;
                }
                if item.is_empty() {
                    items.remove(index);
                } else {
                    items[index] = item.text();
                }
                let text = format!("[{}]", items.join(","));
                self.set_value(&text);
            },
            Kind::String | Kind::Char => {
                let mut chars: Vec<String> = self.as_string().chars().map(String::from).collect();
                if index >= chars.len() {
                    return;
                }
                chars[index] = item.as_string();

                let quote = if self.kind == Kind::String { '"' } else { '\'' };
                let content = escape(&chars.concat(), quote);
                self.set_value(&format!("{quote}{content}{quote}"));
            },
            _ => {},
        }
    }

    /// Removes the element at `index`.
    pub fn delete_element(&mut self, index: usize) {
        self.set_element(index, &Self::empty());
    }
}
