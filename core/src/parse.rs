//! Character scanner shared by the task and action text formats.

use thiserror::Error;

use crate::Point;

/// Errors raised while decoding task or action text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A character that the format does not allow at this position.
    #[error("unexpected character {found:?} at offset {offset}")]
    UnexpectedChar {
        /// Byte offset of the character within the input.
        offset: usize,
        /// Character that was found.
        found: char,
    },
    /// The input ended in the middle of a token.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEnd {
        /// Byte offset where more input was required.
        offset: usize,
    },
    /// A coordinate could not be represented as an integer.
    #[error("invalid integer {text:?} at offset {offset}")]
    InvalidInteger {
        /// Byte offset where the integer starts.
        offset: usize,
        /// Text that failed to parse.
        text: String,
    },
    /// The task description did not contain the expected number of sections.
    #[error("expected {expected} sections separated by '#', found {found}")]
    SectionCount {
        /// Number of sections the format requires.
        expected: usize,
        /// Number of sections present in the input.
        found: usize,
    },
    /// A polygon section contained no vertices.
    #[error("polygon at offset {offset} has no vertices")]
    EmptyPolygon {
        /// Byte offset of the polygon section.
        offset: usize,
    },
}

/// Cursor over a text slice that reports errors against absolute offsets.
#[derive(Debug)]
pub(crate) struct Scanner<'a> {
    text: &'a str,
    position: usize,
    base: usize,
}

impl<'a> Scanner<'a> {
    /// Scanner over a slice that starts `base` bytes into the full input.
    pub(crate) fn with_base(text: &'a str, base: usize) -> Self {
        Self {
            text,
            position: 0,
            base,
        }
    }

    pub(crate) fn offset(&self) -> usize {
        self.base + self.position
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.text[self.position..].chars().next()
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let next = self.peek()?;
        self.position += next.len_utf8();
        Some(next)
    }

    pub(crate) fn is_done(&self) -> bool {
        self.position >= self.text.len()
    }

    pub(crate) fn expect(&mut self, wanted: char) -> Result<(), ParseError> {
        let offset = self.offset();
        match self.bump() {
            Some(found) if found == wanted => Ok(()),
            Some(found) => Err(ParseError::UnexpectedChar { offset, found }),
            None => Err(ParseError::UnexpectedEnd { offset }),
        }
    }

    pub(crate) fn integer(&mut self) -> Result<i32, ParseError> {
        let start = self.position;
        let offset = self.offset();
        if self.peek() == Some('-') {
            let _ = self.bump();
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            let _ = self.bump();
        }
        let text = &self.text[start..self.position];
        if text.is_empty() || text == "-" {
            return match self.peek() {
                Some(found) => Err(ParseError::UnexpectedChar {
                    offset: self.offset(),
                    found,
                }),
                None => Err(ParseError::UnexpectedEnd {
                    offset: self.offset(),
                }),
            };
        }
        text.parse().map_err(|_| ParseError::InvalidInteger {
            offset,
            text: text.to_owned(),
        })
    }

    /// Parses a parenthesised `(x,y)` pair.
    pub(crate) fn point(&mut self) -> Result<Point, ParseError> {
        self.expect('(')?;
        let x = self.integer()?;
        self.expect(',')?;
        let y = self.integer()?;
        self.expect(')')?;
        Ok(Point::new(x, y))
    }

    pub(crate) fn finish(&self) -> Result<(), ParseError> {
        match self.peek() {
            Some(found) => Err(ParseError::UnexpectedChar {
                offset: self.offset(),
                found,
            }),
            None => Ok(()),
        }
    }
}
