use crate::{FileErr, Result};

/// Splits `verb(args)` into the trimmed verb token and the argument string.
///
/// The argument string keeps both parentheses; field extraction starts just
/// past the opening one.
///
/// # Errors
/// Returns `FileErr::NotARecordLine` when the line has no `(` at all.
pub(crate) fn split_verb(line: &str) -> Result<(&str, &str)> {
    let bracket = line.find('(').ok_or(FileErr::NotARecordLine)?;
    Ok((line[..bracket].trim(), &line[bracket..]))
}

/// Scanning cursor over one clause's argument string.
///
/// Holds the slice and an explicit byte offset; each extraction consumes one
/// field plus the terminator that closes it. The cursor never backtracks past
/// a consumed field.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cursor<'a> {
    args: &'a str,
    pos: usize,
    clause: &'static str,
}

impl<'a> Cursor<'a> {
    /// Positions a new cursor just past the opening bracket of `args`.
    pub(crate) fn new(args: &'a str, clause: &'static str) -> Self {
        Self {
            args,
            pos: 1,
            clause,
        }
    }

    /// Raw text of the next field, up to (not including) `limiter`.
    ///
    /// Advances the cursor past the terminator.
    fn next_field(&mut self, limiter: char) -> Result<&'a str> {
        let end = self.args[self.pos..]
            .find(limiter)
            .map(|at| self.pos + at)
            .ok_or(FileErr::LineDecodeFailed {
                clause: self.clause,
            })?;

        let field = &self.args[self.pos..end];
        self.pos = end + 1;
        Ok(field)
    }

    /// Next field as free text. Used by clauses whose first field is a name.
    pub(crate) fn next_text(&mut self, limiter: char) -> Result<&'a str> {
        self.next_field(limiter)
    }

    /// Next field as an unsigned base-10 integer.
    ///
    /// # Errors
    /// `FileErr::LineDecodeFailed` when the terminator is missing or the
    /// field is not a plain unsigned number.
    pub(crate) fn next_uint(&mut self, limiter: char) -> Result<usize> {
        let field = self.next_field(limiter)?;
        field.parse().map_err(|_| FileErr::LineDecodeFailed {
            clause: self.clause,
        })
    }

    /// Next field as a floating point value.
    ///
    /// # Errors
    /// `FileErr::LineDecodeFailed` when the terminator is missing or the
    /// field is not a number.
    pub(crate) fn next_float(&mut self, limiter: char) -> Result<f32> {
        let field = self.next_field(limiter)?;
        field.parse().map_err(|_| FileErr::LineDecodeFailed {
            clause: self.clause,
        })
    }

    /// Next `key:value` pair from a modifier tail.
    ///
    /// The value of the last pair runs up to the clause-closing `)`; every
    /// earlier value runs up to the `,` that starts the next pair.
    ///
    /// # Returns
    /// The key, the value, and whether more pairs follow.
    ///
    /// # Errors
    /// `FileErr::KeyValueFormat` when no `:` separator is found, and
    /// `FileErr::LineDecodeFailed` when the clause is truncated before `)`.
    pub(crate) fn next_key_value(&mut self) -> Result<(&'a str, &'a str, bool)> {
        let sep = self.args[self.pos..]
            .find(':')
            .map(|at| self.pos + at)
            .ok_or(FileErr::KeyValueFormat)?;

        let key = &self.args[self.pos..sep];
        let value_start = sep + 1;

        match self.args[value_start..].find(',') {
            Some(at) => {
                let comma = value_start + at;
                let value = &self.args[value_start..comma];
                self.pos = comma + 1;
                Ok((key, value, true))
            }
            None => {
                let close = self.args[value_start..]
                    .find(')')
                    .map(|at| value_start + at)
                    .ok_or(FileErr::LineDecodeFailed {
                        clause: self.clause,
                    })?;

                let value = &self.args[value_start..close];
                self.pos = close + 1;
                Ok((key, value, false))
            }
        }
    }
}
