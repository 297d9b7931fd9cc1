//! JSON documents and JSON tokens as sequences.
//!
//! Input is a stream of whitespace-separated JSON documents (a single document
//! is the common case). [`json`] tokenizes the input as it reads it: a token
//! is handed to the consumer as soon as its last byte has been read, so a huge
//! top-level array starts yielding right away and a truncated document still
//! yields every token before the break. Scalars are decoded with `serde_json`.
//! [`json_values`] decodes whole documents with `serde_json`'s streaming
//! deserializer.

use std::fmt;
use std::io::{self, BufRead, BufReader, Read};

use ik_core::Seq;
use serde_json::{Number, Value};

use crate::config::JsonConfig;
use crate::error::{Error, Result};
use crate::guard::ReleaseGuard;

/// One structural or scalar token of a JSON document.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    BeginArray,
    EndArray,
    BeginObject,
    EndObject,
    /// An object member name; the member's value follows as its own token(s).
    Key(String),
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::BeginArray => f.write_str("["),
            Token::EndArray => f.write_str("]"),
            Token::BeginObject => f.write_str("{"),
            Token::EndObject => f.write_str("}"),
            Token::Key(k) => write!(f, "{k}:"),
            Token::Null => f.write_str("null"),
            Token::Bool(b) => write!(f, "{b}"),
            Token::Number(n) => write!(f, "{n}"),
            Token::String(s) => f.write_str(s),
        }
    }
}

/// Sequence of tokens read from an owned reader.
///
/// A syntax error or an I/O failure is forwarded once as an `Err` element,
/// after every token that preceded it, and ends the drive.
pub struct Json<R> {
    reader: R,
    config: JsonConfig,
}

/// Tokens of the JSON documents in `reader`.
pub fn json<R: Read>(reader: R) -> Json<R> {
    Json {
        reader,
        config: JsonConfig::default(),
    }
}

impl<R: Read> Json<R> {
    pub fn with_config(reader: R, config: JsonConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { reader, config })
    }
}

impl<R: Read> Seq for Json<R> {
    type Item = Result<Token>;

    fn drive<F>(self, mut sink: F)
    where
        F: FnMut(Self::Item) -> bool,
    {
        let Json { reader, config } = self;
        let buffered = BufReader::with_capacity(config.buffer_capacity, reader);
        let mut tokens = ReleaseGuard::new(Tokenizer::new(buffered), "json");
        loop {
            match tokens.next_token() {
                Ok(Some(tok)) => {
                    tokens.record_yield();
                    if !sink(Ok(tok)) {
                        return;
                    }
                }
                Ok(None) => return,
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(source = "json", error = %e, "json tokenize failed");
                    sink(Err(e));
                    return;
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Array,
    Object,
}

/// What the tokenizer accepts next, ignoring whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    /// A value; at depth 0 also a clean end of input.
    Value,
    /// Right after `[`.
    ValueOrEnd,
    /// Right after `{`.
    KeyOrEnd,
    /// After `,` inside an object.
    Key,
    Colon,
    CommaOrEnd,
}

struct Tokenizer<R> {
    reader: R,
    stack: Vec<Frame>,
    expect: Expect,
    scratch: Vec<u8>,
    offset: u64,
}

impl<R: BufRead> Tokenizer<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            stack: Vec::new(),
            expect: Expect::Value,
            scratch: Vec::new(),
            offset: 0,
        }
    }

    /// Next token, `Ok(None)` at a clean end between documents.
    fn next_token(&mut self) -> Result<Option<Token>> {
        loop {
            let Some(b) = self.peek()? else {
                if self.stack.is_empty() && self.expect == Expect::Value {
                    return Ok(None);
                }
                return Err(self.syntax("unexpected end of input"));
            };
            match self.expect {
                Expect::ValueOrEnd if b == b']' => {
                    self.advance();
                    return self.close(Frame::Array).map(Some);
                }
                Expect::Value | Expect::ValueOrEnd => return self.value(b).map(Some),
                Expect::KeyOrEnd if b == b'}' => {
                    self.advance();
                    return self.close(Frame::Object).map(Some);
                }
                Expect::Key | Expect::KeyOrEnd => {
                    if b != b'"' {
                        return Err(self.syntax("expected object key"));
                    }
                    self.advance();
                    let key = self.string()?;
                    self.expect = Expect::Colon;
                    return Ok(Some(Token::Key(key)));
                }
                Expect::Colon => {
                    if b != b':' {
                        return Err(self.syntax("expected `:`"));
                    }
                    self.advance();
                    self.expect = Expect::Value;
                }
                Expect::CommaOrEnd => match (b, self.stack.last()) {
                    (b',', Some(Frame::Array)) => {
                        self.advance();
                        self.expect = Expect::Value;
                    }
                    (b',', Some(Frame::Object)) => {
                        self.advance();
                        self.expect = Expect::Key;
                    }
                    (b']', Some(Frame::Array)) => {
                        self.advance();
                        return self.close(Frame::Array).map(Some);
                    }
                    (b'}', Some(Frame::Object)) => {
                        self.advance();
                        return self.close(Frame::Object).map(Some);
                    }
                    _ => return Err(self.syntax("expected `,` or a closing bracket")),
                },
            }
        }
    }

    fn value(&mut self, first: u8) -> Result<Token> {
        let tok = match first {
            b'[' => {
                self.advance();
                self.stack.push(Frame::Array);
                self.expect = Expect::ValueOrEnd;
                return Ok(Token::BeginArray);
            }
            b'{' => {
                self.advance();
                self.stack.push(Frame::Object);
                self.expect = Expect::KeyOrEnd;
                return Ok(Token::BeginObject);
            }
            b'"' => {
                self.advance();
                Token::String(self.string()?)
            }
            b'-' | b'0'..=b'9' => Token::Number(self.number()?),
            b't' | b'f' | b'n' => self.literal()?,
            _ => return Err(self.syntax("expected a value")),
        };
        self.value_done();
        Ok(tok)
    }

    fn close(&mut self, frame: Frame) -> Result<Token> {
        self.stack.pop();
        self.value_done();
        Ok(match frame {
            Frame::Array => Token::EndArray,
            Frame::Object => Token::EndObject,
        })
    }

    fn value_done(&mut self) {
        self.expect = if self.stack.is_empty() {
            Expect::Value
        } else {
            Expect::CommaOrEnd
        };
    }

    /// Rest of a string whose opening quote was consumed.
    fn string(&mut self) -> Result<String> {
        self.scratch.clear();
        self.scratch.push(b'"');
        let mut escaped = false;
        loop {
            let Some(b) = self.peek_raw()? else {
                return Err(self.syntax("unterminated string"));
            };
            self.advance();
            self.scratch.push(b);
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                break;
            }
        }
        Ok(serde_json::from_slice(&self.scratch)?)
    }

    fn number(&mut self) -> Result<Number> {
        self.scratch.clear();
        while let Some(b) = self.peek_raw()? {
            if !matches!(b, b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E') {
                break;
            }
            self.advance();
            self.scratch.push(b);
        }
        Ok(serde_json::from_slice(&self.scratch)?)
    }

    fn literal(&mut self) -> Result<Token> {
        self.scratch.clear();
        while let Some(b) = self.peek_raw()? {
            if !b.is_ascii_alphabetic() {
                break;
            }
            self.advance();
            self.scratch.push(b);
        }
        match self.scratch.as_slice() {
            b"true" => Ok(Token::Bool(true)),
            b"false" => Ok(Token::Bool(false)),
            b"null" => Ok(Token::Null),
            _ => Err(self.syntax("invalid literal")),
        }
    }

    /// Next non-whitespace byte, not consumed.
    fn peek(&mut self) -> Result<Option<u8>> {
        while let Some(b) = self.peek_raw()? {
            if !matches!(b, b' ' | b'\t' | b'\n' | b'\r') {
                return Ok(Some(b));
            }
            self.advance();
        }
        Ok(None)
    }

    fn peek_raw(&mut self) -> Result<Option<u8>> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Io(e)),
            }
        }
    }

    /// Consume the byte last returned by a peek.
    fn advance(&mut self) {
        self.reader.consume(1);
        self.offset += 1;
    }

    fn syntax(&self, msg: &str) -> Error {
        Error::Json(<serde_json::Error as serde::de::Error>::custom(format!(
            "{msg} at byte {}",
            self.offset
        )))
    }
}

/// Sequence of whole JSON documents read from an owned reader.
///
/// A malformed document or an I/O failure is forwarded once as an `Err`
/// element and ends the drive.
pub struct JsonValues<R> {
    reader: R,
    config: JsonConfig,
}

/// Whole JSON documents in `reader`.
pub fn json_values<R: Read>(reader: R) -> JsonValues<R> {
    JsonValues {
        reader,
        config: JsonConfig::default(),
    }
}

impl<R: Read> JsonValues<R> {
    pub fn with_config(reader: R, config: JsonConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { reader, config })
    }
}

impl<R: Read> Seq for JsonValues<R> {
    type Item = Result<Value>;

    fn drive<F>(self, mut sink: F)
    where
        F: FnMut(Self::Item) -> bool,
    {
        let JsonValues { reader, config } = self;
        let buffered = BufReader::with_capacity(config.buffer_capacity, reader);
        let stream = serde_json::Deserializer::from_reader(buffered).into_iter::<Value>();
        let mut docs = ReleaseGuard::new(stream, "json_values");

        while let Some(doc) = docs.next() {
            match doc {
                Ok(value) => {
                    docs.record_yield();
                    if !sink(Ok(value)) {
                        return;
                    }
                }
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(source = "json_values", error = %e, "json decode failed");
                    sink(Err(Error::from(e)));
                    return;
                }
            }
        }
    }
}
