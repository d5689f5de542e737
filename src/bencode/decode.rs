use std::collections::BTreeMap;

use bytes::Bytes;

use super::error::BencodeError;
use super::value::Value;

const MAX_DEPTH: usize = 64;

/// Decodes a byte slice holding exactly one bencode value.
///
/// Trailing bytes after the value are an error; use [`decode_prefix`] when
/// the value is embedded in a longer stream.
///
/// ```
/// use minnow::bencode::decode;
///
/// assert_eq!(decode(b"i52e").unwrap().as_integer(), Some(52));
/// assert_eq!(decode(b"5:hello").unwrap().as_str(), Some("hello"));
/// ```
pub fn decode(data: &[u8]) -> Result<Value, BencodeError> {
    let (value, rest) = decode_prefix(data)?;
    if !rest.is_empty() {
        return Err(BencodeError::TrailingData);
    }
    Ok(value)
}

/// Decodes one bencode value from the front of `data`, returning the value
/// and the unconsumed tail.
pub fn decode_prefix(data: &[u8]) -> Result<(Value, &[u8]), BencodeError> {
    let mut parser = Parser { rest: data };
    let value = parser.value(0)?;
    Ok((value, parser.rest))
}

/// Cursor over the undecoded remainder of the input.
struct Parser<'a> {
    rest: &'a [u8],
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Result<u8, BencodeError> {
        self.rest.first().copied().ok_or(BencodeError::UnexpectedEof)
    }

    fn bump(&mut self) {
        self.rest = &self.rest[1..];
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], BencodeError> {
        if self.rest.len() < n {
            return Err(BencodeError::UnexpectedEof);
        }
        let (head, tail) = self.rest.split_at(n);
        self.rest = tail;
        Ok(head)
    }

    /// Consumes bytes up to (not including) `delim`, then the delimiter
    /// itself.
    fn until(&mut self, delim: u8) -> Result<&'a [u8], BencodeError> {
        let end = self
            .rest
            .iter()
            .position(|&b| b == delim)
            .ok_or(BencodeError::UnexpectedEof)?;
        let head = &self.rest[..end];
        self.rest = &self.rest[end + 1..];
        Ok(head)
    }

    fn value(&mut self, depth: usize) -> Result<Value, BencodeError> {
        if depth > MAX_DEPTH {
            return Err(BencodeError::NestingTooDeep);
        }

        match self.peek()? {
            b'i' => self.integer(),
            b'l' => self.list(depth),
            b'd' => self.dict(depth),
            b'0'..=b'9' => self.bytes(),
            b => Err(BencodeError::UnexpectedByte(b)),
        }
    }

    fn integer(&mut self) -> Result<Value, BencodeError> {
        self.bump();
        let digits = self.until(b'e')?;

        let text = std::str::from_utf8(digits)
            .map_err(|_| BencodeError::InvalidInteger("not ascii".into()))?;

        if text.is_empty() || text == "-" {
            return Err(BencodeError::InvalidInteger("empty".into()));
        }
        // "i0e" is the only permitted zero; "-0" and padded forms would
        // break canonical round-tripping.
        if text.starts_with("-0") || (text.len() > 1 && text.starts_with('0')) {
            return Err(BencodeError::InvalidInteger("leading zero".into()));
        }

        let n: i64 = text
            .parse()
            .map_err(|_| BencodeError::InvalidInteger(text.into()))?;
        Ok(Value::Integer(n))
    }

    fn bytes(&mut self) -> Result<Value, BencodeError> {
        let digits = self.until(b':')?;

        let len: usize = std::str::from_utf8(digits)
            .ok()
            .filter(|s| s.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|s| s.parse().ok())
            .ok_or(BencodeError::InvalidStringLength)?;

        let raw = self.take(len)?;
        Ok(Value::Bytes(Bytes::copy_from_slice(raw)))
    }

    fn list(&mut self, depth: usize) -> Result<Value, BencodeError> {
        self.bump();
        let mut items = Vec::new();

        while self.peek()? != b'e' {
            items.push(self.value(depth + 1)?);
        }
        self.bump();

        Ok(Value::List(items))
    }

    fn dict(&mut self, depth: usize) -> Result<Value, BencodeError> {
        self.bump();
        let mut entries = BTreeMap::new();

        while self.peek()? != b'e' {
            let key = match self.value(depth + 1)? {
                Value::Bytes(b) => b,
                _ => return Err(BencodeError::InvalidKey),
            };
            let value = self.value(depth + 1)?;
            entries.insert(key, value);
        }
        self.bump();

        Ok(Value::Dict(entries))
    }
}
