use std::io::BufRead;

use crate::body_parser::{BodyParseError, BodyParseOutput, BodyParser};

//
//
//
/// Consumes every available window byte and checks the running total against
/// the declared length. More bytes than declared is fatal, fewer means the
/// caller should offer more input.
#[derive(Debug, Clone, Default)]
pub struct ContentLengthBodyParser {
    declared: usize,
    consumed: usize,
}

impl ContentLengthBodyParser {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn set_length(&mut self, length: usize) {
        self.declared = length;
        self.consumed = 0;
    }
    pub fn get_declared(&self) -> usize {
        self.declared
    }
    pub fn get_consumed(&self) -> usize {
        self.consumed
    }
}

impl BodyParser for ContentLengthBodyParser {
    fn parse<R: BufRead>(
        &mut self,
        r: &mut R,
        body_buf: &mut Vec<u8>,
    ) -> Result<BodyParseOutput, BodyParseError> {
        let n = r.read_to_end(body_buf).map_err(BodyParseError::ReadError)?;
        self.consumed += n;

        if self.consumed > self.declared {
            return Err(BodyParseError::BodyLengthMismatch {
                declared: self.declared,
                actual: self.consumed,
            });
        }
        if self.consumed == self.declared {
            return Ok(BodyParseOutput::Completed(n));
        }
        Ok(BodyParseOutput::Partial(n))
    }
}
