//! Packed big-endian byte layouts.
//!
//! Batches of digests, packed campaign rows and proofs travel as flat byte
//! strings. The writer builds them and the readers take
//! them apart again without ever panicking on short input.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BytesError {
    #[error("Reading {len} bytes at offset {offset} exceeds input of length {input_len}")]
    OutOfBounds {
        offset: usize,
        len: usize,
        input_len: usize,
    },
    #[error("Input length {input_len} is not a multiple of 32")]
    NotWordAligned { input_len: usize },
}

/// Builder for packed byte strings
#[derive(Debug, Default, Clone)]
pub struct BytesBuffer {
    data: Vec<u8>,
}

impl BytesBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_u64(mut self, value: u64) -> Self {
        self.data.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn write_u32(mut self, value: u32) -> Self {
        self.data.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn write_bytes(mut self, value: &[u8]) -> Self {
        self.data.extend_from_slice(value);
        self
    }

    /// Returns the packed bytes
    pub fn invoke(self) -> Vec<u8> {
        self.data
    }
}

pub fn read_bytes(input: &[u8], offset: usize, len: usize) -> Result<&[u8], BytesError> {
    let end = offset.checked_add(len).ok_or(BytesError::OutOfBounds {
        offset,
        len,
        input_len: input.len(),
    })?;
    input.get(offset..end).ok_or(BytesError::OutOfBounds {
        offset,
        len,
        input_len: input.len(),
    })
}

fn read_array<const N: usize>(input: &[u8], offset: usize) -> Result<[u8; N], BytesError> {
    let mut out = [0u8; N];
    out.copy_from_slice(read_bytes(input, offset, N)?);
    Ok(out)
}

pub fn read_u64(input: &[u8], offset: usize) -> Result<u64, BytesError> {
    Ok(u64::from_be_bytes(read_array(input, offset)?))
}

pub fn read_u32(input: &[u8], offset: usize) -> Result<u32, BytesError> {
    Ok(u32::from_be_bytes(read_array(input, offset)?))
}

/// Splits a packed list of words into its elements
pub fn to_bytes32_array(input: &[u8]) -> Result<Vec<[u8; 32]>, BytesError> {
    if input.len() % 32 != 0 {
        return Err(BytesError::NotWordAligned {
            input_len: input.len(),
        });
    }
    Ok(input
        .chunks_exact(32)
        .map(|chunk| {
            let mut word = [0u8; 32];
            word.copy_from_slice(chunk);
            word
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(size: usize) -> Vec<u8> {
        (0..size).map(|i| (i * 7 + 3) as u8).collect()
    }

    #[test]
    fn bytes_buffer_works() {
        let packed = BytesBuffer::new()
            .write_bytes(&[0xaa; 20])
            .write_u64(5)
            .write_u32(6)
            .write_bytes(b"xy")
            .invoke();
        assert_eq!(packed.len(), 20 + 8 + 4 + 2);
        assert_eq!(&packed[..20], &[0xaa; 20]);
        assert_eq!(packed[20..28], [0, 0, 0, 0, 0, 0, 0, 5]);
        assert_eq!(packed[28..32], [0, 0, 0, 6]);
        assert_eq!(&packed[32..], b"xy");
        assert_eq!(read_u64(&packed, 20).unwrap(), 5);
        assert_eq!(read_u32(&packed, 28).unwrap(), 6);
    }

    #[test]
    fn to_bytes32_array_works() {
        let input = sample(7 * 32);
        let words = to_bytes32_array(&input).unwrap();
        assert_eq!(words.len(), 7);
        for (i, word) in words.iter().enumerate() {
            assert_eq!(word.as_slice(), &input[i * 32..i * 32 + 32]);
        }

        assert_eq!(to_bytes32_array(&[]).unwrap(), Vec::<[u8; 32]>::new());
        let err = to_bytes32_array(&sample(33)).unwrap_err();
        assert_eq!(err, BytesError::NotWordAligned { input_len: 33 });
    }

    #[test]
    fn read_bytes_works() {
        let input = sample(10 * 32);
        let offset = 5;
        let length = 16;
        let result = read_bytes(&input, offset, length).unwrap();
        assert_eq!(result, &input[offset..offset + length]);

        // up to the end
        let result = read_bytes(&input, 300, 20).unwrap();
        assert_eq!(result.len(), 20);
    }

    #[test]
    fn readers_reject_short_input() {
        let input = sample(40);
        assert_eq!(
            read_u64(&input, 33).unwrap_err(),
            BytesError::OutOfBounds {
                offset: 33,
                len: 8,
                input_len: 40
            }
        );
        assert!(read_u32(&input, 36).unwrap() > 0);
        assert!(read_bytes(&input, usize::MAX, 2).is_err());
    }
}
