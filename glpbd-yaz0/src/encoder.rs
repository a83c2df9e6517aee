use byteorder::{BigEndian, ByteOrder};

use crate::{
    Yaz0Error,
    consts::{
        HEADER_SIZE, LONG_MATCH_BIAS, MAX_MATCH, MIN_MATCH, SHORT_MATCH_MAX, WINDOW_SIZE,
        YAZ0_MAGIC,
    },
};

const HASH_BITS: u32 = 14;
const HASH_SIZE: usize = 1 << HASH_BITS;
const MAX_CHAIN: usize = 256;
const NO_POSITION: u32 = u32::MAX;

/// Compresses `data` into a Yaz0 stream using greedy hash-chain matching.
pub fn compress(data: &[u8]) -> Result<Vec<u8>, Yaz0Error> {
    let size: u32 = data
        .len()
        .try_into()
        .map_err(|_| Yaz0Error::InputTooLarge(data.len()))?;

    let mut output = Vec::with_capacity(HEADER_SIZE + data.len() + data.len() / 8 + 1);

    let mut header = [0u8; HEADER_SIZE];
    header[..YAZ0_MAGIC.len()].copy_from_slice(&YAZ0_MAGIC);
    BigEndian::write_u32(&mut header[4..8], size);
    output.extend_from_slice(&header);

    let mut matcher = MatchFinder::new(data);
    let mut position = 0;

    while position < data.len() {
        let code_index = output.len();
        output.push(0);

        for bit in 0..8 {
            if position >= data.len() {
                break;
            }

            let (distance, length) = matcher.find(position);

            if length >= MIN_MATCH {
                let back = distance - 1;

                if length <= SHORT_MATCH_MAX {
                    output.push((((length - 2) as u8) << 4) | (back >> 8) as u8);
                    output.push((back & 0xFF) as u8);
                } else {
                    output.push((back >> 8) as u8);
                    output.push((back & 0xFF) as u8);
                    output.push((length - LONG_MATCH_BIAS) as u8);
                }

                for offset in position..position + length {
                    matcher.insert(offset);
                }
                position += length;
            } else {
                output[code_index] |= 0x80 >> bit;
                output.push(data[position]);

                matcher.insert(position);
                position += 1;
            }
        }
    }

    log::debug!(
        "Yaz0 compressed {} bytes into {} bytes",
        data.len(),
        output.len()
    );

    Ok(output)
}

struct MatchFinder<'a> {
    data: &'a [u8],
    head: Vec<u32>,
    prev: Vec<u32>,
}

impl<'a> MatchFinder<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            head: vec![NO_POSITION; HASH_SIZE],
            prev: vec![NO_POSITION; data.len()],
        }
    }

    #[inline(always)]
    fn hash(&self, position: usize) -> usize {
        let key = (self.data[position] as u32) << 16
            | (self.data[position + 1] as u32) << 8
            | self.data[position + 2] as u32;

        (key.wrapping_mul(0x9E37_79B1) >> (32 - HASH_BITS)) as usize
    }

    fn insert(&mut self, position: usize) {
        if position + MIN_MATCH > self.data.len() {
            return;
        }

        let hash = self.hash(position);
        self.prev[position] = self.head[hash];
        self.head[hash] = position as u32;
    }

    /// Returns `(distance, length)` of the longest match for `position`,
    /// or a zero length when nothing usable precedes it.
    fn find(&self, position: usize) -> (usize, usize) {
        if position + MIN_MATCH > self.data.len() {
            return (0, 0);
        }

        let max_length = MAX_MATCH.min(self.data.len() - position);
        let window_start = position.saturating_sub(WINDOW_SIZE);

        let mut best = (0, 0);
        let mut candidate = self.head[self.hash(position)];
        let mut chain = 0;

        while candidate != NO_POSITION && chain < MAX_CHAIN {
            let start = candidate as usize;
            if start < window_start {
                break;
            }

            let length = self.data[start..]
                .iter()
                .zip(&self.data[position..position + max_length])
                .take_while(|(a, b)| a == b)
                .count();

            if length > best.1 {
                best = (position - start, length);
                if length == max_length {
                    break;
                }
            }

            candidate = self.prev[start];
            chain += 1;
        }

        best
    }
}
