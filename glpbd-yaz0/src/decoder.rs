use byteorder::{BigEndian, ByteOrder};

use crate::{
    Yaz0Error,
    consts::{HEADER_SIZE, LONG_MATCH_BIAS, MAX_MATCH, YAZ0_MAGIC},
};

/// Reads the decompressed size from a Yaz0 header.
pub fn decompressed_size(data: &[u8]) -> Result<usize, Yaz0Error> {
    if data.len() < YAZ0_MAGIC.len() || data[..YAZ0_MAGIC.len()] != YAZ0_MAGIC {
        return Err(Yaz0Error::InvalidMagic);
    }

    if data.len() < HEADER_SIZE {
        return Err(Yaz0Error::Truncated {
            expected: HEADER_SIZE,
            produced: data.len(),
        });
    }

    Ok(BigEndian::read_u32(&data[4..8]) as usize)
}

pub fn decompress(data: &[u8]) -> Result<Vec<u8>, Yaz0Error> {
    let size = decompressed_size(data)?;

    let mut output = Vec::with_capacity(initial_capacity(size, data.len()));
    let mut reader = StreamReader {
        data,
        position: HEADER_SIZE,
        expected: size,
    };

    let mut code = 0u8;
    let mut bits_left = 0u8;

    while output.len() < size {
        if bits_left == 0 {
            code = reader.next(output.len())?;
            bits_left = 8;
        }

        if code & 0x80 != 0 {
            let byte = reader.next(output.len())?;
            output.push(byte);
        } else {
            let b1 = reader.next(output.len())?;
            let b2 = reader.next(output.len())?;

            let distance = ((((b1 & 0x0F) as usize) << 8) | b2 as usize) + 1;
            let length = match b1 >> 4 {
                0 => reader.next(output.len())? as usize + LONG_MATCH_BIAS,
                n => n as usize + 2,
            };

            if distance > output.len() {
                return Err(Yaz0Error::InvalidBackReference {
                    distance,
                    position: output.len(),
                });
            }

            let start = output.len() - distance;
            let length = length.min(size - output.len());

            // Source and destination may overlap, copy byte by byte.
            for i in 0..length {
                let byte = output[start + i];
                output.push(byte);
            }
        }

        code <<= 1;
        bits_left -= 1;
    }

    Ok(output)
}

/// Output reserved up front. The header size is untrusted, so the reservation
/// is capped by what the input could expand to with every chunk a maximal
/// back reference; the buffer grows past that on demand.
fn initial_capacity(size: usize, input_len: usize) -> usize {
    let payload = input_len.saturating_sub(HEADER_SIZE);
    size.min(payload.saturating_mul(MAX_MATCH / 2))
}

struct StreamReader<'a> {
    data: &'a [u8],
    position: usize,
    expected: usize,
}

impl StreamReader<'_> {
    #[inline(always)]
    fn next(&mut self, produced: usize) -> Result<u8, Yaz0Error> {
        let byte = *self.data.get(self.position).ok_or(Yaz0Error::Truncated {
            expected: self.expected,
            produced,
        })?;
        self.position += 1;

        Ok(byte)
    }
}
