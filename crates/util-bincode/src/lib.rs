// SPDX-License-Identifier: MIT

pub use bincode;
use bincode::config::Config;
use bincode::{de, error};

/// Decode `D` from `src`, rejecting any bytes left over after it
pub fn decode_whole<D: de::Decode<()>, C: Config>(
    src: &[u8],
    config: C,
) -> Result<D, error::DecodeError> {
    let (t, consumed) = bincode::decode_from_slice(src, config)?;

    if consumed != src.len() {
        return Err(bincode::error::DecodeError::Other("leftover bytes"));
    }

    Ok(t)
}

#[cfg(test)]
mod tests {
    use bincode::config;

    use super::decode_whole;

    #[test]
    fn rejects_trailing_bytes() {
        let mut bytes = bincode::encode_to_vec(7u32, config::standard()).expect("Can't fail");
        assert_eq!(
            decode_whole::<u32, _>(&bytes, config::standard()).expect("valid"),
            7
        );

        bytes.push(0);
        assert!(decode_whole::<u32, _>(&bytes, config::standard()).is_err());
    }
}
