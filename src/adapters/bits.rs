//! Bytes as bit vectors.

use crate::bijection::{Bijection, from_partial};
use crate::error::CodecError;
use crate::func::Func;

/// `Vec<u8> <-> Vec<bool>`, most significant bit first.
///
/// The inverse fails unless the number of bits is a multiple of 8.
///
/// # Examples
///
/// ```rust
/// use bijector::adapters::bit_vector;
/// use bijector::effect::Immediate;
///
/// let bits = bit_vector();
/// let unpacked = bits.apply::<Immediate>(vec![0b1010_0000]).unwrap();
///
/// assert_eq!(unpacked, [true, false, true, false, false, false, false, false]);
/// assert_eq!(bits.unapply::<Immediate>(unpacked), Ok(vec![0b1010_0000]));
/// assert!(bits.unapply::<Immediate>(vec![true]).is_err());
/// ```
#[must_use]
pub fn bit_vector() -> Bijection<
    Vec<u8>,
    Vec<bool>,
    impl Func<Vec<u8>, Vec<bool>, Error = CodecError>,
    impl Func<Vec<bool>, Vec<u8>, Error = CodecError>,
> {
    from_partial(|bytes: Vec<u8>| Ok(unpack(&bytes)), |bits: Vec<bool>| pack(&bits))
}

fn unpack(bytes: &[u8]) -> Vec<bool> {
    bytes
        .iter()
        .flat_map(|byte| (0..8).rev().map(move |shift| (byte >> shift) & 1 == 1))
        .collect()
}

fn pack(bits: &[bool]) -> Result<Vec<u8>, CodecError> {
    if !bits.len().is_multiple_of(8) {
        return Err(CodecError::new(format!(
            "{} bits do not form whole bytes",
            bits.len()
        )));
    }
    Ok(bits
        .chunks_exact(8)
        .map(|chunk| {
            chunk
                .iter()
                .fold(0_u8, |byte, &bit| (byte << 1) | u8::from(bit))
        })
        .collect())
}
