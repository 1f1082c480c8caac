//! Fixed-width little-endian readers

use super::cursor::ByteCursor;
use crate::error::DecodeError;

/// Parse a u8
pub fn u8_parser(cursor: &mut ByteCursor<'_>) -> Result<u8, DecodeError> {
    Ok(cursor.take_array::<1>()?[0])
}

macro_rules! le_parsers {
    ($($name:ident => $ty:ty),* $(,)?) => {
        $(
            #[doc = concat!("Parse a little-endian `", stringify!($ty), "`")]
            pub fn $name(cursor: &mut ByteCursor<'_>) -> Result<$ty, DecodeError> {
                Ok(<$ty>::from_le_bytes(cursor.take_array()?))
            }
        )*
    };
}

le_parsers! {
    u16_le => u16,
    u32_le => u32,
    u64_le => u64,
    i16_le => i16,
    i32_le => i32,
    i64_le => i64,
    f32_le => f32,
    f64_le => f64,
}
