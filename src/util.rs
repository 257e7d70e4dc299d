use alloc::{format, string::ToString};
use core::{
    any::type_name,
    mem::size_of,
    ops::{Add, Rem, Sub},
};

use zerocopy::{FromBytes, Immutable, IntoBytes};

use crate::ReadError;

pub fn read<T: FromBytes + Copy>(resource: &[u8]) -> Result<T, ReadError> {
    T::read_from_prefix(resource)
        .map_err(|_| ReadError(type_name::<T>().to_string()))
        .map(|(value, _)| value)
}

/// Read a value at the given offset, failing instead of panicking if it lies outside the data.
pub fn read_at<T: FromBytes + Copy>(data: &[u8], offset: u64) -> Result<T, ReadError> {
    let rest = usize::try_from(offset).ok().and_then(|offset| data.get(offset..)).ok_or_else(|| {
        ReadError(format!(
            "{} at {:#x} outside data of size {:#x}",
            type_name::<T>(),
            offset,
            data.len()
        ))
    })?;
    read::<T>(rest).map_err(|_| {
        ReadError(format!(
            "{} at {:#x} ({:#x} bytes) outside data of size {:#x}",
            type_name::<T>(),
            offset,
            size_of::<T>(),
            data.len()
        ))
    })
}

/// Overwrite the bytes at the given offset with the value.
/// The caller guarantees the range was validated beforehand.
pub fn write_at<T: IntoBytes + Immutable>(data: &mut [u8], offset: u64, value: &T) {
    let bytes = value.as_bytes();
    let offset = offset as usize;
    data[offset..offset + bytes.len()].copy_from_slice(bytes);
}

pub fn aligned_to<T: Add<Output = T> + Sub<Output = T> + Rem<Output = T> + Eq + Copy + Default>(
    value: T, alignment: T,
) -> T {
    if alignment == T::default() || value % alignment == T::default() {
        return value;
    }
    value + alignment - (value % alignment)
}
