//! Image checksum computation.
//!
//! The checksum is the 16-bit one's complement style sum of the image with the checksum field
//! treated as zero, plus the length of the image, as computed by `MapFileAndCheckSum`.

use core::ops::Range;

use log::debug;

use crate::{constants::*, errors::*};

/// Returns the offset of the first pe signature in the data.
///
/// The first occurrence is assumed to be the signature of the image header.
pub fn find_signature(data: &[u8]) -> Option<usize> {
    data.windows(PE_NT_SIGNATURE_BYTES.len()).position(|window| window == PE_NT_SIGNATURE_BYTES)
}

/// Compute the checksum of the data, treating the four bytes at the checksum offset as zero.
pub fn compute_checksum(data: &[u8], checksum_offset: usize) -> u32 {
    let field: Range<usize> = checksum_offset..checksum_offset.saturating_add(4);
    let byte = |index: usize| if field.contains(&index) { 0 } else { data[index] as u32 };

    let mut sum = 0u32;
    let mut index = 0;
    while index < data.len() {
        let low = byte(index);
        // odd trailing byte is padded with zero
        let high = if index + 1 < data.len() { byte(index + 1) } else { 0 };
        sum += low | (high << 8);
        sum = (sum & 0xffff) + (sum >> 16);
        index += 2;
    }
    sum = (sum & 0xffff) + (sum >> 16);

    (sum & 0xffff).wrapping_add(data.len() as u32)
}

/// Recompute the checksum of the image and overwrite the checksum field.
///
/// # Returns
/// Returns the new checksum, or an error if the data contains no pe signature
/// or ends before the checksum field.
pub fn patch_checksum(data: &mut [u8]) -> Result<u32, ChecksumError> {
    let signature = find_signature(data).ok_or(ChecksumError::SignatureNotFound)?;
    let checksum_offset = signature + PE_CHECKSUM_OFFSET as usize;
    let header_end = checksum_offset + 4;
    if data.len() < header_end {
        return Err(ChecksumError::Truncated(data.len() as u64, header_end as u64));
    }

    let checksum = compute_checksum(data, checksum_offset);
    let previous = u32::from_le_bytes([
        data[checksum_offset],
        data[checksum_offset + 1],
        data[checksum_offset + 2],
        data[checksum_offset + 3],
    ]);
    debug!(
        "checksum at {:#x?}: {:#x?} -> {:#x?}",
        checksum_offset, previous, checksum
    );
    data[checksum_offset..header_end].copy_from_slice(&checksum.to_le_bytes());
    Ok(checksum)
}
