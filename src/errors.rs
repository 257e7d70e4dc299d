//! Errors specific to reading, writing or cloning resources of a PE image.

use alloc::string::String;

#[cfg(feature = "std")]
use std::io::Error as IOError;

/// Error that can occur when reading and parsing bytes.
#[derive(Debug)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[cfg_attr(feature = "std", error("{0}"))]
pub struct ReadError(pub String);

/// Errors that can occur when reading a PE image or its resource directory.
#[derive(Debug)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum ImageReadError {
    #[cfg_attr(feature = "std", error("invalid bytes: {0}"))]
    InvalidBytes(ReadError),
    #[cfg_attr(feature = "std", error("unsupported image: {0}"))]
    UnsupportedImage(String),
    #[cfg_attr(feature = "std", error("invalid header: {0}"))]
    InvalidHeader(String),
    #[cfg_attr(feature = "std", error("malformed resource directory: {0}"))]
    MalformedResourceDirectory(String),
}
impl From<ReadError> for ImageReadError {
    fn from(error: ReadError) -> Self { ImageReadError::InvalidBytes(error) }
}

/// Errors that can occur when writing a resource directory into a PE image.
#[derive(Debug)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum ImageWriteError {
    #[cfg_attr(feature = "std", error("not enough space in file header"))]
    NotEnoughSpaceInHeader,
    #[cfg_attr(feature = "std", error("section points outside image: {0} > {1}"))]
    InvalidSectionRange(u64, u64),
    #[cfg_attr(feature = "std", error("resource layout exceeds format limits: {0}"))]
    LayoutOverflow(String),
    #[cfg_attr(feature = "std", error("image has no resource data directory slot"))]
    MissingDataDirectory,
}

/// Errors that can occur when recomputing the image checksum.
#[derive(Debug)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum ChecksumError {
    #[cfg_attr(feature = "std", error("no pe signature found"))]
    SignatureNotFound,
    #[cfg_attr(
        feature = "std",
        error("image truncated before end of header: {0} < {1}")
    )]
    Truncated(u64, u64),
}

/// Errors that can occur while cloning resources, tagged with the failing stage.
#[derive(Debug)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum CloneError {
    #[cfg(feature = "std")]
    #[error("source unreadable: {0}")]
    SourceUnreadable(IOError),
    #[cfg(feature = "std")]
    #[error("destination unreadable: {0}")]
    DestinationUnreadable(IOError),
    #[cfg(feature = "std")]
    #[error("output unwritable: {0}")]
    OutputUnwritable(IOError),
    #[cfg_attr(feature = "std", error("source image: {0}"))]
    Source(ImageReadError),
    #[cfg_attr(feature = "std", error("destination image: {0}"))]
    Destination(ImageReadError),
    #[cfg_attr(feature = "std", error("resource write: {0}"))]
    ResourceWrite(ImageWriteError),
    #[cfg_attr(feature = "std", error("checksum: {0}"))]
    Checksum(ChecksumError),
}
impl From<ImageWriteError> for CloneError {
    fn from(error: ImageWriteError) -> Self { CloneError::ResourceWrite(error) }
}
impl From<ChecksumError> for CloneError {
    fn from(error: ChecksumError) -> Self { CloneError::Checksum(error) }
}
