//! Resource cloning between two images.

use alloc::vec::Vec;

use log::{debug, info};

use crate::{errors::*, image::Image, resource::*};

/// Copies the allowed resources of a source image into a copy of a destination image.
///
/// The source image is only parsed as data, it is never loaded or executed.
/// All work happens on an in-memory copy of the destination; nothing is written until every step succeeded.
#[derive(Debug, Clone, Default)]
pub struct ResourceCloner {
    allow_list: AllowList,
}

impl ResourceCloner {
    pub fn new(allow_list: AllowList) -> Self { Self { allow_list } }

    /// Returns the resource types eligible for cloning.
    pub fn allow_list(&self) -> &AllowList { &self.allow_list }

    /// Clone the resources of the source image into a copy of the destination image.
    ///
    /// The resource directory of the destination is replaced by one holding exactly the allowed
    /// resources of the source, and the image checksum is recomputed.
    ///
    /// # Returns
    /// Returns the resulting image data, or an error naming the failing stage.
    pub fn clone_resources(&self, source: &[u8], destination: &[u8]) -> Result<Vec<u8>, CloneError> {
        let mut output = Image::parse(destination.to_vec()).map_err(CloneError::Destination)?;

        let tree = Image::parse(source)
            .and_then(|source| source.resource_tree(&self.allow_list))
            .map_err(CloneError::Source)?;
        info!(
            "read {} resources of {} types from source image",
            tree.len(),
            tree.categories().count()
        );

        let entries = tree.into_entries();
        for entry in entries.iter() {
            debug!(
                "cloning {} {:?} ({:#x?} bytes)",
                resource_type_name(entry.key().category).unwrap_or("?"),
                entry.key(),
                entry.size()
            );
        }
        output.set_resources(entries)?;

        let checksum = output.update_checksum()?;
        info!("updated image checksum to {:#010x}", checksum);

        Ok(output.into_data())
    }

    #[cfg(feature = "std")]
    /// Clone the resources of the source file into a copy of the destination file and write the result to the output path.
    ///
    /// The output file is written once, after all other steps succeeded.
    ///
    /// # Returns
    /// Returns an error if a file could not be read or written, or if cloning failed.
    pub fn clone_files<S, D, O>(&self, source: S, destination: D, output: O) -> Result<(), CloneError>
    where
        S: AsRef<std::path::Path>,
        D: AsRef<std::path::Path>,
        O: AsRef<std::path::Path>,
    {
        let source_data = std::fs::read(source.as_ref()).map_err(CloneError::SourceUnreadable)?;
        let destination_data =
            std::fs::read(destination.as_ref()).map_err(CloneError::DestinationUnreadable)?;

        let data = self.clone_resources(&source_data, &destination_data)?;

        std::fs::write(output.as_ref(), &data).map_err(CloneError::OutputUnwritable)?;
        info!("wrote {} bytes to {}", data.len(), output.as_ref().display());
        Ok(())
    }
}
