//! Portable executable image representation.
//!
//! See <https://learn.microsoft.com/en-us/windows/win32/debug/pe-format> for more information.

use alloc::{borrow::Cow, format, string::ToString, vec::Vec};

use ahash::RandomState;
use indexmap::IndexMap;
use log::{debug, error, info, warn};

use crate::{checksum::*, constants::*, errors::*, resource::*, types::*, util::*};

/// Image data directory type enumeration.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum DataDirectoryType {
    ExportTable,
    ImportTable,
    ResourceTable,
    ExceptionTable,
    CertificateTable,
    BaseRelocationTable,
    Debug,
    Architecture,
    GlobalPtr,
    TLSTable,
    LoadConfigTable,
    BoundImport,
    IAT,
    DelayImportDescriptor,
    CLRRuntimeHeader,
    Reserved,
}

/// Where a new resource directory is placed in an image.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum ResourcePlacement {
    /// Overwrite the existing resource section, which is large enough.
    InPlace(usize),
    /// Grow the existing resource section, which is the last section of the image.
    Extend(usize),
    /// Add a new section after all other sections and data.
    Append,
}

/// Portable executable image representation.
///
/// This struct is the main entry point for parsing, querying and updating a portable executable image.
/// Borrowed images are only ever read; modifications copy the data into an owned buffer first.
#[derive(Debug, Clone)]
pub struct Image<'a> {
    pub(crate) image: Cow<'a, [u8]>,

    pub(crate) coff_header:           CoffHeader,
    pub(crate) standard_header:       StandardHeader,
    pub(crate) windows_header:        GenericWindowsHeader,
    pub(crate) header_data_directory: IndexMap<DataDirectoryType, ImageDataDirectory, RandomState>,
    pub(crate) section_table:         Vec<SectionHeader>,

    pe_signature_offset:       u64,
    coff_header_offset:        u64,
    standard_header_offset:    u64,
    optional_header_dd_offset: u64,
    section_table_offset:      u64,
    directories_offset:        u64,
}

impl<'a> Image<'a> {
    /// Parse a portable executable image from a byte slice.
    ///
    /// # Returns
    /// Returns the `Image`, or an error if the byte slice is not a valid portable executable image or is missing required headers.
    pub fn parse<R: Into<Cow<'a, [u8]>>>(image: R) -> Result<Self, ImageReadError> {
        let image = image.into();

        let pe_dos_magic = read_at::<u16>(&image, 0)
            .map_err(|_| ImageReadError::UnsupportedImage("no dos magic".into()))?;
        debug!("pe_dos_magic: {:#x?}", pe_dos_magic);
        if pe_dos_magic != PE_DOS_MAGIC {
            return Err(ImageReadError::UnsupportedImage("no dos magic".into()));
        }

        let pe_signature_offset = read_at::<u32>(&image, PE_PTR_OFFSET as u64)? as u64;
        debug!("pe_signature_offset: {:#x?}", pe_signature_offset);

        let pe_signature = read_at::<u32>(&image, pe_signature_offset)
            .map_err(|_| ImageReadError::UnsupportedImage("no pe signature".into()))?;
        debug!("pe_signature: {:#x?}", pe_signature);
        if pe_signature != PE_NT_SIGNATURE {
            return Err(ImageReadError::UnsupportedImage("no pe signature".into()));
        }

        let coff_header_offset = pe_signature_offset + 4;
        let coff_header = read_at::<CoffHeader>(&image, coff_header_offset)?;
        debug!("{:#x?}: {:#x?}", coff_header_offset, coff_header);
        if coff_header.size_of_optional_header < 24 {
            return Err(ImageReadError::InvalidHeader("optional header too small".into()));
        }

        let standard_header_offset = coff_header_offset + PE_COFF_HEADER_SIZE as u64;
        let standard_header = read_at::<StandardHeader>(&image, standard_header_offset)?;
        debug!("{:#x?}: {:#x?}", standard_header_offset, standard_header);

        let size_of_optional_header = coff_header.size_of_optional_header as u64;
        let (windows_header_offset, windows_header, optional_header_dd_offset) = {
            if standard_header.magic == PE_32_MAGIC && size_of_optional_header >= 96 {
                let windows_header_offset = standard_header_offset + 28;
                let windows_header = read_at::<WindowsHeader<u32>>(&image, windows_header_offset)?;
                (
                    windows_header_offset,
                    GenericWindowsHeader::WindowsHeader32(windows_header),
                    standard_header_offset + 96,
                )
            } else if standard_header.magic == PE_64_MAGIC && size_of_optional_header >= 112 {
                let windows_header_offset = standard_header_offset + 24;
                let windows_header = read_at::<WindowsHeader<u64>>(&image, windows_header_offset)?;
                (
                    windows_header_offset,
                    GenericWindowsHeader::WindowsHeader64(windows_header),
                    standard_header_offset + 112,
                )
            } else if standard_header.magic != PE_32_MAGIC && standard_header.magic != PE_64_MAGIC {
                let magic = standard_header.magic;
                return Err(ImageReadError::UnsupportedImage(format!(
                    "unknown optional header magic {:#x}",
                    magic
                )));
            } else {
                return Err(ImageReadError::InvalidHeader("invalid optional header".into()));
            }
        };
        debug!("{:#x?}: {:#x?}", windows_header_offset, windows_header);

        if image.len() as u64 <= optional_header_dd_offset {
            return Err(ImageReadError::InvalidHeader(
                "image truncated after optional header".into(),
            ));
        }

        // only read as many data directories as fit into the optional header
        let section_table_offset = standard_header_offset + size_of_optional_header;
        let available_directories =
            section_table_offset.saturating_sub(optional_header_dd_offset) / PE_DATA_DIRECTORY_SIZE as u64;
        let number_of_rva_and_sizes = windows_header.number_of_rva_and_sizes() as u64;
        if number_of_rva_and_sizes > available_directories {
            warn!(
                "optional header declares {} data directories but only has room for {}",
                number_of_rva_and_sizes, available_directories
            );
        }
        let number_of_rva_and_sizes = number_of_rva_and_sizes.min(available_directories);

        debug!("optional_header_dd_offset: {:#x?}", optional_header_dd_offset);
        let mut header_data_directory =
            IndexMap::<DataDirectoryType, ImageDataDirectory, _>::with_hasher(RandomState::new());
        use DataDirectoryType::*;
        for (index, &header) in [
            ExportTable,
            ImportTable,
            ResourceTable,
            ExceptionTable,
            CertificateTable,
            BaseRelocationTable,
            Debug,
            Architecture,
            GlobalPtr,
            TLSTable,
            LoadConfigTable,
            BoundImport,
            IAT,
            DelayImportDescriptor,
            CLRRuntimeHeader,
            Reserved,
        ]
        .iter()
        .enumerate()
        {
            if (index as u64) < number_of_rva_and_sizes {
                let offset = optional_header_dd_offset + (index as u64 * PE_DATA_DIRECTORY_SIZE as u64);
                let data = read_at::<ImageDataDirectory>(&image, offset)?;
                header_data_directory.insert(header, data);
                debug!("{:#x?}: {:?}: {:#x?}", offset, header, data);
            }
        }

        let mut section_table = Vec::new();
        for index in 0..coff_header.number_of_sections as u64 {
            let section_header_offset = section_table_offset + index * PE_SECTION_HEADER_SIZE as u64;
            let section_header = read_at::<SectionHeader>(&image, section_header_offset)?;
            debug!(
                "{:#x?}: {}: {:#x?}",
                section_header_offset,
                section_header.name().unwrap_or("?".to_string()),
                section_header
            );
            section_table.push(section_header);
        }

        let directories_offset =
            section_table_offset + section_table.len() as u64 * PE_SECTION_HEADER_SIZE as u64;

        Ok(Self {
            image,
            coff_header,
            standard_header,
            windows_header,
            header_data_directory,
            section_table,
            pe_signature_offset,
            coff_header_offset,
            standard_header_offset,
            optional_header_dd_offset,
            section_table_offset,
            directories_offset,
        })
    }

    /// Read the resource directory of the image, keeping only resource types in the allow list.
    ///
    /// # Returns
    /// Returns an empty tree if the image has no resource directory,
    /// or an error if the resource directory is malformed.
    pub fn resource_tree(&self, allow_list: &AllowList) -> Result<ResourceTree, ImageReadError> {
        let directory = match self.data_directory(DataDirectoryType::ResourceTable) {
            Some(directory) if directory.virtual_address > 0 && directory.size > 0 => *directory,
            _ => {
                debug!("image has no resource directory");
                return Ok(ResourceTree::default());
            }
        };
        let virtual_address = directory.virtual_address;
        let offset = self.rva_to_offset(virtual_address).ok_or_else(|| {
            ImageReadError::MalformedResourceDirectory(format!(
                "resource directory address {:#x} not backed by any section",
                virtual_address
            ))
        })?;
        debug!("found resource directory at {:#x?} ({:#x?})", virtual_address, offset);
        ResourceTree::parse(self, offset, allow_list)
    }

    /// Replace the resource directory of the image with one holding exactly the given entries.
    ///
    /// See [`Image::set_resource_tree`] for how the directory is placed.
    pub fn set_resources<I: IntoIterator<Item = ResourceEntry>>(
        &mut self, entries: I,
    ) -> Result<(), ImageWriteError> {
        self.set_resource_tree(&ResourceTree::from_entries(entries))
    }

    /// Set the resource directory of the image.
    ///
    /// This will update the resource data directory and the resource section.
    /// If a section containing a resource directory already exists, it will be reused if the following conditions are met:
    /// - The section is not used by other directories and the resource directory starts at the section start.
    /// - The new directory fits into the section, or the section is the last section in the image and can be extended.
    ///
    /// Otherwise, the existing section will be kept intact and a new section will be added after all other data at the end of the image.
    /// The data of all other sections is never moved or modified.
    ///
    /// # Returns
    /// Returns an error in the following cases:
    /// - There is not enough space in the image header to add a new section.
    /// - A section points to data outside the image.
    /// - The directory cannot be represented within the address limits of the format.
    pub fn set_resource_tree(&mut self, tree: &ResourceTree) -> Result<(), ImageWriteError> {
        if !self.header_data_directory.contains_key(&DataDirectoryType::ResourceTable) {
            error!(
                "image only has {} data directories, cannot add a resource directory",
                self.header_data_directory.len()
            );
            return Err(ImageWriteError::MissingDataDirectory);
        }

        let image_size = self.image.len() as u64;
        for section in self.section_table.iter() {
            if section.size_of_raw_data > 0 && section.raw_data_end() > image_size {
                return Err(ImageWriteError::InvalidSectionRange(section.raw_data_end(), image_size));
            }
        }

        let size = tree.size()?;
        debug!("new resource directory size: {:#x?} ({} entries)", size, tree.len());

        match self.resource_placement(size) {
            ResourcePlacement::InPlace(index) => self.write_resources_in_place(index, tree),
            ResourcePlacement::Extend(index) => self.write_resources_extended(index, tree),
            ResourcePlacement::Append => self.write_resources_appended(tree),
        }
    }

    fn resource_placement(&self, size: u32) -> ResourcePlacement {
        let directory = match self.data_directory(DataDirectoryType::ResourceTable) {
            Some(directory) if directory.virtual_address > 0 && directory.size > 0 => *directory,
            _ => {
                debug!("no existing resource directory, adding new resource section");
                return ResourcePlacement::Append;
            }
        };
        let virtual_address = directory.virtual_address;
        let Some(index) = self.section_table.iter().position(|section| section.contains_rva(virtual_address))
        else {
            warn!(
                "existing resource directory at {:#x?} is not inside any section, adding new resource section",
                virtual_address
            );
            return ResourcePlacement::Append;
        };
        let section = self.section_table[index];
        debug!(
            "found existing resource directory in {} section: {:#x?}",
            section.name().unwrap_or("?".to_string()),
            section
        );

        if section.virtual_address != virtual_address {
            debug!("resource directory does not start at the section start, keeping section intact");
            return ResourcePlacement::Append;
        }
        for (header, directory) in self.header_data_directory.iter() {
            if header != &DataDirectoryType::ResourceTable
                && directory.virtual_address > 0
                && section.contains_rva(directory.virtual_address)
            {
                info!("resource section also used by data directory {:?}", header);
                warn!("resource section used by multiple data directories can indicate a packed executable");
                return ResourcePlacement::Append;
            }
        }

        let capacity = section.size_of_raw_data.min(section.mapped_size());
        if size <= capacity {
            debug!(
                "existing section size is large enough and can be reused ({:#x?} >= {:#x?})",
                capacity, size
            );
            return ResourcePlacement::InPlace(index);
        }

        let is_last_in_file = section.raw_data_end() == self.image.len() as u64
            && self.section_table.iter().enumerate().all(|(other_index, other)| {
                other_index == index
                    || other.size_of_raw_data == 0
                    || other.raw_data_end() <= section.pointer_to_raw_data as u64
            });
        let is_last_in_memory = self
            .section_table
            .iter()
            .enumerate()
            .all(|(other_index, other)| other_index == index || other.virtual_address < section.virtual_address);
        if is_last_in_file && is_last_in_memory {
            debug!(
                "existing section is the last section and can be extended ({:#x?} < {:#x?})",
                capacity, size
            );
            return ResourcePlacement::Extend(index);
        }

        debug!(
            "existing resource section size is too small and followed by other sections or data ({:#x?} < {:#x?})",
            capacity, size
        );
        ResourcePlacement::Append
    }

    fn write_resources_in_place(&mut self, index: usize, tree: &ResourceTree) -> Result<(), ImageWriteError> {
        let section = self.section_table[index];
        let data = tree.build(section.virtual_address)?;
        debug!("overwriting resource section in place");

        let start = section.pointer_to_raw_data as usize;
        let end = section.raw_data_end() as usize;
        let image = self.image.to_mut();
        image[start..start + data.len()].copy_from_slice(&data);
        image[start + data.len()..end].fill(0);

        self.set_data_directory(DataDirectoryType::ResourceTable, ImageDataDirectory {
            virtual_address: section.virtual_address,
            size:            data.len() as u32,
        });
        Ok(())
    }

    fn write_resources_extended(&mut self, index: usize, tree: &ResourceTree) -> Result<(), ImageWriteError> {
        let mut section = self.section_table[index];
        let data = tree.build(section.virtual_address)?;
        let size = data.len() as u32;
        let raw_size = aligned_to(size as u64, self.windows_header.file_alignment() as u64);
        let image_end = aligned_to(
            section.virtual_address as u64 + size as u64,
            self.windows_header.section_alignment() as u64,
        );
        if section.pointer_to_raw_data as u64 + raw_size > u32::MAX as u64 || image_end > u32::MAX as u64 {
            return Err(ImageWriteError::LayoutOverflow(format!(
                "extended resource section of {:#x} bytes exceeds the address space",
                raw_size
            )));
        }
        debug!("extending resource section to {:#x?} bytes", raw_size);

        let start = section.pointer_to_raw_data as usize;
        let image = self.image.to_mut();
        image.truncate(start);
        image.extend_from_slice(&data);
        image.resize(start + raw_size as usize, 0);

        section.size_of_raw_data = raw_size as u32;
        section.virtual_size = size;
        self.set_section_header(index, section);
        self.set_size_of_image(self.windows_header.size_of_image().max(image_end as u32));
        self.set_data_directory(DataDirectoryType::ResourceTable, ImageDataDirectory {
            virtual_address: section.virtual_address,
            size,
        });
        Ok(())
    }

    fn write_resources_appended(&mut self, tree: &ResourceTree) -> Result<(), ImageWriteError> {
        let size = tree.size()?;
        let file_alignment = self.windows_header.file_alignment() as u64;
        let section_alignment = self.windows_header.section_alignment() as u64;

        let first_section_start = self
            .section_table
            .iter()
            .filter(|section| section.size_of_raw_data > 0)
            .map(|section| section.pointer_to_raw_data as u64)
            .min()
            .unwrap_or(self.image.len() as u64);
        let header_end = first_section_start
            .min(self.windows_header.size_of_headers() as u64)
            .min(self.image.len() as u64);
        let header_offset = self.directories_offset;
        let available_space = header_end.saturating_sub(header_offset);
        debug!("directories offset: {:#x?}", header_offset);
        debug!("available header space: {:#x?}", available_space);
        if available_space < PE_SECTION_HEADER_SIZE as u64 {
            error!(
                "not enough space in header to add new section ({} > {})",
                PE_SECTION_HEADER_SIZE, available_space
            );
            return Err(ImageWriteError::NotEnoughSpaceInHeader);
        }
        let header_slot =
            &self.image[header_offset as usize..(header_offset + PE_SECTION_HEADER_SIZE as u64) as usize];
        if header_slot.iter().any(|&byte| byte != 0) {
            error!("header space after the section table at {:#x?} is in use", header_offset);
            return Err(ImageWriteError::NotEnoughSpaceInHeader);
        }

        let virtual_address = aligned_to(
            self.section_table
                .iter()
                .map(|section| section.virtual_address as u64 + section.mapped_size() as u64)
                .max()
                .unwrap_or(self.windows_header.size_of_headers() as u64),
            section_alignment,
        );
        let pointer_to_raw_data = aligned_to(self.image.len() as u64, file_alignment);
        let raw_size = aligned_to(size as u64, file_alignment);
        let image_end = aligned_to(virtual_address + size as u64, section_alignment);
        if pointer_to_raw_data + raw_size > u32::MAX as u64 || image_end > u32::MAX as u64 {
            return Err(ImageWriteError::LayoutOverflow(format!(
                "new resource section at {:#x} ({:#x}) with {:#x} bytes exceeds the address space",
                pointer_to_raw_data, virtual_address, raw_size
            )));
        }
        if self.coff_header.number_of_sections == u16::MAX {
            return Err(ImageWriteError::LayoutOverflow("too many sections".into()));
        }

        let data = tree.build(virtual_address as u32)?;
        debug!(
            "adding new resource section at {:#x?} ({:#x?}) with {:#x?} bytes",
            pointer_to_raw_data, virtual_address, raw_size
        );

        let image = self.image.to_mut();
        image.resize(pointer_to_raw_data as usize, 0);
        image.extend_from_slice(&data);
        image.resize((pointer_to_raw_data + raw_size) as usize, 0);

        let section = SectionHeader {
            name: u64::from_le_bytes(*RESOURCE_SECTION_NAME),
            virtual_size: size,
            virtual_address: virtual_address as u32,
            size_of_raw_data: raw_size as u32,
            pointer_to_raw_data: pointer_to_raw_data as u32,
            characteristics: IMAGE_SCN_CNT_INITIALIZED_DATA | IMAGE_SCN_MEM_READ,
            ..SectionHeader::default()
        };
        let index = self.section_table.len();
        self.set_section_header(index, section);
        self.directories_offset += PE_SECTION_HEADER_SIZE as u64;

        self.coff_header.number_of_sections += 1;
        let coff_header = self.coff_header;
        write_at(self.image.to_mut(), self.coff_header_offset, &coff_header);

        self.set_size_of_image(self.windows_header.size_of_image().max(image_end as u32));
        self.set_data_directory(DataDirectoryType::ResourceTable, ImageDataDirectory {
            virtual_address: virtual_address as u32,
            size,
        });
        Ok(())
    }

    fn set_data_directory(&mut self, directory: DataDirectoryType, data: ImageDataDirectory) {
        let offset = self.optional_header_dd_offset + directory as u64 * PE_DATA_DIRECTORY_SIZE as u64;
        write_at(self.image.to_mut(), offset, &data);
        self.header_data_directory.insert(directory, data);
    }

    fn set_section_header(&mut self, index: usize, section: SectionHeader) {
        let offset = self.section_table_offset + index as u64 * PE_SECTION_HEADER_SIZE as u64;
        write_at(self.image.to_mut(), offset, &section);
        if index == self.section_table.len() {
            self.section_table.push(section);
        } else {
            self.section_table[index] = section;
        }
    }

    fn set_size_of_image(&mut self, size_of_image: u32) {
        let offset = self.standard_header_offset + PE_SIZE_OF_IMAGE_OFFSET as u64;
        write_at(self.image.to_mut(), offset, &size_of_image);
        self.windows_header.set_size_of_image(size_of_image);
    }

    /// Recompute the image checksum and write it into the header.
    ///
    /// The header is located by the first pe signature in the image.
    ///
    /// # Returns
    /// Returns the new checksum.
    pub fn update_checksum(&mut self) -> Result<u32, ChecksumError> {
        let checksum = patch_checksum(self.image.to_mut())?;
        self.windows_header.set_check_sum(checksum);
        Ok(checksum)
    }

    /// Compute the checksum of the image as stored in the parsed header location.
    pub fn compute_checksum(&self) -> u32 {
        compute_checksum(&self.image, (self.pe_signature_offset + PE_CHECKSUM_OFFSET as u64) as usize)
    }

    /// Returns the raw image data with all changes applied.
    pub fn data(&self) -> &[u8] { &self.image }

    /// Returns the raw image data with all changes applied, taking ownership of it.
    pub fn into_data(self) -> Vec<u8> { self.image.into_owned() }

    /// Returns the file offset of the pe signature.
    pub fn pe_signature_offset(&self) -> u64 { self.pe_signature_offset }

    /// Returns the parsed coff header.
    pub fn coff_header(&self) -> &CoffHeader { &self.coff_header }

    /// Returns the parsed standard header.
    pub fn standard_header(&self) -> &StandardHeader { &self.standard_header }

    /// Returns the parsed windows header.
    pub fn windows_header(&self) -> &GenericWindowsHeader { &self.windows_header }

    /// Returns the data directory for the requested header.
    pub fn data_directory(&self, directory: DataDirectoryType) -> Option<&ImageDataDirectory> {
        self.header_data_directory.get(&directory)
    }

    /// Returns the section header containing the data directory.
    pub fn section_header_for_data_directory(
        &self, directory: DataDirectoryType,
    ) -> Option<&SectionHeader> {
        let data_directory = self.data_directory(directory)?;
        self.section_for_rva(data_directory.virtual_address)
    }

    /// Returns the section header containing the relative virtual address.
    pub fn section_for_rva(&self, rva: u32) -> Option<&SectionHeader> {
        self.section_table.iter().find(|section| section.contains_rva(rva))
    }

    /// Resolve a relative virtual address to a file offset through the section table.
    ///
    /// # Returns
    /// Returns `None` if no section contains the address or the address lies past the raw data of its section.
    pub fn rva_to_offset(&self, rva: u32) -> Option<u64> {
        let section = self.section_for_rva(rva)?;
        let delta = rva - section.virtual_address;
        if delta >= section.size_of_raw_data {
            return None;
        }
        Some(section.pointer_to_raw_data as u64 + delta as u64)
    }

    /// Returns all section tables existing in the image.
    pub fn section_table(&self) -> &Vec<SectionHeader> { &self.section_table }
}
