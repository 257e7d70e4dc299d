//! Data types for reading, collecting and building the resource section.
//! The resource section contains the resource directory and the resource data.
//! See <https://learn.microsoft.com/en-us/windows/win32/debug/pe-format#the-rsrc-section> for more information.

use alloc::{format, string::String, vec, vec::Vec};

use ahash::RandomState;
use debug_ignore::DebugIgnore;
use indexmap::{IndexMap, IndexSet};
use log::{debug, error, trace};

use crate::{constants::*, errors::*, image::Image, types::*, util::*};


/// Resource types cloned when no other allow list is configured.
pub const DEFAULT_ALLOWED_CATEGORIES: [WORD; 6] =
    [RT_BITMAP, RT_ICON, RT_GROUP_CURSOR, RT_GROUP_ICON, RT_VERSION, RT_MANIFEST];

const RESOURCE_TYPE_NAMES: [(WORD, &str); 21] = [
    (RT_CURSOR, "cursor"),
    (RT_BITMAP, "bitmap"),
    (RT_ICON, "icon"),
    (RT_MENU, "menu"),
    (RT_DIALOG, "dialog"),
    (RT_STRING, "string"),
    (RT_FONTDIR, "fontdir"),
    (RT_FONT, "font"),
    (RT_ACCELERATOR, "accelerator"),
    (RT_RCDATA, "rcdata"),
    (RT_MESSAGETABLE, "messagetable"),
    (RT_GROUP_CURSOR, "group-cursor"),
    (RT_GROUP_ICON, "group-icon"),
    (RT_VERSION, "version"),
    (RT_DLGINCLUDE, "dlginclude"),
    (RT_PLUGPLAY, "plugplay"),
    (RT_VXD, "vxd"),
    (RT_ANICURSOR, "anicursor"),
    (RT_ANIICON, "aniicon"),
    (RT_HTML, "html"),
    (RT_MANIFEST, "manifest"),
];

/// Returns the resource type for a symbolic name such as `icon` or `group-icon`,
/// or for a decimal or `0x`-prefixed hexadecimal number.
pub fn resource_type_from_name(name: &str) -> Option<WORD> {
    let name = name.trim();
    if let Some((id, _)) =
        RESOURCE_TYPE_NAMES.iter().find(|(_, known)| known.eq_ignore_ascii_case(name))
    {
        return Some(*id);
    }
    if let Some(hex) = name.strip_prefix("0x").or_else(|| name.strip_prefix("0X")) {
        return WORD::from_str_radix(hex, 16).ok();
    }
    name.parse::<WORD>().ok()
}

/// Returns the symbolic name of a well-known resource type.
pub fn resource_type_name(category: WORD) -> Option<&'static str> {
    RESOURCE_TYPE_NAMES.iter().find(|(id, _)| *id == category).map(|(_, name)| *name)
}


/// Resource name.
/// This can either be a textual name or a raw id.
///
/// Textual names order before ids, matching the order entries are stored in a resource table.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum ResourceName {
    // utf-16 code units, without length prefix
    Name(Vec<u16>),
    // raw id
    ID(WORD),
}
impl ResourceName {
    pub fn from_string<S: AsRef<str>>(string: S) -> Self {
        Self::Name(string.as_ref().encode_utf16().collect())
    }

    pub fn to_string(&self) -> Option<String> {
        match self {
            Self::ID(_) => None,
            Self::Name(units) => Some(String::from_utf16_lossy(units)),
        }
    }

    /// Returns the size of the length-prefixed name in the string area of the resource directory.
    fn string_size(&self) -> u64 {
        match self {
            Self::ID(_) => 0,
            Self::Name(units) => 2 + units.len() as u64 * 2,
        }
    }
}

/// Key identifying a resource: its type, its name and its language.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ResourceKey {
    pub category: WORD,
    pub name:     ResourceName,
    pub language: LANGID,
}
impl ResourceKey {
    pub fn new(category: WORD, name: ResourceName, language: LANGID) -> Self {
        Self {
            category,
            name,
            language,
        }
    }
}

/// A single resource with its raw data.
/// Entries are always copied whole.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ResourceEntry {
    key:      ResourceKey,
    data:     DebugIgnore<Vec<u8>>,
    codepage: u32,
}
impl ResourceEntry {
    pub fn new(key: ResourceKey, data: Vec<u8>) -> Self { Self::with_codepage(key, data, 0) }

    pub fn with_codepage(key: ResourceKey, data: Vec<u8>, codepage: u32) -> Self {
        Self {
            key,
            data: data.into(),
            codepage,
        }
    }

    /// Returns the key of the resource.
    pub fn key(&self) -> &ResourceKey { &self.key }

    /// Returns the raw data.
    pub fn data(&self) -> &[u8] { &self.data }

    /// Returns the size of the raw data in bytes.
    pub fn size(&self) -> usize { self.data.len() }

    /// Returns the codepage of the data.
    pub fn codepage(&self) -> u32 { self.codepage }
}


/// Set of resource types eligible for cloning.
/// Resource types outside the set are never read.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AllowList {
    categories: IndexSet<WORD, RandomState>,
}
impl Default for AllowList {
    fn default() -> Self { DEFAULT_ALLOWED_CATEGORIES.into_iter().collect() }
}
impl FromIterator<WORD> for AllowList {
    fn from_iter<I: IntoIterator<Item = WORD>>(iter: I) -> Self {
        let mut categories = IndexSet::with_hasher(RandomState::new());
        categories.extend(iter);
        Self { categories }
    }
}
impl AllowList {
    /// Returns an allow list permitting no resource type.
    pub fn empty() -> Self { core::iter::empty().collect() }

    pub fn contains(&self, category: WORD) -> bool { self.categories.contains(&category) }

    /// Add a resource type to the list.
    /// # Returns
    /// Whether the resource type was not allowed before.
    pub fn insert(&mut self, category: WORD) -> bool { self.categories.insert(category) }

    /// Remove a resource type from the list.
    /// # Returns
    /// Whether the resource type was allowed before.
    pub fn remove(&mut self, category: WORD) -> bool { self.categories.shift_remove(&category) }

    pub fn iter(&self) -> impl Iterator<Item = WORD> + '_ { self.categories.iter().copied() }

    pub fn len(&self) -> usize { self.categories.len() }

    pub fn is_empty(&self) -> bool { self.categories.is_empty() }
}


type LanguageTable = IndexMap<LANGID, ResourceEntry, RandomState>;
type NameTable = IndexMap<ResourceName, LanguageTable, RandomState>;

/// Resource tree of type, name and language tables, holding resource entries at its leaves.
///
/// Entries keep the order they were inserted in. When built into a resource directory,
/// every table is written in the order required by the format instead.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct ResourceTree {
    categories: IndexMap<WORD, NameTable, RandomState>,
}

struct DirectoryLayout {
    strings_offset:      u64,
    descriptions_offset: u64,
    data_offset:         u64,
    size:                u64,
}

impl ResourceTree {
    /// Parse the resource directory starting at the given file offset of the image.
    /// Only resource types in the allow list are read, all others are skipped without descending into them.
    ///
    /// # Returns
    /// Returns an error if any part of the directory lies outside the image, if the directory
    /// does not have exactly three levels, if a resource key appears twice, if a table or data
    /// description is referenced more than once, or if the resources read exceed the size of a
    /// directory that could be written back.
    pub fn parse(
        image: &Image<'_>, directory_offset: u64, allow_list: &AllowList,
    ) -> Result<Self, ImageReadError> {
        DirectoryReader {
            image,
            base: directory_offset,
            allow_list,
            visited: IndexSet::with_hasher(RandomState::new()),
            size: 0,
        }
        .read()
    }

    /// Build a resource tree from a list of entries.
    /// Later entries replace earlier entries with the same key.
    pub fn from_entries<I: IntoIterator<Item = ResourceEntry>>(entries: I) -> Self {
        let mut tree = Self::default();
        for entry in entries {
            tree.insert(entry);
        }
        tree
    }

    /// Flatten the tree into its entries in type, name and language order.
    pub fn into_entries(self) -> Vec<ResourceEntry> {
        self.categories
            .into_values()
            .flat_map(|names| names.into_values())
            .flat_map(|languages| languages.into_values())
            .collect()
    }

    /// Insert a resource entry into the tree.
    /// If an entry with the same key already exists, it will be replaced.
    /// # Returns
    /// The replaced entry.
    pub fn insert(&mut self, entry: ResourceEntry) -> Option<ResourceEntry> {
        let key = entry.key().clone();
        self.categories
            .entry(key.category)
            .or_default()
            .entry(key.name)
            .or_default()
            .insert(key.language, entry)
    }

    /// Get a resource entry from the tree.
    pub fn get(&self, key: &ResourceKey) -> Option<&ResourceEntry> {
        self.categories.get(&key.category)?.get(&key.name)?.get(&key.language)
    }

    /// Returns the resource types present in the tree.
    pub fn categories(&self) -> impl Iterator<Item = WORD> + '_ {
        self.categories.keys().copied()
    }

    /// Returns all entries in type, name and language order.
    pub fn entries(&self) -> impl Iterator<Item = &ResourceEntry> + '_ {
        self.categories
            .values()
            .flat_map(|names| names.values())
            .flat_map(|languages| languages.values())
    }

    /// Returns the number of entries in the tree.
    pub fn len(&self) -> usize {
        self.categories
            .values()
            .flat_map(|names| names.values())
            .map(|languages| languages.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Returns the size of the resulting resource directory in bytes.
    ///
    /// # Returns
    /// Returns an error if the directory cannot be represented in the format.
    pub fn size(&self) -> Result<u32, ImageWriteError> {
        let size = self.layout()?.size;
        u32::try_from(size).map_err(|_| {
            ImageWriteError::LayoutOverflow(format!("resource directory size {:#x} exceeds {:#x}", size, u32::MAX))
        })
    }

    fn layout(&self) -> Result<DirectoryLayout, ImageWriteError> {
        check_table_counts(self.categories.keys().map(|&id| ResourceName::ID(id)))?;
        let mut tables_size = table_size(self.categories.len());
        let mut strings_size = 0u64;
        let mut descriptions_count = 0u64;
        let mut data_size = 0u64;
        for names in self.categories.values() {
            check_table_counts(names.keys().cloned())?;
            tables_size += table_size(names.len());
            for (name, languages) in names {
                if let ResourceName::Name(units) = name {
                    if units.len() > u16::MAX as usize {
                        return Err(ImageWriteError::LayoutOverflow(format!(
                            "resource name of {} characters exceeds {}",
                            units.len(),
                            u16::MAX
                        )));
                    }
                }
                check_table_counts(languages.keys().map(|&id| ResourceName::ID(id)))?;
                strings_size += name.string_size();
                tables_size += table_size(languages.len());
                descriptions_count += languages.len() as u64;
                for entry in languages.values() {
                    data_size += aligned_to(entry.size() as u64, RESOURCE_DATA_ALIGNMENT as u64);
                }
            }
        }

        let strings_offset = tables_size;
        let descriptions_offset =
            aligned_to(strings_offset + strings_size, RESOURCE_DATA_ALIGNMENT as u64);
        let data_offset =
            descriptions_offset + descriptions_count * RESOURCE_DATA_ENTRY_SIZE as u64;
        let size = data_offset + data_size;
        // offsets into the directory have to leave the subdirectory and name flag bit free
        if size >= RESOURCE_SUBDIRECTORY_FLAG as u64 {
            return Err(ImageWriteError::LayoutOverflow(format!(
                "resource directory size {:#x} exceeds {:#x}",
                size,
                RESOURCE_SUBDIRECTORY_FLAG - 1
            )));
        }
        Ok(DirectoryLayout {
            strings_offset,
            descriptions_offset,
            data_offset,
            size,
        })
    }

    /// Build the resource directory into raw bytes to be included in an image.
    /// The virtual address is used to compute the resource data addresses and has to correspond
    /// to the address the directory is placed at in the target image.
    ///
    /// The directory tables are laid out breadth first, followed by the resource names,
    /// the data descriptions and the aligned resource data.
    pub fn build(&self, virtual_address: u32) -> Result<Vec<u8>, ImageWriteError> {
        let layout = self.layout()?;
        if virtual_address as u64 + layout.size > u32::MAX as u64 {
            return Err(ImageWriteError::LayoutOverflow(format!(
                "resource directory at {:#x} with size {:#x} exceeds the address space",
                virtual_address, layout.size
            )));
        }

        let mut data = vec![0u8; layout.size as usize];

        let categories = sorted(&self.categories);
        let mut name_table = table_size(categories.len());
        let mut language_table = name_table
            + categories.iter().map(|(_, names)| table_size(names.len())).sum::<u64>();
        let mut strings_offset = layout.strings_offset;
        let mut descriptions_offset = layout.descriptions_offset;
        let mut data_offset = layout.data_offset;

        let root = table_header(categories.iter().map(|(id, _)| ResourceName::ID(**id)));
        write_at(&mut data, 0, &root);
        for (category_index, (category, names)) in categories.iter().enumerate() {
            let category_entry = ResourceDirectoryEntry {
                name_offset_or_integer_id:         **category as u32,
                data_entry_or_subdirectory_offset: name_table as u32 | RESOURCE_SUBDIRECTORY_FLAG,
            };
            write_at(&mut data, entry_offset(0, category_index), &category_entry);

            let names = sorted(*names);
            let header = table_header(names.iter().map(|(name, _)| (*name).clone()));
            write_at(&mut data, name_table, &header);
            for (name_index, (name, languages)) in names.iter().enumerate() {
                let name_offset_or_integer_id = match name {
                    ResourceName::ID(id) => *id as u32,
                    ResourceName::Name(units) => {
                        let offset = strings_offset;
                        write_at(&mut data, offset, &(units.len() as u16));
                        for (index, unit) in units.iter().enumerate() {
                            write_at(&mut data, offset + 2 + index as u64 * 2, unit);
                        }
                        strings_offset += name.string_size();
                        offset as u32 | RESOURCE_NAME_FLAG
                    }
                };
                let name_entry = ResourceDirectoryEntry {
                    name_offset_or_integer_id,
                    data_entry_or_subdirectory_offset: language_table as u32
                        | RESOURCE_SUBDIRECTORY_FLAG,
                };
                write_at(&mut data, entry_offset(name_table, name_index), &name_entry);

                let languages = sorted(*languages);
                let header = table_header(languages.iter().map(|(id, _)| ResourceName::ID(**id)));
                write_at(&mut data, language_table, &header);
                for (language_index, (language, entry)) in languages.iter().enumerate() {
                    let language_entry = ResourceDirectoryEntry {
                        name_offset_or_integer_id:         **language as u32,
                        data_entry_or_subdirectory_offset: descriptions_offset as u32,
                    };
                    write_at(&mut data, entry_offset(language_table, language_index), &language_entry);
                    let description = ResourceDataEntry {
                        data_rva: virtual_address + data_offset as u32,
                        size:     entry.size() as u32,
                        codepage: entry.codepage(),
                        reserved: 0,
                    };
                    write_at(&mut data, descriptions_offset, &description);

                    let start = data_offset as usize;
                    data[start..start + entry.size()].copy_from_slice(entry.data());
                    trace!(
                        "{:?}: {:#x?} bytes at {:#x?}",
                        entry.key(),
                        entry.size(),
                        virtual_address as u64 + data_offset
                    );

                    descriptions_offset += RESOURCE_DATA_ENTRY_SIZE as u64;
                    data_offset = aligned_to(
                        data_offset + entry.size() as u64,
                        RESOURCE_DATA_ALIGNMENT as u64,
                    );
                }
                language_table += table_size(languages.len());
            }
            name_table += table_size(names.len());
        }
        debug_assert_eq!(data_offset, layout.size);

        Ok(data)
    }
}

fn table_size(entries: usize) -> u64 {
    RESOURCE_DIRECTORY_TABLE_SIZE as u64 + RESOURCE_DIRECTORY_ENTRY_SIZE as u64 * entries as u64
}

fn entry_offset(table: u64, index: usize) -> u64 {
    table + RESOURCE_DIRECTORY_TABLE_SIZE as u64 + RESOURCE_DIRECTORY_ENTRY_SIZE as u64 * index as u64
}

fn sorted<K: Ord, V, S>(table: &IndexMap<K, V, S>) -> Vec<(&K, &V)> {
    let mut entries = table.iter().collect::<Vec<_>>();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
    entries
}

fn table_header<I: Iterator<Item = ResourceName>>(names: I) -> ResourceDirectoryTable {
    let mut table = ResourceDirectoryTable::default();
    for name in names {
        match name {
            ResourceName::Name(_) => table.number_of_name_entries += 1,
            ResourceName::ID(_) => table.number_of_id_entries += 1,
        }
    }
    table
}

fn check_table_counts<I: Iterator<Item = ResourceName>>(names: I) -> Result<(), ImageWriteError> {
    let (named, ids) = names.fold((0usize, 0usize), |(named, ids), name| match name {
        ResourceName::Name(_) => (named + 1, ids),
        ResourceName::ID(_) => (named, ids + 1),
    });
    if named > u16::MAX as usize || ids > u16::MAX as usize {
        return Err(ImageWriteError::LayoutOverflow(format!(
            "resource table with {} named and {} id entries exceeds {} entries",
            named,
            ids,
            u16::MAX
        )));
    }
    Ok(())
}


fn malformed(error: ReadError) -> ImageReadError { ImageReadError::MalformedResourceDirectory(error.0) }

/// Walks the three levels of a resource directory in an image.
struct DirectoryReader<'i, 'a> {
    image:      &'i Image<'a>,
    base:       u64,
    allow_list: &'i AllowList,
    // offsets of tables and data descriptions already read
    visited:    IndexSet<u32, RandomState>,
    // size of the directory read so far, as it would be written
    size:       u64,
}

impl DirectoryReader<'_, '_> {
    fn read(&mut self) -> Result<ResourceTree, ImageReadError> {
        let mut tree = ResourceTree::default();

        for category_entry in self.table(0, 0)? {
            let id = category_entry.name_offset_or_integer_id;
            if id & RESOURCE_NAME_FLAG != 0 || id > WORD::MAX as u32 {
                debug!("skipping resource type {:#x?}: not a resource type id", id);
                continue;
            }
            let category = id as WORD;
            if !self.allow_list.contains(category) {
                debug!(
                    "skipping resource type {} ({}): not allowed",
                    category,
                    resource_type_name(category).unwrap_or("?")
                );
                continue;
            }

            let names = self.subdirectory(category_entry.data_entry_or_subdirectory_offset, 0)?;
            for name_entry in self.table(names, 1)? {
                let name = self.name(name_entry.name_offset_or_integer_id)?;
                self.grow(name.string_size())?;
                let languages = self.subdirectory(name_entry.data_entry_or_subdirectory_offset, 1)?;
                for language_entry in self.table(languages, 2)? {
                    let language = self.language(language_entry.name_offset_or_integer_id)?;
                    let (data, codepage) = self.data(language_entry.data_entry_or_subdirectory_offset)?;
                    let key = ResourceKey::new(category, name.clone(), language);
                    trace!("{} {:?}: {:#x?} bytes", "--".repeat(3), key, data.len());
                    if let Some(previous) = tree.insert(ResourceEntry::with_codepage(key, data, codepage)) {
                        return Err(ImageReadError::MalformedResourceDirectory(format!(
                            "duplicate resource {:?}",
                            previous.key()
                        )));
                    }
                }
            }
        }

        Ok(tree)
    }

    fn table(&mut self, offset: u32, level: usize) -> Result<Vec<ResourceDirectoryEntry>, ImageReadError> {
        self.visit(offset)?;
        let image = self.image;
        let data = image.data();
        let table_offset = self.base + offset as u64;
        let table = read_at::<ResourceDirectoryTable>(data, table_offset).map_err(malformed)?;
        trace!("{} {:#x?}: {:#x?}", "--".repeat(level + 1), table_offset, table);

        let count = table.number_of_name_entries as u64 + table.number_of_id_entries as u64;
        self.grow(table_size(count as usize))?;
        let mut entries = Vec::with_capacity(count as usize);
        for index in 0..count {
            let entry_offset = table_offset
                + RESOURCE_DIRECTORY_TABLE_SIZE as u64
                + index * RESOURCE_DIRECTORY_ENTRY_SIZE as u64;
            entries.push(read_at::<ResourceDirectoryEntry>(data, entry_offset).map_err(malformed)?);
        }
        Ok(entries)
    }

    fn subdirectory(&self, offset: u32, level: usize) -> Result<u32, ImageReadError> {
        if offset & RESOURCE_SUBDIRECTORY_FLAG == 0 {
            return Err(ImageReadError::MalformedResourceDirectory(format!(
                "expected a subdirectory at level {}, found a data entry at {:#x}",
                level,
                self.base + offset as u64
            )));
        }
        Ok(offset & !RESOURCE_SUBDIRECTORY_FLAG)
    }

    fn name(&self, id: u32) -> Result<ResourceName, ImageReadError> {
        if id & RESOURCE_NAME_FLAG == 0 {
            if id > WORD::MAX as u32 {
                return Err(ImageReadError::MalformedResourceDirectory(format!(
                    "resource id {:#x} exceeds {:#x}",
                    id,
                    WORD::MAX
                )));
            }
            return Ok(ResourceName::ID(id as WORD));
        }

        let data = self.image.data();
        let address = self.base + (id & !RESOURCE_NAME_FLAG) as u64;
        let length = read_at::<u16>(data, address).map_err(malformed)? as u64;
        let start = address + 2;
        let end = start + length * 2;
        if end > data.len() as u64 {
            return Err(ImageReadError::MalformedResourceDirectory(format!(
                "resource name at {:#x} with {} characters outside image ({:#x})",
                address,
                length,
                data.len()
            )));
        }
        let units = data[start as usize..end as usize]
            .chunks_exact(2)
            .map(|unit| u16::from_le_bytes([unit[0], unit[1]]))
            .collect();
        Ok(ResourceName::Name(units))
    }

    fn language(&self, id: u32) -> Result<LANGID, ImageReadError> {
        if id & RESOURCE_NAME_FLAG != 0 || id > LANGID::MAX as u32 {
            return Err(ImageReadError::MalformedResourceDirectory(format!(
                "invalid language id {:#x}",
                id
            )));
        }
        Ok(id as LANGID)
    }

    fn data(&mut self, offset: u32) -> Result<(Vec<u8>, u32), ImageReadError> {
        if offset & RESOURCE_SUBDIRECTORY_FLAG != 0 {
            return Err(ImageReadError::MalformedResourceDirectory(format!(
                "resource directory nested deeper than three levels at {:#x}",
                self.base + (offset & !RESOURCE_SUBDIRECTORY_FLAG) as u64
            )));
        }
        self.visit(offset)?;

        let image = self.image;
        let data = image.data();
        let description = read_at::<ResourceDataEntry>(data, self.base + offset as u64).map_err(malformed)?;
        let data_rva = description.data_rva;
        let size = description.size;
        self.grow(RESOURCE_DATA_ENTRY_SIZE as u64 + aligned_to(size as u64, RESOURCE_DATA_ALIGNMENT as u64))?;
        let address = image.rva_to_offset(data_rva).ok_or_else(|| {
            ImageReadError::MalformedResourceDirectory(format!(
                "resource data address {:#x} not backed by any section",
                data_rva
            ))
        })?;
        if address + size as u64 > data.len() as u64 {
            error!(
                "resource data entry address {:#x?} with size {:#x?} ({:#x?}) outside valid range ({:#x?})",
                address,
                size,
                address + size as u64,
                data.len()
            );
            return Err(ImageReadError::MalformedResourceDirectory(format!(
                "resource data at {:#x} with size {:#x} ends at {:#x}, outside image of size {:#x}",
                address,
                size,
                address + size as u64,
                data.len()
            )));
        }
        Ok((data[address as usize..(address + size as u64) as usize].to_vec(), description.codepage))
    }

    fn visit(&mut self, offset: u32) -> Result<(), ImageReadError> {
        if !self.visited.insert(offset) {
            return Err(ImageReadError::MalformedResourceDirectory(format!(
                "resource directory structure at {:#x} referenced more than once",
                self.base + offset as u64
            )));
        }
        Ok(())
    }

    fn grow(&mut self, size: u64) -> Result<(), ImageReadError> {
        self.size += size;
        if self.size >= RESOURCE_SUBDIRECTORY_FLAG as u64 {
            return Err(ImageReadError::MalformedResourceDirectory(format!(
                "resources exceed the maximum directory size of {:#x} bytes",
                RESOURCE_SUBDIRECTORY_FLAG - 1
            )));
        }
        Ok(())
    }
}
