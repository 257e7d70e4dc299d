//! Windows API and binary constants.

#![allow(non_upper_case_globals)]

pub type DWORD = u32;
pub type WORD = u16;
pub type LANGID = WORD;


// https://docs.microsoft.com/en-us/openspecs/windows_protocols/ms-lcid/a9eac961-e77d-41a6-90a5-ce1a8b0cdb9c
pub const LANGUAGE_ID_NEUTRAL: LANGID = 0; // 0x0000, LANG_NEUTRAL
pub const LANGUAGE_ID_EN_US: LANGID = 1033; // 0x0409, en-US


// https://docs.microsoft.com/en-us/windows/win32/debug/pe-format

pub const PE_DOS_MAGIC: WORD = 0x5a4d; // MZ
pub const PE_PTR_OFFSET: DWORD = 0x03c;
pub const PE_NT_SIGNATURE: DWORD = 0x00004550; // PE00
pub const PE_NT_SIGNATURE_BYTES: &[u8; 4] = b"PE\0\0";
pub const PE_32_MAGIC: WORD = 0x010b;
pub const PE_64_MAGIC: WORD = 0x020b;

// signature (4) + coff header (20) + offset of CheckSum in the optional header (64),
// identical for PE32 and PE32+ because the wider ImageBase is offset by the missing BaseOfData
pub const PE_CHECKSUM_OFFSET: DWORD = 0x58;
// offset of SizeOfImage in the optional header, identical for PE32 and PE32+
pub const PE_SIZE_OF_IMAGE_OFFSET: DWORD = 0x38;
pub const PE_COFF_HEADER_SIZE: DWORD = 20;
pub const PE_SECTION_HEADER_SIZE: DWORD = 40;
pub const PE_DATA_DIRECTORY_SIZE: DWORD = 8;


// https://learn.microsoft.com/en-us/windows/win32/debug/pe-format#the-rsrc-section

pub const RESOURCE_DIRECTORY_TABLE_SIZE: DWORD = 16;
pub const RESOURCE_DIRECTORY_ENTRY_SIZE: DWORD = 8;
pub const RESOURCE_DATA_ENTRY_SIZE: DWORD = 16;
pub const RESOURCE_DATA_ALIGNMENT: DWORD = 8;
pub const RESOURCE_SUBDIRECTORY_FLAG: DWORD = 0x80000000;
pub const RESOURCE_NAME_FLAG: DWORD = 0x80000000;
pub const RESOURCE_SECTION_NAME: &[u8; 8] = b".rsrc\0\0\0";


// https://docs.microsoft.com/en-us/windows/win32/menurc/resource-types

pub const RT_CURSOR: WORD = 0x01;
pub const RT_BITMAP: WORD = 0x02;
pub const RT_ICON: WORD = 0x03;
pub const RT_MENU: WORD = 0x04;
pub const RT_DIALOG: WORD = 0x05;
pub const RT_STRING: WORD = 0x06;
pub const RT_FONTDIR: WORD = 0x07;
pub const RT_FONT: WORD = 0x08;
pub const RT_ACCELERATOR: WORD = 0x09;
pub const RT_RCDATA: WORD = 0x0A;
pub const RT_MESSAGETABLE: WORD = 0x0B;
pub const RT_GROUP_CURSOR: WORD = 0x0C;
pub const RT_GROUP_ICON: WORD = 0x0E;
pub const RT_VERSION: WORD = 0x10;
pub const RT_DLGINCLUDE: WORD = 0x11;
pub const RT_PLUGPLAY: WORD = 0x13;
pub const RT_VXD: WORD = 0x14;
pub const RT_ANICURSOR: WORD = 0x15;
pub const RT_ANIICON: WORD = 0x16;
pub const RT_HTML: WORD = 0x17;
pub const RT_MANIFEST: WORD = 0x18;


// https://docs.microsoft.com/en-us/windows/win32/debug/pe-format#section-flags

pub const IMAGE_SCN_CNT_INITIALIZED_DATA: DWORD = 0x00000040;
pub const IMAGE_SCN_MEM_READ: DWORD = 0x40000000;
