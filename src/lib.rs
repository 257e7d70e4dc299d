//! Resource **clone**r for **p**ortable **e**xecutables.
//!
//! Supports:
//! * Reading resource directories without loading the image
//! * Transferring icons, bitmaps, cursor groups, version info and manifests between images
//! * Rebuilding the resource section while leaving all other sections untouched
//! * Recomputing the image checksum
//!
//! See [`ResourceCloner`] for the main entry point and [`Image`] for lower-level access.
//!
//! # Examples
//!
//! ### Resource cloning
//! ```
//! use peclone::ResourceCloner;
//!
//! let source = std::fs::read(SOURCE_PATH)?;
//! let destination = std::fs::read(DESTINATION_PATH)?;
//!
//! // copy the default set of resource types into a copy of the destination image
//! let output = ResourceCloner::default().clone_resources(&source, &destination)?;
//!
//! std::fs::write(OUTPUT_PATH, output)?;
//! ```
//!
//! ### Selective transfer
//! ```
//! use peclone::{constants::*, AllowList, Image};
//!
//! let source = std::fs::read(SOURCE_PATH)?;
//! let target = std::fs::read(TARGET_PATH)?;
//!
//! // read only the icons of the source image
//! let allow_list = AllowList::from_iter([RT_ICON, RT_GROUP_ICON]);
//! let resources = Image::parse(&source[..])?.resource_tree(&allow_list)?;
//!
//! // replace the resource directory of the target image
//! let mut image = Image::parse(target)?;
//! image.set_resources(resources.into_entries())?;
//! image.update_checksum()?;
//!
//! let target = image.data();
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg_hide))]
#![cfg_attr(docsrs, doc(cfg_hide(doc)))]

extern crate alloc;

pub(crate) mod clone;
pub(crate) mod errors;
pub(crate) mod image;
pub(crate) mod resource;
pub(crate) mod util;

pub mod checksum;
pub mod constants;
pub mod types;

pub use crate::{clone::*, errors::*, image::*, resource::*};
