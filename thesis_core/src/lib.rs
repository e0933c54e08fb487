// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
//! Thesis template generation: turns university formatting profiles into Word
//! templates, READMEs and a static website.
pub mod docx;
pub mod error;
pub mod factory;
pub mod file_io;
pub mod layout;
pub mod profile;
pub mod readme;
pub mod site;
pub mod skeleton;
pub mod slug;
pub mod types;
