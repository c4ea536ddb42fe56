//! Pipeline stages for OneNote-to-Logseq conversion.
//!
//! Each submodule implements exactly one transformation step. Everything
//! above [`input`] and [`copy`] is pure text processing and never touches
//! the filesystem.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ metadata ──▶ assets ──▶ outline ──▶ indent ──▶ copy
//! (list)    (header)     (rename)   (blocks)    (nest)     (images)
//! ```
//!
//! 1. [`input`]   : list the folder's `.md` files in name order and derive the
//!    output layout
//! 2. [`metadata`]: strip the page header, keep title and timestamps
//! 3. [`assets`]  : rewrite `../../resources/x.png` to `../assets/x_{ts}.png`
//! 4. [`outline`] : one `- ` block per paragraph; tables stay whole
//!    (line classification lives in [`detect`])
//! 5. [`indent`]  : nest the body under its title, and the page under its
//!    parents
//! 6. [`copy`]    : copy the renamed images into the output assets folder
//!
//! [`page`] chains stages 2–5 for a single file.

pub mod assets;
pub mod copy;
pub mod detect;
pub mod indent;
pub mod input;
pub mod metadata;
pub mod outline;
pub mod page;
