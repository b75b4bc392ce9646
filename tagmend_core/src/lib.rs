//! `tagmend_core` is the core library for [tagmend](https://github.com/ifiokjr/tagmend). It reconnects placeholder tags such as `{{name}}` that a word processor has split across several markup runs, so that a templating engine can find them again.
//!
//! Word processors routinely tear a placeholder apart because of spell-check boundaries, formatting changes or copy-paste. Inside `word/document.xml` a tag typed as `{{name}}` can end up as:
//!
//! ```text
//! {</w:t></w:r><w:r><w:t>{</w:t></w:r><w:r><w:t>name</w:t></w:r><w:r><w:t>}}
//! ```
//!
//! tagmend rewrites that span back to `{{name}}` and leaves every other byte of the document alone.
//!
//! ## Processing Pipeline
//!
//! ```text
//! .docx container
//!   → Part selector (picks the word/*.xml entries)
//!   → Reconstructor (single forward scan, one edit per fragmented pair)
//!   → Rewrite pass (rewritten parts + raw copies of everything else, staged and renamed into place)
//!   → Tag census (lists the placeholders now present)
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading from `tagmend.toml`.
//! - [`reconstruct`]: The pure text transform that reconnects fragmented delimiter pairs.
//!
//! ## Key Types
//!
//! - [`DelimiterFamily`]: `{{ }}` (always on) or `[[ ]]` (opt-in).
//! - [`PartSelector`]: The prefix/suffix rule deciding which entries are document text.
//! - [`NormalizeReport`]: Per-entry outcomes and the total reconstruction count of a rewrite pass.
//! - [`PreparedTemplate`]: The document to render after normalization and census.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tagmend_core::{detect_tags, normalize};
//!
//! let count = normalize("template.docx", "normalized.docx", false).unwrap();
//! println!("reconstructed {count} tag(s)");
//!
//! for name in detect_tags("normalized.docx") {
//!     println!("found {{{{{name}}}}}");
//! }
//! ```

pub use census::*;
pub use config::*;
pub use container::*;
pub use delimiter::*;
pub use error::*;
pub use parts::*;
pub use prepare::*;
pub use reconstruct::Reconstruction;
pub use reconstruct::reconstruct;
pub use reconstruct::reconstruct_lossy;

mod census;
pub mod config;
mod container;
mod delimiter;
#[allow(unused_assignments)]
mod error;
mod parts;
mod prepare;
pub mod reconstruct;

#[cfg(test)]
mod __fixtures;
