//! Documentation sections and content lookup.
//!
//! A [`DocsLibrary`] owns an ordered table of [`Section`]s and answers the
//! questions a docs page needs: which section is being shown, what its HTML
//! is, and which sections come before and after it.
//!
//! Content is served from the compiled `<id>.html` file when present and
//! rendered from markdown otherwise. The id is the markdown file stem, so
//! section `cart-merging` backed by `MERGING.md` is served from
//! `MERGING.html`.

mod library;
mod section;

pub use library::{DocsLibrary, LibraryError, SECTION_NOT_FOUND_HTML};
pub use section::{Section, SectionNeighbors, default_sections};
