//! oxide-icon: pull the best available icon for a file and save it as PNG.
//!
//! Store and Xbox packaged games are handled by scanning their content
//! directory for logo assets ([`xbox`]); everything else goes through the
//! Windows shell image lists ([`shell`]) with the padded canvas trimmed to
//! the icon's native size ([`detect`]).

pub mod config;
pub mod detect;
pub mod error;
pub mod extract;
pub mod output;
pub mod package;
pub mod png_header;
pub mod resize;
pub mod shell;
pub mod xbox;

pub use detect::detect_native_size;
pub use error::{IconError, Result};
pub use extract::{ExtractOptions, ExtractedIcon, IconSource, extract_icon};
pub use xbox::{CandidateCache, IconCandidate, SelectionRequest, select_best_icon};
