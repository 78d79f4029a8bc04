//! `inline-editor-tokenizers` - Specialized tokenizers for `inline-editor`.
//!
//! Three field specializations plug into the kernel's
//! [`Tokenizer`](inline_editor::Tokenizer) contract:
//!
//! - [`MacroTokenizer`] — alternates plain and `${NAME}` parameter tokens and
//!   reports the set of macro names it saw.
//! - [`UrlTokenizer`] — parses text into protocol/hostname/path/query/hash
//!   segments and lays them out as synthetic lines (multi-line mode gives
//!   each segment and each query pair independent wrapping).
//! - [`RecordPairTokenizer`] — the name side of header/form `name=value`
//!   fields, detecting when a typed separator should split the text into the
//!   paired value field.
//!
//! All tokenizers are total over arbitrary input; the URL tokenizer catches
//! any internal scan failure and falls back to a single literal hostname
//! token.

pub mod macro_aware;
pub mod record_pair;
pub mod url;

mod error;

pub use error::UrlScanError;
pub use macro_aware::{MacroTokenizer, collect_macro_names};
pub use record_pair::{PairSplit, RecordPairTokenizer};
pub use url::{UrlLayout, UrlParts, UrlTokenizer, scan_url};
