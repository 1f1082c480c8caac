//! XML encoding of data containers
//!
//! ```text
//! <DataContainer name="root">
//!   <Data key="count" type="Int32">5</Data>
//!   <Data key="origin" type="Point" x="0" y="1.5"/>
//!   <Data key="inner" type="Container" name="inner">
//!     <Data key="label" type="String">hello</Data>
//!   </Data>
//! </DataContainer>
//! ```
//!
//! Scalars are element text. Duration, Point and Color are carried as
//! attributes on an empty element. The `type` attribute is the kind name.

mod reader;
mod writer;

pub use reader::from_str;
pub use writer::{to_string, write};

/// Root element of a document
pub const ROOT_ELEMENT: &str = "DataContainer";
/// One element per entry
pub const ENTRY_ELEMENT: &str = "Data";
/// Container name on the root and on `Container` entries
pub const NAME_ATTR: &str = "name";
pub const KEY_ATTR: &str = "key";
pub const TYPE_ATTR: &str = "type";

const DURATION_ATTRS: [&str; 5] = ["days", "hours", "minutes", "seconds", "milliseconds"];
const POINT_ATTRS: [&str; 2] = ["x", "y"];
const COLOR_ATTRS: [&str; 3] = ["r", "g", "b"];
