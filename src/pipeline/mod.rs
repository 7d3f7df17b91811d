//! Pipeline module - table reading, field mapping, and record rendering

pub mod convert;
pub mod error;
pub mod fields;
pub mod key;
pub mod mapping;
pub mod negotiate;
pub mod render;
pub mod table;

pub use convert::*;
pub use error::*;
pub use fields::*;
pub use key::*;
pub use mapping::*;
pub use negotiate::*;
pub use render::*;
pub use table::*;
