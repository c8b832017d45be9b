mod binding;
mod column;
mod convert;
mod cursor;
mod error;
mod extraction;
mod handler;
mod limit;
mod parser;
mod row;
mod struct_map;
mod util;
mod value;

pub use binding::*;
pub use column::*;
pub use convert::*;
pub use cursor::*;
pub use error::*;
pub use extraction::*;
pub use handler::*;
pub use limit::*;
pub use parser::{extract_value, parse};
pub use row::*;
pub use struct_map::*;
pub use util::*;
pub use value::*;
