pub use vat_core::*;
