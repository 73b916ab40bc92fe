//! API modules for the `lark` namespace
//!
//! Each submodule provides functions under `lark::<module>::*`

pub mod worksheet;
