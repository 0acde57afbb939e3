pub mod collab;
pub mod common;
pub mod hr;
pub mod operations;
pub mod org;
pub mod projects;

pub use collab::*;
pub use common::{generate_id, Id, Record, Table};
pub use hr::*;
pub use operations::*;
pub use org::*;
pub use projects::*;
