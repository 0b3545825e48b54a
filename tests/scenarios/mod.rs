//! End-to-end scenarios, one module per kind of exported entity.

mod arrays;
mod classes;
mod diagnostics;
mod docs;
mod enums;
mod externals;
mod structs;
