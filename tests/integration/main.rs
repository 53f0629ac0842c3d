//! End-to-end tests against the full router over the in-memory store.

mod helpers;

mod convert_test;
mod directory_test;
mod file_test;
mod version_test;
