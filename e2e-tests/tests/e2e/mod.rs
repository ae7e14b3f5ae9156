// Shared end-to-end harness; each test binary uses a different subset
#![allow(dead_code)]

pub mod helpers;
