//! Version comparison
//!
//! - [`rpm`]: rpmvercmp-style ordering of `(epoch, version, release)` triples

pub mod rpm;
