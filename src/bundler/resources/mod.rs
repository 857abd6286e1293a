//! Bundled resources: icon sources and generated scripts.

pub mod icons;
pub mod scripts;
