//! Asset ingestion for the product viewer.
//! Mesh/material text parsers, per-vertex attribute synthesis and CPU-side
//! texture data, all producing buffer-ready flat arrays.

pub mod attributes;
pub mod mesh;
pub mod mtl;
pub mod obj;
pub mod texture;

mod directive;
