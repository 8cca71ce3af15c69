//! Core conversion engines

pub mod excel2latex;
