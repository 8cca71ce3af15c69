//! Static conversion data

pub mod maps;
