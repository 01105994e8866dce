// src/core/mod.rs

pub mod date;
pub mod html;
pub mod net;
pub mod sanitize;
