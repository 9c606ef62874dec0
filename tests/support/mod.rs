#![allow(dead_code)]

pub mod ayat_env;
pub mod catalog;
pub mod transport;
pub mod wav;
