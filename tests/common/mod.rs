#![allow(dead_code)]

pub mod chunked;
pub mod readers;
