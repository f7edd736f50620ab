#![allow(dead_code)]

pub mod artifacts;
pub mod churnsight_env;
