#![cfg_attr(not(test), no_std)]
#[cfg(test)]
extern crate std;

pub mod config;
pub mod error;
pub mod hello;
pub mod hooks;
pub mod log;

#[cfg(all(feature = "esp32", not(test)))]
pub mod ffi;
