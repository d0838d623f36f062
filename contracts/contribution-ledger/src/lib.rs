#![no_std]

pub mod contract;
pub mod conversion;
pub mod data;
pub mod price_feed;
mod storage;
pub mod validation;
mod withdrawal;
