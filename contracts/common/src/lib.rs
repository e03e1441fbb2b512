#![no_std]

pub mod roles;
pub mod ttl;
