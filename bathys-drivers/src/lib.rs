//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in bathys-core for the float's hardware:
//!
//! - Pressure sources (ADS1115 + analog transducer, synthetic generator)
//! - Syringe solenoid pair
//! - Status light

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod actuator;
pub mod sensor;
