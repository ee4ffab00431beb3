//! Si4731 Hardware Abstraction Layer
//!
//! This crate defines the bus transport seam between the Si4731 driver and
//! whatever I2C peripheral the board provides. The driver never talks to a
//! peripheral directly; it is handed something implementing [`I2cBus`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  si4731-driver (CTS gate, facade)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  si4731-hal (this crate - I2cBus)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │  test mocks   │
//! │   I2c (any)   │       │               │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - write framing, counted reads and address probing
//!
//! Any `embedded_hal::i2c::I2c` implementation can be wrapped in
//! [`i2c::HalBus`] to satisfy [`I2cBus`].

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

// Re-export key items at crate root for convenience
pub use i2c::{BusError, HalBus, I2cBus, I2cConfig};
