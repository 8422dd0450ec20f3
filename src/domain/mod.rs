//! Domain Layer
//!
//! Entities, value objects, pure services and the outbound ports the
//! lookup pipeline depends on. Nothing in here performs I/O.

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
