//! The driver-facing reasoner facade (section 6): wires `Memory`, the
//! attention loop, and an installable `Deriver` behind the single surface
//! an external driver is meant to hold onto.

pub mod nar;

pub use nar::Nar;
