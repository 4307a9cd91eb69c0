//! Rotor cipher machine engine.
//!
//! Simulates an Enigma-style machine: a plugboard, a stack of moving and
//! fixed rotors and a reflector. Every keypress steps the rotors and then
//! sends the signal through plugboard, rotors, reflector, rotors again and
//! plugboard again. The resulting substitution is self-reciprocal, so the
//! same operation both encrypts and decrypts.
//!
//! # Architecture
//!
//! ```text
//! Alphabet      (symbols <-> indices)
//!     ↓
//! Permutation   (cycle notation, forward + inverse tables)
//!     ↓ shared by Arc
//! RotorCatalog  (arena of immutable RotorBlueprints)
//!     ↓ instantiate: fresh setting per machine
//! Machine       (reflector + fixed + moving rotors, plugboard, pawls)
//!     ↓
//! Session       (setup lines, message lines, groups of five)
//! ```
//!
//! # Examples
//!
//! ```
//! use enigma::{MachineConfig, Session};
//!
//! let config = MachineConfig::parse(
//!     "A-Z
//!      4 3
//!      I MQ   (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
//!      II ME  (FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)
//!      III MV (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
//!      B R    (AY) (BR) (CU) (DH) (EQ) (FS) (GL) (IP) (JX) (KN) (MO) (TZ) (VW)",
//! )
//! .unwrap();
//!
//! let mut session = Session::new(config.build_machine().unwrap());
//! session.process_line("* B I II III AAA").unwrap();
//! let out = session.process_line("AAAAA AAAAA").unwrap();
//! assert_eq!(out.as_deref(), Some("BDZGO WCXLT"));
//! ```

#![deny(clippy::all)]

pub mod error;

mod alphabet;
mod catalog;
mod config;
mod machine;
pub mod message;
mod permutation;
mod rotor;

pub use alphabet::Alphabet;
pub use catalog::{RotorCatalog, RotorId};
pub use config::{MachineConfig, Setup};
pub use error::{EnigmaError, ErrorKind};
pub use machine::Machine;
pub use message::Session;
pub use permutation::Permutation;
pub use rotor::{Rotor, RotorBlueprint, RotorKind};
