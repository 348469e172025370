// SPDX-License-Identifier: MIT

//! Core types shared by the garcia application and its modules
//!
//! Focused on identifiers, encodings and conversions; no storage or
//! module logic lives here.

pub mod authority;
pub mod bincode;
pub mod module;
pub mod msg;
pub mod ver;
