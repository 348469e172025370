// SPDX-License-Identifier: MIT

//! Interface between the garcia application and implementation of modules

pub mod effect;
pub mod module;
pub mod tables;

#[cfg(test)]
mod tests;
