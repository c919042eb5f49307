// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Decoder implementations.

pub mod rqrr;

pub use self::rqrr::RqrrDecoder;
