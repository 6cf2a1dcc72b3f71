// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ready-made [`GraphicsBackend`](crate::GraphicsBackend) and
//! [`Rasterizer`](crate::Rasterizer) implementations.

#[cfg(feature = "cpu")]
pub mod cpu;
#[cfg(feature = "swash")]
pub mod swash;
