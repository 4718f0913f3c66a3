// Copyright 2026 the Pressed State Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runnable demos for the pressed state crates. See the `examples` directory.
