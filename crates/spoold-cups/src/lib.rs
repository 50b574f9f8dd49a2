// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// spoold CUPS adapter — printer discovery and job submission against the OS
// print subsystem.  Two ordered paths: a native IPP client talking to the
// local CUPS daemon, and a command-line fallback over `lpstat`/`lp` with
// locale-aware parsing of their human-readable output.

pub mod command;
pub mod dispatch;
pub mod ipp;
pub mod options;
pub mod parse;

pub use command::CommandDispatch;
pub use dispatch::CupsDispatcher;
pub use ipp::IppDispatch;
