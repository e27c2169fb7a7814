//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the control core
//! against mock adapters.  All tests run on the host with no pump
//! hardware required.

mod config_channel_tests;
