//! Tests for the simulator layer.
