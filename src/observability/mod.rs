//! Observability subsystem.
//!
//! Structured logging only: the gateway is stateless and short-lived per
//! request, so log events with request IDs cover its operational surface.

pub mod logging;
