/// Outbound adapters - infrastructure implementations of outbound ports
pub mod outbound;
