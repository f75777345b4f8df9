//! Ferrous DoQ infrastructure: the hickory message codec and the quinn
//! connection behind the application ports.

pub mod dns;
