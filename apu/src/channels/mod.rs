mod envelope;
mod length_counter;
mod linear_counter;
mod sweep;

pub mod dmc_channel;
pub mod noise_channel;
pub mod pulse_channel;
pub mod triangle_channel;

pub use dmc_channel::{DMCChannel, SampleReader};
pub use noise_channel::NoiseChannel;
pub use pulse_channel::PulseChannel;
pub use sweep::PulseId;
pub use triangle_channel::TriangleChannel;
