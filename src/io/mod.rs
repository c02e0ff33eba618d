// Purpose - external interfaces: control signals in, audio samples out

pub mod converter;
pub mod device;
pub mod ring;
pub mod signal;
pub mod sink;

pub use device::DeviceOpener;
pub use ring::{LoopbackOpener, RingSink, SinkTap};
pub use signal::Signal;
pub use sink::{AudioSink, SinkError, SinkFormat, SinkOpener};
