// Purpose: sample math with no threads or I/O

pub mod resample;
pub mod tone;
