pub mod jack;
pub mod ports;
pub mod wav;
