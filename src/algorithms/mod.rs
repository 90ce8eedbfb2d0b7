pub mod binner;
pub mod common;
pub mod encoder;
pub mod matcher;
pub mod paa;
pub mod windower;
