pub mod hamming;
pub mod mindist;
