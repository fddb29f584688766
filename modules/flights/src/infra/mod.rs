pub mod storage;
pub mod supplier;
