pub mod freeze_dates;
pub mod normalizer;
