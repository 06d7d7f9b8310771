pub mod daily_normal;
pub mod frost_profile;
pub mod frost_window;
pub mod station;
pub mod zip_centroid;
