pub mod catalog;
pub mod pexels;
pub mod tmdb;
