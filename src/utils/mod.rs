pub mod name_cache;
