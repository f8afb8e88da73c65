mod config_tests;
mod storage_tests;
mod store_tests;
