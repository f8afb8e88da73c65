mod round_trip_tests;
mod sort_tests;
