mod auth_tests;
mod map_tests;
mod reservation_tests;
