
mod router_tests;
