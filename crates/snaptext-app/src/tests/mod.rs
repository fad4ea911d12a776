mod event_loop_tests;
mod startup_tests;
mod support;
