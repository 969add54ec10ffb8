mod command_tests;
mod event_loop_tests;
