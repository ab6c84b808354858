mod scenario_tests;
mod shell_tests;
