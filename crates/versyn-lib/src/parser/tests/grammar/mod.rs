mod expressions_tests;
mod items_tests;
mod literals_tests;
mod macros_tests;
mod patterns_tests;
mod types_tests;
mod verus_tests;
