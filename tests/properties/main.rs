mod catalog_tests;
mod reconcile_tests;
