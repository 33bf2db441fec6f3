//! Test suites for the clink router.
