use super::*;

#[test]
fn test_second_init_is_reported() {
    // Only this test installs a global subscriber.
    assert!(init().is_ok());
    assert!(init().is_err());
}
