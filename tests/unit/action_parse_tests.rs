use insighter_launcher::launcher::reconcile::ExistingAction;
use insighter_launcher::AppError;

#[test]
fn empty_input_means_leave_running() {
    let action = ExistingAction::parse("").expect("empty input parses");
    assert_eq!(action, ExistingAction::Leave);
}

#[test]
fn whitespace_only_input_means_leave_running() {
    let action = ExistingAction::parse("  \n").expect("whitespace input parses");
    assert_eq!(action, ExistingAction::Leave);
}

#[test]
fn stop_parses() {
    let action = ExistingAction::parse("stop\n").expect("stop parses");
    assert_eq!(action, ExistingAction::Stop);
}

#[test]
fn restart_parses() {
    let action = ExistingAction::parse(" restart ").expect("restart parses");
    assert_eq!(action, ExistingAction::Restart);
}

#[test]
fn unrecognized_input_is_an_error() {
    match ExistingAction::parse("kill") {
        Err(AppError::InvalidAction(msg)) => assert_eq!(msg, "kill"),
        other => panic!("expected invalid action error, got {other:?}"),
    }
}

#[test]
fn parsing_is_case_sensitive() {
    assert!(ExistingAction::parse("STOP").is_err());
}
