//! Integration tests for the submission failure taxonomy.

use meal_lens_app::{FailureClass, NO_FILE_MESSAGE, SubmissionFailure, classify_failure};

#[test]
fn failure_classification_tests_distinguishes_the_three_classes() {
    assert_eq!(
        classify_failure(&SubmissionFailure::NoFileSelected),
        FailureClass::UserInput
    );
    assert_eq!(
        classify_failure(&SubmissionFailure::Rejected {
            status: 400,
            message: "bad image".to_string(),
        }),
        FailureClass::RemoteRejection
    );
    assert_eq!(
        classify_failure(&SubmissionFailure::Failed {
            message: "connection refused".to_string(),
        }),
        FailureClass::Transport
    );
}

#[test]
fn failure_classification_tests_every_class_carries_a_plain_message() {
    assert_eq!(SubmissionFailure::NoFileSelected.message(), NO_FILE_MESSAGE);
    assert_eq!(
        SubmissionFailure::Rejected {
            status: 503,
            message: "overloaded".to_string(),
        }
        .message(),
        "overloaded"
    );
}
