//! Tests for the domain user model.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[fixture]
fn valid_id() -> UserId {
    UserId::new(VALID_ID).expect("valid id")
}

#[rstest]
fn user_id_keeps_the_original_string(valid_id: UserId) {
    assert_eq!(valid_id.as_ref(), VALID_ID);
    assert_eq!(valid_id.as_uuid().to_string(), VALID_ID);
}

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
#[case("3fa85f64-5717-4562-b3fc-2c963f66afa6 ", UserValidationError::InvalidId)]
fn user_id_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw), Err(expected));
}

#[rstest]
fn random_user_ids_differ() {
    assert_ne!(UserId::random(), UserId::random());
}

#[rstest]
#[case("ada", "ada")]
#[case("  ada  ", "ada")]
#[case("Ada Lovelace", "Ada Lovelace")]
fn username_is_trimmed(#[case] raw: &str, #[case] expected: &str) {
    let username = Username::new(raw).expect("valid username");
    assert_eq!(username.as_ref(), expected);
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t\n")]
fn username_rejects_blank_input(#[case] raw: &str) {
    assert_eq!(Username::new(raw), Err(UserValidationError::EmptyUsername));
}

#[rstest]
fn username_accepts_maximum_length() {
    let name = "a".repeat(USERNAME_MAX);
    assert_eq!(
        Username::new(&name).expect("name at the limit").as_ref(),
        name
    );
}

#[rstest]
fn username_rejects_overlong_input() {
    let name = "a".repeat(USERNAME_MAX + 1);
    assert_eq!(
        Username::new(name),
        Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX })
    );
}

#[rstest]
fn try_from_strings_reports_the_first_invalid_part() {
    assert_eq!(
        User::try_from_strings("bad", "   "),
        Err(UserValidationError::InvalidId)
    );
    assert_eq!(
        User::try_from_strings(VALID_ID, "   "),
        Err(UserValidationError::EmptyUsername)
    );
}

#[rstest]
fn user_serialises_to_camel_case(valid_id: UserId) {
    let user = User::new(valid_id, Username::new("ada").expect("valid username"));
    let value = serde_json::to_value(&user).expect("serialise user");
    assert_eq!(value, json!({ "id": VALID_ID, "username": "ada" }));
}

#[rstest]
#[case(json!({ "id": "not-a-uuid", "username": "ada" }))]
#[case(json!({ "id": VALID_ID, "username": "  " }))]
#[case(json!({ "id": VALID_ID, "username": "ada", "extra": true }))]
fn user_deserialisation_validates_fields(#[case] payload: serde_json::Value) {
    assert!(serde_json::from_value::<User>(payload).is_err());
}
