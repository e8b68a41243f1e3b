use super::*;

#[test]
fn invalid_id_maps_to_bad_request_with_reason() {
    let (status, body) = user_error_to_response(UserError::InvalidId);
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "invalid id format — must be an integer");
}

#[test]
fn validation_maps_to_bad_request_with_message() {
    let (status, body) = user_error_to_response(UserError::Validation("Name is Required"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Name is Required");
}

#[test]
fn invalid_json_maps_to_bad_request() {
    let (status, body) = user_error_to_response(UserError::InvalidJson("EOF while parsing".to_owned()));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "invalid JSON: EOF while parsing");
}

#[test]
fn not_found_maps_to_404_with_reason() {
    let (status, body) = user_error_to_response(UserError::NotFound(5));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "User with Id of 5 not found in our records!");
}

#[test]
fn database_error_maps_to_500_without_detail() {
    let (status, body) = user_error_to_response(UserError::Database(sqlx::Error::PoolTimedOut));
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.is_empty());
}
