use crate::error::ApiError;
use crate::models::BookingRequest;

/// A booking needs all four identifying fields; an empty string counts as
/// missing, same as an absent field.
pub fn validate_booking_request(request: &BookingRequest) -> Result<(), ApiError> {
    let required = [
        &request.class_id,
        &request.name,
        &request.email,
        &request.phone,
    ];
    if required.iter().any(|field| field.is_empty()) {
        Err(ApiError::BadRequest("All fields are required".into()))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_request() -> BookingRequest {
        BookingRequest {
            class_id: "yoga-mon-9am".to_string(),
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            phone: "123".to_string(),
            ..BookingRequest::default()
        }
    }

    #[test]
    fn test_validate_booking_request() {
        assert!(validate_booking_request(&complete_request()).is_ok());

        let mut missing_email = complete_request();
        missing_email.email.clear();
        assert!(validate_booking_request(&missing_email).is_err());

        let mut missing_class = complete_request();
        missing_class.class_id.clear();
        assert!(validate_booking_request(&missing_class).is_err());
    }
}
