use parcel_core::{Parcel, ParcelStatus, ParcelValidationError};

#[test]
fn parcel_serializes_with_snake_case_status() {
    let mut parcel = Parcel::with_created_at(1000, "test", "2024-01-01T00:00:00Z");
    parcel.number = 7;
    parcel.status = ParcelStatus::Delivered;

    let json = serde_json::to_value(&parcel).unwrap();
    assert_eq!(json["number"], 7);
    assert_eq!(json["status"], "delivered");
    assert_eq!(json["created_at"], "2024-01-01T00:00:00Z");

    let back: Parcel = serde_json::from_value(json).unwrap();
    assert_eq!(back, parcel);
}

#[test]
fn validate_requires_second_precision_utc_timestamps() {
    let canonical = Parcel::with_created_at(1, "test", "2024-01-01T00:00:00Z");
    assert!(canonical.validate().is_ok());

    for rejected in [
        "2024-01-01T03:00:00+03:00",
        "2024-01-01T00:00:00+00:00",
        "2024-01-01T01:00:00.123456789Z",
        "2024-01-01t00:00:00z",
        "2024-13-01",
    ] {
        let parcel = Parcel::with_created_at(1, "test", rejected);
        assert_eq!(
            parcel.validate(),
            Err(ParcelValidationError::InvalidCreatedAt(rejected.to_string())),
            "{rejected} should be rejected"
        );
    }

    let blank = Parcel::with_created_at(1, "\t", "2024-01-01T00:00:00Z");
    assert_eq!(blank.validate(), Err(ParcelValidationError::BlankAddress));
}

#[test]
fn status_display_matches_storage_text() {
    assert_eq!(ParcelStatus::Registered.to_string(), "registered");
    assert_eq!(ParcelStatus::Sent.to_string(), "sent");
    assert_eq!("delivered".parse(), Ok(ParcelStatus::Delivered));
}
