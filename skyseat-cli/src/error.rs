use skyseat_core::SeatingError;

/// Message shown to the operator for a failed operation. The session always
/// carries on afterwards.
pub fn describe(err: &SeatingError) -> String {
    match err {
        SeatingError::NotFound(_) => "Invalid seat number. Please try again.".to_string(),
        SeatingError::InvalidState { .. } => format!("{}.", err),
        SeatingError::Input(_) => format!("{}. Please try again.", err),
        SeatingError::Conflict(_) => {
            format!("{}. The seat was left free, please try again.", err)
        }
        SeatingError::GenerationExhausted { .. } => {
            tracing::error!("Reference generation failed: {}", err);
            format!("{}. No booking was made.", err)
        }
        SeatingError::Persistence(source) => {
            tracing::error!("Booking store failure: {}", source);
            "The booking store could not be updated. No changes were made.".to_string()
        }
    }
}
