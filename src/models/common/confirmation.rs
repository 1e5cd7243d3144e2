use serde::Serialize;

/// A question awaiting the user's yes/no, holding what to do on yes.
#[derive(Clone, PartialEq, Eq, Serialize, Debug)]
pub struct Confirmation<T> {
    pub message: String,
    #[serde(skip)]
    pub pending: T,
}

impl<T> Confirmation<T> {
    pub fn new(message: impl Into<String>, pending: T) -> Self {
        Confirmation {
            message: message.into(),
            pending,
        }
    }
}

/// Takes the pending operation out of `confirmation` when the user accepted.
///
/// Both answers close the dialog.
pub fn confirmation_answer<T>(confirmation: &mut Option<Confirmation<T>>, accepted: bool) -> Option<T> {
    confirmation
        .take()
        .filter(|_| accepted)
        .map(|confirmation| confirmation.pending)
}
