use crate::model::User;
use crate::store::Status;

/// The session slice: who is signed in and with which token.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UserState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub status: Status,
}

impl UserState {
    pub(crate) fn sign_in(&mut self, token: String, user: User) {
        self.token = Some(token);
        self.user = Some(user);
    }
}
