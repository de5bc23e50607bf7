use crate::api::{handle_error, Api, ApiResult, ErrorData};
use crate::model::{Credentials, PasswordChange, SignUp, User};
use crate::store::{Action, RequestId, RequestKind, Store, ThunkResult};
use tracing::info;

impl Store {
    /// Signs in, then loads the profile with the new token before keeping it.
    pub async fn login(&self, api: &Api, credentials: &Credentials) -> ThunkResult<User> {
        let request = self.begin(RequestKind::Login);
        let result = match api.sign_in(credentials).await {
            Ok(token) => with_user(api, token).await,
            Err(e) => Err(e),
        };
        self.authenticate(api, request, result).await
    }

    /// Creates an account for a new user and signs them in.
    pub async fn sign_up(&self, api: &Api, sign_up: &SignUp) -> ThunkResult<User> {
        let request = self.begin(RequestKind::SignUp);
        let result = match api.sign_up(sign_up).await {
            Ok(token) => with_user(api, token).await,
            Err(e) => Err(e),
        };
        self.authenticate(api, request, result).await
    }

    /// Reloads the profile of the signed-in user.
    pub async fn fetch_user(&self, api: &Api) -> ThunkResult<User> {
        self.run(RequestKind::FetchUser, api.get_user(), Action::UserFetched)
            .await
    }

    /// Changes the password. The server issues a new token, which replaces the old one.
    pub async fn change_password(&self, api: &Api, change: &PasswordChange) -> ThunkResult<()> {
        let request = self.begin(RequestKind::ChangePassword);
        let token = match api.change_password(change).await {
            Ok(token) => token,
            Err(e) => return Err(self.reject(request, handle_error(&e))),
        };
        if let Err(e) = api.tokens().set(token.clone()).await {
            return Err(self.reject(request, ErrorData::new(format!("{e:#}"))));
        }
        self.dispatch(Action::TokenReplaced(request, token));
        Ok(())
    }

    /// Forgets the session and resets every slice.
    pub async fn logout(&self, api: &Api) -> crate::Result<()> {
        self.dispatch(Action::ClearAll);
        api.tokens().clear().await?;
        info!("Signed out");
        Ok(())
    }

    async fn authenticate(
        &self,
        api: &Api,
        request: RequestId,
        result: ApiResult<(String, User)>,
    ) -> ThunkResult<User> {
        let (token, user) = match result {
            Ok(signed_in) => signed_in,
            Err(e) => {
                return Err(self.reject(request, handle_error(&e)));
            }
        };
        if let Err(e) = api.tokens().set(token.clone()).await {
            return Err(self.reject(request, ErrorData::new(format!("{e:#}"))));
        }
        self.dispatch(Action::Authenticated {
            request,
            token,
            user: user.clone(),
        });
        Ok(user)
    }
}

async fn with_user(api: &Api, token: String) -> ApiResult<(String, User)> {
    let user = api.get_user_with_token(&token).await?;
    Ok((token, user))
}

#[cfg(test)]
mod tests {
    use crate::api::TestHttp;
    use crate::model::{Credentials, PasswordChange, SignUp};
    use crate::session::TokenStore;
    use crate::store::{selectors, Action, LoadingState, Store};
    use crate::test::{account, user_json};
    use reqwest::Method;
    use serde_json::json;
    use tempfile::TempDir;

    fn credentials() -> Credentials {
        Credentials {
            email: "ann@example.com".to_string(),
            password: "hunter22".to_string(),
        }
    }

    #[tokio::test]
    async fn login_stores_token_and_user() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("token.json");
        let http = TestHttp::new();
        http.respond(Method::POST, "/signin", json!({"token": "tok-1", "user": {}}));
        http.respond(Method::GET, "/api/user", json!({"user": user_json("ann")}));
        let api = crate::api::Api::new(http.clone(), TokenStore::load(&path).await.unwrap());
        let store = Store::new();

        let user = store.login(&api, &credentials()).await.unwrap();

        assert_eq!(user.username, "ann");
        let state = store.state();
        assert_eq!(state.user.user, Some(user));
        assert_eq!(state.user.token.as_deref(), Some("tok-1"));
        assert!(selectors::is_authenticated(&state));
        assert_eq!(api.tokens().token().as_deref(), Some("tok-1"));
        assert!(path.is_file());
        // The profile is loaded with the fresh token, not a stored one.
        assert_eq!(http.requests()[1].token(), Some("tok-1"));
    }

    #[tokio::test]
    async fn failed_login_keeps_signed_out() {
        let http = TestHttp::new();
        http.fail(
            Method::POST,
            "/signin",
            401,
            json!({"message": "Wrong email or password"}),
        );
        let api = crate::test::api(&http);
        let store = Store::new();

        let error = store.login(&api, &credentials()).await.unwrap_err();
        assert_eq!(error.message, "Wrong email or password");
        let state = store.state();
        assert_eq!(state.user.status.loading, LoadingState::Failed);
        assert!(state.user.token.is_none());
        assert!(api.tokens().token().is_none());
    }

    #[tokio::test]
    async fn profile_failure_does_not_keep_token() {
        let http = TestHttp::new();
        http.respond(Method::POST, "/user", json!({"token": "tok"}));
        http.fail(Method::GET, "/api/user", 500, json!({}));
        let api = crate::test::api(&http);
        let store = Store::new();

        let sign_up = SignUp {
            email: "ann@example.com".to_string(),
            username: "ann".to_string(),
            password: "hunter22".to_string(),
        };
        store.sign_up(&api, &sign_up).await.unwrap_err();
        assert!(api.tokens().token().is_none());
        assert!(!store.select(selectors::is_authenticated));
    }

    #[tokio::test]
    async fn change_password_replaces_only_the_token() {
        let http = TestHttp::new();
        http.respond(Method::POST, "/signin", json!({"token": "old"}));
        http.respond(Method::GET, "/api/user", json!({"user": user_json("ann")}));
        http.respond(Method::PATCH, "/api/user/password", json!({"token": "new"}));
        let api = crate::test::api(&http);
        let store = Store::new();
        store.login(&api, &credentials()).await.unwrap();
        let before = store.state();

        let change = PasswordChange {
            old_password: "hunter22".to_string(),
            new_password: "correct horse".to_string(),
        };
        store.change_password(&api, &change).await.unwrap();

        let after = store.state();
        assert_eq!(after.user.token.as_deref(), Some("new"));
        assert_eq!(after.user.user, before.user.user);
        assert_eq!(api.tokens().token().as_deref(), Some("new"));
        assert_eq!(http.requests()[2].token(), Some("old"));
        assert_eq!(
            http.requests()[2].body().unwrap()["oldPassword"],
            "hunter22"
        );
    }

    #[tokio::test]
    async fn failed_password_change_keeps_the_session() {
        let http = TestHttp::new();
        http.fail(
            Method::PATCH,
            "/api/user/password",
            400,
            json!({"message": "Old password is incorrect"}),
        );
        let api = crate::test::api(&http);
        api.tokens().set("tok".to_string()).await.unwrap();
        let store = Store::new();

        let change = PasswordChange {
            old_password: "x".to_string(),
            new_password: "y".to_string(),
        };
        let error = store.change_password(&api, &change).await.unwrap_err();
        assert_eq!(error.message, "Old password is incorrect");
        assert_eq!(api.tokens().token().as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn logout_resets_everything() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("token.json");
        let tokens = TokenStore::load(&path).await.unwrap();
        tokens.set("tok".to_string()).await.unwrap();
        let http = TestHttp::new();
        let api = crate::api::Api::new(http, tokens);
        let store = Store::new();
        store.dispatch(Action::SetAccounts(vec![account("a", "1")]));

        store.logout(&api).await.unwrap();

        assert_eq!(store.state(), crate::store::RootState::default());
        assert!(!path.exists());
        assert!(api.tokens().token().is_none());
    }
}
