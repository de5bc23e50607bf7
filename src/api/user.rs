use crate::api::{Api, ApiResult, Request};
use crate::model::{Credentials, PasswordChange, SignUp, User};
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
struct TokenBody {
    token: String,
}

#[derive(Deserialize)]
struct UserBody {
    user: User,
}

impl Api {
    /// `POST /signin`, returning a bearer token.
    pub async fn sign_in(&self, credentials: &Credentials) -> ApiResult<String> {
        let body: TokenBody = self.call(Request::post("/signin", json!(credentials))).await?;
        Ok(body.token)
    }

    /// `POST /user`, returning a bearer token for the new user.
    pub async fn sign_up(&self, sign_up: &SignUp) -> ApiResult<String> {
        let body: TokenBody = self.call(Request::post("/user", json!(sign_up))).await?;
        Ok(body.token)
    }

    /// `GET /api/user` authenticated with the stored session token.
    pub async fn get_user(&self) -> ApiResult<User> {
        let body: UserBody = self.call(Request::get("/api/user")).await?;
        Ok(body.user)
    }

    /// `GET /api/user` authenticated with `token`, which need not be stored yet.
    pub async fn get_user_with_token(&self, token: &str) -> ApiResult<User> {
        let body: UserBody = self
            .call(Request::get("/api/user").with_token(token))
            .await?;
        Ok(body.user)
    }

    /// `PATCH /api/user/password`, returning the replacement token.
    pub async fn change_password(&self, change: &PasswordChange) -> ApiResult<String> {
        let body: TokenBody = self
            .call(Request::patch("/api/user/password", json!(change)))
            .await?;
        Ok(body.token)
    }
}
